//! # Paper Catalog Client
//!
//! Client side of the paper catalog: a typed HTTP API ([`CatalogApi`]) and a state
//! layer shaped for views.
//!
//! - [`store::Store`] holds one [`state::ResourceState`] per resource plus alerts
//! - [`actions`] call the API and dispatch `Loading`, then the result or the failure
//! - [`browse::visible_papers`] narrows the loaded papers for the browse page
//!
//! ```rust,no_run
//! use paper_catalog_client::{actions, CatalogApi, Store};
//!
//! # async fn run() -> Result<(), paper_catalog_client::ClientError> {
//! let api = CatalogApi::new("http://127.0.0.1:5000").with_token("secret");
//! let mut store = Store::new();
//! actions::get_papers(&mut store, &api).await?;
//! println!("{} papers", store.state().papers.items.len());
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod api;
pub mod browse;
pub mod error;
pub mod model;
pub mod state;
pub mod store;

pub use api::CatalogApi;
pub use error::{ClientError, FieldError};
pub use store::{CatalogState, Store};
