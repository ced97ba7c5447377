//! # HTTP Layer
//!
//! The REST surface under `/api`. Each resource has its own module of handlers; they
//! validate input, call the matching [`Catalog`] client and let [`CatalogError`] turn
//! failures into responses. Reads are public, writes take an [`AuthAdmin`].
//!
//! [`AuthAdmin`]: crate::auth::AuthAdmin

mod colleges;
mod courses;
mod papers;
mod semesters;
mod subjects;

use crate::auth::AdminDirectory;
use crate::error::{CatalogError, Resource};
use crate::lifecycle::Catalog;
use crate::model::input;
use crate::storage::UploadStore;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRef;
use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared state of every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub admins: Arc<AdminDirectory>,
}

impl FromRef<AppState> for Arc<AdminDirectory> {
    fn from_ref(state: &AppState) -> Self {
        state.admins.clone()
    }
}

/// Builds the application router. Stored uploads are served read-only under `/uploads`.
pub fn router(state: AppState, uploads: &UploadStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health))
        .nest("/colleges", colleges::routes())
        .nest("/courses", courses::routes())
        .nest("/semesters", semesters::routes())
        .nest("/subjects", subjects::routes())
        .nest("/papers", papers::routes(uploads.max_bytes()));

    Router::new()
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(uploads.root()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// A path identifier. Malformed ids are reported like missing documents.
fn parse_id<I: FromStr>(raw: &str, resource: Resource) -> Result<I, CatalogError> {
    input::reference(raw, resource)
}

/// Unwraps a JSON body, turning a malformed one into a validation error.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, CatalogError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| CatalogError::field("body", rejection.body_text()))
}

/// `{ "msg": "<Resource> removed" }`
fn removed(resource: Resource) -> Json<Value> {
    Json(json!({ "msg": resource.removed() }))
}
