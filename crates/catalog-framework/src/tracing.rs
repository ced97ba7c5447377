//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber used by the catalog
//! server and its tools.
//!
//! ## Configuration
//!
//! Levels come from the `RUST_LOG` environment variable. The output uses the compact
//! format without module paths (`with_target(false)`); actor logs carry an `entity_type`
//! field instead.
//!
//! ```bash
//! # Lifecycle and writes
//! RUST_LOG=info paper-catalog
//!
//! # Full request payloads and reads
//! RUST_LOG=debug paper-catalog
//!
//! # Only the HTTP layer
//! RUST_LOG=tower_http=debug,paper_catalog=info paper-catalog
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Actor started` and `Shutdown` with the final collection size
//! - **Writes**: `Created`, `Updated`, `Deleted` at `info` with the document id
//! - **Rejections**: unique index conflicts and hook errors at `warn`
//! - **Reads**: `Get`, `GetMany`, `List` at `debug`
//!
//! A create of a course that names a missing college reads, at `debug`:
//!
//! ```text
//! DEBUG Create entity_type="Course" params=CourseCreate { name: "B.Tech", .. }
//! DEBUG Get entity_type="College" id=5b0e.. found=false
//!  WARN on_create failed entity_type="Course" error=College not found
//! ```

/// Initializes the global subscriber. Call once, at program start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
