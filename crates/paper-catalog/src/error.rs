//! Error taxonomy shared by every catalog resource.
//!
//! Entity hooks, resource clients and HTTP handlers all speak [`CatalogError`]. It is
//! the `Error` type of every [`ActorEntity`](catalog_framework::ActorEntity) in this
//! crate, so a hook error travels through the actor boxed inside
//! [`FrameworkError::EntityError`] and is recovered by [`CatalogError::from_framework`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_framework::FrameworkError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::path::PathBuf;
use tracing::error;

/// The five catalog collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    College,
    Course,
    Semester,
    Subject,
    Paper,
}

impl Resource {
    pub fn name(self) -> &'static str {
        match self {
            Resource::College => "College",
            Resource::Course => "Course",
            Resource::Semester => "Semester",
            Resource::Subject => "Subject",
            Resource::Paper => "Paper",
        }
    }

    /// `"<Resource> not found"`, also used for malformed identifiers.
    pub fn not_found(self) -> CatalogError {
        CatalogError::NotFound(format!("{self} not found"))
    }

    /// Confirmation body text for a successful delete.
    pub fn removed(self) -> String {
        format!("{self} removed")
    }

    fn conflict(self) -> CatalogError {
        let msg = match self {
            Resource::College => "College already exists",
            Resource::Course => "Course already exists in this college",
            Resource::Semester => "Semester already exists in this course",
            Resource::Subject => "Subject already exists in this semester",
            Resource::Paper => "Paper already exists",
        };
        CatalogError::Conflict(msg.to_string())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One itemized validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
}

impl FieldError {
    pub fn new(param: &str, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: param.to_string(),
        }
    }
}

/// Upload directory failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Path {0:?} is outside the upload directory")]
    OutsideRoot(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Wrong file type or oversize upload.
    #[error("{0}")]
    FileRejected(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An actor stopped answering.
    #[error("Actor unavailable: {0}")]
    Unavailable(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.msg.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl CatalogError {
    pub fn field(param: &str, msg: impl Into<String>) -> Self {
        CatalogError::Validation(vec![FieldError::new(param, msg)])
    }

    /// Translates an actor reply for `resource` into the catalog taxonomy.
    pub fn from_framework(e: FrameworkError, resource: Resource) -> Self {
        match e {
            FrameworkError::NotFound(_) => resource.not_found(),
            FrameworkError::Conflict { .. } => resource.conflict(),
            FrameworkError::EntityError(inner) => match inner.downcast::<CatalogError>() {
                Ok(catalog) => *catalog,
                Err(other) => CatalogError::Unavailable(other.to_string()),
            },
            other @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                CatalogError::Unavailable(other.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_)
            | CatalogError::Conflict(_)
            | CatalogError::FileRejected(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            CatalogError::Storage(_) | CatalogError::Unavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            CatalogError::Validation(errors) => json!({ "errors": errors }),
            CatalogError::Storage(_) | CatalogError::Unavailable(_) => {
                error!(error = %self, "Request failed");
                json!({ "msg": "Server Error" })
            }
            other => json!({ "msg": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_conflicts_carry_resource_messages() {
        let e = CatalogError::from_framework(
            FrameworkError::Conflict {
                index: "code_college",
                value: "CS1".into(),
            },
            Resource::Course,
        );
        assert!(matches!(&e, CatalogError::Conflict(msg) if msg == "Course already exists in this college"));
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn entity_errors_are_unboxed() {
        let boxed = FrameworkError::EntityError(Box::new(CatalogError::Unauthorized(
            "Not authorized to delete this paper".into(),
        )));
        let e = CatalogError::from_framework(boxed, Resource::Paper);
        assert_eq!(e.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(e.to_string(), "Not authorized to delete this paper");
    }

    #[test]
    fn missing_documents_use_resource_name() {
        let e = CatalogError::from_framework(FrameworkError::NotFound("x".into()), Resource::Semester);
        assert_eq!(e.to_string(), "Semester not found");
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn closed_actors_are_server_errors() {
        let e = CatalogError::from_framework(FrameworkError::ActorClosed, Resource::College);
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
