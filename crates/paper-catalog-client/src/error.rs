use serde::{Deserialize, Serialize};

/// One itemized validation failure reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The API answered with an error status.
    #[error("{status}: {msg}")]
    Api {
        status: u16,
        msg: String,
        /// Field errors of a rejected body; empty for other failures.
        errors: Vec<FieldError>,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ClientError::Api { errors, .. } => errors,
            ClientError::Transport(_) => &[],
        }
    }
}

/// `{ msg }` or `{ errors: [...] }`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl ErrorBody {
    pub(crate) fn into_error(self, status: u16) -> ClientError {
        let msg = match (self.msg, self.errors.first()) {
            (Some(msg), _) => msg,
            (None, Some(first)) => first.msg.clone(),
            (None, None) => format!("Request failed with status {status}"),
        };
        ClientError::Api {
            status,
            msg,
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_bodies_keep_every_field() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"errors":[{"msg":"Name is required","param":"name"},{"msg":"Code is required","param":"code"}]}"#,
        )
        .unwrap();
        let err = body.into_error(400);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.field_errors().len(), 2);
        assert_eq!(err.to_string(), "400: Name is required");
    }

    #[test]
    fn message_bodies_have_no_field_errors() {
        let body: ErrorBody = serde_json::from_str(r#"{"msg":"College not found"}"#).unwrap();
        let err = body.into_error(404);
        assert!(err.field_errors().is_empty());
        assert_eq!(err.to_string(), "404: College not found");
    }
}
