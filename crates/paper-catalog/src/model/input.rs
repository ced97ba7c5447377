//! Lenient request-body parsing.
//!
//! Bodies arrive from HTML forms as often as from JSON clients, so every field is read
//! as a raw [`Value`]: numbers may be JSON numbers or numeric strings, and an empty
//! string counts as absent. [`Fields`] collects the itemized errors of one body.

use crate::error::{CatalogError, FieldError, Resource};
use serde_json::Value;
use std::str::FromStr;

/// Accumulates field errors while a body is validated.
#[derive(Debug, Default)]
pub struct Fields {
    errors: Vec<FieldError>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, param: &str, msg: impl Into<String>) {
        self.errors.push(FieldError::new(param, msg));
    }

    /// Non-empty trimmed text, or an error `msg` on `param`.
    pub fn required_text(&mut self, value: &Option<Value>, param: &str, msg: &str) -> Option<String> {
        let text = text(value);
        if text.is_none() {
            self.push(param, msg);
        }
        text
    }

    /// A required non-negative whole number.
    pub fn required_number(&mut self, value: &Option<Value>, param: &str, msg: &str) -> Option<u32> {
        match number(value) {
            Some(Ok(n)) => Some(n),
            Some(Err(())) => {
                self.push(param, format!("{} must be a number", label(param)));
                None
            }
            None => {
                self.push(param, msg);
                None
            }
        }
    }

    /// An optional non-negative whole number.
    pub fn optional_number(&mut self, value: &Option<Value>, param: &str) -> Option<u32> {
        match number(value) {
            Some(Ok(n)) => Some(n),
            Some(Err(())) => {
                self.push(param, format!("{} must be a number", label(param)));
                None
            }
            None => None,
        }
    }

    /// Fails with every collected error, if there are any.
    pub fn finish(self) -> Result<(), CatalogError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Validation(self.errors))
        }
    }
}

fn label(param: &str) -> String {
    let mut chars = param.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Trimmed text of a string or number value. Empty strings and `null` are absent.
pub fn text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// `None` when absent, `Some(Err)` when present but not a non-negative whole number.
pub fn number(value: &Option<Value>) -> Option<Result<u32, ()>> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(
            n.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or(()),
        ),
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.trim().parse::<u32>().map_err(|_| ())),
        Some(_) => Some(Err(())),
    }
}

/// Parses a referenced identifier. A malformed reference is reported the same way as a
/// missing parent.
pub fn reference<I: FromStr>(raw: &str, parent: Resource) -> Result<I, CatalogError> {
    raw.parse().map_err(|_| parent.not_found())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_accept_numeric_strings() {
        assert_eq!(number(&Some(json!(4))), Some(Ok(4)));
        assert_eq!(number(&Some(json!(" 2023 "))), Some(Ok(2023)));
        assert_eq!(number(&Some(json!("four"))), Some(Err(())));
        assert_eq!(number(&Some(json!(-1))), Some(Err(())));
        assert_eq!(number(&Some(json!(""))), None);
        assert_eq!(number(&None), None);
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(text(&Some(json!("  "))), None);
        assert_eq!(text(&Some(json!(" Tech U "))), Some("Tech U".to_string()));
        assert_eq!(text(&Some(json!(12))), Some("12".to_string()));
    }

    #[test]
    fn fields_collect_every_error() {
        let mut fields = Fields::new();
        fields.required_text(&None, "name", "Name is required");
        fields.required_number(&Some(json!("x")), "duration", "Duration is required");
        match fields.finish() {
            Err(CatalogError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].msg, "Name is required");
                assert_eq!(errors[1].msg, "Duration must be a number");
                assert_eq!(errors[1].param, "duration");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
