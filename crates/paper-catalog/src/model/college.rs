use super::input::Fields;
use super::CollegeId;
use crate::error::CatalogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A college, the root of the catalog hierarchy.
///
/// # Actor Framework
/// Implements [`ActorEntity`](catalog_framework::ActorEntity) in
/// [`college_actor`](crate::college_actor). Name and code are each unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: CollegeId,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated fields of a college. Used for both create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct CollegeCreate {
    pub name: String,
    pub code: String,
    pub location: Option<String>,
}

/// College body as received over HTTP.
#[derive(Debug, Default, Deserialize)]
pub struct CollegeInput {
    pub name: Option<Value>,
    pub code: Option<Value>,
    pub location: Option<Value>,
}

impl CollegeInput {
    pub fn validate(self) -> Result<CollegeCreate, CatalogError> {
        let mut fields = Fields::new();
        let name = fields.required_text(&self.name, "name", "Name is required");
        let code = fields.required_text(&self.code, "code", "Code is required");
        fields.finish()?;

        Ok(CollegeCreate {
            name: name.unwrap_or_default(),
            code: code.unwrap_or_default(),
            location: super::input::text(&self.location),
        })
    }
}

impl College {
    pub fn new(id: CollegeId, params: CollegeCreate) -> Self {
        Self {
            id,
            name: params.name,
            code: params.code,
            location: params.location,
            created_at: Utc::now(),
        }
    }
}
