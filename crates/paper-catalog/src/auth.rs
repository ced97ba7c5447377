//! Administrator authentication.
//!
//! Write endpoints require a token identifying a configured administrator, sent as
//! `x-auth-token: <token>` or `Authorization: Bearer <token>`. Handlers take an
//! [`AuthAdmin`] argument; requests without a valid token never reach them.

use crate::config::AdminConfig;
use crate::error::CatalogError;
use crate::model::AdminId;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub const TOKEN_HEADER: &str = "x-auth-token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: AdminId,
    pub name: String,
}

/// Known administrators, keyed by token.
#[derive(Debug, Default)]
pub struct AdminDirectory {
    by_token: HashMap<String, Admin>,
}

impl AdminDirectory {
    pub fn new(admins: &[AdminConfig]) -> Self {
        let by_token = admins
            .iter()
            .map(|a| {
                let admin = Admin {
                    id: a.id.unwrap_or_default(),
                    name: a.name.clone(),
                };
                (a.token.clone(), admin)
            })
            .collect();
        Self { by_token }
    }

    pub fn authenticate(&self, token: &str) -> Option<&Admin> {
        self.by_token.get(token)
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

fn token(headers: &HeaderMap) -> Option<&str> {
    if let Some(value) = headers.get(TOKEN_HEADER) {
        return value.to_str().ok().map(str::trim);
    }
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// The administrator making the request.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub Admin);

impl<S> FromRequestParts<S> for AuthAdmin
where
    Arc<AdminDirectory>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = token(&parts.headers).filter(|t| !t.is_empty()) else {
            return Err(CatalogError::Unauthorized(
                "No token, authorization denied".to_string(),
            ));
        };
        let directory = Arc::<AdminDirectory>::from_ref(state);
        match directory.authenticate(token) {
            Some(admin) => {
                debug!(admin = %admin.name, "Authenticated");
                Ok(AuthAdmin(admin.clone()))
            }
            None => Err(CatalogError::Unauthorized("Token is not valid".to_string())),
        }
    }
}
