use super::{body, parse_id, removed, AppState};
use crate::auth::AuthAdmin;
use crate::error::{CatalogError, Resource};
use crate::model::{College, CollegeInput};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(destroy))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<College>>, CatalogError> {
    Ok(Json(state.catalog.colleges.list().await?))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<College>, CatalogError> {
    let id = parse_id(&id, Resource::College)?;
    Ok(Json(state.catalog.colleges.get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    payload: Result<Json<CollegeInput>, JsonRejection>,
) -> Result<Json<College>, CatalogError> {
    let params = body(payload)?.validate()?;
    Ok(Json(state.catalog.colleges.create(params).await?))
}

async fn update(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    payload: Result<Json<CollegeInput>, JsonRejection>,
) -> Result<Json<College>, CatalogError> {
    let id = parse_id(&id, Resource::College)?;
    let params = body(payload)?.validate()?;
    Ok(Json(state.catalog.colleges.update(id, params).await?))
}

async fn destroy(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>, CatalogError> {
    let id = parse_id(&id, Resource::College)?;
    state.catalog.colleges.delete(id).await?;
    Ok(removed(Resource::College))
}
