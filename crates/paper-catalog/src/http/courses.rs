use super::{body, parse_id, removed, AppState};
use crate::auth::AuthAdmin;
use crate::error::{CatalogError, Resource};
use crate::model::{CourseFilter, CourseInput, CourseView};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/college/{college_id}", get(list_by_college))
        .route("/{id}", get(show).put(update).delete(destroy))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<CourseView>>, CatalogError> {
    let courses = state.catalog.courses.list(CourseFilter::default()).await?;
    Ok(Json(courses))
}

async fn list_by_college(
    State(state): State<AppState>,
    Path(college_id): Path<String>,
) -> Result<Json<Vec<CourseView>>, CatalogError> {
    let filter = CourseFilter {
        college: Some(parse_id(&college_id, Resource::College)?),
    };
    Ok(Json(state.catalog.courses.list(filter).await?))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseView>, CatalogError> {
    let id = parse_id(&id, Resource::Course)?;
    Ok(Json(state.catalog.courses.get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    payload: Result<Json<CourseInput>, JsonRejection>,
) -> Result<Json<CourseView>, CatalogError> {
    let params = body(payload)?.validate()?;
    Ok(Json(state.catalog.courses.create(params).await?))
}

async fn update(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    payload: Result<Json<CourseInput>, JsonRejection>,
) -> Result<Json<CourseView>, CatalogError> {
    let id = parse_id(&id, Resource::Course)?;
    let params = body(payload)?.validate()?;
    Ok(Json(state.catalog.courses.update(id, params).await?))
}

async fn destroy(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>, CatalogError> {
    let id = parse_id(&id, Resource::Course)?;
    state.catalog.courses.delete(id).await?;
    Ok(removed(Resource::Course))
}
