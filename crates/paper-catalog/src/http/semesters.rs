use super::{body, parse_id, removed, AppState};
use crate::auth::AuthAdmin;
use crate::error::{CatalogError, Resource};
use crate::model::{SemesterFilter, SemesterInput, SemesterView};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/course/{course_id}", get(list_by_course))
        .route("/{id}", get(show).put(update).delete(destroy))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<SemesterView>>, CatalogError> {
    let semesters = state.catalog.semesters.list(SemesterFilter::default()).await?;
    Ok(Json(semesters))
}

async fn list_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<SemesterView>>, CatalogError> {
    let filter = SemesterFilter {
        course: Some(parse_id(&course_id, Resource::Course)?),
    };
    Ok(Json(state.catalog.semesters.list(filter).await?))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SemesterView>, CatalogError> {
    let id = parse_id(&id, Resource::Semester)?;
    Ok(Json(state.catalog.semesters.get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    payload: Result<Json<SemesterInput>, JsonRejection>,
) -> Result<Json<SemesterView>, CatalogError> {
    let params = body(payload)?.validate()?;
    Ok(Json(state.catalog.semesters.create(params).await?))
}

async fn update(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    payload: Result<Json<SemesterInput>, JsonRejection>,
) -> Result<Json<SemesterView>, CatalogError> {
    let id = parse_id(&id, Resource::Semester)?;
    let params = body(payload)?.validate()?;
    Ok(Json(state.catalog.semesters.update(id, params).await?))
}

async fn destroy(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>, CatalogError> {
    let id = parse_id(&id, Resource::Semester)?;
    state.catalog.semesters.delete(id).await?;
    Ok(removed(Resource::Semester))
}
