use super::{body, parse_id, removed, AppState};
use crate::auth::AuthAdmin;
use crate::error::{CatalogError, Resource};
use crate::model::{SubjectFilter, SubjectInput, SubjectView};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/semester/{semester_id}", get(list_by_semester))
        .route("/course/{course_id}", get(list_by_course))
        .route("/{id}", get(show).put(update).delete(destroy))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<SubjectView>>, CatalogError> {
    let subjects = state.catalog.subjects.list(SubjectFilter::default()).await?;
    Ok(Json(subjects))
}

async fn list_by_semester(
    State(state): State<AppState>,
    Path(semester_id): Path<String>,
) -> Result<Json<Vec<SubjectView>>, CatalogError> {
    let filter = SubjectFilter {
        semester: Some(parse_id(&semester_id, Resource::Semester)?),
        course: None,
    };
    Ok(Json(state.catalog.subjects.list(filter).await?))
}

async fn list_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<SubjectView>>, CatalogError> {
    let filter = SubjectFilter {
        semester: None,
        course: Some(parse_id(&course_id, Resource::Course)?),
    };
    Ok(Json(state.catalog.subjects.list(filter).await?))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubjectView>, CatalogError> {
    let id = parse_id(&id, Resource::Subject)?;
    Ok(Json(state.catalog.subjects.get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    payload: Result<Json<SubjectInput>, JsonRejection>,
) -> Result<Json<SubjectView>, CatalogError> {
    let draft = body(payload)?.validate()?;
    Ok(Json(state.catalog.subjects.create(draft).await?))
}

async fn update(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
    payload: Result<Json<SubjectInput>, JsonRejection>,
) -> Result<Json<SubjectView>, CatalogError> {
    let id = parse_id(&id, Resource::Subject)?;
    let draft = body(payload)?.validate()?;
    Ok(Json(state.catalog.subjects.update(id, draft).await?))
}

async fn destroy(
    State(state): State<AppState>,
    _admin: AuthAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>, CatalogError> {
    let id = parse_id(&id, Resource::Subject)?;
    state.catalog.subjects.delete(id).await?;
    Ok(removed(Resource::Subject))
}
