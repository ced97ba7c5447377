//! Paper endpoints: browse, filter, upload (multipart), edit, delete and download.

use super::{body, parse_id, removed, AppState};
use crate::auth::AuthAdmin;
use crate::error::{CatalogError, Resource};
use crate::model::{PaperChangesInput, PaperFilter, PaperInput, PaperQuery, PaperView};
use crate::storage::UploadedFile;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value};

const FILE_FIELD: &str = "file";
/// Room for the text fields and multipart framing on top of the file itself.
const FORM_OVERHEAD: u64 = 64 * 1024;

pub(super) fn routes(max_upload_bytes: u64) -> Router<AppState> {
    let limit = usize::try_from(max_upload_bytes.saturating_add(FORM_OVERHEAD)).unwrap_or(usize::MAX);
    Router::new()
        .route("/", get(list).post(upload))
        .route("/filter", get(filter))
        .route("/download/{id}", get(download))
        .route("/{id}", get(show).put(update).delete(destroy))
        .layer(DefaultBodyLimit::max(limit))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<PaperView>>, CatalogError> {
    let papers = state.catalog.papers.list(PaperFilter::default()).await?;
    Ok(Json(papers))
}

async fn filter(
    State(state): State<AppState>,
    Query(query): Query<PaperQuery>,
) -> Result<Json<Vec<PaperView>>, CatalogError> {
    let filter = query.validate()?;
    Ok(Json(state.catalog.papers.list(filter).await?))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PaperView>, CatalogError> {
    let id = parse_id(&id, Resource::Paper)?;
    Ok(Json(state.catalog.papers.get(id).await?))
}

fn multipart_error(e: MultipartError) -> CatalogError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        CatalogError::FileRejected("File too large".to_string())
    } else {
        CatalogError::field(FILE_FIELD, e.body_text())
    }
}

/// Splits the form into its text fields and the `file` part.
async fn read_form(
    mut multipart: Multipart,
) -> Result<(PaperInput, Option<UploadedFile>), CatalogError> {
    let mut fields = Map::new();
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == FILE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;
            file = Some(UploadedFile {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let text = field.text().await.map_err(multipart_error)?;
            fields.insert(name, Value::String(text));
        }
    }

    let input = serde_json::from_value(Value::Object(fields))
        .map_err(|e| CatalogError::field("body", e.to_string()))?;
    Ok((input, file))
}

async fn upload(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    multipart: Multipart,
) -> Result<Json<PaperView>, CatalogError> {
    let (input, file) = read_form(multipart).await?;
    let draft = input.validate(file.is_some())?;
    let file = file.ok_or_else(|| CatalogError::field(FILE_FIELD, "File is required"))?;
    Ok(Json(state.catalog.papers.upload(draft, file, admin.id).await?))
}

async fn update(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<String>,
    payload: Result<Json<PaperChangesInput>, JsonRejection>,
) -> Result<Json<PaperView>, CatalogError> {
    let id = parse_id(&id, Resource::Paper)?;
    let changes = body(payload)?.validate()?;
    Ok(Json(state.catalog.papers.update(id, admin.id, changes).await?))
}

async fn destroy(
    State(state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>, CatalogError> {
    let id = parse_id(&id, Resource::Paper)?;
    state.catalog.papers.delete(id, admin.id).await?;
    Ok(removed(Resource::Paper))
}

/// `attachment; filename="<name>"`, with characters that cannot appear in a quoted
/// header value replaced.
fn attachment(file_name: &str) -> HeaderValue {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    HeaderValue::from_str(&format!("attachment; filename=\"{safe}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let id = parse_id(&id, Resource::Paper)?;
    let download = state.catalog.papers.download(id).await?;
    let headers = [
        (CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
        (CONTENT_DISPOSITION, attachment(&download.paper.file_name)),
    ];
    Ok((headers, download.bytes))
}
