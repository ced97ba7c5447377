//! HTTP client of the catalog REST API.

use crate::error::{ClientError, ErrorBody};
use crate::model::*;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const TOKEN_HEADER: &str = "x-auth-token";

#[derive(Deserialize)]
struct Message {
    msg: String,
}

#[derive(Deserialize)]
struct Health {
    status: String,
}

/// Typed access to `/api`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    http: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl CatalogApi {
    /// `base` is the server root, e.g. `http://127.0.0.1:5000`.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Sends `token` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}/api{path}", self.base));
        match &self.token {
            Some(token) => builder.header(TOKEN_HEADER, token),
            None => builder,
        }
    }

    async fn checked(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        Err(body.into_error(status.as_u16()))
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::checked(builder.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        Self::send(self.request(Method::GET, path)).await
    }

    async fn write<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        Self::send(self.request(method, path).json(body)).await
    }

    /// Returns the confirmation message.
    async fn remove(&self, path: &str) -> Result<String, ClientError> {
        let message: Message = Self::send(self.request(Method::DELETE, path)).await?;
        Ok(message.msg)
    }

    /// `"ok"` when the server is up.
    pub async fn health(&self) -> Result<String, ClientError> {
        let health: Health = self.get("/health").await?;
        Ok(health.status)
    }

    // --- Colleges ---

    pub async fn colleges(&self) -> Result<Vec<College>, ClientError> {
        self.get("/colleges").await
    }

    pub async fn college(&self, id: &str) -> Result<College, ClientError> {
        self.get(&format!("/colleges/{id}")).await
    }

    #[instrument(skip(self))]
    pub async fn create_college(&self, input: &CollegeInput) -> Result<College, ClientError> {
        self.write(Method::POST, "/colleges", input).await
    }

    pub async fn update_college(&self, id: &str, input: &CollegeInput) -> Result<College, ClientError> {
        self.write(Method::PUT, &format!("/colleges/{id}"), input).await
    }

    pub async fn delete_college(&self, id: &str) -> Result<String, ClientError> {
        self.remove(&format!("/colleges/{id}")).await
    }

    // --- Courses ---

    pub async fn courses(&self) -> Result<Vec<Course>, ClientError> {
        self.get("/courses").await
    }

    pub async fn courses_by_college(&self, college: &str) -> Result<Vec<Course>, ClientError> {
        self.get(&format!("/courses/college/{college}")).await
    }

    pub async fn course(&self, id: &str) -> Result<Course, ClientError> {
        self.get(&format!("/courses/{id}")).await
    }

    #[instrument(skip(self))]
    pub async fn create_course(&self, input: &CourseInput) -> Result<Course, ClientError> {
        self.write(Method::POST, "/courses", input).await
    }

    pub async fn update_course(&self, id: &str, input: &CourseInput) -> Result<Course, ClientError> {
        self.write(Method::PUT, &format!("/courses/{id}"), input).await
    }

    pub async fn delete_course(&self, id: &str) -> Result<String, ClientError> {
        self.remove(&format!("/courses/{id}")).await
    }

    // --- Semesters ---

    pub async fn semesters(&self) -> Result<Vec<Semester>, ClientError> {
        self.get("/semesters").await
    }

    pub async fn semesters_by_course(&self, course: &str) -> Result<Vec<Semester>, ClientError> {
        self.get(&format!("/semesters/course/{course}")).await
    }

    pub async fn semester(&self, id: &str) -> Result<Semester, ClientError> {
        self.get(&format!("/semesters/{id}")).await
    }

    #[instrument(skip(self))]
    pub async fn create_semester(&self, input: &SemesterInput) -> Result<Semester, ClientError> {
        self.write(Method::POST, "/semesters", input).await
    }

    pub async fn update_semester(
        &self,
        id: &str,
        input: &SemesterInput,
    ) -> Result<Semester, ClientError> {
        self.write(Method::PUT, &format!("/semesters/{id}"), input).await
    }

    pub async fn delete_semester(&self, id: &str) -> Result<String, ClientError> {
        self.remove(&format!("/semesters/{id}")).await
    }

    // --- Subjects ---

    pub async fn subjects(&self) -> Result<Vec<Subject>, ClientError> {
        self.get("/subjects").await
    }

    pub async fn subjects_by_semester(&self, semester: &str) -> Result<Vec<Subject>, ClientError> {
        self.get(&format!("/subjects/semester/{semester}")).await
    }

    pub async fn subjects_by_course(&self, course: &str) -> Result<Vec<Subject>, ClientError> {
        self.get(&format!("/subjects/course/{course}")).await
    }

    pub async fn subject(&self, id: &str) -> Result<Subject, ClientError> {
        self.get(&format!("/subjects/{id}")).await
    }

    #[instrument(skip(self))]
    pub async fn create_subject(&self, input: &SubjectInput) -> Result<Subject, ClientError> {
        self.write(Method::POST, "/subjects", input).await
    }

    pub async fn update_subject(&self, id: &str, input: &SubjectInput) -> Result<Subject, ClientError> {
        self.write(Method::PUT, &format!("/subjects/{id}"), input).await
    }

    pub async fn delete_subject(&self, id: &str) -> Result<String, ClientError> {
        self.remove(&format!("/subjects/{id}")).await
    }

    // --- Papers ---

    pub async fn papers(&self) -> Result<Vec<Paper>, ClientError> {
        self.get("/papers").await
    }

    pub async fn filter_papers(&self, query: &PaperQuery) -> Result<Vec<Paper>, ClientError> {
        Self::send(self.request(Method::GET, "/papers/filter").query(query)).await
    }

    pub async fn paper(&self, id: &str) -> Result<Paper, ClientError> {
        self.get(&format!("/papers/{id}")).await
    }

    /// Uploads a paper as a multipart form with the PDF in the `file` part.
    #[instrument(skip(self, upload), fields(title = %upload.title, size = upload.bytes.len()))]
    pub async fn upload_paper(&self, upload: &PaperUpload) -> Result<Paper, ClientError> {
        let file = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)?;

        let mut form = Form::new()
            .text("title", upload.title.clone())
            .text("course", upload.course.clone())
            .text("semester", upload.semester.clone())
            .text("subject", upload.subject.clone())
            .text("year", upload.year.to_string())
            .text("examType", upload.exam_type.clone());
        if let Some(description) = &upload.description {
            form = form.text("description", description.clone());
        }
        if let Some(college) = &upload.college {
            form = form.text("college", college.clone());
        }
        let form = form.part("file", file);

        Self::send(self.request(Method::POST, "/papers").multipart(form)).await
    }

    pub async fn update_paper(&self, id: &str, changes: &PaperChanges) -> Result<Paper, ClientError> {
        self.write(Method::PUT, &format!("/papers/{id}"), changes).await
    }

    pub async fn delete_paper(&self, id: &str) -> Result<String, ClientError> {
        self.remove(&format!("/papers/{id}")).await
    }

    /// Downloads the PDF of a paper. Each call counts as one download.
    #[instrument(skip(self))]
    pub async fn download_paper(&self, id: &str) -> Result<PaperFile, ClientError> {
        let response = self
            .request(Method::GET, &format!("/papers/download/{id}"))
            .send()
            .await?;
        let response = Self::checked(response).await?;
        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_name)
            .unwrap_or_else(|| format!("{id}.pdf"));
        let bytes = response.bytes().await?.to_vec();
        debug!(%file_name, size = bytes.len(), "Downloaded paper");
        Ok(PaperFile { file_name, bytes })
    }
}

/// The `filename` of an `attachment; filename="..."` header.
fn attachment_name(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_names_are_unquoted() {
        assert_eq!(
            attachment_name("attachment; filename=\"midterm.pdf\"").as_deref(),
            Some("midterm.pdf")
        );
        assert_eq!(attachment_name("attachment"), None);
    }

    #[test]
    fn base_urls_lose_trailing_slashes() {
        let api = CatalogApi::new("http://localhost:5000/");
        assert_eq!(api.base, "http://localhost:5000");
    }
}
