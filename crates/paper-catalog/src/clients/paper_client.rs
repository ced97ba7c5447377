//! # Paper Client
//!
//! Wraps a `ResourceClient<Paper>` and owns the upload workflow around it:
//!
//! 1. reject files that are not PDFs or are too large, before anything is written
//! 2. store the file in the upload directory
//! 3. resolve the paper's lineage from the parents the form named
//! 4. create the paper; if anything after step 2 fails, the stored file is removed
//!
//! Reads expand all four parent references.

use super::{found, parents};
use crate::error::{CatalogError, Resource};
use crate::model::{
    AdminId, CodeRef, College, CollegeId, Course, CourseId, Paper, PaperChanges, PaperDraft,
    PaperFilter, PaperId, PaperParents, PaperRemoval, PaperUpdate, PaperView, Semester,
    SemesterRef, Subject, SubjectId,
};
use crate::paper_actor::{PaperAction, PaperContext};
use crate::storage::{StoredFile, UploadedFile};
use async_trait::async_trait;
use catalog_framework::{ActorClient, FrameworkError, ResourceClient};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct PaperClient {
    inner: ResourceClient<Paper>,
    ctx: PaperContext,
}

/// A downloaded paper file.
#[derive(Debug, Clone)]
pub struct Download {
    /// The paper after its counter was incremented.
    pub paper: Paper,
    pub bytes: Vec<u8>,
}

fn is_pdf(file: &UploadedFile) -> bool {
    let extension = Path::new(&file.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    let content_type = file
        .content_type
        .as_deref()
        .is_some_and(|t| t.to_ascii_lowercase().contains("pdf"));
    extension && content_type
}

impl PaperClient {
    pub fn new(inner: ResourceClient<Paper>, ctx: PaperContext) -> Self {
        Self { inner, ctx }
    }

    /// Accepts only PDFs within the configured size limit.
    pub fn check_file(&self, file: &UploadedFile) -> Result<(), CatalogError> {
        if !is_pdf(file) {
            return Err(CatalogError::FileRejected("PDFs only".to_string()));
        }
        if file.bytes.len() as u64 > self.ctx.uploads.max_bytes() {
            return Err(CatalogError::FileRejected("File too large".to_string()));
        }
        Ok(())
    }

    async fn expand(&self, papers: Vec<Paper>) -> Result<Vec<PaperView>, CatalogError> {
        let colleges = parents::<_, _, CodeRef<CollegeId>>(
            &papers,
            |p| p.college,
            &self.ctx.colleges,
            Resource::College,
            |c: &College| c.id,
        )
        .await?;
        let courses = parents::<_, _, CodeRef<CourseId>>(
            &papers,
            |p| p.course,
            &self.ctx.courses,
            Resource::Course,
            |c: &Course| c.id,
        )
        .await?;
        let semesters = parents::<_, _, SemesterRef>(
            &papers,
            |p| p.semester,
            &self.ctx.semesters,
            Resource::Semester,
            |s: &Semester| s.id,
        )
        .await?;
        let subjects = parents::<_, _, CodeRef<SubjectId>>(
            &papers,
            |p| p.subject,
            &self.ctx.subjects,
            Resource::Subject,
            |s: &Subject| s.id,
        )
        .await?;

        Ok(papers
            .into_iter()
            .map(|p| {
                let expanded = PaperParents {
                    college: colleges.get(&p.college),
                    course: courses.get(&p.course),
                    semester: semesters.get(&p.semester),
                    subject: subjects.get(&p.subject),
                };
                p.into_view(expanded)
            })
            .collect())
    }

    async fn expand_one(&self, paper: Paper) -> Result<PaperView, CatalogError> {
        let mut views = self.expand(vec![paper]).await?;
        views.pop().ok_or_else(|| Resource::Paper.not_found())
    }

    /// Stores `file` and creates a paper for it, uploaded by `admin`.
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.bytes.len()))]
    pub async fn upload(
        &self,
        draft: PaperDraft,
        file: UploadedFile,
        admin: AdminId,
    ) -> Result<PaperView, CatalogError> {
        self.check_file(&file)?;
        let stored = self.ctx.uploads.save(&file.file_name, &file.bytes).await?;

        match self.create_for(draft, stored.clone(), admin).await {
            Ok(paper) => {
                info!(id = %paper.id, path = %paper.file_path, "Paper uploaded");
                self.expand_one(paper).await
            }
            Err(e) => {
                self.discard(&stored).await;
                Err(e)
            }
        }
    }

    async fn create_for(
        &self,
        draft: PaperDraft,
        file: StoredFile,
        admin: AdminId,
    ) -> Result<Paper, CatalogError> {
        let lineage = self.ctx.lineage().resolve(draft.parents).await?;
        self.inner
            .create(draft.into_create(lineage, file, admin))
            .await
            .map_err(Self::map_error)
    }

    /// Best effort: a leftover file is logged, not reported to the caller.
    async fn discard(&self, stored: &StoredFile) {
        match self.ctx.uploads.remove(&stored.path).await {
            Ok(_) => debug!(path = %stored.path, "Discarded upload of rejected paper"),
            Err(e) => warn!(path = %stored.path, error = %e, "Failed to discard upload"),
        }
    }

    /// Papers matching `filter`, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: PaperFilter) -> Result<Vec<PaperView>, CatalogError> {
        let papers = self.inner.list(filter).await.map_err(Self::map_error)?;
        self.expand(papers).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: PaperId) -> Result<PaperView, CatalogError> {
        let paper = found(self.fetch(id).await?, Resource::Paper)?;
        self.expand_one(paper).await
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: PaperId,
        requested_by: AdminId,
        changes: PaperChanges,
    ) -> Result<PaperView, CatalogError> {
        debug!("Sending request");
        let update = PaperUpdate {
            requested_by,
            changes,
        };
        let paper = self.inner.update(id, update).await.map_err(Self::map_error)?;
        self.expand_one(paper).await
    }

    /// Deletes the paper and its file. Only the uploader may do this.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: PaperId, requested_by: AdminId) -> Result<(), CatalogError> {
        self.remove(id, PaperRemoval { requested_by }).await
    }

    /// Counts a download and reads the file back.
    #[instrument(skip(self))]
    pub async fn download(&self, id: PaperId) -> Result<Download, CatalogError> {
        let paper = self
            .inner
            .perform_action(id, PaperAction::RecordDownload)
            .await
            .map_err(Self::map_error)?;
        let bytes = self.ctx.uploads.read(&paper.file_path).await?;
        debug!(%id, downloads = paper.download_count, "Serving paper file");
        Ok(Download { paper, bytes })
    }
}

#[async_trait]
impl ActorClient<Paper> for PaperClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Paper> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> CatalogError {
        CatalogError::from_framework(e, Resource::Paper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::UploadStore;
    use catalog_framework::mock::MockClient;

    struct Fixture {
        client: PaperClient,
        papers: MockClient<Paper>,
        _colleges: MockClient<College>,
        _courses: MockClient<Course>,
        _semesters: MockClient<Semester>,
        subjects: MockClient<Subject>,
        dir: tempfile::TempDir,
    }

    fn fixture(max_bytes: u64) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let papers = MockClient::new();
        let colleges = MockClient::new();
        let courses = MockClient::new();
        let semesters = MockClient::new();
        let subjects = MockClient::new();
        let ctx = PaperContext {
            colleges: colleges.client(),
            courses: courses.client(),
            semesters: semesters.client(),
            subjects: subjects.client(),
            uploads: UploadStore::new(dir.path(), max_bytes),
        };
        Fixture {
            client: PaperClient::new(papers.client(), ctx),
            papers,
            _colleges: colleges,
            _courses: courses,
            _semesters: semesters,
            subjects,
            dir,
        }
    }

    fn file(name: &str, content_type: &str, bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: Some(content_type.to_string()),
            bytes: bytes.to_vec(),
        }
    }

    fn stored_files(dir: &tempfile::TempDir) -> usize {
        std::fs::read_dir(dir.path().join("papers"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    fn draft(subject: SubjectId) -> PaperDraft {
        PaperDraft {
            title: "Midterm 2023".into(),
            description: None,
            year: 2023,
            exam_type: crate::model::ExamType::MidTerm,
            parents: crate::model::LineageRequest {
                subject,
                semester: None,
                course: None,
                college: None,
            },
        }
    }

    #[tokio::test]
    async fn only_pdfs_within_the_limit_pass() {
        let f = fixture(8);
        assert!(f.client.check_file(&file("a.pdf", "application/pdf", b"%PDF")).is_ok());
        assert!(f.client.check_file(&file("A.PDF", "application/pdf", b"%PDF")).is_ok());

        let wrong_type = f.client.check_file(&file("a.pdf", "text/plain", b"x"));
        assert!(matches!(wrong_type, Err(CatalogError::FileRejected(msg)) if msg == "PDFs only"));
        let wrong_name = f.client.check_file(&file("a.txt", "application/pdf", b"x"));
        assert!(matches!(wrong_name, Err(CatalogError::FileRejected(_))));

        let too_large = f.client.check_file(&file("a.pdf", "application/pdf", b"123456789"));
        assert!(matches!(too_large, Err(CatalogError::FileRejected(msg)) if msg == "File too large"));
    }

    #[tokio::test]
    async fn rejected_type_writes_nothing() {
        let f = fixture(1024);
        let err = f
            .client
            .upload(draft(SubjectId::new()), file("notes.txt", "text/plain", b"hi"), AdminId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::FileRejected(_)));
        assert_eq!(stored_files(&f.dir), 0);
        f.papers.verify();
    }

    #[tokio::test]
    async fn failed_lineage_removes_the_stored_file() {
        let mut f = fixture(1024);
        let subject = SubjectId::new();
        f.subjects.expect_get(subject).return_ok(None);

        let err = f
            .client
            .upload(draft(subject), file("q.pdf", "application/pdf", b"%PDF-1.4"), AdminId::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Subject not found");
        assert_eq!(stored_files(&f.dir), 0);
        f.subjects.verify();
    }

    #[tokio::test]
    async fn missing_file_fails_the_download() {
        let mut f = fixture(1024);
        let id = PaperId::new();
        f.papers.expect_action(id).return_err(FrameworkError::EntityError(Box::new(
            CatalogError::NotFound("File not found".into()),
        )));

        let err = f.client.download(id).await.unwrap_err();
        assert_eq!(err.to_string(), "File not found");
    }
}
