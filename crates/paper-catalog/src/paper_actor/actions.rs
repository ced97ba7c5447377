//! Custom actions for the Paper actor.

/// Operations on a [`Paper`](crate::model::Paper) beyond CRUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperAction {
    /// Counts one download and returns the updated paper.
    ///
    /// # Errors
    /// `NotFound("File not found")` when the stored file is gone; the counter is
    /// left unchanged.
    RecordDownload,
}
