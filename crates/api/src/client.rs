use async_trait::async_trait;
use thiserror::Error;

use course_core::model::{Chapter, ChapterId, Module, ModuleId, ProgressOverview, Subchapter,
    SubchapterId};
use course_core::progress::Progress;

/// Errors surfaced by the data-source layer.
///
/// Every underlying failure — network, not-found, malformed response — funnels
/// through this taxonomy. Fetch failures propagate whole: callers never render
/// a partially assembled tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("unavailable: {0}")]
    Unavailable(String),
}

/// Denormalized subchapter-page fetch: everything the page needs in one call,
/// avoiding a redundant module lookup.
#[derive(Debug, Clone)]
pub struct SubchapterBundle {
    pub module: Module,
    pub chapter: Chapter,
    pub subchapter: Subchapter,
    pub all_subchapters: Vec<Subchapter>,
}

/// Read contract for course content.
#[async_trait]
pub trait CourseApi: Send + Sync {
    /// Fetch a module by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing, or other fetch errors.
    async fn get_module(&self, module_id: ModuleId) -> Result<Module, ApiError>;

    /// Fetch a module's chapters, in source order.
    ///
    /// The order is not re-sorted here; it must only be stable across calls
    /// within one page load.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the fetch fails.
    async fn get_chapters(&self, module_id: ModuleId) -> Result<Vec<Chapter>, ApiError>;

    /// Fetch one chapter's subchapters.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the fetch fails.
    async fn get_subchapters(
        &self,
        module_id: ModuleId,
        chapter_id: ChapterId,
    ) -> Result<Vec<Subchapter>, ApiError>;

    /// Fetch the denormalized bundle for a subchapter page.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing, or other fetch errors.
    async fn get_subchapter_full(
        &self,
        subchapter_id: SubchapterId,
    ) -> Result<SubchapterBundle, ApiError>;
}

/// Contract for the learner's progress overview and the single write-back.
#[async_trait]
pub trait ProgressApi: Send + Sync {
    /// Fetch the learner's per-module progress collection.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the fetch fails.
    async fn get_overview(&self) -> Result<ProgressOverview, ApiError>;

    /// Persist an updated module percentage. Last write wins at the server;
    /// monotonicity is enforced client-side at write time.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the write fails.
    async fn update_module_progress(
        &self,
        module_id: ModuleId,
        progress: Progress,
    ) -> Result<(), ApiError>;
}
