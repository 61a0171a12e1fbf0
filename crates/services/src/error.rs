//! Shared error types for the services crate.

use thiserror::Error;

use api::ApiError;
use course_core::model::SubchapterId;

/// Errors emitted while loading the module page.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModuleViewError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while loading a subchapter page or advancing through it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubchapterViewError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The requested subchapter is not part of its module's resolved sequence.
    /// Fatal to the advancement flow: callers fall back to the module overview
    /// rather than guess a position.
    #[error("subchapter {0} is not in the module sequence")]
    SequenceMismatch(SubchapterId),
}
