use std::sync::Arc;

use api::{ApiError, CourseApi};
use course_core::model::ModuleId;
use course_core::sequence::FlatSequence;

/// Rebuilds a module's flat subchapter sequence from nested per-chapter
/// fetches.
///
/// Chapters are walked in the order the source returned them; the final
/// sequence is then sorted into its canonical `(order_sequence, id)` order, so
/// the result does not depend on fetch order at all.
#[derive(Clone)]
pub struct TreeAssembler {
    api: Arc<dyn CourseApi>,
}

impl TreeAssembler {
    #[must_use]
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        Self { api }
    }

    /// Fetches every chapter's subchapters and assembles the module-wide
    /// sequence.
    ///
    /// A module with no chapters, or whose chapters are all empty, assembles
    /// to an empty sequence — a valid "no content" state, not an error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if any underlying fetch fails; partial results are
    /// discarded rather than assembled into an incomplete tree.
    pub async fn assemble_sequence(&self, module_id: ModuleId) -> Result<FlatSequence, ApiError> {
        let chapters = self.api.get_chapters(module_id).await?;

        let mut all = Vec::new();
        for chapter in &chapters {
            let mut subs = self.api.get_subchapters(module_id, chapter.id()).await?;
            all.append(&mut subs);
        }

        Ok(FlatSequence::new(all))
    }
}
