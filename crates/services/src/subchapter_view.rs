use std::sync::Arc;

use api::{CourseApi, ProgressApi};
use course_core::advancement::advance;
use course_core::model::{Chapter, Module, ModuleId, Subchapter, SubchapterId};
use course_core::progress::Progress;
use course_core::sequence::FlatSequence;

use crate::assembler::TreeAssembler;
use crate::error::SubchapterViewError;

//
// ─── VIEW ──────────────────────────────────────────────────────────────────────
//

/// Everything the subchapter page renders, plus the module-wide sequence the
/// advancement flow operates on.
#[derive(Debug, Clone)]
pub struct SubchapterView {
    pub module: Module,
    pub chapter: Chapter,
    pub subchapter: Subchapter,
    pub sequence: FlatSequence,
    pub progress: Progress,
}

/// Where to navigate after advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Subchapter(SubchapterId),
    /// End of the module: return to its overview page.
    ModuleOverview(ModuleId),
}

/// Outcome of one advancement: the percentage the UI shows, whether it was
/// written back (and whether that write failed), and the next destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceOutcome {
    pub progress: Progress,
    pub persisted: bool,
    pub persist_failed: bool,
    pub destination: Destination,
}

//
// ─── FLOW ──────────────────────────────────────────────────────────────────────
//

/// Subchapter page workflow: the denormalized load and the advance-on-next
/// step.
#[derive(Clone)]
pub struct SubchapterFlowService {
    api: Arc<dyn CourseApi>,
    progress: Arc<dyn ProgressApi>,
    assembler: TreeAssembler,
}

impl SubchapterFlowService {
    #[must_use]
    pub fn new(api: Arc<dyn CourseApi>, progress: Arc<dyn ProgressApi>) -> Self {
        let assembler = TreeAssembler::new(api.clone());
        Self {
            api,
            progress,
            assembler,
        }
    }

    /// Loads the subchapter page: the denormalized bundle, the module-wide
    /// sequence, and the learner's current percentage.
    ///
    /// # Errors
    ///
    /// Returns `SubchapterViewError::Api` if any fetch fails.
    pub async fn load(
        &self,
        subchapter_id: SubchapterId,
    ) -> Result<SubchapterView, SubchapterViewError> {
        let bundle = self.api.get_subchapter_full(subchapter_id).await?;
        // The bundle only carries chapter-mates; ordering needs the whole
        // module, so assemble across all chapters.
        let sequence = self.assembler.assemble_sequence(bundle.module.id()).await?;
        let overview = self.progress.get_overview().await?;

        Ok(SubchapterView {
            progress: overview.progress_for(bundle.module.id()),
            module: bundle.module,
            chapter: bundle.chapter,
            subchapter: bundle.subchapter,
            sequence,
        })
    }

    /// Advances past the viewed subchapter: computes the new percentage,
    /// writes it back when it increased, and picks the next destination.
    ///
    /// The write-back is best-effort. The computed percentage is already
    /// applied to the returned outcome before the persist call, and a persist
    /// failure is logged and flagged without blocking navigation: a failed
    /// write must not block learning progression.
    ///
    /// # Errors
    ///
    /// Returns `SubchapterViewError::SequenceMismatch` when the subchapter is
    /// not in the module's sequence; callers fall back to the module overview.
    pub async fn advance(
        &self,
        view: &SubchapterView,
    ) -> Result<AdvanceOutcome, SubchapterViewError> {
        let subchapter_id = view.subchapter.id();
        let position = view
            .sequence
            .locate(subchapter_id)
            .ok_or(SubchapterViewError::SequenceMismatch(subchapter_id))?;

        let advancement = advance(view.progress, view.sequence.len(), position.index);

        let destination = match position.next {
            Some(next) => Destination::Subchapter(next.id()),
            None => Destination::ModuleOverview(view.module.id()),
        };

        let mut persisted = false;
        let mut persist_failed = false;
        if advancement.should_persist {
            match self
                .progress
                .update_module_progress(view.module.id(), advancement.new_progress)
                .await
            {
                Ok(()) => persisted = true,
                Err(err) => {
                    tracing::warn!(
                        module_id = %view.module.id(),
                        error = %err,
                        "progress write-back failed, navigation proceeds"
                    );
                    persist_failed = true;
                }
            }
        }

        Ok(AdvanceOutcome {
            progress: advancement.new_progress,
            persisted,
            persist_failed,
            destination,
        })
    }
}
