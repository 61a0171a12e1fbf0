use std::sync::Arc;

use api::{CourseApi, ProgressApi};
use course_core::model::{Module, ModuleId};
use course_core::progress::Progress;
use course_core::sequence::FlatSequence;

use crate::assembler::TreeAssembler;
use crate::error::ModuleViewError;

/// Everything the module page renders: the module header, the learner's
/// current percentage, and the ordered subchapter listing.
#[derive(Debug, Clone)]
pub struct ModuleView {
    pub module: Module,
    pub progress: Progress,
    pub sequence: FlatSequence,
}

impl ModuleView {
    /// False when the module has no subchapters at all; renderers present a
    /// distinct "no content" state and never offer advancement.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.sequence.is_empty()
    }

    /// A finished module flips the call-to-action from "start" to "review".
    #[must_use]
    pub fn review_mode(&self) -> bool {
        self.progress.is_complete()
    }
}

/// Loads the module page: module details, overview resolution, and the
/// assembled sequence.
#[derive(Clone)]
pub struct ModuleViewService {
    api: Arc<dyn CourseApi>,
    progress: Arc<dyn ProgressApi>,
    assembler: TreeAssembler,
}

impl ModuleViewService {
    #[must_use]
    pub fn new(api: Arc<dyn CourseApi>, progress: Arc<dyn ProgressApi>) -> Self {
        let assembler = TreeAssembler::new(api.clone());
        Self {
            api,
            progress,
            assembler,
        }
    }

    /// Fetches the page's snapshots and resolves the learner's progress.
    ///
    /// # Errors
    ///
    /// Returns `ModuleViewError::Api` if any fetch fails; there is no partial
    /// rendering of an incomplete tree.
    pub async fn load(&self, module_id: ModuleId) -> Result<ModuleView, ModuleViewError> {
        let module = self.api.get_module(module_id).await?;
        let overview = self.progress.get_overview().await?;
        let sequence = self.assembler.assemble_sequence(module_id).await?;

        Ok(ModuleView {
            progress: overview.progress_for(module.id()),
            module,
            sequence,
        })
    }
}
