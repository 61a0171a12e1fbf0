use crate::model::ids::{ChapterId, ModuleId};

/// A grouping of subchapters within a module.
///
/// Chapters carry no explicit ordering; callers keep them in the order the
/// source returned them, which must be stable within one page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chapter {
    id: ChapterId,
    module_id: ModuleId,
}

impl Chapter {
    #[must_use]
    pub fn new(id: ChapterId, module_id: ModuleId) -> Self {
        Self { id, module_id }
    }

    #[must_use]
    pub fn id(&self) -> ChapterId {
        self.id
    }

    #[must_use]
    pub fn module_id(&self) -> ModuleId {
        self.module_id
    }
}
