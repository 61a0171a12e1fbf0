use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use course_core::model::{Chapter, ChapterId, Module, ModuleId, ProgressEntry, ProgressOverview,
    RawId, RawPercent, Subchapter, SubchapterId};
use course_core::progress::Progress;

use crate::client::{ApiError, CourseApi, ProgressApi, SubchapterBundle};

/// In-memory backend for tests: same contracts and `NotFound` semantics as the
/// HTTP backend, with seeding helpers and write-back failure injection.
#[derive(Clone, Default)]
pub struct InMemoryApi {
    modules: Arc<Mutex<HashMap<ModuleId, Module>>>,
    chapters: Arc<Mutex<HashMap<ModuleId, Vec<Chapter>>>>,
    subchapters: Arc<Mutex<HashMap<ChapterId, Vec<Subchapter>>>>,
    overview: Arc<Mutex<Vec<ProgressEntry>>>,
    fail_progress_updates: Arc<Mutex<bool>>,
    progress_updates: Arc<Mutex<u32>>,
}

impl InMemoryApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a module.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test helper).
    pub fn insert_module(&self, module: Module) {
        self.modules.lock().unwrap().insert(module.id(), module);
    }

    /// Seed a chapter; module fetch order follows insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test helper).
    pub fn insert_chapter(&self, chapter: Chapter) {
        self.chapters
            .lock()
            .unwrap()
            .entry(chapter.module_id())
            .or_default()
            .push(chapter);
    }

    /// Seed a subchapter under its chapter, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test helper).
    pub fn insert_subchapter(&self, subchapter: Subchapter) {
        self.subchapters
            .lock()
            .unwrap()
            .entry(subchapter.chapter_id())
            .or_default()
            .push(subchapter);
    }

    /// Replace the learner's overview wholesale.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test helper).
    pub fn set_overview(&self, entries: Vec<ProgressEntry>) {
        *self.overview.lock().unwrap() = entries;
    }

    /// Make subsequent progress write-backs fail, to exercise the
    /// optimistic-update path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test helper).
    pub fn fail_progress_updates(&self, fail: bool) {
        *self.fail_progress_updates.lock().unwrap() = fail;
    }

    /// Number of write-backs attempted so far, successful or not.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (test helper).
    #[must_use]
    pub fn progress_update_count(&self) -> u32 {
        *self.progress_updates.lock().unwrap()
    }
}

#[async_trait]
impl CourseApi for InMemoryApi {
    async fn get_module(&self, module_id: ModuleId) -> Result<Module, ApiError> {
        let guard = self
            .modules
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        guard.get(&module_id).cloned().ok_or(ApiError::NotFound)
    }

    async fn get_chapters(&self, module_id: ModuleId) -> Result<Vec<Chapter>, ApiError> {
        let guard = self
            .chapters
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        Ok(guard.get(&module_id).cloned().unwrap_or_default())
    }

    async fn get_subchapters(
        &self,
        _module_id: ModuleId,
        chapter_id: ChapterId,
    ) -> Result<Vec<Subchapter>, ApiError> {
        let guard = self
            .subchapters
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        Ok(guard.get(&chapter_id).cloned().unwrap_or_default())
    }

    async fn get_subchapter_full(
        &self,
        subchapter_id: SubchapterId,
    ) -> Result<SubchapterBundle, ApiError> {
        let subchapters = self
            .subchapters
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        let (chapter_id, subchapter) = subchapters
            .iter()
            .find_map(|(chapter_id, subs)| {
                subs.iter()
                    .find(|s| s.id() == subchapter_id)
                    .map(|s| (*chapter_id, s.clone()))
            })
            .ok_or(ApiError::NotFound)?;
        let all_subchapters = subchapters.get(&chapter_id).cloned().unwrap_or_default();
        drop(subchapters);

        let chapters = self
            .chapters
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        let chapter = chapters
            .values()
            .flatten()
            .find(|c| c.id() == chapter_id)
            .copied()
            .ok_or(ApiError::NotFound)?;
        drop(chapters);

        let modules = self
            .modules
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        let module = modules
            .get(&chapter.module_id())
            .cloned()
            .ok_or(ApiError::NotFound)?;

        Ok(SubchapterBundle {
            module,
            chapter,
            subchapter,
            all_subchapters,
        })
    }
}

#[async_trait]
impl ProgressApi for InMemoryApi {
    async fn get_overview(&self) -> Result<ProgressOverview, ApiError> {
        let guard = self
            .overview
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        Ok(ProgressOverview::new(guard.clone()))
    }

    async fn update_module_progress(
        &self,
        module_id: ModuleId,
        progress: Progress,
    ) -> Result<(), ApiError> {
        {
            let mut count = self
                .progress_updates
                .lock()
                .map_err(|e| ApiError::Unavailable(e.to_string()))?;
            *count += 1;
        }

        let failing = *self
            .fail_progress_updates
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        if failing {
            return Err(ApiError::Unavailable("progress backend down".into()));
        }

        let mut guard = self
            .overview
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        let updated = ProgressEntry::new(
            RawId::Int(module_id.value()),
            RawPercent::Number(i64::from(progress.value())),
        );
        if let Some(entry) = guard.iter_mut().find(|e| e.module_id().matches(module_id)) {
            *entry = updated;
        } else {
            guard.push(updated);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryApi {
        let api = InMemoryApi::new();
        api.insert_module(Module::new(ModuleId::new(1), "Basics", "intro"));
        api.insert_chapter(Chapter::new(ChapterId::new(10), ModuleId::new(1)));
        api.insert_subchapter(Subchapter::new(
            SubchapterId::new(100),
            ChapterId::new(10),
            "First",
            1,
            "<p>hello</p>",
            None,
        ));
        api
    }

    #[tokio::test]
    async fn missing_module_is_not_found() {
        let api = InMemoryApi::new();
        let err = api.get_module(ModuleId::new(42)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn bundle_resolves_module_and_chapter() {
        let api = seeded();
        let bundle = api.get_subchapter_full(SubchapterId::new(100)).await.unwrap();
        assert_eq!(bundle.module.id(), ModuleId::new(1));
        assert_eq!(bundle.chapter.id(), ChapterId::new(10));
        assert_eq!(bundle.all_subchapters.len(), 1);
    }

    #[tokio::test]
    async fn write_back_is_visible_in_overview() {
        let api = seeded();
        api.update_module_progress(ModuleId::new(1), Progress::clamped(40))
            .await
            .unwrap();
        let overview = api.get_overview().await.unwrap();
        assert_eq!(overview.progress_for(ModuleId::new(1)).value(), 40);
        assert_eq!(api.progress_update_count(), 1);
    }

    #[tokio::test]
    async fn failure_injection_rejects_write_back() {
        let api = seeded();
        api.fail_progress_updates(true);
        let err = api
            .update_module_progress(ModuleId::new(1), Progress::clamped(40))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unavailable(_)));
        assert_eq!(api.progress_update_count(), 1);
    }
}
