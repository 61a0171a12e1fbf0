use std::sync::Arc;

use api::InMemoryApi;
use course_core::model::{Chapter, ChapterId, Module, ModuleId, ProgressEntry, RawId, RawPercent,
    Subchapter, SubchapterId};
use course_core::progress::Progress;
use services::{Destination, ModuleViewService, SubchapterFlowService, SubchapterViewError};

fn sub(id: u64, chapter: u64, order: i64) -> Subchapter {
    Subchapter::new(
        SubchapterId::new(id),
        ChapterId::new(chapter),
        format!("Sub {id}"),
        order,
        format!("<p>body {id}</p>"),
        None,
    )
}

/// Module 1 with two chapters and four subchapters; canonical order is
/// 101, 102, 201, 202.
fn seeded() -> InMemoryApi {
    let api = InMemoryApi::new();
    let module_id = ModuleId::new(1);
    api.insert_module(Module::new(module_id, "Basics", "First steps"));
    api.insert_chapter(Chapter::new(ChapterId::new(10), module_id));
    api.insert_chapter(Chapter::new(ChapterId::new(20), module_id));
    // Seed out of order inside chapters; assembly must not care.
    api.insert_subchapter(sub(102, 10, 2));
    api.insert_subchapter(sub(101, 10, 1));
    api.insert_subchapter(sub(202, 20, 4));
    api.insert_subchapter(sub(201, 20, 3));
    api
}

fn flow(api: &InMemoryApi) -> SubchapterFlowService {
    SubchapterFlowService::new(Arc::new(api.clone()), Arc::new(api.clone()))
}

fn module_view(api: &InMemoryApi) -> ModuleViewService {
    ModuleViewService::new(Arc::new(api.clone()), Arc::new(api.clone()))
}

#[tokio::test]
async fn module_page_assembles_ordered_sequence() {
    let api = seeded();
    let view = module_view(&api).load(ModuleId::new(1)).await.unwrap();

    let ids: Vec<u64> = view.sequence.iter().map(|s| s.id().value()).collect();
    assert_eq!(ids, vec![101, 102, 201, 202]);
    assert!(view.has_content());
    assert!(!view.review_mode());
    assert_eq!(view.progress, Progress::ZERO);
}

#[tokio::test]
async fn empty_module_is_valid_no_content_state() {
    let api = InMemoryApi::new();
    api.insert_module(Module::new(ModuleId::new(7), "Empty", ""));

    let view = module_view(&api).load(ModuleId::new(7)).await.unwrap();
    assert!(!view.has_content());
    assert_eq!(view.sequence.len(), 0);
}

#[tokio::test]
async fn module_page_resolves_progress_under_loose_equality() {
    let api = seeded();
    api.set_overview(vec![ProgressEntry::new(
        RawId::Text("1".into()),
        RawPercent::Text("50".into()),
    )]);

    let view = module_view(&api).load(ModuleId::new(1)).await.unwrap();
    assert_eq!(view.progress.value(), 50);
}

#[tokio::test]
async fn stepping_through_the_module_reaches_completion() {
    let api = seeded();
    let flow = flow(&api);

    let expected = [
        (101, 25, Destination::Subchapter(SubchapterId::new(102))),
        (102, 50, Destination::Subchapter(SubchapterId::new(201))),
        (201, 75, Destination::Subchapter(SubchapterId::new(202))),
        (202, 100, Destination::ModuleOverview(ModuleId::new(1))),
    ];

    for (sub_id, want_percent, want_destination) in expected {
        let view = flow.load(SubchapterId::new(sub_id)).await.unwrap();
        let outcome = flow.advance(&view).await.unwrap();
        assert_eq!(outcome.progress.value(), want_percent);
        assert!(outcome.persisted);
        assert!(!outcome.persist_failed);
        assert_eq!(outcome.destination, want_destination);
    }

    // The finished module reloads in review mode.
    let view = module_view(&api).load(ModuleId::new(1)).await.unwrap();
    assert!(view.review_mode());
    assert_eq!(api.progress_update_count(), 4);
}

#[tokio::test]
async fn revisiting_a_counted_subchapter_writes_nothing() {
    let api = seeded();
    let flow = flow(&api);

    for sub_id in [101, 102] {
        let view = flow.load(SubchapterId::new(sub_id)).await.unwrap();
        flow.advance(&view).await.unwrap();
    }
    assert_eq!(api.progress_update_count(), 2);

    // Back to the first subchapter: 50% of 4 already implies it as completed.
    let view = flow.load(SubchapterId::new(101)).await.unwrap();
    let outcome = flow.advance(&view).await.unwrap();

    assert_eq!(outcome.progress.value(), 50);
    assert!(!outcome.persisted);
    assert!(!outcome.persist_failed);
    assert_eq!(
        outcome.destination,
        Destination::Subchapter(SubchapterId::new(102))
    );
    assert_eq!(api.progress_update_count(), 2);
}

#[tokio::test]
async fn foreign_subchapter_is_a_sequence_mismatch() {
    let api = seeded();
    let flow = flow(&api);

    let mut view = flow.load(SubchapterId::new(101)).await.unwrap();
    // Simulate a stale page whose subchapter no longer belongs to the module.
    view.subchapter = sub(999, 10, 9);

    let err = flow.advance(&view).await.unwrap_err();
    assert!(matches!(
        err,
        SubchapterViewError::SequenceMismatch(id) if id == SubchapterId::new(999)
    ));
    assert_eq!(api.progress_update_count(), 0);
}

#[tokio::test]
async fn failed_write_back_does_not_block_navigation() {
    let api = seeded();
    let flow = flow(&api);

    let view = flow.load(SubchapterId::new(101)).await.unwrap();
    api.fail_progress_updates(true);

    let outcome = flow.advance(&view).await.unwrap();
    assert_eq!(outcome.progress.value(), 25);
    assert!(!outcome.persisted);
    assert!(outcome.persist_failed);
    assert_eq!(
        outcome.destination,
        Destination::Subchapter(SubchapterId::new(102))
    );

    // Nothing was stored; a reload sees the old percentage.
    api.fail_progress_updates(false);
    let reloaded = flow.load(SubchapterId::new(101)).await.unwrap();
    assert_eq!(reloaded.progress, Progress::ZERO);
}

#[tokio::test]
async fn subchapter_load_carries_bundle_and_progress() {
    let api = seeded();
    api.set_overview(vec![ProgressEntry::new(RawId::Int(1), RawPercent::Number(25))]);
    let flow = flow(&api);

    let view = flow.load(SubchapterId::new(201)).await.unwrap();
    assert_eq!(view.module.id(), ModuleId::new(1));
    assert_eq!(view.chapter.id(), ChapterId::new(20));
    assert_eq!(view.subchapter.title(), "Sub 201");
    assert_eq!(view.sequence.len(), 4);
    assert_eq!(view.progress.value(), 25);
}
