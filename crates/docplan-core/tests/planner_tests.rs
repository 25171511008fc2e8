//! Planner integration tests against an in-memory document and store

use docplan_core::{
    BuildKind, FallbackPlanStore, FilePlanStore, LoadOutcome, MemoryPlanStore, Operation,
    PersistenceBackend, PlanStore, Planner, PlannerConfig, PlannerError, SeedReason,
    StatisticsOutcome, SyncSummary, DEFAULT_PROPERTY_KEY,
};
use docplan_document::{BuiltInStyle, HeadingRule, Paragraph};
use docplan_outline::{Level, OutlineModel, SectionId, SectionStats, Status};
use docplan_test_utils::{outline_of, titles, FakeDocument};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

async fn restored(outline: &OutlineModel, doc: &Arc<FakeDocument>) -> (Planner, Arc<MemoryPlanStore>) {
    let store = Arc::new(MemoryPlanStore::with_raw(outline.snapshot().to_json().unwrap()));
    let planner = Planner::new(PlannerConfig::new(), store.clone()).with_gateway(doc.clone());
    let outcome = planner.load().await.unwrap();
    assert_eq!(outcome, LoadOutcome::Restored { sections: outline.len() });
    (planner, store)
}

#[tokio::test]
async fn template_add_and_delete() {
    let planner = Planner::new(PlannerConfig::new(), Arc::new(MemoryPlanStore::new()));
    planner.load().await.unwrap();

    let outline = planner.outline();
    assert_eq!(outline.len(), 31);
    assert_eq!(outline.next_id(), SectionId(32));

    let id = planner.add_section(Level::One);
    assert_eq!(id, SectionId(32));
    planner.rename_section(id, "Appendix B").unwrap();

    let before = planner.outline();
    let err = planner.delete_section(SectionId(1)).unwrap_err();
    assert!(matches!(err, PlannerError::Outline(_)));
    assert_eq!(planner.outline(), before);

    let removed = planner.delete_section(id).unwrap();
    assert_eq!(removed.title, "Appendix B");
    assert_eq!(planner.outline().len(), 31);
    assert_eq!(planner.toc_items().len(), 31);
}

#[tokio::test]
async fn glossary_joins_plan_after_introduction() {
    let doc = Arc::new(FakeDocument::with_headings(&[("Introduction", 1), ("Glossary", 1)]));
    let (planner, _store) = restored(&outline_of(&[(6, "Introduction", Level::One)]), &doc).await;

    let summary = planner.sync_with_document().await.unwrap();

    assert_eq!(summary, SyncSummary { added_to_plan: 1, added_to_document: 0 });
    assert_eq!(
        summary.to_string(),
        "Sync complete! 1 headings added to plan. 0 headings added to document."
    );
    let outline = planner.outline();
    assert_eq!(titles(&outline), vec!["Introduction", "Glossary"]);
    assert_eq!(outline.find_by_title("Glossary").unwrap().id, SectionId(7));
    assert_eq!(outline.find_by_title("Glossary").unwrap().status, Status::Created);
    assert_eq!(doc.flush_count(), 0);
}

#[tokio::test]
async fn missing_level_one_sections_written_to_document() {
    let doc = Arc::new(FakeDocument::with_headings(&[("Intro", 1)]));
    let outline = outline_of(&[
        (1, "Intro", Level::One),
        (2, "Background", Level::Two),
        (3, "References", Level::One),
    ]);
    let (planner, _store) = restored(&outline, &doc).await;

    let summary = planner.sync_with_document().await.unwrap();

    assert_eq!(summary, SyncSummary { added_to_plan: 0, added_to_document: 1 });
    assert_eq!(doc.flush_count(), 1);
    assert_eq!(
        doc.texts(),
        vec!["Intro", "Text under Intro.", "References", "<insert your text here>", ""]
    );
    assert_eq!(doc.inserted()[0].format.built_in_style, Some(BuiltInStyle::Heading1));

    let again = planner.sync_with_document().await.unwrap();
    assert!(again.is_noop());
    assert_eq!(doc.flush_count(), 1);
}

#[tokio::test]
async fn failed_sync_flush_leaves_plan_unchanged() {
    let doc = Arc::new(FakeDocument::with_headings(&[("Intro", 1), ("Glossary", 1)]));
    let outline = outline_of(&[(1, "Intro", Level::One), (3, "References", Level::One)]);
    let (planner, _store) = restored(&outline, &doc).await;
    let before = planner.outline();

    doc.fail_next_flush(1);
    let err = planner.sync_with_document().await.unwrap_err();

    assert!(matches!(err, PlannerError::Sync { operation: Operation::Sync, .. }));
    assert!(err.partially_applied());
    assert_eq!(err.user_message(), "Failed to sync plan with document. Please try again.");
    assert_eq!(planner.outline(), before);

    // The heading that made it into the document is not inserted twice.
    let summary = planner.sync_with_document().await.unwrap();
    assert_eq!(summary, SyncSummary { added_to_plan: 1, added_to_document: 0 });
    assert_eq!(titles(&planner.outline()), vec!["Intro", "Glossary", "References"]);
    assert_eq!(planner.outline().find_by_title("Glossary").unwrap().id, SectionId(4));
}

#[tokio::test]
async fn unavailable_host_is_non_fatal() {
    let doc = Arc::new(FakeDocument::with_headings(&[("Glossary", 1)]));
    let (planner, _store) = restored(&outline_of(&[(1, "Intro", Level::One)]), &doc).await;
    doc.set_unavailable(true);

    let err = planner.sync_with_document().await.unwrap_err();

    assert!(matches!(err, PlannerError::HostUnavailable { operation: Operation::Sync }));
    assert!(err.is_fallback());
    assert_eq!(titles(&planner.outline()), vec!["Intro"]);
}

#[tokio::test]
async fn concurrent_syncs_run_one_at_a_time() {
    let doc = Arc::new(FakeDocument::with_headings(&[("Intro", 1)]));
    let outline = outline_of(&[(1, "Intro", Level::One), (2, "References", Level::One)]);
    let (planner, _store) = restored(&outline, &doc).await;

    let (a, b) = tokio::join!(planner.sync_with_document(), planner.sync_with_document());

    assert_eq!(a.unwrap().added_to_document + b.unwrap().added_to_document, 1);
    assert_eq!(doc.flush_count(), 1);
}

#[tokio::test]
async fn toc_scaffold_single_flush_in_id_order() {
    let doc = Arc::new(FakeDocument::with_headings(&[("Intro", 1), ("Methods", 1)]));
    let outline = outline_of(&[
        (2, "Methods", Level::One),
        (1, "Intro", Level::One),
        (3, "Detail", Level::Two),
    ]);
    let (planner, _store) = restored(&outline, &doc).await;

    let report = planner.build_toc_scaffold().await.unwrap();

    assert_eq!(report.kind, BuildKind::TocScaffold);
    assert_eq!(report.sections, 3);
    assert_eq!(report.paragraphs, 4);
    assert_eq!(report.sync, Some(SyncSummary::default()));
    assert_eq!(doc.flush_count(), 1);

    let texts = doc.texts();
    assert_eq!(texts[0], "TABLE OF CONTENTS");
    assert_eq!(&texts[texts.len() - 3..], &["Intro", "Methods", "  Detail"]);
}

#[tokio::test]
async fn toc_scaffold_lists_headings_sync_added() {
    let doc = Arc::new(FakeDocument::with_headings(&[("Intro", 1), ("Glossary", 1)]));
    let (planner, _store) = restored(&outline_of(&[(1, "Intro", Level::One)]), &doc).await;

    let report = planner.build_toc_scaffold().await.unwrap();

    assert_eq!(report.sync, Some(SyncSummary { added_to_plan: 1, added_to_document: 0 }));
    assert_eq!(report.sections, 2);
    assert_eq!(report.paragraphs, 3);
    assert_eq!(doc.flush_count(), 1);
    assert_eq!(planner.outline().find_by_title("Glossary").unwrap().id, SectionId(2));

    let texts = doc.texts();
    assert_eq!(texts[0], "TABLE OF CONTENTS");
    assert_eq!(&texts[texts.len() - 2..], &["Intro", "Glossary"]);
}

#[tokio::test]
async fn document_structure_for_template() {
    let doc = Arc::new(FakeDocument::new());
    let planner = Planner::new(PlannerConfig::new(), Arc::new(MemoryPlanStore::new()))
        .with_gateway(doc.clone());
    planner.load().await.unwrap();

    assert!(planner.is_document_empty().await.unwrap());
    let report = planner.build_document_structure().await.unwrap();

    assert_eq!(report.kind, BuildKind::DocumentStructure);
    assert_eq!(report.paragraphs, 93);
    assert_eq!(report.sync, None);
    assert_eq!(doc.flush_count(), 1);
    assert_eq!(&doc.texts()[..3], &["Title Page", "<insert your text here>", ""]);
    assert!(!planner.is_document_empty().await.unwrap());
}

#[tokio::test]
async fn failed_build_reports_partial_application() {
    let doc = Arc::new(FakeDocument::new());
    let planner = Planner::new(PlannerConfig::new(), Arc::new(MemoryPlanStore::new()))
        .with_gateway(doc.clone());
    planner.load().await.unwrap();
    let before = planner.outline();

    doc.fail_next_flush(2);
    let err = planner.build_document_structure().await.unwrap_err();

    assert!(matches!(err, PlannerError::Sync { operation: Operation::BuildDocument, .. }));
    assert_eq!(err.user_message(), "Failed to build document structure. Please try again.");
    assert_eq!(doc.texts().len(), 2);
    assert_eq!(planner.outline(), before);
}

#[tokio::test]
async fn statistics_follow_document_headings() {
    let doc = Arc::new(FakeDocument::with_paragraphs(vec![
        Paragraph::new("Introduction", "Heading 1"),
        Paragraph::body("Planning starts with an outline."),
        Paragraph::body("Table 1 shows the layout."),
        Paragraph::new("Methods", "Heading1"),
        Paragraph::body("Figure 3."),
    ]));
    let outline = outline_of(&[
        (1, "Introduction", Level::One),
        (2, "Methods", Level::One),
        (3, "Results", Level::One),
    ]);
    let (planner, _store) = restored(&outline, &doc).await;

    let outcome = planner.refresh_statistics().await;
    assert_eq!(outcome, StatisticsOutcome::Updated { segments: 2, matched: 2 });

    let outline = planner.outline();
    assert_eq!(
        outline.items()[0].stats,
        SectionStats { words: 10, paragraphs: 2, tables: 1, graphics: 0 }
    );
    assert_eq!(outline.items()[1].stats.graphics, 1);
    assert_eq!(outline.items()[2].stats, SectionStats::zero());

    doc.set_fail_reads(true);
    let outcome = planner.refresh_statistics().await;
    assert!(!outcome.is_available());
    assert_eq!(planner.outline().items()[0].stats.words, 10);
}

#[tokio::test]
async fn statistics_counted_on_load_and_after_sync() {
    let doc = Arc::new(FakeDocument::with_paragraphs(vec![
        Paragraph::new("Introduction", "Heading 1"),
        Paragraph::body("one two three four"),
    ]));
    let (planner, _store) = restored(&outline_of(&[(1, "Introduction", Level::One)]), &doc).await;

    assert_eq!(
        planner.outline().items()[0].stats,
        SectionStats { words: 4, paragraphs: 1, tables: 0, graphics: 0 }
    );

    let doc = Arc::new(FakeDocument::with_paragraphs(vec![
        Paragraph::new("Introduction", "Heading 1"),
        Paragraph::body("one two three four"),
        Paragraph::new("Glossary", "Heading 1"),
        Paragraph::body("five six"),
    ]));
    let (planner, _store) = restored(&outline_of(&[(1, "Introduction", Level::One)]), &doc).await;

    let summary = planner.sync_with_document().await.unwrap();

    assert_eq!(summary.added_to_plan, 1);
    let outline = planner.outline();
    assert_eq!(outline.find_by_title("Glossary").unwrap().stats.words, 2);
    assert_eq!(outline.find_by_title("Introduction").unwrap().stats.words, 4);
}

#[tokio::test]
async fn coarse_heading_rule_drives_sync_and_statistics() {
    let doc = Arc::new(FakeDocument::with_paragraphs(vec![
        Paragraph::new("Project Overview", "Title"),
        Paragraph::body("What this report covers."),
        Paragraph::new("Introduction", "Heading 1"),
        Paragraph::body("one two three four"),
        Paragraph::new("Scope", "Heading 3"),
        Paragraph::body("five six"),
    ]));
    let outline = outline_of(&[(1, "Introduction", Level::One)]);
    let store = Arc::new(MemoryPlanStore::with_raw(outline.snapshot().to_json().unwrap()));
    let config = PlannerConfig::new().with_heading_rule(HeadingRule::Coarse);
    let planner = Planner::new(config, store).with_gateway(doc.clone());
    planner.load().await.unwrap();

    // Third-level headings end a segment but are not planned.
    assert_eq!(planner.outline().items()[0].stats.words, 4);
    assert_eq!(
        planner.refresh_statistics().await,
        StatisticsOutcome::Updated { segments: 3, matched: 1 }
    );

    let summary = planner.sync_with_document().await.unwrap();

    assert_eq!(summary, SyncSummary { added_to_plan: 1, added_to_document: 0 });
    let outline = planner.outline();
    assert_eq!(outline.len(), 2);
    assert!(outline.find_by_title("Scope").is_none());
    let overview = outline.find_by_title("Project Overview").unwrap();
    assert_eq!(overview.level, Level::One);
    assert_eq!(overview.stats.words, 4);
    assert_eq!(doc.flush_count(), 0);
}

#[tokio::test]
async fn statistics_without_host_are_unavailable() {
    let planner = Planner::new(PlannerConfig::new(), Arc::new(MemoryPlanStore::new()));
    planner.load().await.unwrap();

    assert!(matches!(
        planner.refresh_statistics().await,
        StatisticsOutcome::Unavailable { .. }
    ));
    assert!(planner.outline().items().iter().all(|i| i.stats == SectionStats::zero()));
}

#[tokio::test(start_paused = true)]
async fn edits_coalesce_into_one_save() {
    let store = Arc::new(MemoryPlanStore::new());
    let config = PlannerConfig::new().with_save_debounce(Duration::from_millis(100));
    let planner = Planner::new(config, store.clone());
    planner.load().await.unwrap();

    planner.rename_section(SectionId(1), "Cover").unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    planner.set_status(SectionId(2), Status::Drafted).unwrap();
    planner.set_comments(SectionId(2), "Keep it short").unwrap();
    assert_eq!(store.save_count(), 0);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(store.save_count(), 1);

    let saved = store.load().await.unwrap().unwrap();
    assert_eq!(saved.planning_items[0].title, "Cover");
    assert_eq!(saved.toc_items[0].title, "Cover");
    assert_eq!(saved.planning_items[1].comments, "Keep it short");
}

#[tokio::test]
async fn shutdown_persists_and_reload_restores() {
    let store = Arc::new(MemoryPlanStore::new());
    let config = PlannerConfig::new().with_save_debounce(Duration::from_secs(60));

    let planner = Planner::new(config.clone(), store.clone());
    planner.load().await.unwrap();
    let id = planner.add_section(Level::Two);
    planner.rename_section(id, "Acknowledgements").unwrap();
    planner.shutdown().await.unwrap();
    assert_eq!(store.save_count(), 1);

    let reopened = Planner::new(config, store.clone());
    assert_eq!(reopened.load().await.unwrap(), LoadOutcome::Restored { sections: 32 });
    let outline = reopened.outline();
    assert_eq!(outline.next_id(), SectionId(33));
    assert_eq!(outline.get(id).unwrap().title, "Acknowledgements");
}

#[tokio::test]
async fn delete_all_resets_ids() {
    let store = Arc::new(MemoryPlanStore::new());
    let planner = Planner::new(PlannerConfig::new(), store.clone());
    planner.load().await.unwrap();
    planner.flush_pending().await.unwrap();
    assert!(store.raw().is_some());

    planner.delete_all().await.unwrap();

    assert_eq!(store.raw(), None);
    assert!(planner.outline().is_empty());
    assert_eq!(planner.completion(), 0.0);
    assert_eq!(planner.add_section(Level::One), SectionId(1));

    let reopened = Planner::new(PlannerConfig::new(), Arc::new(MemoryPlanStore::new()));
    assert_eq!(
        reopened.load().await.unwrap(),
        LoadOutcome::Seeded { reason: SeedReason::NoSavedPlan }
    );
}

#[tokio::test]
async fn empty_snapshot_seeds_template() {
    let store = Arc::new(MemoryPlanStore::with_raw(r#"{"tocItems":[],"planningItems":[]}"#));
    let planner = Planner::new(PlannerConfig::new(), store);

    assert_eq!(
        planner.load().await.unwrap(),
        LoadOutcome::Seeded { reason: SeedReason::EmptySnapshot }
    );
    assert_eq!(planner.outline().len(), 31);
}

#[tokio::test]
async fn mismatched_lists_seed_template() {
    let raw = r#"{
        "tocItems": [{"id": 1, "title": "A", "level": 1, "isDefault": false}],
        "planningItems": [{"id": 2, "title": "A", "level": 1, "status": "empty", "comments": "", "isDefault": false}]
    }"#;
    let planner = Planner::new(PlannerConfig::new(), Arc::new(MemoryPlanStore::with_raw(raw)));

    let outcome = planner.load().await.unwrap();
    assert!(matches!(outcome, LoadOutcome::Seeded { reason: SeedReason::Corrupt(_) }));
}

#[tokio::test]
async fn malformed_property_file_seeds_then_deletes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("properties.json");
    std::fs::write(&path, "not json").unwrap();
    let planner = Planner::new(
        PlannerConfig::new(),
        Arc::new(FilePlanStore::new(&path, DEFAULT_PROPERTY_KEY)),
    );

    let outcome = planner.load().await.unwrap();
    assert!(matches!(outcome, LoadOutcome::Seeded { reason: SeedReason::Corrupt(_) }));

    planner.delete_all().await.unwrap();

    assert!(planner.outline().is_empty());
    assert!(FilePlanStore::new(&path, DEFAULT_PROPERTY_KEY).load().await.unwrap().is_none());
}

#[tokio::test]
async fn offline_document_store_falls_back_locally() {
    let store = Arc::new(FallbackPlanStore::new(MemoryPlanStore::new(), MemoryPlanStore::new()));
    store.primary().set_offline(true);

    let planner = Planner::new(PlannerConfig::new(), store.clone());
    planner.load().await.unwrap();
    planner.flush_pending().await.unwrap();

    assert_eq!(store.backend(), PersistenceBackend::LocalFallback);
    assert_eq!(store.local().save_count(), 1);
    assert!(store.load().await.unwrap().is_some());
}
