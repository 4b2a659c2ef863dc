//! End-to-end flow over an in-memory store: record sessions through the
//! recorder, then rebuild the dashboard snapshot for different scopes.

use ui::analytics::AnalyticsSnapshot;
use ui::core::catalog::TrackCatalog;
use ui::core::recorder::{record_session, RecordError, SessionDraft};
use ui::core::scope::Scope;
use ui::core::storage::{Category, MemoryStorage, SessionStore};
use ui::i18n::loader_for;

fn draft(user: &str, category: u32, before: f64, after: f64, seconds: i64) -> SessionDraft {
    SessionDraft {
        scope_user: None,
        selected_user: Some(user.to_string()),
        category: Some(Category::from(category)),
        elapsed_seconds: seconds,
        mood_before: before,
        mood_after: after,
    }
}

fn seeded_store() -> SessionStore<MemoryStorage> {
    let store = SessionStore::new(MemoryStorage::new());
    let catalog = TrackCatalog::builtin();
    let fallback = catalog.first().category.clone();
    for d in [
        draft("Bob", 432, 3.0, 5.0, 60),
        draft("Bob", 432, 2.0, 6.0, 120),
        draft("Cleo", 852, 6.0, 5.0, 30),
    ] {
        record_session(&store, &d, &fallback).expect("valid draft");
    }
    store
}

#[test]
fn unscoped_snapshot_covers_every_session() {
    let store = seeded_store();
    let catalog = TrackCatalog::builtin();
    let en = loader_for("en-US");

    let snapshot = AnalyticsSnapshot::load(&store, &catalog, &Scope::AllUsers, "All users", &en);

    assert_eq!(snapshot.users, vec!["Bob".to_string(), "Cleo".to_string()]);
    assert_eq!(snapshot.sessions.len(), 3);
    assert_eq!(snapshot.stats.total_count, 3);
    assert_eq!(snapshot.stats.average_improvement(&Category::from(432)), 3.0);
    assert_eq!(snapshot.stats.average_improvement(&Category::from(852)), -1.0);
    assert_eq!(snapshot.stats.most_frequent_category, Some(Category::from(432)));
    assert!(snapshot
        .report
        .contains("Best frequency (highest avg improvement): 432 Hz"));
    assert!(snapshot.report.contains("Average improvement overall: 1.67"));
    assert!(snapshot.chart_svg.contains(">3.00<"));
    assert!(snapshot.chart_svg.contains(">-1.00<"));
}

#[test]
fn scoping_to_a_user_filters_and_names_them() {
    let store = seeded_store();
    let catalog = TrackCatalog::builtin();
    let en = loader_for("en-US");

    let snapshot = AnalyticsSnapshot::load(&store, &catalog, &Scope::user("Cleo"), "Cleo", &en);

    assert_eq!(snapshot.sessions.len(), 1);
    assert!(snapshot.report.starts_with("Final Analysis – Cleo"));
    assert!(snapshot.report.contains("Best frequency (highest avg improvement): 852 Hz"));
}

#[test]
fn unknown_scope_user_gets_registered_and_sees_no_data() {
    let store = seeded_store();
    let catalog = TrackCatalog::builtin();
    let en = loader_for("en-US");

    let snapshot = AnalyticsSnapshot::load(&store, &catalog, &Scope::user("Alice"), "Alice", &en);

    assert_eq!(snapshot.report, "No analysis yet. Add sessions to see results.");
    assert_eq!(snapshot.stats.total_count, 0);
    assert_eq!(snapshot.chart_svg.matches(">0.00<").count(), 3);
    assert!(store.list_users().contains(&"Alice".to_string()));

    // The unscoped view is untouched.
    assert_eq!(store.sessions_in(&Scope::AllUsers).len(), 3);
}

#[test]
fn scope_user_takes_precedence_over_picker() {
    let store = SessionStore::new(MemoryStorage::new());
    let catalog = TrackCatalog::builtin();
    let mut d = draft("Bob", 963, 1.0, 2.0, 5);
    d.scope_user = Some("Dana".into());

    let record = record_session(&store, &d, &catalog.first().category).unwrap();

    assert_eq!(record.user, "Dana");
    assert_eq!(store.list_users(), vec!["Dana".to_string()]);
}

#[test]
fn invalid_drafts_write_nothing() {
    let store = SessionStore::new(MemoryStorage::new());
    let fallback = TrackCatalog::builtin().first().category.clone();

    let mut no_user = draft("", 432, 1.0, 2.0, 10);
    no_user.selected_user = Some("   ".into());
    assert!(matches!(
        record_session(&store, &no_user, &fallback),
        Err(RecordError::NoActiveUser)
    ));

    let no_time = draft("Bob", 432, 1.0, 2.0, 0);
    assert!(matches!(
        record_session(&store, &no_time, &fallback),
        Err(RecordError::NoListeningTime)
    ));

    assert!(store.list_users().is_empty());
    assert!(store.list_sessions().is_empty());
}

#[test]
fn clearing_matches_a_fresh_store() {
    let store = seeded_store();
    let catalog = TrackCatalog::builtin();
    let en = loader_for("en-US");

    store.clear_all().unwrap();

    let cleared = AnalyticsSnapshot::load(&store, &catalog, &Scope::AllUsers, "All users", &en);
    let fresh = AnalyticsSnapshot::load(
        &SessionStore::new(MemoryStorage::new()),
        &catalog,
        &Scope::AllUsers,
        "All users",
        &en,
    );
    assert_eq!(cleared, fresh);
    assert!(cleared.users.is_empty());
}

#[test]
fn arabic_reports_use_arabic_indic_digits() {
    let store = seeded_store();
    let catalog = TrackCatalog::builtin();
    let ar = loader_for("ar-SA");

    let snapshot = AnalyticsSnapshot::load(&store, &catalog, &Scope::AllUsers, "All users", &ar);

    assert!(snapshot.report.contains("١.٦٧"));
    assert!(!snapshot.report.contains("1.67"));
}
