use launchdeck::backend::WidgetSettings;
use launchdeck::ui::core::reconciler::{Completion, Reconciler};
use launchdeck::widgets::PreviewConfig;
use serde_json::{json, Value};

fn config(template: &str, filter_ids: &[&str]) -> PreviewConfig {
    let mut settings = WidgetSettings::default();
    settings.filter_ids = filter_ids.iter().map(|id| id.to_string()).collect();
    PreviewConfig {
        template_id: Some(template.to_string()),
        settings,
    }
}

fn reconciler_for(template: &str) -> Reconciler<PreviewConfig, Value> {
    Reconciler::new(config(template, &[]))
}

#[test]
fn test_initial_config_does_not_fetch() {
    let reconciler = reconciler_for("launchStatistics");
    assert!(!reconciler.is_loading());
    assert!(!reconciler.has_pending());
    assert!(reconciler.artifact().is_none());
}

#[test]
fn test_material_change_issues_fetch() {
    let mut reconciler = reconciler_for("launchStatistics");

    let ticket = reconciler.update(config("launchStatistics", &["f1"]));
    let ticket = ticket.expect("material change on a ready config must fetch");
    assert_eq!(ticket.generation, 1);
    assert!(reconciler.is_loading());
    assert!(reconciler.has_pending());
}

#[test]
fn test_immaterial_change_is_inert() {
    let mut reconciler = reconciler_for("launchStatistics");

    assert!(reconciler.update(config("launchStatistics", &[])).is_none());
    assert!(!reconciler.is_loading());
}

#[test]
fn test_unready_material_change_cannot_fetch() {
    // No filters and no launch name: the change is material but there is
    // nothing to fetch with.
    let mut reconciler = reconciler_for("launchStatistics");
    let ticket = reconciler.update(config("launchStatistics", &["f1"])).unwrap();
    assert_eq!(
        reconciler.complete(ticket.generation, Ok(json!({"content": []}))),
        Completion::Installed
    );
    assert!(reconciler.artifact().is_some());

    let ticket = reconciler.update(config("launchStatistics", &[]));
    assert!(ticket.is_none());
    assert!(!reconciler.is_loading());
    assert!(!reconciler.has_pending());
    assert!(reconciler.artifact().is_none(), "derived state must be dropped");
}

#[test]
fn test_superseded_completion_is_discarded() {
    let mut reconciler = reconciler_for("launchStatistics");

    let first = reconciler.update(config("launchStatistics", &["f1"])).unwrap();
    let second = reconciler.update(config("launchStatistics", &["f2"])).unwrap();
    assert_ne!(first.generation, second.generation);

    // The older fetch finishes after being superseded: inert.
    assert_eq!(
        reconciler.complete(first.generation, Ok(json!({"from": "f1"}))),
        Completion::Stale
    );
    assert!(reconciler.artifact().is_none());
    assert!(reconciler.is_loading(), "newest fetch is still outstanding");

    assert_eq!(
        reconciler.complete(second.generation, Ok(json!({"from": "f2"}))),
        Completion::Installed
    );
    assert_eq!(reconciler.artifact(), Some(&json!({"from": "f2"})));
    assert!(!reconciler.is_loading());
}

#[test]
fn test_slow_first_fetch_cannot_overwrite_newer_result() {
    let mut reconciler = reconciler_for("launchStatistics");

    let first = reconciler.update(config("launchStatistics", &["f1"])).unwrap();
    let second = reconciler.update(config("launchStatistics", &["f1", "f2"])).unwrap();

    // Out-of-order arrival: newest first, then the slow one.
    assert_eq!(
        reconciler.complete(second.generation, Ok(json!({"rows": 2}))),
        Completion::Installed
    );
    assert_eq!(
        reconciler.complete(first.generation, Ok(json!({"rows": 1}))),
        Completion::Stale
    );
    assert_eq!(reconciler.artifact(), Some(&json!({"rows": 2})));
}

#[test]
fn test_installed_config_snapshot_matches_artifact() {
    let mut reconciler = reconciler_for("launchStatistics");
    let ticket = reconciler.update(config("launchStatistics", &["f9"])).unwrap();
    reconciler.complete(ticket.generation, Ok(json!({"ok": true})));

    let installed = reconciler.installed().unwrap();
    assert_eq!(installed.config.settings.filter_ids, vec!["f9".to_string()]);

    // A later edit leaves the snapshot on the installed pair untouched
    // until its own fetch lands.
    reconciler.update(config("launchStatistics", &["f9", "f10"]));
    let installed = reconciler.installed().unwrap();
    assert_eq!(installed.config.settings.filter_ids, vec!["f9".to_string()]);
}

#[test]
fn test_owner_switch_resets_without_fetch() {
    let mut reconciler = reconciler_for("launchStatistics");
    let ticket = reconciler.update(config("launchStatistics", &["f1"])).unwrap();
    reconciler.complete(ticket.generation, Ok(json!({"old": true})));

    // Same settings, different template: reset, no fetch.
    let ticket = reconciler.update(config("overallStatistics", &["f1"]));
    assert!(ticket.is_none());
    assert!(reconciler.artifact().is_none());
    assert!(!reconciler.is_loading());
    assert_eq!(
        reconciler.config().template_id.as_deref(),
        Some("overallStatistics")
    );
}

#[test]
fn test_completion_after_owner_switch_is_inert() {
    let mut reconciler = reconciler_for("launchStatistics");
    let ticket = reconciler.update(config("launchStatistics", &["f1"])).unwrap();

    reconciler.update(config("overallStatistics", &["f1"]));
    assert_eq!(
        reconciler.complete(ticket.generation, Ok(json!({"stale": true}))),
        Completion::Stale
    );
    assert!(reconciler.artifact().is_none());
}

#[test]
fn test_failed_fetch_clears_derived_state() {
    let mut reconciler = reconciler_for("launchStatistics");
    let ticket = reconciler.update(config("launchStatistics", &["f1"])).unwrap();
    reconciler.complete(ticket.generation, Ok(json!({"v": 1})));

    let ticket = reconciler.update(config("launchStatistics", &["f2"])).unwrap();
    assert_eq!(
        reconciler.complete(ticket.generation, Err("boom".to_string())),
        Completion::Cleared
    );
    assert!(reconciler.artifact().is_none());
    assert!(!reconciler.is_loading());
}

#[test]
fn test_fetch_after_owner_switch_uses_fresh_generation() {
    let mut reconciler = reconciler_for("launchStatistics");
    let old = reconciler.update(config("launchStatistics", &["f1"])).unwrap();

    reconciler.update(config("overallStatistics", &[]));
    let new = reconciler.update(config("overallStatistics", &["f1"])).unwrap();
    assert_ne!(old.generation, new.generation);

    // Only the post-switch fetch may install.
    assert_eq!(
        reconciler.complete(old.generation, Ok(json!({"old": true}))),
        Completion::Stale
    );
    assert_eq!(
        reconciler.complete(new.generation, Ok(json!({"new": true}))),
        Completion::Installed
    );
    assert_eq!(reconciler.artifact(), Some(&json!({"new": true})));
}
