use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use launchdeck::backend::{LaunchSummary, SavedFilter};
use launchdeck::constants::FILTER_KEY_ALL;
use launchdeck::icons::IconService;
use launchdeck::ui::components::LaunchesPage;
use launchdeck::ui::core::composer::{GateState, NavTarget};
use launchdeck::ui::core::notifier::Notifier;
use launchdeck::ui::core::Component;

fn page_with_fallback(fallback: &str) -> (LaunchesPage, Notifier<String>, Notifier<usize>) {
    let removals = Notifier::new();
    let levels = Notifier::new();
    let page = LaunchesPage::new(fallback, &removals, &levels, IconService::default());
    (page, removals, levels)
}

fn filter(id: &str, name: &str) -> SavedFilter {
    SavedFilter {
        id: id.to_string(),
        name: name.to_string(),
        owner: "qa".to_string(),
        is_shared: false,
        description: None,
    }
}

fn launch(id: &str, name: &str) -> LaunchSummary {
    LaunchSummary {
        id: id.to_string(),
        name: name.to_string(),
        number: 1,
        status: "PASSED".to_string(),
        start_time: None,
        total: 10,
        passed: 10,
        failed: 0,
        skipped: 0,
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_sentinel_activates_without_gate() {
    let (mut page, _removals, _levels) = page_with_fallback("team-filter");

    let ticket = page.navigate(NavTarget::new(FILTER_KEY_ALL));
    assert!(ticket.is_none());
    assert_eq!(page.active_key(), Some(FILTER_KEY_ALL));
    assert_eq!(page.gate_status(), "all launches");

    // The body was built and immediately asked for its rows.
    let request = page.take_load_request().unwrap();
    assert_eq!(request.key, FILTER_KEY_ALL);
    assert!(request.path.is_empty());
}

#[test]
fn test_named_filter_gates_before_loading() {
    let (mut page, _removals, _levels) = page_with_fallback("team-filter");

    let ticket = page.navigate(NavTarget::new("f1")).unwrap();
    assert_eq!(ticket.key, "f1");
    assert_eq!(page.gate_status(), "activating 'f1'");
    // No body, no load while the gate is pending.
    assert!(page.take_load_request().is_none());

    page.gate_complete(ticket.generation, Ok(filter("f1", "Smoke")));
    assert_eq!(page.gate_status(), "filter 'f1'");

    let request = page.take_load_request().unwrap();
    assert_eq!(request.key, "f1");
    assert!(request.path.is_empty());
}

#[test]
fn test_failed_activation_parks_the_page() {
    let (mut page, _removals, _levels) = page_with_fallback("team-filter");

    let ticket = page.navigate(NavTarget::new("f1")).unwrap();
    page.gate_complete(ticket.generation, Err("forbidden".to_string()));

    assert_eq!(page.gate_status(), "activating 'f1'");
    assert!(page.take_load_request().is_none());
}

#[test]
fn test_enter_drills_into_the_selected_launch() {
    let (mut page, _removals, _levels) = page_with_fallback("team-filter");
    page.navigate(NavTarget::new(FILTER_KEY_ALL));
    page.take_load_request();

    page.launches_loaded(FILTER_KEY_ALL, &[], Ok(vec![launch("500", "nightly")]));
    page.handle_key_events(key(KeyCode::Enter));

    let request = page.take_load_request().unwrap();
    assert_eq!(request.key, FILTER_KEY_ALL);
    assert_eq!(request.path, vec!["500".to_string()]);
}

#[test]
fn test_rows_for_a_stale_route_are_dropped() {
    let (mut page, _removals, _levels) = page_with_fallback("team-filter");
    page.navigate(NavTarget::new(FILTER_KEY_ALL));
    page.take_load_request();

    // Rows addressed to a route the body is not on never land.
    page.launches_loaded(FILTER_KEY_ALL, &["999".to_string()], Ok(vec![launch("500", "nightly")]));
    page.handle_key_events(key(KeyCode::Enter));
    assert!(page.take_load_request().is_none());
}

#[test]
fn test_level_reported_after_drill() {
    let (mut page, _removals, _levels) = page_with_fallback("team-filter");
    page.navigate(NavTarget::new(FILTER_KEY_ALL));
    page.take_load_request();
    page.launches_loaded(FILTER_KEY_ALL, &[], Ok(vec![launch("500", "nightly")]));

    page.pump();
    assert_eq!(page.level(), None);

    page.handle_key_events(key(KeyCode::Enter));
    let tickets = page.pump();
    assert!(tickets.is_empty());
    assert_eq!(page.level(), Some(1));
}

#[test]
fn test_removed_active_filter_falls_back() {
    let (mut page, removals, _levels) = page_with_fallback("team-filter");
    let ticket = page.navigate(NavTarget::new("f1")).unwrap();
    page.gate_complete(ticket.generation, Ok(filter("f1", "Smoke")));
    page.take_load_request();

    removals.publish("f1".to_string());
    let tickets = page.pump();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].key, "team-filter");
    assert_eq!(page.gate_status(), "activating 'team-filter'");
    // The old body went away with its filter.
    assert!(page.take_load_request().is_none());
}

#[test]
fn test_removed_fallback_uses_sentinel() {
    let (mut page, removals, _levels) = page_with_fallback("team-filter");
    let ticket = page.navigate(NavTarget::new("team-filter")).unwrap();
    page.gate_complete(ticket.generation, Ok(filter("team-filter", "Team")));
    page.take_load_request();

    removals.publish("team-filter".to_string());
    let tickets = page.pump();
    // The sentinel needs no gate, so the fallback completes on the spot.
    assert!(tickets.is_empty());
    assert_eq!(page.gate_status(), "all launches");

    let request = page.take_load_request().unwrap();
    assert_eq!(request.key, FILTER_KEY_ALL);
}

#[test]
fn test_destroyed_page_ignores_navigation() {
    let (mut page, _removals, _levels) = page_with_fallback("team-filter");
    page.navigate(NavTarget::new(FILTER_KEY_ALL));
    page.destroy();

    assert_eq!(*page.state(), GateState::Destroyed);
    assert_eq!(page.gate_status(), "destroyed");
    assert!(page.navigate(NavTarget::new("f1")).is_none());
    assert!(page.take_load_request().is_none());
}
