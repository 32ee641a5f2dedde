use launchdeck::backend::{BackendError, ContentParameters, LaunchSummary, SavedFilter, WidgetSettings};
use serde_json::json;

#[test]
fn test_settings_serialize_to_empty_when_default() {
    let settings = WidgetSettings::default();
    assert_eq!(serde_json::to_value(&settings).unwrap(), json!({}));
}

#[test]
fn test_explicit_defaults_serialize_like_absent() {
    // items_count spelled out at its default must not show up on the wire.
    let mut spelled_out = WidgetSettings::default();
    spelled_out.content_parameters.items_count = 100;
    spelled_out.content_parameters.widget_options.latest = false;

    assert_eq!(
        serde_json::to_value(&spelled_out).unwrap(),
        serde_json::to_value(WidgetSettings::default()).unwrap()
    );
}

#[test]
fn test_settings_serialize_camel_case() {
    let mut settings = WidgetSettings::default();
    settings.filter_ids.push("42".to_string());
    settings.content_parameters.items_count = 50;
    settings.content_parameters.widget_options.launch_name_filter = Some("nightly".to_string());
    settings.content_parameters.widget_options.latest = true;

    let value = serde_json::to_value(&settings).unwrap();
    assert_eq!(
        value,
        json!({
            "filterIds": ["42"],
            "contentParameters": {
                "itemsCount": 50,
                "widgetOptions": {
                    "launchNameFilter": "nightly",
                    "latest": true
                }
            }
        })
    );
}

#[test]
fn test_settings_deserialize_missing_fields() {
    let settings: WidgetSettings = serde_json::from_value(json!({})).unwrap();
    assert_eq!(settings, WidgetSettings::default());
    assert_eq!(settings.content_parameters.items_count, 100);

    let settings: WidgetSettings = serde_json::from_value(json!({
        "filterIds": ["7"]
    }))
    .unwrap();
    assert_eq!(settings.filter_ids, vec!["7".to_string()]);
    assert_eq!(settings.content_parameters, ContentParameters::default());
}

#[test]
fn test_can_fetch() {
    let mut settings = WidgetSettings::default();
    assert!(!settings.can_fetch());

    settings.filter_ids.push("42".to_string());
    assert!(settings.can_fetch());

    let mut by_name = WidgetSettings::default();
    by_name.content_parameters.widget_options.launch_name_filter = Some("smoke".to_string());
    assert!(by_name.can_fetch());
}

#[test]
fn test_saved_filter_deserializes_with_defaults() {
    let filter: SavedFilter = serde_json::from_value(json!({
        "id": "11",
        "name": "smoke tests"
    }))
    .unwrap();
    assert_eq!(filter.id, "11");
    assert_eq!(filter.name, "smoke tests");
    assert_eq!(filter.owner, "");
    assert!(!filter.is_shared);
    assert!(filter.description.is_none());
}

#[test]
fn test_launch_summary_deserializes_partial_payload() {
    let launch: LaunchSummary = serde_json::from_value(json!({
        "id": "567",
        "name": "regression",
        "number": 42,
        "status": "FAILED"
    }))
    .unwrap();
    assert_eq!(launch.id, "567");
    assert_eq!(launch.number, 42);
    assert_eq!(launch.status, "FAILED");
    assert!(launch.start_time.is_none());
    assert_eq!(launch.total, 0);
}

#[test]
fn test_error_display() {
    assert_eq!(
        BackendError::Auth("token rejected".to_string()).to_string(),
        "Authentication failed: token rejected"
    );
    assert_eq!(
        BackendError::NotFound("filter '9'".to_string()).to_string(),
        "Resource not found: filter '9'"
    );
    assert_eq!(
        BackendError::Network("timeout".to_string()).to_string(),
        "Network error: timeout"
    );
}
