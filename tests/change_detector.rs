use launchdeck::backend::WidgetSettings;
use launchdeck::constants::DEFAULT_ITEMS_COUNT;
use launchdeck::ui::core::change::{materially_differs, Material};
use launchdeck::widgets::PreviewConfig;
use serde_json::json;

fn config_with_settings(settings: WidgetSettings) -> PreviewConfig {
    PreviewConfig {
        template_id: Some("launchStatistics".to_string()),
        settings,
    }
}

#[test]
fn test_default_settings_view_is_empty() {
    let config = PreviewConfig::default();
    assert_eq!(config.material_view(), json!({}));
}

#[test]
fn test_explicit_defaults_equal_absent() {
    // Spelling every default out loud must view the same as leaving it out.
    let mut spelled_out = WidgetSettings::default();
    spelled_out.content_parameters.items_count = DEFAULT_ITEMS_COUNT;
    spelled_out.content_parameters.widget_options.latest = false;
    spelled_out.content_parameters.widget_options.launch_name_filter = None;

    let absent = WidgetSettings::default();
    assert!(!materially_differs(
        &config_with_settings(spelled_out),
        &config_with_settings(absent)
    ));
}

#[test]
fn test_changed_flag_differs() {
    let mut changed = WidgetSettings::default();
    changed.content_parameters.widget_options.latest = true;

    assert!(materially_differs(
        &config_with_settings(WidgetSettings::default()),
        &config_with_settings(changed)
    ));
}

#[test]
fn test_changed_items_count_differs() {
    let mut changed = WidgetSettings::default();
    changed.content_parameters.items_count = 50;

    assert!(materially_differs(
        &config_with_settings(WidgetSettings::default()),
        &config_with_settings(changed)
    ));
}

#[test]
fn test_filter_selection_differs() {
    let mut selected = WidgetSettings::default();
    selected.filter_ids.push("42".to_string());

    assert!(materially_differs(
        &config_with_settings(WidgetSettings::default()),
        &config_with_settings(selected)
    ));
}

#[test]
fn test_template_is_not_material() {
    // The template is the preview's identity, not part of its material
    // view; identity changes are handled by the reconciler's owner check.
    let a = PreviewConfig {
        template_id: Some("launchStatistics".to_string()),
        settings: WidgetSettings::default(),
    };
    let b = PreviewConfig {
        template_id: Some("overallStatistics".to_string()),
        settings: WidgetSettings::default(),
    };
    assert!(!materially_differs(&a, &b));
}

#[test]
fn test_clone_never_differs() {
    let mut settings = WidgetSettings::default();
    settings.filter_ids.push("7".to_string());
    settings.content_parameters.content_fields.push("statistics$executions$total".to_string());
    settings.content_parameters.widget_options.launch_name_filter = Some("nightly".to_string());
    let config = config_with_settings(settings);

    assert!(!materially_differs(&config, &config.clone()));
}
