//! Widget template catalog and the preview configuration built from it.
//!
//! Templates are the widget kinds the dashboard can preview. The selected
//! template is the identity a preview belongs to: switching templates resets
//! the preview instead of refetching it, while edits to the settings under
//! the same template drive refetches.

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::backend::WidgetSettings;
use crate::ui::core::change::Material;
use crate::ui::core::reconciler::Reconcilable;

/// One entry in the widget catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub static WIDGET_TEMPLATES: Lazy<Vec<WidgetTemplate>> = Lazy::new(|| {
    vec![
        WidgetTemplate {
            id: "launchStatistics",
            title: "Launch statistics chart",
            description: "Pass/fail breakdown across the selected launches.",
        },
        WidgetTemplate {
            id: "overallStatistics",
            title: "Overall statistics",
            description: "Totals for every execution and defect type in scope.",
        },
        WidgetTemplate {
            id: "launchesDurationChart",
            title: "Launches duration chart",
            description: "Wall-clock duration of each launch, newest first.",
        },
        WidgetTemplate {
            id: "investigatedTrend",
            title: "Investigated percentage of launches",
            description: "Share of failures already triaged, launch by launch.",
        },
        WidgetTemplate {
            id: "passingRatePerLaunch",
            title: "Passing rate per launch",
            description: "Passed versus total for a single launch name.",
        },
        WidgetTemplate {
            id: "testCasesGrowthTrendChart",
            title: "Test cases growth trend chart",
            description: "How many cases each launch added or removed.",
        },
        WidgetTemplate {
            id: "flakyTestCases",
            title: "Flaky test cases",
            description: "Cases that switched result most often in the selection.",
        },
        WidgetTemplate {
            id: "componentHealthCheck",
            title: "Component health check",
            description: "Health of components grouped by attribute keys.",
        },
    ]
});

pub fn template_by_id(id: &str) -> Option<&'static WidgetTemplate> {
    WIDGET_TEMPLATES.iter().find(|template| template.id == id)
}

/// Configuration the preview pane reconciles against: the selected template
/// plus its current settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewConfig {
    pub template_id: Option<String>,
    pub settings: WidgetSettings,
}

impl Material for PreviewConfig {
    /// Only the settings are material. Serialization skips defaults, so a
    /// settings value spelling a default out loud views the same as one
    /// that left it absent.
    fn material_view(&self) -> Value {
        serde_json::to_value(&self.settings).unwrap_or(Value::Null)
    }
}

impl Reconcilable for PreviewConfig {
    type OwnerId = Option<String>;

    fn owner_id(&self) -> Option<String> {
        self.template_id.clone()
    }

    fn is_ready(&self) -> bool {
        self.template_id.is_some() && self.settings.can_fetch()
    }
}
