use crate::backend::{LaunchSummary, SavedFilter};
use crate::widgets::PreviewConfig;

use super::composer::NavTarget;
use super::reconciler::Generation;

/// Which page owns the main area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainView {
    #[default]
    Launches,
    Widgets,
}

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateToFilter(NavTarget),
    SwitchView(MainView),

    // Filter operations
    RefreshFilters,
    DeleteFilter(String),

    // Widget builder edits
    PreviewConfigChanged(PreviewConfig),

    // Background completions. Generations tie them back to the request
    // that produced them; stale ones must stay inert.
    FiltersLoaded(Vec<SavedFilter>),
    FiltersLoadFailed(String),
    FilterActivated {
        generation: Generation,
        key: String,
        outcome: Result<SavedFilter, String>,
    },
    LaunchesLoaded {
        key: String,
        path: Vec<String>,
        result: Result<Vec<LaunchSummary>, String>,
    },
    PreviewFetched {
        generation: Generation,
        result: Result<serde_json::Value, String>,
    },
    FilterDeleted {
        id: String,
        result: Result<(), String>,
    },

    // UI operations
    ShowLogs(bool),

    // App control
    Quit,
    None,
}
