//! Constants used throughout the application
//!
//! This module centralizes magic strings and default values so UI code and
//! the data layer agree on them.

/// Gate key meaning "every launch, no saved filter selected". Navigating to
/// it never requires a filter activation round-trip.
pub const FILTER_KEY_ALL: &str = "all";
/// Display name for the sentinel entry in the sidebar and page header
pub const ALL_LAUNCHES_LABEL: &str = "All launches";

// Widget content defaults. A widget whose items count equals the default is
// indistinguishable from one that never set it.
/// Default number of items a widget preview asks for
pub const DEFAULT_ITEMS_COUNT: u32 = 100;
/// Smallest items count the builder will step down to
pub const MIN_ITEMS_COUNT: u32 = 50;
/// Largest items count the builder will step up to
pub const MAX_ITEMS_COUNT: u32 = 100;
/// Step applied when adjusting the items count from the builder
pub const ITEMS_COUNT_STEP: u32 = 10;
/// Most attribute keys a widget can group content by
pub const MAX_CONTENT_FIELDS: usize = 10;

// Launch status values as the server reports them
pub const LAUNCH_STATUS_PASSED: &str = "PASSED";
pub const LAUNCH_STATUS_FAILED: &str = "FAILED";
pub const LAUNCH_STATUS_IN_PROGRESS: &str = "IN_PROGRESS";

// UI Messages
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
pub const LOGS_TITLE: &str = "Logs - press 'Esc', 'G' or 'q' to close";

// UI Layout Constants
/// Minimum sidebar width in columns
pub const SIDEBAR_MIN_WIDTH: u16 = 15;
/// Maximum sidebar width in columns
pub const SIDEBAR_MAX_WIDTH: u16 = 50;
/// Default sidebar width in columns
pub const SIDEBAR_DEFAULT_WIDTH: u16 = 30;
