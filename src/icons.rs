//! Icon service for managing different icon themes
//!
//! This module provides a centralized way to manage icons throughout the
//! application, supporting emoji, Unicode, and ASCII fallbacks.

use serde::{Deserialize, Serialize};

use crate::constants::{LAUNCH_STATUS_FAILED, LAUNCH_STATUS_IN_PROGRESS, LAUNCH_STATUS_PASSED};

/// Icon theme variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconTheme {
    /// Emoji icons (colorful, modern look)
    Emoji,
    /// Unicode symbols (clean, native look)
    Unicode,
    /// ASCII characters (maximum compatibility)
    Ascii,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self::Ascii
    }
}

impl IconTheme {
    /// Parse the theme name used in the config file.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "emoji" => Some(Self::Emoji),
            "unicode" => Some(Self::Unicode),
            "ascii" => Some(Self::Ascii),
            _ => None,
        }
    }
}

/// Launch status icons
#[derive(Debug, Clone)]
pub struct LaunchStatusIcons {
    pub passed: &'static str,
    pub failed: &'static str,
    pub in_progress: &'static str,
    pub unknown: &'static str,
}

/// Sidebar and page icons
#[derive(Debug, Clone)]
pub struct UiIcons {
    pub filter: &'static str,
    pub shared_filter: &'static str,
    pub all_launches: &'static str,
    pub widget: &'static str,
    pub loading: &'static str,
    pub error: &'static str,
}

/// Complete icon set for a specific theme
#[derive(Debug, Clone)]
pub struct IconSet {
    pub launch_status: LaunchStatusIcons,
    pub ui: UiIcons,
}

/// Icon service for managing themes and providing icons
#[derive(Debug, Clone)]
pub struct IconService {
    current_theme: IconTheme,
}

impl Default for IconService {
    fn default() -> Self {
        Self::new(IconTheme::default())
    }
}

impl IconService {
    /// Create a new icon service with the specified theme
    #[must_use]
    pub fn new(theme: IconTheme) -> Self {
        Self { current_theme: theme }
    }

    /// Get the current theme
    #[must_use]
    pub fn theme(&self) -> IconTheme {
        self.current_theme
    }

    /// Set the current theme
    pub fn set_theme(&mut self, theme: IconTheme) {
        self.current_theme = theme;
    }

    /// Get the complete icon set for the current theme
    #[must_use]
    pub fn icons(&self) -> IconSet {
        match self.current_theme {
            IconTheme::Emoji => Self::emoji_icons(),
            IconTheme::Unicode => Self::unicode_icons(),
            IconTheme::Ascii => Self::ascii_icons(),
        }
    }

    fn emoji_icons() -> IconSet {
        IconSet {
            launch_status: LaunchStatusIcons {
                passed: "✅",
                failed: "❌",
                in_progress: "🔄",
                unknown: "❔",
            },
            ui: UiIcons {
                filter: "🔖",
                shared_filter: "👥",
                all_launches: "🚀",
                widget: "📊",
                loading: "⏳",
                error: "❌",
            },
        }
    }

    fn unicode_icons() -> IconSet {
        IconSet {
            launch_status: LaunchStatusIcons {
                passed: "✓",
                failed: "✗",
                in_progress: "⟳",
                unknown: "?",
            },
            ui: UiIcons {
                filter: "◈",
                shared_filter: "◇",
                all_launches: "▶",
                widget: "▦",
                loading: "⧖",
                error: "✗",
            },
        }
    }

    fn ascii_icons() -> IconSet {
        IconSet {
            launch_status: LaunchStatusIcons {
                passed: "+",
                failed: "X",
                in_progress: "~",
                unknown: "?",
            },
            ui: UiIcons {
                filter: "=",
                shared_filter: "&",
                all_launches: ">",
                widget: "#",
                loading: "...",
                error: "X",
            },
        }
    }

    /// Icon for a launch status string as the server reports it.
    #[must_use]
    pub fn launch_status(&self, status: &str) -> &'static str {
        let icons = self.icons().launch_status;
        match status {
            LAUNCH_STATUS_PASSED => icons.passed,
            LAUNCH_STATUS_FAILED => icons.failed,
            LAUNCH_STATUS_IN_PROGRESS => icons.in_progress,
            _ => icons.unknown,
        }
    }

    #[must_use]
    pub fn filter(&self, is_shared: bool) -> &'static str {
        let icons = self.icons().ui;
        if is_shared {
            icons.shared_filter
        } else {
            icons.filter
        }
    }

    #[must_use]
    pub fn all_launches(&self) -> &'static str {
        self.icons().ui.all_launches
    }

    #[must_use]
    pub fn widget(&self) -> &'static str {
        self.icons().ui.widget
    }

    #[must_use]
    pub fn loading(&self) -> &'static str {
        self.icons().ui.loading
    }

    #[must_use]
    pub fn error(&self) -> &'static str {
        self.icons().ui.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let service = IconService::default();
        assert_eq!(service.theme(), IconTheme::Ascii);
    }

    #[test]
    fn test_theme_switching() {
        let mut service = IconService::new(IconTheme::Emoji);
        assert_eq!(service.theme(), IconTheme::Emoji);

        service.set_theme(IconTheme::Ascii);
        assert_eq!(service.theme(), IconTheme::Ascii);
    }

    #[test]
    fn test_theme_from_name() {
        assert_eq!(IconTheme::from_name("emoji"), Some(IconTheme::Emoji));
        assert_eq!(IconTheme::from_name("unicode"), Some(IconTheme::Unicode));
        assert_eq!(IconTheme::from_name("ascii"), Some(IconTheme::Ascii));
        assert_eq!(IconTheme::from_name("nerdfont"), None);
    }

    #[test]
    fn test_launch_status_mapping() {
        let service = IconService::new(IconTheme::Unicode);
        assert_eq!(service.launch_status("PASSED"), "✓");
        assert_eq!(service.launch_status("FAILED"), "✗");
        assert_eq!(service.launch_status("IN_PROGRESS"), "⟳");
        assert_eq!(service.launch_status("INTERRUPTED"), "?");
    }

    #[test]
    fn test_filter_icons() {
        let service = IconService::new(IconTheme::Ascii);
        assert_eq!(service.filter(false), "=");
        assert_eq!(service.filter(true), "&");
    }
}
