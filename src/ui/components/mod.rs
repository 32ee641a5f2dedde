//! Reusable UI components

pub mod filter_sidebar;
pub mod launch_body;
pub mod launches_page;
pub mod status_bar;
pub mod widget_builder;
pub mod widget_preview;

// Component exports
pub use filter_sidebar::FilterSidebar;
pub use launches_page::LaunchesPage;
pub use status_bar::StatusBar;
pub use widget_builder::WidgetBuilder;
pub use widget_preview::WidgetPreview;
