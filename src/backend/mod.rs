//! Backend abstraction for the reporting server.
//!
//! This module defines the interface the UI talks to, the wire-level data
//! types shared across views, and the error surface implementations map
//! server responses onto.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_ITEMS_COUNT;

pub mod rest;

/// Common error types for backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Backend error: {0}")]
    Other(String),
}

/// A saved launch filter owned by a project member.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedFilter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// One launch row as shown in the launches view.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LaunchSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub passed: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub skipped: u32,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_default_items_count(value: &u32) -> bool {
    *value == DEFAULT_ITEMS_COUNT
}

/// Options nested under the content parameters.
///
/// Every field at its default is skipped during serialization, so a value
/// that merely spells a default out loud serializes the same as one that
/// never set it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetOptions {
    /// Launch name pattern a widget can run on instead of saved filters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_name_filter: Option<String>,
    /// Restrict content to the latest launch per name.
    #[serde(skip_serializing_if = "is_false")]
    pub latest: bool,
}

impl WidgetOptions {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// What a widget renders and how much of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentParameters {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content_fields: Vec<String>,
    #[serde(skip_serializing_if = "is_default_items_count")]
    pub items_count: u32,
    #[serde(skip_serializing_if = "WidgetOptions::is_default")]
    pub widget_options: WidgetOptions,
}

impl Default for ContentParameters {
    fn default() -> Self {
        Self {
            content_fields: Vec::new(),
            items_count: DEFAULT_ITEMS_COUNT,
            widget_options: WidgetOptions::default(),
        }
    }
}

impl ContentParameters {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// The slice of a widget definition that decides what its preview shows:
/// the selected filters plus the content parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetSettings {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter_ids: Vec<String>,
    #[serde(skip_serializing_if = "ContentParameters::is_default")]
    pub content_parameters: ContentParameters,
}

impl WidgetSettings {
    /// A widget can only fetch with at least one filter selected or a
    /// launch-name fallback configured.
    pub fn can_fetch(&self) -> bool {
        !self.filter_ids.is_empty()
            || self
                .content_parameters
                .widget_options
                .launch_name_filter
                .is_some()
    }
}

/// Interface every reporting-server implementation provides.
#[async_trait]
pub trait ReportBackend: Send + Sync {
    /// Returns the backend type identifier (e.g. "rest").
    fn backend_type(&self) -> &str;

    async fn fetch_filters(&self) -> Result<Vec<SavedFilter>, BackendError>;

    /// Ensure a saved filter exists and is selectable. Views that depend on
    /// a filter run this before rendering anything under it.
    async fn activate_filter(&self, filter_id: &str) -> Result<SavedFilter, BackendError>;

    async fn fetch_launches(&self, filter_id: &str, path: &[String]) -> Result<Vec<LaunchSummary>, BackendError>;

    /// Preview payload for a widget template under the given settings.
    async fn fetch_widget_preview(
        &self,
        template_id: &str,
        settings: &WidgetSettings,
    ) -> Result<Value, BackendError>;

    async fn delete_filter(&self, filter_id: &str) -> Result<(), BackendError>;
}
