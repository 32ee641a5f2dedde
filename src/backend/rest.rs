//! REST implementation of [`ReportBackend`].
//!
//! Talks to a single project on the reporting server over its JSON API.
//! Transport failures and non-success statuses are mapped onto
//! [`BackendError`]; request timeouts come from the shared client.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::{BackendError, LaunchSummary, ReportBackend, SavedFilter, WidgetSettings};
use crate::constants::FILTER_KEY_ALL;

/// List endpoints wrap their rows in a page envelope.
#[derive(Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    content: Vec<T>,
}

pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
    project: String,
    token: String,
}

impl RestBackend {
    pub fn new(base_url: &str, project: &str, token: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            project: project.to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}/{}", self.base_url, self.project, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Self::parse_response(response).await
    }

    async fn post_json<T: serde::de::DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T, BackendError> {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Self::parse_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), BackendError> {
        let url = self.url(path);
        debug!("DELETE {}", url);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response.text().await.unwrap_or_default();
        Err(Self::status_error(status, message))
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| BackendError::InvalidData(e.to_string()));
        }
        let message = response.text().await.unwrap_or_default();
        Err(Self::status_error(status, message))
    }

    fn status_error(status: StatusCode, message: String) -> BackendError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Auth(message),
            StatusCode::NOT_FOUND => BackendError::NotFound(message),
            _ => BackendError::Other(format!("HTTP {}: {}", status.as_u16(), message)),
        }
    }
}

#[async_trait]
impl ReportBackend for RestBackend {
    fn backend_type(&self) -> &str {
        "rest"
    }

    async fn fetch_filters(&self) -> Result<Vec<SavedFilter>, BackendError> {
        let page: Page<SavedFilter> = self.get_json("filter").await?;
        Ok(page.content)
    }

    async fn activate_filter(&self, filter_id: &str) -> Result<SavedFilter, BackendError> {
        self.get_json(&format!("filter/{}", filter_id)).await
    }

    async fn fetch_launches(&self, filter_id: &str, path: &[String]) -> Result<Vec<LaunchSummary>, BackendError> {
        // The "all" pseudo-filter is client-side only; the server sees it as
        // an unfiltered listing.
        let mut params = Vec::new();
        if filter_id != FILTER_KEY_ALL {
            params.push(format!("filterId={}", filter_id));
        }
        if !path.is_empty() {
            params.push(format!("under={}", path.join(".")));
        }
        let mut query = String::from("launch");
        if !params.is_empty() {
            query.push('?');
            query.push_str(&params.join("&"));
        }
        let page: Page<LaunchSummary> = self.get_json(&query).await?;
        Ok(page.content)
    }

    async fn fetch_widget_preview(
        &self,
        template_id: &str,
        settings: &WidgetSettings,
    ) -> Result<Value, BackendError> {
        let mut body = serde_json::to_value(settings).map_err(|e| BackendError::InvalidData(e.to_string()))?;
        if let Value::Object(map) = &mut body {
            map.insert("widgetType".to_string(), Value::String(template_id.to_string()));
        }
        self.post_json("widget/preview", &body).await
    }

    async fn delete_filter(&self, filter_id: &str) -> Result<(), BackendError> {
        self.delete(&format!("filter/{}", filter_id)).await
    }
}
