//! Preview pane for the widget under construction.
//!
//! Owns the reconciler that decides when the builder's edits warrant a new
//! server fetch. The pane renders the installed artifact together with the
//! configuration snapshot that produced it, so an in-flight edit never
//! relabels an older payload.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde_json::Value;

use crate::icons::IconService;
use crate::ui::core::reconciler::{Completion, FetchTicket, Generation, Reconcilable, Reconciler};
use crate::ui::core::{actions::Action, Component};
use crate::widgets::{template_by_id, PreviewConfig};

pub struct WidgetPreview {
    reconciler: Reconciler<PreviewConfig, Value>,
    last_error: Option<String>,
    pub icons: IconService,
}

impl Default for WidgetPreview {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetPreview {
    pub fn new() -> Self {
        Self {
            reconciler: Reconciler::new(PreviewConfig::default()),
            last_error: None,
            icons: IconService::default(),
        }
    }

    /// Apply an edited configuration. Any error from a previous fetch is
    /// stale the moment the configuration moves.
    pub fn config_changed(&mut self, config: PreviewConfig) -> Option<FetchTicket<PreviewConfig>> {
        self.last_error = None;
        self.reconciler.update(config)
    }

    /// Report a fetch outcome back into the reconciler. Superseded outcomes
    /// leave the pane untouched.
    pub fn fetched(&mut self, generation: Generation, result: Result<Value, String>) {
        let error = result.as_ref().err().cloned();
        match self.reconciler.complete(generation, result) {
            Completion::Installed => self.last_error = None,
            Completion::Cleared => self.last_error = error,
            Completion::Stale => {}
        }
    }

    pub fn is_loading(&self) -> bool {
        self.reconciler.is_loading()
    }

    pub fn artifact(&self) -> Option<&Value> {
        self.reconciler.artifact()
    }

    fn body_lines(&self) -> Vec<Line<'static>> {
        if self.reconciler.is_loading() {
            return vec![Line::from(Span::styled(
                format!("{} Fetching preview...", self.icons.loading()),
                Style::default().fg(Color::Yellow),
            ))];
        }

        if let Some(installed) = self.reconciler.installed() {
            let mut lines = Vec::new();
            let settings = &installed.config.settings;
            let mut scope = format!("{} filter(s)", settings.filter_ids.len());
            if let Some(name) = &settings.content_parameters.widget_options.launch_name_filter {
                scope = format!("launch name '{}'", name);
            }
            lines.push(Line::from(Span::styled(
                format!(
                    "Fetched for {}, {} items",
                    scope, settings.content_parameters.items_count
                ),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::default());
            let pretty = serde_json::to_string_pretty(&installed.artifact)
                .unwrap_or_else(|_| installed.artifact.to_string());
            for line in pretty.lines() {
                lines.push(Line::from(line.to_string()));
            }
            return lines;
        }

        if let Some(error) = &self.last_error {
            return vec![Line::from(Span::styled(
                format!("{} {}", self.icons.error(), error),
                Style::default().fg(Color::Red),
            ))];
        }

        let hint = if self.reconciler.config().template_id.is_none() {
            "Select a template to begin"
        } else if !self.reconciler.config().is_ready() {
            "Pick a filter (1-9) or set a launch name (n) to fetch a preview"
        } else {
            "No preview yet"
        };
        vec![Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        ))]
    }
}

impl Component for WidgetPreview {
    fn handle_key_events(&mut self, _key: KeyEvent) -> Action {
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let title = self
            .reconciler
            .config()
            .template_id
            .as_deref()
            .and_then(template_by_id)
            .map(|template| format!("Preview: {}", template.title))
            .unwrap_or_else(|| "Preview".to_string());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title)
            .title_style(Style::default().fg(Color::White))
            .border_style(Style::default().fg(Color::DarkGray));

        let paragraph = Paragraph::new(self.body_lines())
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, rect);
    }
}
