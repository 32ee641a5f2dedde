//! Nested body view listing the launches of one activated filter.
//!
//! A body is built by the launches page once its filter gate has opened and
//! lives exactly as long as that filter stays the active one. The route
//! below the filter (drilling into a launch) is the body's own business: it
//! adjusts its path, reports the new level upward, and asks for fresh rows
//! via a [`LoadRequest`] the owner is expected to run.

use crossterm::event::{KeyCode, KeyEvent};
use log::debug;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::backend::LaunchSummary;
use crate::icons::IconService;
use crate::ui::core::actions::Action;
use crate::ui::core::composer::ChildView;
use crate::ui::core::notifier::Notifier;

/// The rows a body needs for its current route. Returned to the owner, who
/// runs the matching backend call and reports back via
/// [`LaunchBody::launches_loaded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub key: String,
    pub path: Vec<String>,
}

pub struct LaunchBody {
    key: String,
    path: Vec<String>,
    query: Option<String>,
    launches: Vec<LaunchSummary>,
    selected_index: usize,
    list_state: ListState,
    loading: bool,
    disposed: bool,
    pending_load: Option<LoadRequest>,
    levels: Notifier<usize>,
    icons: IconService,
}

impl LaunchBody {
    pub fn new(key: &str, levels: Notifier<usize>, icons: IconService) -> Self {
        Self {
            key: key.to_string(),
            path: Vec::new(),
            query: None,
            launches: Vec::new(),
            selected_index: 0,
            list_state: ListState::default(),
            loading: false,
            disposed: false,
            pending_load: None,
            levels,
            icons,
        }
    }

    /// The filter this body is scoped to, fixed for its lifetime.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Depth below the filter: 0 lists launches, each drill adds one.
    pub fn level(&self) -> usize {
        self.path.len()
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn launches(&self) -> &[LaunchSummary] {
        &self.launches
    }

    pub fn selected(&self) -> Option<&LaunchSummary> {
        self.launches.get(self.selected_index)
    }

    /// Route changes leave a load request behind; the owner runs it.
    pub fn take_load_request(&mut self) -> Option<LoadRequest> {
        self.pending_load.take()
    }

    /// Install rows for a route. Responses for a route this body has since
    /// left are dropped; a failure for the current route degrades to an
    /// empty listing.
    pub fn launches_loaded(&mut self, key: &str, path: &[String], result: Result<Vec<LaunchSummary>, String>) {
        if self.disposed || key != self.key || path != self.path {
            debug!("launch body: dropping rows for stale route '{}'/{:?}", key, path);
            return;
        }
        self.loading = false;
        match result {
            Ok(launches) => {
                self.launches = launches;
            }
            Err(err) => {
                debug!("launch body: load for '{}' failed: {}", self.key, err);
                self.launches.clear();
            }
        }
        if self.selected_index >= self.launches.len() {
            self.selected_index = self.launches.len().saturating_sub(1);
        }
        self.sync_list_state();
    }

    pub fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected_index + 1 < self.launches.len() {
                    self.selected_index += 1;
                    self.sync_list_state();
                }
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                    self.sync_list_state();
                }
                Action::None
            }
            KeyCode::Enter => {
                if let Some(launch) = self.launches.get(self.selected_index) {
                    let id = launch.id.clone();
                    self.path.push(id);
                    self.route_changed();
                }
                Action::None
            }
            KeyCode::Backspace => {
                if self.path.pop().is_some() {
                    self.route_changed();
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn route_changed(&mut self) {
        self.launches.clear();
        self.selected_index = 0;
        self.sync_list_state();
        self.loading = true;
        self.pending_load = Some(LoadRequest {
            key: self.key.clone(),
            path: self.path.clone(),
        });
        self.levels.publish(self.path.len());
    }

    fn sync_list_state(&mut self) {
        if self.launches.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn title(&self) -> String {
        if self.path.is_empty() {
            "Launches".to_string()
        } else {
            format!("Launches / {}", self.path.join(" / "))
        }
    }

    fn launch_row(&self, launch: &LaunchSummary) -> ListItem<'static> {
        let status_icon = self.icons.launch_status(&launch.status);
        let started = launch
            .start_time
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let line = Line::from(vec![
            Span::styled(format!("{} ", status_icon), Style::default().fg(Color::White)),
            Span::styled(
                format!("{} #{}", launch.name, launch.number),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}/{} passed, {} skipped", launch.passed, launch.total, launch.skipped),
                Style::default().fg(if launch.failed > 0 { Color::Red } else { Color::Green }),
            ),
            Span::styled(format!("  {}", started), Style::default().fg(Color::DarkGray)),
        ]);
        ListItem::new(line)
    }

    pub fn render(&mut self, f: &mut Frame, rect: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(self.title())
            .border_style(Style::default().fg(Color::DarkGray));

        if self.loading {
            let loading = Paragraph::new(format!("{} loading launches...", self.icons.loading()))
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            f.render_widget(loading, rect);
            return;
        }

        if self.launches.is_empty() {
            let empty = Paragraph::new("No launches under this route")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(empty, rect);
            return;
        }

        let items: Vec<ListItem> = self.launches.iter().map(|l| self.launch_row(l)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
        f.render_stateful_widget(list, rect, &mut self.list_state);
    }
}

impl ChildView for LaunchBody {
    fn forward(&mut self, path: &[String], query: Option<&str>) {
        let level_before = self.path.len();
        self.path = path.to_vec();
        self.query = query.map(str::to_string);
        self.launches.clear();
        self.selected_index = 0;
        self.sync_list_state();
        self.loading = true;
        self.pending_load = Some(LoadRequest {
            key: self.key.clone(),
            path: self.path.clone(),
        });
        if self.path.len() != level_before {
            self.levels.publish(self.path.len());
        }
    }

    fn dispose(&mut self) {
        debug!("launch body for '{}' disposed", self.key);
        self.launches.clear();
        self.pending_load = None;
        self.loading = false;
        self.disposed = true;
    }
}
