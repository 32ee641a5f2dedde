use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info, warn};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use tokio::sync::mpsc;

use crate::backend::{ReportBackend, SavedFilter};
use crate::config::Config;
use crate::constants::FILTER_KEY_ALL;
use crate::icons::{IconService, IconTheme};
use crate::logger::Logger;
use crate::ui::components::{FilterSidebar, LaunchesPage, StatusBar, WidgetBuilder, WidgetPreview};
use crate::ui::core::composer::NavTarget;
use crate::ui::core::notifier::Notifier;
use crate::ui::core::{
    actions::Action,
    event_handler::EventType,
    task_manager::TaskManager,
    Component, MainView,
};

/// Application state separate from UI concerns
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub filters: Vec<SavedFilter>,
    pub view: MainView,
    pub filters_loading: bool,
    pub show_logs: bool,
    pub error_message: Option<String>,
}

pub struct AppComponent {
    // Component composition
    sidebar: FilterSidebar,
    launches: LaunchesPage,
    builder: WidgetBuilder,
    preview: WidgetPreview,
    status_bar: StatusBar,

    // Application state
    state: AppState,

    // Services
    backend: Arc<dyn ReportBackend>,
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    logger: Logger,

    // Cross-component event channels the launches page listens on
    removals: Notifier<String>,
    levels: Notifier<usize>,

    // Simple UI state
    should_quit: bool,
    sidebar_width: u16,
}

impl AppComponent {
    pub fn new(backend: Arc<dyn ReportBackend>, config: &Config, logger: Logger) -> Self {
        let theme = IconTheme::from_name(&config.ui.icons).unwrap_or_default();
        let icons = IconService::new(theme);

        let removals = Notifier::new();
        let levels = Notifier::new();
        let launches = LaunchesPage::new(&config.filters.fallback, &removals, &levels, icons.clone());

        let mut sidebar = FilterSidebar::new();
        sidebar.icons = icons.clone();
        let mut builder = WidgetBuilder::new();
        builder.icons = icons.clone();
        let mut preview = WidgetPreview::new();
        preview.icons = icons;

        let (task_manager, background_action_rx) = TaskManager::new();

        let state = AppState {
            view: match config.ui.default_view.as_str() {
                "widgets" => MainView::Widgets,
                _ => MainView::Launches,
            },
            ..Default::default()
        };

        Self {
            sidebar,
            launches,
            builder,
            preview,
            status_bar: StatusBar::default(),
            state,
            backend,
            task_manager,
            background_action_rx,
            logger,
            removals,
            levels,
            should_quit: false,
            sidebar_width: config.ui.sidebar_width,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Get the number of active background tasks
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Kick off the initial loads on startup: the saved filters for the
    /// sidebar and the unfiltered launches listing.
    pub fn bootstrap(&mut self) {
        info!("starting up: loading filters and the unfiltered launches view");
        self.state.filters_loading = true;
        self.sidebar.set_loading();
        self.task_manager.spawn_load_filters(self.backend.clone());

        let action = Action::NavigateToFilter(NavTarget::new(FILTER_KEY_ALL));
        let _final_action = self.handle_app_action(action);
        self.after_dispatch();

        if self.state.view == MainView::Widgets {
            self.seed_preview();
        }
    }

    /// Route a key through the layers that can claim it: the logs overlay
    /// is modal, then a text input in the builder, then the active page,
    /// then the sidebar, then the global bindings.
    fn route_key(&mut self, key: KeyEvent) -> Action {
        if self.state.show_logs {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('G') => Action::ShowLogs(false),
                KeyCode::Char('c') => {
                    self.logger.clear();
                    Action::None
                }
                _ => Action::None,
            };
        }

        if self.state.view == MainView::Widgets && self.builder.is_editing() {
            return self.builder.handle_key_events(key);
        }

        let page_action = match self.state.view {
            MainView::Launches => self.launches.handle_key_events(key),
            MainView::Widgets => self.builder.handle_key_events(key),
        };
        if !matches!(page_action, Action::None) {
            return page_action;
        }

        let sidebar_action = self.sidebar.handle_key_events(key);
        if !matches!(sidebar_action, Action::None) {
            return sidebar_action;
        }

        self.handle_global_key(key)
    }

    /// Handle global keyboard shortcuts that aren't component-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('G') => Action::ShowLogs(true),
            KeyCode::Tab => {
                let next = match self.state.view {
                    MainView::Launches => MainView::Widgets,
                    MainView::Widgets => MainView::Launches,
                };
                Action::SwitchView(next)
            }
            KeyCode::Char('r') => Action::RefreshFilters,
            _ => Action::None,
        }
    }

    /// Handle app-level actions that require business logic. Component
    /// logic never awaits; backend work leaves here as a spawned task and
    /// returns later through the action channel.
    pub fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                info!("quitting");
                self.launches.destroy();
                self.task_manager.cancel_all_tasks();
                self.should_quit = true;
                Action::None
            }
            Action::SwitchView(view) => {
                debug!("switching main view to {:?}", view);
                self.state.view = view;
                self.state.error_message = None;
                if view == MainView::Widgets {
                    self.seed_preview();
                }
                Action::None
            }
            Action::NavigateToFilter(target) => {
                info!("navigating to filter '{}'", target.key);
                self.state.error_message = None;
                if let Some(ticket) = self.launches.navigate(target) {
                    self.task_manager.spawn_activate_filter(self.backend.clone(), ticket);
                }
                Action::None
            }
            Action::RefreshFilters => {
                if self.state.filters_loading {
                    debug!("filter refresh already in flight, ignoring");
                } else {
                    info!("refreshing saved filters");
                    self.state.filters_loading = true;
                    self.state.error_message = None;
                    self.sidebar.set_loading();
                    self.task_manager.spawn_load_filters(self.backend.clone());
                }
                Action::None
            }
            Action::DeleteFilter(id) => {
                info!("deleting filter '{}'", id);
                self.state.error_message = None;
                self.task_manager.spawn_delete_filter(self.backend.clone(), id);
                Action::None
            }
            Action::PreviewConfigChanged(config) => {
                self.state.error_message = None;
                if let Some(ticket) = self.preview.config_changed(config) {
                    self.task_manager.spawn_fetch_preview(self.backend.clone(), ticket);
                }
                Action::None
            }
            Action::FiltersLoaded(filters) => {
                info!("loaded {} saved filters", filters.len());
                self.state.filters_loading = false;
                self.state.filters = filters.clone();
                self.sidebar.set_filters(filters.clone());
                self.builder.set_filters(filters);
                Action::None
            }
            Action::FiltersLoadFailed(error) => {
                warn!("loading filters failed: {}", error);
                self.state.filters_loading = false;
                self.sidebar.set_error(error.clone());
                self.state.error_message = Some(format!("Loading filters failed: {}", error));
                Action::None
            }
            Action::FilterActivated {
                generation,
                key,
                outcome,
            } => {
                if let Err(error) = &outcome {
                    self.state.error_message = Some(format!("Activating filter '{}' failed: {}", key, error));
                }
                self.launches.gate_complete(generation, outcome);
                Action::None
            }
            Action::LaunchesLoaded { key, path, result } => {
                self.launches.launches_loaded(&key, &path, result);
                Action::None
            }
            Action::PreviewFetched { generation, result } => {
                self.preview.fetched(generation, result);
                Action::None
            }
            Action::FilterDeleted { id, result } => match result {
                Ok(()) => {
                    info!("filter '{}' deleted", id);
                    self.state.filters.retain(|filter| filter.id != id);
                    self.sidebar.remove_filter(&id);
                    let builder_action = self.builder.filter_removed(&id);
                    // The launches page picks the removal up on its next pump.
                    self.removals.publish(id);
                    if let Action::PreviewConfigChanged(config) = builder_action {
                        if let Some(ticket) = self.preview.config_changed(config) {
                            self.task_manager.spawn_fetch_preview(self.backend.clone(), ticket);
                        }
                    }
                    Action::None
                }
                Err(error) => {
                    warn!("deleting filter '{}' failed: {}", id, error);
                    self.state.error_message = Some(format!("Deleting filter '{}' failed: {}", id, error));
                    Action::None
                }
            },
            Action::ShowLogs(show) => {
                self.state.show_logs = show;
                Action::None
            }
            Action::None => Action::None,
        }
    }

    /// Push the builder's current configuration into the preview pane, so
    /// entering the widgets view fetches without waiting for an edit.
    fn seed_preview(&mut self) {
        if let Some(ticket) = self.preview.config_changed(self.builder.config()) {
            self.task_manager.spawn_fetch_preview(self.backend.clone(), ticket);
        }
    }

    /// Drain the launches page's internal events and run whatever work they
    /// produced. Called after every dispatched action so removal fallbacks
    /// and route changes turn into backend calls in the same pass.
    fn after_dispatch(&mut self) {
        for ticket in self.launches.pump() {
            self.task_manager.spawn_activate_filter(self.backend.clone(), ticket);
        }
        if let Some(request) = self.launches.take_load_request() {
            self.task_manager
                .spawn_load_launches(self.backend.clone(), request.key, request.path);
        }
    }

    /// Process background actions from task manager
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();

        while let Ok(action) = self.background_action_rx.try_recv() {
            actions.push(action);
        }

        let completed_tasks = self.task_manager.cleanup_finished_tasks();
        if !completed_tasks.is_empty() {
            debug!("cleaned up {} finished tasks", completed_tasks.len());
        }

        actions
    }

    /// Process an event through the component hierarchy. Returns whether
    /// the event warrants a redraw.
    pub fn handle_event(&mut self, event_type: EventType) -> anyhow::Result<bool> {
        match event_type {
            EventType::Key(key) => {
                let action = self.route_key(key);
                let _final_action = self.handle_app_action(action);
                self.after_dispatch();
                Ok(true)
            }
            EventType::Resize(_, _) => Ok(true),
            EventType::Tick => {
                let actions = self.process_background_actions();
                let redraw = !actions.is_empty();
                for action in actions {
                    let _final_action = self.handle_app_action(action);
                    self.after_dispatch();
                }
                Ok(redraw)
            }
            EventType::Other => Ok(false),
        }
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.route_key(key)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(rect);
        let columns =
            Layout::horizontal([Constraint::Length(self.sidebar_width), Constraint::Min(0)]).split(rows[0]);

        self.sidebar.render(f, columns[0]);
        match self.state.view {
            MainView::Launches => self.launches.render(f, columns[1]),
            MainView::Widgets => {
                let panes =
                    Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(columns[1]);
                self.builder.render(f, panes[0]);
                self.preview.render(f, panes[1]);
            }
        }

        self.status_bar.view = self.state.view;
        self.status_bar.gate = self.launches.gate_status();
        self.status_bar.level = self.launches.level();
        self.status_bar.preview_loading = self.preview.is_loading();
        self.status_bar.task_count = self.task_manager.task_count();
        self.status_bar.message = self.state.error_message.clone();
        self.status_bar.render(f, rows[1]);

        if self.state.show_logs {
            self.render_logs_overlay(f, rect);
        }
    }
}

impl AppComponent {
    /// Centered overlay with the newest log lines on top.
    fn render_logs_overlay(&self, f: &mut Frame, rect: Rect) {
        use ratatui::{
            style::{Color, Style},
            text::Line,
            widgets::{Block, Borders, Clear, Paragraph},
        };

        let popup_area = {
            let popup_layout =
                Layout::vertical([Constraint::Percentage(10), Constraint::Min(10), Constraint::Percentage(10)])
                    .split(rect);

            Layout::horizontal([Constraint::Percentage(10), Constraint::Min(40), Constraint::Percentage(10)])
                .split(popup_layout[1])[1]
        };

        let visible = popup_area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = self
            .logger
            .get_logs()
            .into_iter()
            .take(visible)
            .map(Line::from)
            .collect();

        let content = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(crate::constants::LOGS_TITLE)
                .style(Style::default().fg(Color::Gray)),
        );

        f.render_widget(Clear, popup_area);
        f.render_widget(content, popup_area);
    }
}
