//! Widget builder pane: template catalog plus the settings under edit.
//!
//! Every edit emits a [`Action::PreviewConfigChanged`] carrying the full
//! configuration; the preview pane decides whether the change is material.
//! Template selection is the identity of the preview, so walking the
//! catalog resets it rather than refetching.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::backend::SavedFilter;
use crate::constants::{
    ITEMS_COUNT_STEP, MAX_CONTENT_FIELDS, MAX_ITEMS_COUNT, MIN_ITEMS_COUNT,
};
use crate::icons::IconService;
use crate::ui::core::{actions::Action, Component};
use crate::widgets::{PreviewConfig, WIDGET_TEMPLATES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    /// Typing a launch name pattern; Enter commits, Esc cancels.
    LaunchName,
    /// Typing an attribute key for the content fields.
    Attribute,
}

pub struct WidgetBuilder {
    pub filters: Vec<SavedFilter>,
    pub icons: IconService,
    selected: usize,
    settings: crate::backend::WidgetSettings,
    input_mode: InputMode,
    input_buffer: String,
    list_state: ListState,
}

impl Default for WidgetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetBuilder {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            filters: Vec::new(),
            icons: IconService::default(),
            selected: 0,
            settings: crate::backend::WidgetSettings::default(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            list_state,
        }
    }

    pub fn set_filters(&mut self, filters: Vec<SavedFilter>) {
        self.filters = filters;
    }

    /// The configuration as currently edited.
    pub fn config(&self) -> PreviewConfig {
        PreviewConfig {
            template_id: WIDGET_TEMPLATES
                .get(self.selected)
                .map(|template| template.id.to_string()),
            settings: self.settings.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.input_mode != InputMode::Normal
    }

    /// A filter disappeared server-side; drop it from the selection too.
    /// Emits a config change only when the selection actually held it.
    pub fn filter_removed(&mut self, id: &str) -> Action {
        self.filters.retain(|filter| filter.id != id);
        let before = self.settings.filter_ids.len();
        self.settings.filter_ids.retain(|selected| selected != id);
        if self.settings.filter_ids.len() != before {
            Action::PreviewConfigChanged(self.config())
        } else {
            Action::None
        }
    }

    fn changed(&self) -> Action {
        Action::PreviewConfigChanged(self.config())
    }

    fn toggle_filter(&mut self, index: usize) -> Action {
        let Some(filter) = self.filters.get(index) else {
            return Action::None;
        };
        let id = filter.id.clone();
        if let Some(position) = self.settings.filter_ids.iter().position(|f| *f == id) {
            self.settings.filter_ids.remove(position);
        } else {
            self.settings.filter_ids.push(id);
        }
        self.changed()
    }

    fn commit_input(&mut self) -> Action {
        let text = self.input_buffer.trim().to_string();
        let mode = self.input_mode;
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        match mode {
            InputMode::LaunchName => {
                self.settings.content_parameters.widget_options.launch_name_filter =
                    if text.is_empty() { None } else { Some(text) };
                self.changed()
            }
            InputMode::Attribute => {
                let fields = &mut self.settings.content_parameters.content_fields;
                if text.is_empty()
                    || fields.len() >= MAX_CONTENT_FIELDS
                    || fields.contains(&text)
                {
                    return Action::None;
                }
                fields.push(text);
                self.changed()
            }
            InputMode::Normal => Action::None,
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => self.commit_input(),
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                Action::None
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                Action::None
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render_settings(&self, f: &mut Frame, rect: Rect) {
        let mut lines: Vec<Line> = Vec::new();

        let mut filter_spans = vec![Span::styled("Filters: ", Style::default().fg(Color::DarkGray))];
        if self.filters.is_empty() {
            filter_spans.push(Span::styled("none loaded", Style::default().fg(Color::DarkGray)));
        }
        for (i, filter) in self.filters.iter().enumerate().take(9) {
            let selected = self.settings.filter_ids.contains(&filter.id);
            let style = if selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            filter_spans.push(Span::styled(format!("[{}] {}  ", i + 1, filter.name), style));
        }
        lines.push(Line::from(filter_spans));

        let launch_name = self
            .settings
            .content_parameters
            .widget_options
            .launch_name_filter
            .as_deref()
            .unwrap_or("-");
        lines.push(Line::from(vec![
            Span::styled("Launch name (n): ", Style::default().fg(Color::DarkGray)),
            Span::raw(launch_name.to_string()),
        ]));

        let fields = &self.settings.content_parameters.content_fields;
        let field_text = if fields.is_empty() {
            "-".to_string()
        } else {
            fields.join(", ")
        };
        lines.push(Line::from(vec![
            Span::styled("Attributes (a/x): ", Style::default().fg(Color::DarkGray)),
            Span::raw(field_text),
        ]));

        lines.push(Line::from(vec![
            Span::styled("Latest only (l): ", Style::default().fg(Color::DarkGray)),
            Span::raw(if self.settings.content_parameters.widget_options.latest {
                "yes"
            } else {
                "no"
            }),
        ]));

        lines.push(Line::from(vec![
            Span::styled("Items (+/-): ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.settings.content_parameters.items_count.to_string()),
        ]));

        match self.input_mode {
            InputMode::Normal => {}
            InputMode::LaunchName => lines.push(Line::from(Span::styled(
                format!("Launch name: {}_", self.input_buffer),
                Style::default().fg(Color::Yellow),
            ))),
            InputMode::Attribute => lines.push(Line::from(Span::styled(
                format!("Attribute key: {}_", self.input_buffer),
                Style::default().fg(Color::Yellow),
            ))),
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Settings")
            .title_style(Style::default().fg(Color::White))
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(lines).block(block), rect);
    }
}

impl Component for WidgetBuilder {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.input_mode != InputMode::Normal {
            return self.handle_input_key(key);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1) % WIDGET_TEMPLATES.len();
                self.list_state.select(Some(self.selected));
                self.changed()
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = if self.selected == 0 {
                    WIDGET_TEMPLATES.len() - 1
                } else {
                    self.selected - 1
                };
                self.list_state.select(Some(self.selected));
                self.changed()
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                self.toggle_filter(index)
            }
            KeyCode::Char('n') => {
                self.input_mode = InputMode::LaunchName;
                self.input_buffer = self
                    .settings
                    .content_parameters
                    .widget_options
                    .launch_name_filter
                    .clone()
                    .unwrap_or_default();
                Action::None
            }
            KeyCode::Char('a') => {
                self.input_mode = InputMode::Attribute;
                self.input_buffer.clear();
                Action::None
            }
            KeyCode::Char('x') => {
                if self.settings.content_parameters.content_fields.is_empty() {
                    Action::None
                } else {
                    self.settings.content_parameters.content_fields.clear();
                    self.changed()
                }
            }
            KeyCode::Char('l') => {
                let latest = &mut self.settings.content_parameters.widget_options.latest;
                *latest = !*latest;
                self.changed()
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let count = self.settings.content_parameters.items_count;
                let next = (count + ITEMS_COUNT_STEP).min(MAX_ITEMS_COUNT);
                self.settings.content_parameters.items_count = next;
                self.changed()
            }
            KeyCode::Char('-') => {
                let count = self.settings.content_parameters.items_count;
                let next = count.saturating_sub(ITEMS_COUNT_STEP).max(MIN_ITEMS_COUNT);
                self.settings.content_parameters.items_count = next;
                self.changed()
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = Layout::vertical([Constraint::Min(4), Constraint::Length(9)]).split(rect);

        let items: Vec<ListItem> = WIDGET_TEMPLATES
            .iter()
            .map(|template| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", self.icons.widget())),
                    Span::styled(template.title, Style::default().fg(Color::White)),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Templates")
                    .title_style(Style::default().fg(Color::White))
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(list, chunks[0], &mut self.list_state);

        self.render_settings(f, chunks[1]);
    }
}
