//! Sidebar listing the saved filters a launch view can be gated on.
//!
//! The first entry is always the synthetic "All launches" row; real filters
//! from the server follow it. Moving the selection emits a navigation
//! action, so the launches page re-gates as the user walks the list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::backend::SavedFilter;
use crate::constants::{ALL_LAUNCHES_LABEL, FILTER_KEY_ALL};
use crate::icons::IconService;
use crate::ui::core::composer::NavTarget;
use crate::ui::core::{actions::Action, Component};

pub struct FilterSidebar {
    pub filters: Vec<SavedFilter>,
    pub icons: IconService,
    selected_index: usize,
    list_state: ListState,
    loading: bool,
    error: Option<String>,
}

impl Default for FilterSidebar {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSidebar {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            filters: Vec::new(),
            icons: IconService::default(),
            selected_index: 0,
            list_state,
            loading: false,
            error: None,
        }
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn set_filters(&mut self, filters: Vec<SavedFilter>) {
        self.filters = filters;
        self.loading = false;
        self.error = None;
        // The synthetic row never disappears, so only real rows need clamping.
        if self.selected_index > self.filters.len() {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    pub fn set_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Drop a filter row by id, keeping the selection on a valid row. Used
    /// after a delete confirmation comes back from the server.
    pub fn remove_filter(&mut self, id: &str) {
        self.filters.retain(|filter| filter.id != id);
        if self.selected_index > self.filters.len() {
            self.selected_index = self.filters.len();
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Key of the row the cursor is on. Index 0 is the synthetic row.
    pub fn selected_key(&self) -> String {
        if self.selected_index == 0 {
            FILTER_KEY_ALL.to_string()
        } else {
            self.filters
                .get(self.selected_index - 1)
                .map(|filter| filter.id.clone())
                .unwrap_or_else(|| FILTER_KEY_ALL.to_string())
        }
    }

    /// The real filter under the cursor, if the cursor is on one.
    pub fn selected_filter(&self) -> Option<&SavedFilter> {
        if self.selected_index == 0 {
            None
        } else {
            self.filters.get(self.selected_index - 1)
        }
    }

    fn total_rows(&self) -> usize {
        self.filters.len() + 1
    }

    fn select(&mut self, index: usize) -> Action {
        self.selected_index = index;
        self.list_state.select(Some(index));
        Action::NavigateToFilter(NavTarget::new(self.selected_key()))
    }
}

impl Component for FilterSidebar {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('J') | KeyCode::Down if key.modifiers.contains(KeyModifiers::SHIFT) => {
                let next = (self.selected_index + 1) % self.total_rows();
                self.select(next)
            }
            KeyCode::Char('K') | KeyCode::Up if key.modifiers.contains(KeyModifiers::SHIFT) => {
                let prev = if self.selected_index == 0 {
                    self.total_rows() - 1
                } else {
                    self.selected_index - 1
                };
                self.select(prev)
            }
            KeyCode::Char('D') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                // The synthetic row cannot be deleted.
                match self.selected_filter() {
                    Some(filter) => Action::DeleteFilter(filter.id.clone()),
                    None => Action::None,
                }
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Filters")
            .title_style(Style::default().fg(Color::White))
            .border_style(Style::default().fg(Color::DarkGray));

        if self.loading && self.filters.is_empty() {
            let paragraph = Paragraph::new(format!("{} Loading filters...", self.icons.loading()))
                .block(block)
                .style(Style::default().fg(Color::Yellow));
            f.render_widget(paragraph, rect);
            return;
        }

        if let Some(error) = &self.error {
            let paragraph = Paragraph::new(format!("{} {}", self.icons.error(), error))
                .block(block)
                .style(Style::default().fg(Color::Red));
            f.render_widget(paragraph, rect);
            return;
        }

        let mut items: Vec<ListItem> = Vec::with_capacity(self.total_rows());
        items.push(ListItem::new(Line::from(vec![
            Span::raw(format!("{} ", self.icons.all_launches())),
            Span::styled(ALL_LAUNCHES_LABEL, Style::default().fg(Color::White)),
        ])));
        for filter in &self.filters {
            let mut spans = vec![
                Span::raw(format!("{} ", self.icons.filter(filter.is_shared))),
                Span::styled(filter.name.clone(), Style::default().fg(Color::White)),
            ];
            if !filter.owner.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", filter.owner),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            items.push(ListItem::new(Line::from(spans)));
        }

        let list = List::new(items)
            .block(block)
            .style(Style::default().fg(Color::White))
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

        f.render_stateful_widget(list, rect, &mut self.list_state);
    }
}
