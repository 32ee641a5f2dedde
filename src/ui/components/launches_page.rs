//! Launches page: a filter gate in front of a nested launches body.
//!
//! The page owns a [`GatedComposer`] whose child is a [`LaunchBody`]. All
//! the lifecycle rules live in the composer; this component supplies the
//! domain pieces (how to build a body, what the header region shows) and
//! translates between actions and composer calls.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::backend::SavedFilter;
use crate::constants::{ALL_LAUNCHES_LABEL, FILTER_KEY_ALL};
use crate::icons::IconService;
use crate::ui::core::actions::Action;
use crate::ui::core::composer::{ChildBuilder, Container, GateState, GateTicket, GatedComposer, NavTarget};
use crate::ui::core::notifier::Notifier;
use crate::ui::core::reconciler::Generation;
use crate::ui::core::Component;

use super::launch_body::{LaunchBody, LoadRequest};

/// The page's own rendered header, cleared by the composer as part of its
/// teardown order (after the child, before the remaining bindings).
#[derive(Debug, Default)]
pub struct HeaderRegion {
    pub line: Option<String>,
}

impl Container for HeaderRegion {
    fn clear(&mut self) {
        self.line = None;
    }
}

/// Builds one body per opened gate; the level notifier is shared so every
/// body reports into the same channel the composer watches.
pub struct BodyBuilder {
    levels: Notifier<usize>,
    icons: IconService,
}

impl ChildBuilder for BodyBuilder {
    type View = LaunchBody;

    fn build(&mut self, key: &str) -> LaunchBody {
        LaunchBody::new(key, self.levels.clone(), self.icons.clone())
    }
}

pub struct LaunchesPage {
    composer: GatedComposer<BodyBuilder, HeaderRegion>,
    icons: IconService,
}

impl LaunchesPage {
    pub fn new(
        fallback_key: &str,
        removals: &Notifier<String>,
        levels: &Notifier<usize>,
        icons: IconService,
    ) -> Self {
        let builder = BodyBuilder {
            levels: levels.clone(),
            icons: icons.clone(),
        };
        let mut composer = GatedComposer::new(builder, HeaderRegion::default(), fallback_key);
        composer.watch_removals(removals);
        composer.watch_levels(levels);
        Self { composer, icons }
    }

    /// Route a navigation change into the gate. The caller must run the
    /// returned ticket, if any.
    pub fn navigate(&mut self, target: NavTarget) -> Option<GateTicket> {
        let ticket = self.composer.navigate(target);
        self.note_transition();
        ticket
    }

    /// Report a gate outcome. Carries the activated filter so the header
    /// can name it; the name is only applied when the gate actually opened.
    pub fn gate_complete(&mut self, generation: Generation, outcome: Result<SavedFilter, String>) {
        let name = outcome.as_ref().ok().map(|filter| filter.name.clone());
        let opened = self.composer.gate_complete(generation, outcome.map(|_| ()));
        if opened {
            if let Some(name) = name {
                self.composer.container_mut().line = Some(format!("Filter: {}", name));
            }
        }
    }

    /// Drain removal and level events; returned tickets must be run like
    /// those from [`navigate`](Self::navigate). A removal can move the gate
    /// without a ticket (sentinel fallback), so the header is refreshed
    /// unconditionally.
    pub fn pump(&mut self) -> Vec<GateTicket> {
        let tickets = self.composer.pump();
        self.note_transition();
        tickets
    }

    pub fn launches_loaded(&mut self, key: &str, path: &[String], result: Result<Vec<crate::backend::LaunchSummary>, String>) {
        if let Some(body) = self.composer.child_mut() {
            body.launches_loaded(key, path, result);
        }
    }

    pub fn take_load_request(&mut self) -> Option<LoadRequest> {
        self.composer.child_mut().and_then(|body| body.take_load_request())
    }

    pub fn state(&self) -> &GateState {
        self.composer.state()
    }

    pub fn active_key(&self) -> Option<&str> {
        self.composer.active_key()
    }

    /// Depth the body last reported, for the status line.
    pub fn level(&self) -> Option<usize> {
        self.composer.child_level()
    }

    /// One-line description of where the gate is, for the status bar.
    pub fn gate_status(&self) -> String {
        match self.composer.state() {
            GateState::Uninitialized => "no filter".to_string(),
            GateState::Activating { key } => format!("activating '{}'", key),
            GateState::Active { key } if key == FILTER_KEY_ALL => ALL_LAUNCHES_LABEL.to_lowercase(),
            GateState::Active { key } => format!("filter '{}'", key),
            GateState::Destroyed => "destroyed".to_string(),
        }
    }

    pub fn destroy(&mut self) {
        self.composer.destroy();
    }

    /// Header text for states the gate outcome does not name: the sentinel
    /// is labeled directly, and anything not active shows nothing. A named
    /// filter's line is written by [`gate_complete`](Self::gate_complete).
    fn note_transition(&mut self) {
        let line = match self.composer.state() {
            GateState::Active { key } if key == FILTER_KEY_ALL => Some(ALL_LAUNCHES_LABEL.to_string()),
            GateState::Active { .. } | GateState::Destroyed => return,
            GateState::Uninitialized | GateState::Activating { .. } => None,
        };
        self.composer.container_mut().line = line;
    }
}

impl Component for LaunchesPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match self.composer.child_mut() {
            Some(body) => body.handle_key_events(key),
            None => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(rect);

        let header = match &self.composer.container().line {
            Some(line) => Line::from(Span::styled(
                format!(" {} {}", self.icons.filter(false), line),
                Style::default().fg(Color::Cyan),
            )),
            None => match self.composer.state() {
                GateState::Activating { key } => Line::from(Span::styled(
                    format!(" {} activating filter '{}'...", self.icons.loading(), key),
                    Style::default().fg(Color::Yellow),
                )),
                _ => Line::from(Span::styled(" no filter selected", Style::default().fg(Color::DarkGray))),
            },
        };
        f.render_widget(Paragraph::new(header), chunks[0]);

        match self.composer.child_mut() {
            Some(body) => body.render(f, chunks[1]),
            None => {
                let placeholder = Paragraph::new("Waiting for a filter to activate")
                    .style(Style::default().fg(Color::DarkGray));
                f.render_widget(placeholder, chunks[1]);
            }
        }
    }
}
