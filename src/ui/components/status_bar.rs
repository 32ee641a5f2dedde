//! Status bar component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui::core::MainView;

/// One-line bar at the bottom of the screen. The app fills the fields in
/// before each frame; the bar itself holds no logic beyond display priority.
#[derive(Default)]
pub struct StatusBar {
    pub view: MainView,
    pub gate: String,
    pub level: Option<usize>,
    pub preview_loading: bool,
    pub task_count: usize,
    pub message: Option<String>,
}

impl StatusBar {
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let status_text = if let Some(message) = &self.message {
            message.clone()
        } else if self.preview_loading {
            "Fetching widget preview...".to_string()
        } else if self.task_count > 0 {
            format!("{} background task(s) running...", self.task_count)
        } else {
            match self.view {
                MainView::Launches => {
                    let mut text = format!("gate: {}", self.gate);
                    if let Some(level) = self.level {
                        text.push_str(&format!(" • level {}", level));
                    }
                    text.push_str(" • J/K: filter • j/k: launches • Enter: drill • D: delete • Tab: widgets • q: quit");
                    text
                }
                MainView::Widgets => {
                    "j/k: template • 1-9: filters • n: launch name • a/x: attributes • l: latest • +/-: items • Tab: launches • q: quit"
                        .to_string()
                }
            }
        };

        let status_color = if self.message.is_some() {
            Color::Red
        } else if self.preview_loading || self.task_count > 0 {
            Color::Yellow
        } else {
            Color::Gray
        };

        let status_bar = Paragraph::new(status_text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(status_color));

        f.render_widget(status_bar, area);
    }
}
