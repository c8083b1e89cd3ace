use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::App;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub struct LoadingWidget;

impl LoadingWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let frame_char = SPINNER[app.spinner_frame % SPINNER.len()];

        let top = area.height / 2;
        let mut lines = vec![Line::default(); usize::from(top)];
        lines.push(Line::from(format!("{} Loading", frame_char)));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.accent))
            .block(Block::default().style(Style::default().bg(theme.background)));
        frame.render_widget(paragraph, area);
    }
}
