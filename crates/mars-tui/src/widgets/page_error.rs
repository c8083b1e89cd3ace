use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::App;

/// "Page not found" view
pub struct NotFoundWidget;

impl NotFoundWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let top = area.height.saturating_sub(4) / 2;

        let mut lines = vec![Line::default(); usize::from(top)];
        lines.push(Line::from(Span::styled(
            "Oops! 404",
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "The page you were looking for doesn't exist.",
            Style::default().fg(theme.text),
        )));
        lines.push(Line::from(Span::styled(
            "Press H to go home.",
            Style::default().fg(theme.muted),
        )));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().style(Style::default().bg(theme.background)));
        frame.render_widget(paragraph, area);
    }
}
