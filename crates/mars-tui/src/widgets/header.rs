use mars_core::router::normalize_link;
use mars_core::Router;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Site title and numbered menu
pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let base = Style::default().fg(theme.header_fg).bg(theme.header_bg);
        let current = app.router.link();

        let mut spans = vec![Span::styled(
            format!(" {} ", app.config.site.title),
            base.add_modifier(Modifier::BOLD),
        )];

        for (i, entry) in app.config.site.menu.iter().enumerate().take(9) {
            let style = if normalize_link(&entry.link) == current {
                base.fg(theme.header_active).add_modifier(Modifier::UNDERLINED)
            } else {
                base
            };
            spans.push(Span::styled(" ", base));
            spans.push(Span::styled(format!("{}:{}", i + 1, entry.label), style));
        }

        let description = &app.config.site.description;
        if !description.is_empty() {
            spans.push(Span::styled(
                format!("  {}", description),
                base.fg(theme.header_active).add_modifier(Modifier::ITALIC),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).style(base);
        frame.render_widget(paragraph, area);
    }
}
