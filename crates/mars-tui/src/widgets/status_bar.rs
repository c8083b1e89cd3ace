use mars_core::PageKind;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let page_str = match app.page {
            PageKind::Viewpager => "DECK",
            PageKind::Post => "POST",
            PageKind::Loading => "LOADING",
            PageKind::List => "LIST",
            PageKind::NotFound => "404",
            PageKind::Empty => "EMPTY",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let mut text = format!(" {}", page_str);
            if let Some(pager) = &app.pager {
                if let Some(current) = pager.current_index() {
                    text.push_str(&format!(" | {}/{}", current + 1, pager.len()));
                }
            }
            if let Some(phase) = app.phase_label() {
                text.push_str(&format!(" | {}", phase));
            }
            text
        };

        let help_hint = match app.page {
            PageKind::Viewpager => " q:quit h/l:prev/next j/k:scroll H:home ",
            PageKind::List => " q:quit j/k:move enter:open 1-9:menu ",
            _ => " q:quit H:home u:back 1-9:menu ",
        };

        let used = status_text.width() + help_hint.width();
        let padding = usize::from(area.width).saturating_sub(used);

        let style = Style::default().fg(theme.status_fg).bg(theme.status_bg);
        let line = Line::from(vec![
            Span::styled(status_text, style),
            Span::styled(" ".repeat(padding), style),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.status_bg)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
