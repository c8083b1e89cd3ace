use mars_core::config::UiConfig;
use mars_core::source::Post;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::App;

/// Columns kept free on each side of the text
const MARGIN: u16 = 2;

/// A post laid out for one viewport width
#[derive(Debug, Clone)]
pub struct PostBody {
    pub title: Vec<String>,
    /// Author and date line
    pub meta: Option<String>,
    pub body: Vec<String>,
}

impl PostBody {
    pub fn layout(post: &Post, width: u16, ui: &UiConfig) -> Self {
        let text_width = usize::from(width.saturating_sub(MARGIN * 2).max(10));

        let mut meta = Vec::new();
        if ui.show_author {
            if let Some(author) = &post.author {
                meta.push(format!("by {}", author));
            }
        }
        if ui.show_timestamps {
            if let Some(date) = post.date {
                meta.push(date.format("%B %-d, %Y").to_string());
            }
        }

        Self {
            title: wrap_text(&post.title, text_width),
            meta: (!meta.is_empty()).then(|| meta.join(" · ")),
            body: post
                .body_text(text_width)
                .lines()
                .map(|line| line.trim_end().to_string())
                .collect(),
        }
    }

    /// Total height in rows
    pub fn height(&self) -> u16 {
        let rows = self.title.len() + usize::from(self.meta.is_some()) + 1 + self.body.len();
        u16::try_from(rows).unwrap_or(u16::MAX)
    }
}

/// Greedy word wrap by display width. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width: usize = word.chars().filter_map(|c| c.width()).sum();
        let needed = if line.is_empty() { word_width } else { line_width + 1 + word_width };

        if needed <= width {
            if !line.is_empty() {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }

        if word_width <= width {
            line.push_str(word);
            line_width = word_width;
            continue;
        }

        for c in word.chars() {
            let w = c.width().unwrap_or(0);
            if line_width + w > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(c);
            line_width += w;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub struct PostWidget;

impl PostWidget {
    /// Draw the post at `link` shifted `offset` columns to the right.
    /// Only the part that overlaps `area` is drawn.
    pub fn render(frame: &mut Frame, area: Rect, app: &App, link: &str, offset: i32, scroll: u16) {
        let Ok(shift) = u16::try_from(offset.unsigned_abs()) else {
            return;
        };
        if shift >= area.width {
            return;
        }
        let visible = area.width - shift;
        let (x, skip) = if offset >= 0 {
            (area.x + shift, 0)
        } else {
            (area.x, shift)
        };
        let rect = Rect::new(x, area.y, visible, area.height);

        frame.render_widget(Clear, rect);
        let Some(body) = app.body(link) else {
            return;
        };

        let theme = &app.theme;
        let pad = " ".repeat(usize::from(MARGIN));
        let mut lines: Vec<Line> = Vec::with_capacity(usize::from(body.height()));

        let title_style = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);
        for title in &body.title {
            lines.push(Line::from(vec![
                Span::raw(pad.clone()),
                Span::styled(title.clone(), title_style),
            ]));
        }
        if let Some(meta) = &body.meta {
            lines.push(Line::from(vec![
                Span::raw(pad.clone()),
                Span::styled(meta.clone(), Style::default().fg(theme.muted)),
            ]));
        }
        lines.push(Line::default());
        for text in &body.body {
            lines.push(Line::from(format!("{}{}", pad, text)));
        }

        let paragraph = Paragraph::new(lines)
            .style(Style::default().fg(theme.text).bg(theme.background))
            .scroll((scroll, skip));
        frame.render_widget(paragraph, rect);
    }
}
