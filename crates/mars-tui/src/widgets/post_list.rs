use mars_core::ContentLookup;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;

pub struct PostListWidget;

impl PostListWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let Some(archive) = app.data.archive() else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let heading = Paragraph::new(Line::from(Span::styled(
            format!("  {}", archive.title),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .style(Style::default().bg(theme.background));
        frame.render_widget(heading, chunks[0]);

        let block = Block::default().style(Style::default().bg(theme.background));

        if archive.items.is_empty() {
            let empty = Paragraph::new("  No posts yet.")
                .style(Style::default().fg(theme.muted))
                .block(block);
            frame.render_widget(empty, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = archive
            .items
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let data = app.store.get(link);
                let (title, date) = match data.post() {
                    Some(post) => (
                        post.title.clone(),
                        post.date.map(|d| d.format("%Y-%m-%d").to_string()),
                    ),
                    None => (link.clone(), None),
                };

                let title_style = if i == app.list_cursor {
                    Style::default().fg(theme.text).bg(theme.selection)
                } else {
                    Style::default().fg(theme.text)
                };

                let mut spans = vec![Span::raw("  "), Span::styled(title, title_style)];
                if app.config.ui.show_timestamps {
                    if let Some(date) = date {
                        spans.push(Span::styled(
                            format!("  {}", date),
                            Style::default().fg(theme.muted),
                        ));
                    }
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.selection));

        let mut state = ListState::default();
        state.select(Some(app.list_cursor));

        frame.render_stateful_widget(list, chunks[1], &mut state);
    }
}
