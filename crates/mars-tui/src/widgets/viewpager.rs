use ratatui::{layout::Rect, style::Style, widgets::Block, Frame};

use super::post::PostWidget;
use crate::app::App;

pub struct ViewpagerWidget;

impl ViewpagerWidget {
    /// Draw the mounted deck items at their animated positions. Items still
    /// sliding are drawn first so the settled post stays on top.
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        frame.render_widget(
            Block::default().style(Style::default().bg(app.theme.background)),
            area,
        );
        let Some(pager) = app.pager.as_ref() else {
            return;
        };
        let settled = pager.settled_index();

        let mut order: Vec<usize> = pager.visible_indices().collect();
        order.sort_by_key(|&i| Some(i) == settled);

        for index in order {
            let Some(x) = app.item_x(index) else {
                continue;
            };
            let scroll = if Some(index) == settled {
                app.scroll.current_scroll()
            } else {
                0
            };
            PostWidget::render(frame, area, app, &pager.links()[index], x, scroll);
        }
    }
}
