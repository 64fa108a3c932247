//! Step history pane: descriptions of every step up to the current one

use crate::trace::Step;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

/// Render the step history, keeping the current step in view
pub fn render_history_pane<S>(
    frame: &mut Frame,
    area: Rect,
    steps: &[Step<S>],
    position: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Steps ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    let shown = &steps[..=position.min(steps.len().saturating_sub(1))];
    let total_items = shown.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Pin to the newest step unless the user scrolled up
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = shown
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, step)| {
            let style = if i == position {
                Style::default()
                    .fg(DEFAULT_THEME.highlight)
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            ListItem::new(format!("{:>4}  {}", i + 1, step.description)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
