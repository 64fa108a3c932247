//! Main pane: the current snapshot as drawn by its [`SnapshotView`]

use crate::trace::Step;
use crate::ui::theme::DEFAULT_THEME;
use crate::ui::view::SnapshotView;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

pub fn render_snapshot_pane<S: SnapshotView>(
    frame: &mut Frame,
    area: Rect,
    algorithm: &str,
    step: &Step<S>,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!("{}· {} ", step.snapshot.title(), algorithm))
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(2, 1, 1, 0));

    let mut lines = vec![
        Line::from(Span::styled(
            step.description.clone(),
            Style::default()
                .fg(DEFAULT_THEME.fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    lines.extend(step.snapshot.lines());

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

/// Inline failure message shown in place of the playback panes
pub fn render_failure_pane(frame: &mut Frame, area: Rect, algorithm: &str, message: &str) {
    let block = Block::default()
        .title(format!(" {algorithm} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.error))
        .padding(Padding::new(2, 1, 1, 0));

    let lines = vec![
        Line::from(Span::styled(
            "Could not build a trace for this input",
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(DEFAULT_THEME.fg),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Press r to retry with new input, q to quit.",
            Style::default().fg(DEFAULT_THEME.comment),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
