//! Status bar rendering with keybindings and playback indicators

use crate::playback::PlaybackStatus;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Everything the status bar shows
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub position: usize,
    pub total: usize,
    pub status: PlaybackStatus,
    pub speed: f64,
    pub globally_paused: bool,
}

/// Render the status bar at the bottom while a trace is loaded
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left_spans = vec![
        Span::styled(
            format!(" Step {}/{} ", data.position + 1, data.total),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}x ", format_speed(data.speed)),
            Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];
    frame.render_widget(
        Paragraph::new(Line::from(left_spans))
            .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            .alignment(Alignment::Left),
        layout[0],
    );

    let mut right_spans = keybinds(&[
        ("←/→", "step"),
        ("⎵", "play"),
        ("↵ / ⌫", "end/reset"),
        ("+/-", "speed"),
        ("p", "pause all"),
        ("R", "reset all"),
        ("q", "quit"),
    ]);

    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);
    let indicator = if data.globally_paused {
        Some((" ⏸ HELD ", DEFAULT_THEME.comment))
    } else {
        match data.status {
            PlaybackStatus::Playing => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
            PlaybackStatus::Terminal => Some((" END ", DEFAULT_THEME.error)),
            PlaybackStatus::IdleAtStart => Some((" START ", DEFAULT_THEME.success)),
            PlaybackStatus::Paused => None,
        }
    };
    if let Some((label, color)) = indicator {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            label,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(right_spans))
            .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            .alignment(Alignment::Right),
        layout[1],
    );
}

/// Status bar shown instead of playback controls when the build failed
pub fn render_failure_bar(frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        " BUILD FAILED ",
        Style::default()
            .bg(DEFAULT_THEME.error)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )];
    spans.extend(keybinds(&[("r", "retry"), ("q", "quit")]));
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(DEFAULT_THEME.current_line_bg)),
        area,
    );
}

fn keybinds(pairs: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut spans = Vec::new();
    for (i, (key, desc)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│", sep_style));
        }
        spans.push(Span::styled(format!(" {key} "), key_style));
        spans.push(Span::styled(format!(" {desc} "), desc_style));
    }
    spans
}

fn format_speed(speed: f64) -> String {
    if speed.fract() == 0.0 {
        format!("{speed:.0}")
    } else {
        format!("{speed}")
    }
}
