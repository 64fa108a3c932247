//! Snapshot-to-text adapters, one per algorithm family
//!
//! Playback is generic over the snapshot type; this is the only place that
//! looks inside a snapshot.

use crate::algorithms::{
    GraphEvent, GraphSnapshot, LcsSnapshot, QueensEvent, QueensSnapshot, SearchOutcome,
    SearchSnapshot, SortEvent, SortSnapshot,
};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

/// Width of the longest bar in the sort view
const BAR_WIDTH: usize = 40;

pub trait SnapshotView {
    /// Pane title
    fn title(&self) -> &'static str;

    /// Renderable description of the snapshot
    fn lines(&self) -> Vec<Line<'static>>;
}

fn style(color: ratatui::style::Color) -> Style {
    Style::default().fg(color)
}

fn bold(color: ratatui::style::Color) -> Style {
    style(color).add_modifier(Modifier::BOLD)
}

fn join(items: &[usize]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl SnapshotView for SortSnapshot {
    fn title(&self) -> &'static str {
        " Array "
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let min = self.values.iter().copied().min().unwrap_or(0);
        let max = self.values.iter().copied().max().unwrap_or(0);
        // abs_diff: the full i64 range does not fit in an i64
        let span = max.abs_diff(min).max(1) as f64;

        self.values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let color = match self.event {
                    SortEvent::Complete => DEFAULT_THEME.success,
                    SortEvent::Compare(a, b) if i == a || i == b => DEFAULT_THEME.highlight,
                    SortEvent::Swap(a, b) if i == a || i == b => DEFAULT_THEME.secondary,
                    _ => DEFAULT_THEME.primary,
                };
                let scaled = value.abs_diff(min) as f64 / span * (BAR_WIDTH - 1) as f64;
                let width = 1 + scaled as usize;
                Line::from(vec![
                    Span::styled(format!("a[{i:>2}] "), style(DEFAULT_THEME.comment)),
                    Span::styled("█".repeat(width), style(color)),
                    Span::styled(format!(" {value}"), style(DEFAULT_THEME.fg)),
                ])
            })
            .collect()
    }
}

impl SnapshotView for SearchSnapshot {
    fn title(&self) -> &'static str {
        " Search "
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let cells: Vec<Span<'static>> = self
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let cell_style = match self.outcome {
                    SearchOutcome::Found(hit) if hit == i => bold(DEFAULT_THEME.success),
                    _ if self.probe == Some(i) => bold(DEFAULT_THEME.highlight),
                    _ if (self.low..self.high).contains(&i) => style(DEFAULT_THEME.primary),
                    _ => style(DEFAULT_THEME.comment),
                };
                Span::styled(format!("[{value:>3}]"), cell_style)
            })
            .collect();

        let outcome = match self.outcome {
            SearchOutcome::Searching => Span::styled(
                format!("window {}..{}", self.low, self.high),
                style(DEFAULT_THEME.fg),
            ),
            SearchOutcome::Found(index) => {
                Span::styled(format!("FOUND at index {index}"), bold(DEFAULT_THEME.success))
            }
            SearchOutcome::NotFound => Span::styled("NOT FOUND", bold(DEFAULT_THEME.error)),
        };

        vec![
            Line::from(vec![
                Span::styled("target ", style(DEFAULT_THEME.comment)),
                Span::styled(self.target.to_string(), bold(DEFAULT_THEME.secondary)),
            ]),
            Line::default(),
            Line::from(cells),
            Line::default(),
            Line::from(outcome),
        ]
    }
}

impl SnapshotView for GraphSnapshot {
    fn title(&self) -> &'static str {
        " Graph "
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let event_node = match self.event {
            GraphEvent::Push(n) | GraphEvent::Skip(n) | GraphEvent::Visit(n) => Some(n),
            GraphEvent::Complete => None,
        };
        let nodes: Vec<Span<'static>> = self
            .marked
            .iter()
            .enumerate()
            .map(|(node, &marked)| {
                let node_style = if self.current == Some(node) {
                    bold(DEFAULT_THEME.highlight)
                } else if event_node == Some(node) {
                    bold(DEFAULT_THEME.secondary)
                } else if self.order.contains(&node) {
                    style(DEFAULT_THEME.success)
                } else if marked {
                    style(DEFAULT_THEME.marked)
                } else {
                    style(DEFAULT_THEME.comment)
                };
                Span::styled(format!("({node}) "), node_style)
            })
            .collect();

        vec![
            Line::from(nodes),
            Line::default(),
            Line::from(vec![
                Span::styled("frontier  ", style(DEFAULT_THEME.comment)),
                Span::styled(format!("[{}]", join(&self.frontier)), style(DEFAULT_THEME.primary)),
            ]),
            Line::from(vec![
                Span::styled("visited   ", style(DEFAULT_THEME.comment)),
                Span::styled(join(&self.order), style(DEFAULT_THEME.success)),
            ]),
        ]
    }
}

impl SnapshotView for LcsSnapshot {
    fn title(&self) -> &'static str {
        " LCS Table "
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut header = vec![Span::raw("      ")];
        header.extend(
            self.right
                .iter()
                .map(|c| Span::styled(format!("{c:>3}"), bold(DEFAULT_THEME.secondary))),
        );
        let mut lines = vec![Line::from(header)];

        for (i, row) in self.table.iter().enumerate() {
            let label = if i == 0 { ' ' } else { self.left[i - 1] };
            let mut spans = vec![Span::styled(format!("{label:>3}"), bold(DEFAULT_THEME.secondary))];
            spans.extend(row.iter().enumerate().map(|(j, value)| {
                let cell_style = if self.cell == Some((i, j)) {
                    bold(DEFAULT_THEME.highlight)
                } else if i == 0 || j == 0 {
                    style(DEFAULT_THEME.comment)
                } else {
                    style(DEFAULT_THEME.fg)
                };
                Span::styled(format!("{value:>3}"), cell_style)
            }));
            lines.push(Line::from(spans));
        }

        if let Some(result) = &self.result {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("LCS = \"{}\" (length {})", result.subsequence, result.length),
                bold(DEFAULT_THEME.success),
            )));
        }
        lines
    }
}

impl SnapshotView for QueensSnapshot {
    fn title(&self) -> &'static str {
        " Board "
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let focus = match self.event {
            QueensEvent::Conflict { row, col } => Some((row, col, DEFAULT_THEME.error)),
            QueensEvent::Place { row, col } => Some((row, col, DEFAULT_THEME.success)),
            QueensEvent::Remove { row, col } => Some((row, col, DEFAULT_THEME.secondary)),
            _ => None,
        };
        let queen_color = if self.is_solved() {
            DEFAULT_THEME.success
        } else {
            DEFAULT_THEME.primary
        };

        (0..self.n)
            .map(|row| {
                let spans: Vec<Span<'static>> = (0..self.n)
                    .map(|col| match focus {
                        Some((r, c, color)) if r == row && c == col => {
                            Span::styled(" ♛ ", bold(color))
                        }
                        _ if self.queens.get(row) == Some(&col) => {
                            Span::styled(" ♛ ", bold(queen_color))
                        }
                        _ => Span::styled(" · ", style(DEFAULT_THEME.comment)),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::BubbleSort;
    use crate::trace::TraceBuilder;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn sort_bars_cover_the_full_i64_range() {
        let store = TraceBuilder::new()
            .build(&BubbleSort, &vec![i64::MAX, i64::MIN])
            .unwrap();

        for step in store.steps() {
            let lines = step.snapshot.lines();
            assert_eq!(lines.len(), 2);
        }

        let lines = store.last().snapshot.lines();
        let shortest = text(&lines[0]).matches('█').count();
        let longest = text(&lines[1]).matches('█').count();
        assert_eq!(shortest, 1);
        assert_eq!(longest, BAR_WIDTH);
        assert!(text(&lines[1]).ends_with(&i64::MAX.to_string()));
    }

    #[test]
    fn equal_values_get_minimal_bars() {
        let store = TraceBuilder::new()
            .build(&BubbleSort, &vec![5, 5, 5])
            .unwrap();
        for line in store.last().snapshot.lines() {
            assert_eq!(text(&line).matches('█').count(), 1);
        }
    }
}
