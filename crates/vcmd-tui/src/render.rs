//! Pure rendering of the application state.
//!
//! Panes are drawn in creation order so ephemeral panes land on top of the
//! permanent layout. Nothing here mutates state.

use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::{display_width_until, expand_tabs, wrap_to_width};
use crate::state::AppState;
use crate::views::{View, ViewName};

const ACCENT: Color = Color::Green;

/// Renders every live pane.
pub fn render(app: &AppState, frame: &mut Frame) {
    let focused = app.focused();
    for view in app.views.iter() {
        draw_view(frame, app, view, focused == Some(view.name));
    }
}

fn draw_view(frame: &mut Frame, app: &AppState, view: &View, focused: bool) {
    if !view.name.is_permanent() {
        frame.render_widget(Clear, view.rect);
    }

    if view.props.framed {
        let mut block = Block::bordered();
        if !view.props.title.is_empty() {
            block = block.title(format!(" {} ", view.props.title));
        }
        if focused {
            block = block.border_style(Style::default().fg(ACCENT));
        }
        frame.render_widget(block, view.rect);
    }

    let inner = view.inner();
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let lines = pane_lines(app, view);
    let cursor = (focused && view.props.editable).then(|| view.buffer.cursor());
    let visible = visible_rows(
        &lines,
        view,
        usize::from(inner.width),
        usize::from(inner.height),
        cursor,
    );

    let selected = view.props.highlight.then(|| view.buffer.cursor().0);
    let width = usize::from(inner.width);
    let rendered: Vec<Line> = visible
        .rows
        .into_iter()
        .map(|row| {
            if selected == Some(row.logical) {
                let pad = width.saturating_sub(row.text.width());
                let text = format!("{}{}", row.text, " ".repeat(pad));
                Line::styled(
                    text,
                    Style::default()
                        .bg(ACCENT)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(row.text)
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(rendered), inner);

    if let Some((x, y)) = visible.cursor
        && x < width
        && y < usize::from(inner.height)
    {
        frame.set_cursor_position((inner.x + x as u16, inner.y + y as u16));
    }
}

/// Text of a pane. The log and legend panes draw from app state; the rest
/// from their own buffers.
fn pane_lines(app: &AppState, view: &View) -> Vec<String> {
    match view.name {
        ViewName::Log => app.log.entries().iter().map(ToString::to_string).collect(),
        ViewName::Legend => app.legend.lines().map(ToString::to_string).collect(),
        _ => view.buffer.lines().to_vec(),
    }
}

#[derive(Debug, PartialEq, Eq)]
struct VisualRow {
    text: String,
    logical: usize,
}

#[derive(Debug)]
struct Visible {
    rows: Vec<VisualRow>,
    /// Cursor (column, row) relative to the visible rows.
    cursor: Option<(usize, usize)>,
}

/// Lays out the rows that fit in a `width` x `height` area.
///
/// The pane origin counts logical lines; a wrapped line can take several
/// screen rows, so the rows are scrolled further until the line that must
/// stay on screen is visible. That line is the one holding the edit cursor,
/// or the highlighted selection of a list.
fn visible_rows(
    lines: &[String],
    view: &View,
    width: usize,
    height: usize,
    cursor: Option<(usize, usize)>,
) -> Visible {
    let (origin_x, origin_y) = view.origin;
    let start = if view.props.autoscroll {
        0
    } else {
        origin_y.min(lines.len())
    };
    let keep = cursor
        .map(|(row, _)| row)
        .or_else(|| view.props.highlight.then(|| view.buffer.cursor().0));

    let mut rows: Vec<VisualRow> = Vec::new();
    let mut line_starts: Vec<usize> = Vec::new();
    let mut cursor_at: Option<(usize, usize)> = None;
    // First and last screen row that must be shown.
    let mut keep_span: Option<(usize, usize)> = None;

    for (idx, line) in lines.iter().enumerate().skip(start) {
        let first = rows.len();
        line_starts.push(first);
        let cursor_col = cursor.filter(|(row, _)| *row == idx).map(|(_, col)| col);

        if view.props.wrap {
            rows.extend(wrap_to_width(line, width).into_iter().map(|text| VisualRow {
                text,
                logical: idx,
            }));
            if let Some(col) = cursor_col {
                let w = display_width_until(line, col);
                let (x, y) = (w % width, w / width);
                // A cursor after a line that fills its last row exactly gets
                // a row of its own instead of landing on the next line.
                if first + y >= rows.len() {
                    rows.push(VisualRow {
                        text: String::new(),
                        logical: idx,
                    });
                }
                cursor_at = Some((x, first + y));
            }
        } else {
            let skip = display_width_until(line, origin_x);
            rows.push(VisualRow {
                text: skip_columns(&expand_tabs(line), skip),
                logical: idx,
            });
            if let Some(col) = cursor_col {
                let w = display_width_until(line, col);
                cursor_at = Some((w.saturating_sub(skip), first));
            }
        }

        if keep == Some(idx) {
            keep_span = match (cursor_col, cursor_at) {
                (Some(_), Some((_, y))) => Some((y, y)),
                _ => Some((first, rows.len() - 1)),
            };
        }

        let keep_done = keep.is_none() || keep_span.is_some();
        if !view.props.autoscroll && rows.len() >= height && keep_done {
            break;
        }
    }

    let skip = if view.props.autoscroll {
        rows.len().saturating_sub(height)
    } else {
        match keep_span {
            Some((lo, hi)) if hi >= height => {
                let needed = hi + 1 - height;
                // Prefer starting on a line boundary while the span still fits.
                line_starts
                    .iter()
                    .copied()
                    .find(|&s| s >= needed && s <= lo)
                    .unwrap_or_else(|| needed.min(lo))
            }
            _ => 0,
        }
    };

    let cursor = cursor_at.map(|(x, y)| (x, y.saturating_sub(skip)));
    let rows = rows.into_iter().skip(skip).take(height).collect();
    Visible { rows, cursor }
}

fn skip_columns(text: &str, columns: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        if used < columns {
            used += unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            continue;
        }
        out.push(ch);
    }
    out
}
