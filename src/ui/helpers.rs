use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Describe a chained error as `outer message: root cause`, dropping the
/// layers in between.
pub(crate) fn surface_error(err: &Error) -> String {
    let outer = err.to_string();
    match err.chain().last().map(|cause| cause.to_string()) {
        Some(root) if root != outer => format!("{outer}: {root}"),
        _ => outer,
    }
}

/// Footer hint line built from `(key, action)` pairs.
pub(crate) fn key_hints(hints: &[(&str, &str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (idx, (key, action)) in hints.iter().enumerate() {
        spans.push(Span::styled(format!("[{key}]"), key_style));
        if idx + 1 == hints.len() {
            spans.push(Span::raw(format!(" {action}")));
        } else {
            spans.push(Span::raw(format!(" {action}   ")));
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use std::io;

    use anyhow::Context;

    use super::*;

    #[test]
    fn surface_error_keeps_outer_and_root() {
        let err = Err::<(), _>(io::Error::new(io::ErrorKind::Other, "disk full"))
            .context("writing")
            .context("failed to write /tmp/x")
            .unwrap_err();
        assert_eq!(surface_error(&err), "failed to write /tmp/x: disk full");
    }

    #[test]
    fn surface_error_of_single_layer_is_the_message() {
        let err = anyhow::anyhow!("nothing else");
        assert_eq!(surface_error(&err), "nothing else");
    }

    #[test]
    fn key_hints_alternate_keys_and_actions() {
        let line = key_hints(&[("q", "Quit"), ("x", "Export")]);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "[q] Quit   [x] Export");
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert!(popup.x >= area.x && popup.right() <= area.right());
    }
}
