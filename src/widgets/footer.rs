use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, InputMode, Overlay};
use crate::columns::{QUICK_FILTERS, ROW_OPERATIONS};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match (&app.overlay, &app.input_mode) {
        (Overlay::Confirm(_), _) => vec![hint("y/Enter", "restart"), hint("n/Esc", "cancel")],
        (Overlay::Selector(_), _) => vec![
            hint("j/k", "nav"),
            hint("Enter", "apply"),
            hint("Ctrl+U", "clear"),
            hint("Esc", "close"),
        ],
        (Overlay::DateRange, _) => vec![
            hint("↑/↓", "preset"),
            hint("type", "custom range"),
            hint("Enter", "apply"),
            hint("Ctrl+U", "clear"),
            hint("Esc", "cancel"),
        ],
        (Overlay::Help, _) => vec![hint("?/Esc", "close")],
        (Overlay::None, InputMode::Filter(_)) => vec![
            hint("Enter/Esc", "done"),
            hint("Tab", "next field"),
            hint("Ctrl+U", "clear"),
        ],
        (Overlay::None, InputMode::Command) => {
            vec![hint("Esc", "cancel"), hint("Tab", "complete"), hint("Enter", "execute")]
        }
        (Overlay::None, InputMode::PendingG) => vec![hint("g", "top")],
        (Overlay::None, InputMode::Normal) => build_list_hints(),
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            key.as_str(),
            Style::default().fg(theme::ACCENT),
        ));
        spans.push(Span::styled(
            format!(":{}", desc),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(widget, area);
}

fn hint(key: &str, desc: &str) -> (String, String) {
    (key.to_string(), desc.to_string())
}

fn build_list_hints() -> Vec<(String, String)> {
    let mut hints = vec![
        hint("j/k", "nav"),
        hint("n/p", "page"),
        hint("1-8", "filter"),
        hint("X", "clear"),
        hint(":", "cmd"),
    ];
    hints.extend(
        ROW_OPERATIONS
            .iter()
            .map(|op| (op.key.to_string(), op.label.to_string())),
    );
    let quick: String = QUICK_FILTERS.iter().map(|q| q.key).collect();
    hints.push(hint(&quick, "quick filter"));
    hints.push(hint("?", "help"));
    hints.push(hint("q", "quit"));
    hints
}
