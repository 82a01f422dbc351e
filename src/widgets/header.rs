use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, ConnectionStatus};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let mut left_spans: Vec<Span> = vec![
        Span::styled(
            " m9s ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled("Mail", Style::default().fg(theme::TEXT_DIM)),
        Span::styled(" › ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(
            "Mail server",
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(count) = app.listing.count() {
        left_spans.push(Span::styled(
            format!(" ({})", count),
            Style::default().fg(theme::TEXT_DIM),
        ));
    }

    let active = app.committed_filter_count();
    if active > 0 {
        left_spans.push(Span::styled(
            format!("  ⧩ {} filter{}", active, if active == 1 { "" } else { "s" }),
            Style::default().fg(theme::GREEN),
        ));
    }

    // Build right-aligned status spans
    let mut right_spans: Vec<Span> = Vec::new();

    if app.listing.loading {
        right_spans.push(Span::styled(
            "◌ loading  ",
            Style::default().fg(theme::YELLOW),
        ));
    } else {
        right_spans.push(Span::styled("r", Style::default().fg(theme::ACCENT)));
        right_spans.push(Span::styled(
            ":refresh  ",
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    let connection_indicator = match &app.connection_status {
        ConnectionStatus::Connected => {
            Span::styled("● Connected", Style::default().fg(theme::GREEN))
        }
        ConnectionStatus::Connecting => {
            Span::styled("◌ Connecting...", Style::default().fg(theme::YELLOW))
        }
        ConnectionStatus::Error(_) => Span::styled("✗ Unreachable", Style::default().fg(theme::RED)),
    };
    right_spans.push(connection_indicator);

    if let Some(at) = app.last_refresh {
        right_spans.push(Span::styled(
            format!("  ↻ {}s ago", at.elapsed().as_secs()),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    right_spans.push(Span::raw(" "));

    // Calculate widths and fill gap with spaces
    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
    let gap = (area.width as usize).saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(gap)));
    spans.extend(right_spans);

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}
