use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::theme;

/// Rendered above and below the table from the same `Pagination`.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let pagination = &app.pagination;

    let enabled = Style::default().fg(theme::ACCENT);
    let disabled = Style::default().fg(theme::TEXT_MUTED);
    let pages = pagination
        .total_pages()
        .map_or_else(|| "?".to_string(), |total| total.to_string());

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            "‹ prev",
            if pagination.prev_page().is_some() {
                enabled
            } else {
                disabled
            },
        ),
        Span::styled(
            format!("  Page {} / {}  ", pagination.page, pages),
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "next ›",
            if pagination.next_page().is_some() {
                enabled
            } else {
                disabled
            },
        ),
    ];

    if let Some(count) = pagination.total_count {
        let rows = app.listing.rows().len();
        spans.push(Span::styled(
            format!(
                "   {}-{} of {}",
                pagination.first_content(),
                pagination.last_content(rows),
                count
            ),
            Style::default().fg(theme::TEXT_DIM),
        ));
    }

    spans.push(Span::styled(
        format!("   {} / page", pagination.page_size.label),
        Style::default().fg(theme::TEXT_DIM),
    ));

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_DARK));
    frame.render_widget(widget, area);
}
