use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::App;
use crate::filter::RangePreset;
use crate::theme;

use super::centered_rect;

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    let height = (RangePreset::ALL.len() as u16 + 6).min(area.height.saturating_sub(2));
    let modal_area = centered_rect(50, height, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::CYAN))
        .title(" Received between ");
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let [presets_area, current_area, input_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let rows: Vec<Row> = RangePreset::ALL
        .iter()
        .map(|preset| Row::new(vec![Cell::from(preset.label())]))
        .collect();
    let presets = Table::new(rows, [Constraint::Fill(1)])
        .row_highlight_style(
            Style::default()
                .bg(theme::BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");
    frame.render_stateful_widget(presets, presets_area, &mut app.selector_state);

    let current = if app.date_display.is_empty() {
        Span::styled(" any time", Style::default().fg(theme::TEXT_MUTED))
    } else {
        Span::styled(
            format!(" {}", app.date_display),
            Style::default().fg(theme::GREEN),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(current)), current_area);

    let input = Line::from(vec![
        Span::styled(" range ", Style::default().fg(theme::YELLOW)),
        Span::styled(app.date_draft.as_str(), Style::default().fg(theme::TEXT)),
        Span::styled("_", Style::default().fg(theme::TEXT_MUTED)),
        if app.date_draft.is_empty() {
            Span::styled(
                "  YYYY-MM-DD [HH:MM[:SS]] - YYYY-MM-DD",
                Style::default().fg(theme::TEXT_MUTED),
            )
        } else {
            Span::raw("")
        },
    ]);
    frame.render_widget(
        Paragraph::new(input).style(Style::default().bg(theme::BG_SURFACE)),
        input_area,
    );
}
