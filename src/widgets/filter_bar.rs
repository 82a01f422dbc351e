//! One filter cell per filterable column, laid out on the table's grid.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, HighlightSpacing, Row, Table};
use ratatui::Frame;

use crate::app::{App, InputMode};
use crate::columns::{widths, COLUMNS};
use crate::domain::selected_option;
use crate::filter::{FilterControl, FilterField};
use crate::theme;

use super::mail_table::HIGHLIGHT_SYMBOL;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let mut slot = 0;
    let cells: Vec<Cell> = COLUMNS
        .iter()
        .map(|column| match column.filter {
            Some(field) => {
                slot += 1;
                filter_cell(app, field, slot, column.title.trim())
            }
            None => Cell::from(""),
        })
        .collect();

    // Same widths and symbol gutter as the mail table so cells line up.
    let table = Table::new([Row::new(cells)], widths())
        .highlight_symbol(HIGHLIGHT_SYMBOL)
        .highlight_spacing(HighlightSpacing::Always)
        .style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(table, area);
}

fn filter_cell(app: &App, field: FilterField, slot: usize, placeholder: &str) -> Cell<'static> {
    let focused = app.input_mode == InputMode::Filter(field);
    let text = cell_text(app, field);

    let mut spans = vec![Span::styled(
        slot.to_string(),
        Style::default().fg(theme::TEXT_MUTED),
    )];
    if focused {
        spans.push(Span::styled(
            format!(" {}", text),
            Style::default().fg(theme::TEXT).bg(theme::BG_HIGHLIGHT),
        ));
        spans.push(Span::styled("_", Style::default().fg(theme::ACCENT)));
    } else if !text.is_empty() {
        spans.push(Span::styled(
            format!(" {}", text),
            Style::default().fg(theme::GREEN),
        ));
    } else {
        spans.push(Span::styled(
            format!(" {}…", placeholder),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }
    Cell::from(Line::from(spans))
}

fn cell_text(app: &App, field: FilterField) -> String {
    let value = app.filter_value(field);
    match field.control() {
        FilterControl::Text => value.to_string(),
        FilterControl::Select => match selected_option(field, value) {
            Some(option) if option.value.is_empty() => String::new(),
            Some(option) => option.label.to_string(),
            None => value.to_string(),
        },
        FilterControl::DateRange => app.date_display.clone(),
    }
}
