use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Row, Table};
use ratatui::Frame;

use crate::app::{App, SelectorTarget};
use crate::domain::options_for;
use crate::pagination::PAGE_SIZE_OPTIONS;
use crate::theme;

use super::centered_rect;

pub fn render(app: &mut App, target: SelectorTarget, frame: &mut Frame, area: Rect) {
    let (title, entries): (String, Vec<(String, bool)>) = match target {
        SelectorTarget::Filter(field) => {
            let current = app.filter_value(field);
            (
                format!(" {} ", field.label()),
                options_for(field)
                    .iter()
                    .map(|o| (o.label.to_string(), o.value == current))
                    .collect(),
            )
        }
        SelectorTarget::PageSize => (
            " Rows per page ".to_string(),
            PAGE_SIZE_OPTIONS
                .iter()
                .map(|o| (o.label.to_string(), *o == app.pagination.page_size))
                .collect(),
        ),
    };

    let height = (entries.len() as u16 + 2).min(area.height.saturating_sub(4));
    let modal_area = centered_rect(30, height, area);
    frame.render_widget(Clear, modal_area);

    let rows: Vec<Row> = entries
        .into_iter()
        .map(|(label, current)| {
            let indicator = if current { "* " } else { "  " };
            Row::new(vec![Cell::from(format!("{}{}", indicator, label))])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Fill(1)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::CYAN))
                .title(title),
        )
        .row_highlight_style(
            Style::default()
                .bg(theme::BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(table, modal_area, &mut app.selector_state);
}
