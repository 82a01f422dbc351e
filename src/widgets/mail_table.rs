use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::App;
use crate::columns::{widths, COLUMNS};
use crate::domain::MailRecord;
use crate::theme;

pub const HIGHLIGHT_SYMBOL: &str = "▸ ";

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    if app.listing.rows().is_empty() {
        let label = if app.listing.loading {
            "Loading mails..."
        } else if app.listing.page.is_some() {
            "No mails match the current filters"
        } else {
            "No data"
        };
        let empty = Paragraph::new(label).style(Style::default().fg(theme::TEXT_MUTED));
        frame.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = app.listing.rows().iter().map(mail_row).collect();

    let table = Table::new(rows, widths())
        .header(header_row())
        .block(Block::default().borders(Borders::NONE))
        .row_highlight_style(
            Style::default()
                .bg(theme::BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(HIGHLIGHT_SYMBOL)
        .highlight_spacing(HighlightSpacing::Always);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn header_row() -> Row<'static> {
    Row::new(COLUMNS.iter().map(|c| Cell::from(c.title)).collect::<Vec<_>>())
        .style(
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        )
        .height(1)
}

fn mail_row(mail: &MailRecord) -> Row<'static> {
    Row::new(
        COLUMNS
            .iter()
            .map(|c| Cell::from((c.value)(mail)).style((c.style)(mail)))
            .collect::<Vec<_>>(),
    )
}
