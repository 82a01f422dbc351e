use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme;

use super::centered_rect;

pub fn render(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        section("Navigation"),
        binding("j / k / Up / Down", "Move between rows"),
        binding("gg / G", "First / last row"),
        binding("n / p, ] / [", "Next / previous page"),
        binding("Ctrl+D / Ctrl+U", "Next / previous page"),
        binding("L", "Rows per page"),
        Line::from(""),
        section("Filters"),
        binding("1 - 4", "Edit ID / From / To / Subject"),
        binding("/", "Edit Subject"),
        binding("5 / 6 / 8", "Pick Status / Result / Source"),
        binding("7", "Pick received date range"),
        binding("Enter / Esc", "Finish editing (applies changes)"),
        binding("Tab / Shift+Tab", "Next / previous text filter"),
        binding("Ctrl+U", "Clear the focused filter"),
        binding("X", "Clear every filter"),
        Line::from(""),
        section("Row Actions"),
        binding("R", "Restart mail"),
        binding("F / T", "Filter by this sender / recipient"),
        binding("S / O", "Filter by this status / source"),
        Line::from(""),
        section("Commands"),
        binding(":open <link>", "Open m9s://mail/server?..."),
        binding(":link", "Show link for this view"),
        binding(":page <n>", "Go to page"),
        binding(":length <n>", "Rows per page"),
        binding(":q", "Quit"),
        Line::from(""),
        section("General"),
        binding("r / Ctrl+R", "Refresh"),
        binding("?", "Toggle this help"),
    ];

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(4));
    let modal_area = centered_rect(60, height, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(" Help (? to close) ");

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, modal_area);
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {:<22}", key), Style::default().fg(theme::YELLOW)),
        Span::styled(desc, Style::default().fg(theme::TEXT)),
    ])
}
