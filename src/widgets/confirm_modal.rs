use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::RestartConfirm;
use crate::theme;

use super::centered_rect;

pub fn render(confirm: &RestartConfirm, frame: &mut Frame, area: Rect) {
    let modal_area = centered_rect(50, 7, area);

    frame.render_widget(Clear, modal_area);

    let footer = if confirm.in_flight {
        Line::from(Span::styled(
            "  ◌ Restarting...",
            Style::default().fg(theme::YELLOW),
        ))
    } else {
        Line::from(vec![
            Span::styled("  y/Enter", Style::default().fg(theme::GREEN)),
            Span::raw(" restart  "),
            Span::styled("n/Esc", Style::default().fg(theme::RED)),
            Span::raw(" cancel"),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  A copy of mail id={} will be created.", confirm.id),
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        footer,
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::YELLOW))
        .title(" Restart mail? ");

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal_area);
}
