use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::theme;

/// Current link on the left, API base URL on the right. `:link` output
/// replaces the link until it expires.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let left = match &app.notice {
        Some((notice, _)) => Span::styled(format!(" ⎘ {}", notice), Style::default().fg(theme::ACCENT)),
        None => Span::styled(format!(" {}", app.link()), Style::default().fg(theme::TEXT_DIM)),
    };
    let right = Span::styled(
        format!("{} ", app.base_url),
        Style::default().fg(theme::TEXT_MUTED),
    );

    let gap = (area.width as usize).saturating_sub(left.width() + right.width());
    let line = Line::from(vec![left, Span::raw(" ".repeat(gap)), right]);
    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}
