use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::theme;

/// Drawn on the row above the footer until the error expires.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let Some((ref msg, _)) = app.last_error else {
        return;
    };
    let toast_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(3),
        width: area.width,
        height: 1,
    };

    let line = Line::from(vec![
        Span::styled(" ERROR ", Style::default().fg(theme::TEXT).bg(theme::RED)),
        Span::styled(format!(" {}", msg), Style::default().fg(theme::RED)),
    ]);

    frame.render_widget(Clear, toast_area);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::BG_DARK)),
        toast_area,
    );
}
