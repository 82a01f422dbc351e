pub mod command_input;
pub mod confirm_modal;
pub mod date_range_picker;
pub mod error_toast;
pub mod filter_bar;
pub mod footer;
pub mod header;
pub mod help_overlay;
pub mod mail_table;
pub mod paginator;
pub mod selector;
pub mod status_bar;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

pub(crate) fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}
