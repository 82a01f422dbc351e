use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::app::{InputMode, Overlay, SelectorTarget};
use crate::columns::{filter_for_slot, operation_for_key, quick_filter_for_key, OperationId};
use crate::filter::{FilterControl, FilterField};

/// Raw crossterm key events plus a periodic tick.
pub struct RawEventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

impl RawEventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        if tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                    }
                    event = reader.next() => {
                        match event {
                            Some(Ok(Event::Key(key))) => {
                                if tx.send(AppEvent::Key(key)).is_err() {
                                    break;
                                }
                            }
                            Some(Ok(_)) => {}
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Text buffers the key mapping edits in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct Buffers<'a> {
    pub command: &'a str,
    pub filter: &'a str,
    pub date: &'a str,
}

/// Map a key event to an action based on current app state
pub fn key_to_action(
    key: KeyEvent,
    input_mode: &InputMode,
    overlay: &Overlay,
    buffers: Buffers<'_>,
) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // Handle overlay-specific keys first
    match overlay {
        Overlay::Help => {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    Some(Action::ToggleHelp)
                }
                _ => None,
            };
        }
        Overlay::Confirm(_) => {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Some(Action::ConfirmRestart),
                KeyCode::Char('n') | KeyCode::Esc => Some(Action::CancelRestart),
                _ => None,
            };
        }
        Overlay::Selector(target) => {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseOverlay),
                KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectorDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectorUp),
                KeyCode::Enter => Some(Action::SelectorConfirm),
                KeyCode::Char('u') if ctrl => match target {
                    SelectorTarget::Filter(field) => Some(Action::ClearFilter(*field)),
                    SelectorTarget::PageSize => None,
                },
                KeyCode::Delete => match target {
                    SelectorTarget::Filter(field) => Some(Action::ClearFilter(*field)),
                    SelectorTarget::PageSize => None,
                },
                _ => None,
            };
        }
        Overlay::DateRange => {
            return match key.code {
                KeyCode::Esc => Some(Action::CancelDateRange),
                KeyCode::Down => Some(Action::SelectorDown),
                KeyCode::Up => Some(Action::SelectorUp),
                KeyCode::Enter if buffers.date.trim().is_empty() => {
                    Some(Action::SelectorConfirm)
                }
                KeyCode::Enter => Some(Action::ApplyDateInput),
                KeyCode::Char('u') if ctrl => Some(Action::ClearFilter(FilterField::Since)),
                KeyCode::Delete => Some(Action::ClearFilter(FilterField::Since)),
                KeyCode::Backspace => Some(Action::DateInput(popped(buffers.date))),
                KeyCode::Char(c) if !ctrl => Some(Action::DateInput(pushed(buffers.date, c))),
                _ => None,
            };
        }
        Overlay::None => {}
    }

    // Handle input mode keys
    match input_mode {
        InputMode::Command => {
            return match key.code {
                KeyCode::Esc => Some(Action::CloseOverlay),
                KeyCode::Enter => Some(Action::SubmitCommandInput(buffers.command.to_string())),
                KeyCode::Tab => {
                    // Tab completion: fill with first matching command
                    let input_cmd = buffers.command.split_whitespace().next().unwrap_or("");
                    let matches = crate::input::commands::matching_commands(input_cmd);
                    matches
                        .first()
                        .map(|cmd| Action::UpdateInputBuffer(format!("{} ", cmd.name)))
                }
                KeyCode::Backspace => Some(Action::UpdateInputBuffer(popped(buffers.command))),
                KeyCode::Char(c) => Some(Action::UpdateInputBuffer(pushed(buffers.command, c))),
                _ => None,
            };
        }
        InputMode::Filter(field) => {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => Some(Action::BlurFilter),
                KeyCode::Tab => Some(Action::FocusNextFilter),
                KeyCode::BackTab => Some(Action::FocusPrevFilter),
                KeyCode::Char('u') if ctrl => Some(Action::ClearFilter(*field)),
                KeyCode::Backspace => Some(Action::FilterInput(popped(buffers.filter))),
                KeyCode::Char(c) if !ctrl => Some(Action::FilterInput(pushed(buffers.filter, c))),
                _ => None,
            };
        }
        InputMode::PendingG => {
            return match key.code {
                KeyCode::Char('g') => Some(Action::NavigateTop),
                _ => Some(Action::CloseOverlay), // Cancel the pending chord
            };
        }
        InputMode::Normal => {}
    }

    if ctrl {
        return match key.code {
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('d') => Some(Action::NextPage),
            KeyCode::Char('u') => Some(Action::PrevPage),
            _ => None,
        };
    }

    match key.code {
        // Global
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char(':') => Some(Action::OpenCommandInput),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::NavigateDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::NavigateUp),
        KeyCode::Char('g') => Some(Action::EnterPendingG),
        KeyCode::Char('G') => Some(Action::NavigateBottom),

        // Pages
        KeyCode::Char('n') | KeyCode::Char(']') | KeyCode::PageDown => Some(Action::NextPage),
        KeyCode::Char('p') | KeyCode::Char('[') | KeyCode::PageUp => Some(Action::PrevPage),
        KeyCode::Char('L') => Some(Action::OpenPageSizeSelector),

        // Filters
        KeyCode::Char('/') => Some(Action::FocusFilter(FilterField::Subject)),
        KeyCode::Char('X') => Some(Action::ClearAllFilters),
        KeyCode::Char(c @ '1'..='9') => {
            let slot = c.to_digit(10).unwrap_or(0) as usize;
            filter_for_slot(slot).map(open_filter)
        }

        KeyCode::Char(c) => {
            if let Some(op) = operation_for_key(c) {
                return Some(match op {
                    OperationId::RestartMail => Action::RequestRestart,
                });
            }
            quick_filter_for_key(c).map(Action::QuickFilter)
        }

        _ => None,
    }
}

fn open_filter(field: FilterField) -> Action {
    match field.control() {
        FilterControl::Text => Action::FocusFilter(field),
        FilterControl::Select => Action::OpenSelector(field),
        FilterControl::DateRange => Action::OpenDateRange,
    }
}

fn pushed(buf: &str, c: char) -> String {
    let mut buf = buf.to_string();
    buf.push(c);
    buf
}

fn popped(buf: &str) -> String {
    let mut buf = buf.to_string();
    buf.pop();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::RestartConfirm;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn normal(event: KeyEvent) -> Option<Action> {
        key_to_action(event, &InputMode::Normal, &Overlay::None, Buffers::default())
    }

    #[test]
    fn digits_open_the_matching_filter_control() {
        assert!(matches!(
            normal(key(KeyCode::Char('1'))),
            Some(Action::FocusFilter(FilterField::Id))
        ));
        assert!(matches!(
            normal(key(KeyCode::Char('5'))),
            Some(Action::OpenSelector(FilterField::Status))
        ));
        assert!(matches!(
            normal(key(KeyCode::Char('7'))),
            Some(Action::OpenDateRange)
        ));
        assert!(normal(key(KeyCode::Char('9'))).is_none());
    }

    #[test]
    fn row_keys_map_to_restart_and_quick_filters() {
        assert!(matches!(
            normal(key(KeyCode::Char('R'))),
            Some(Action::RequestRestart)
        ));
        assert!(matches!(
            normal(key(KeyCode::Char('S'))),
            Some(Action::QuickFilter(FilterField::Status))
        ));
    }

    #[test]
    fn filter_mode_edits_and_blurs() {
        let mode = InputMode::Filter(FilterField::Subject);
        let buffers = Buffers {
            filter: "abc",
            ..Buffers::default()
        };
        assert!(matches!(
            key_to_action(key(KeyCode::Char('d')), &mode, &Overlay::None, buffers),
            Some(Action::FilterInput(ref s)) if s == "abcd"
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Backspace), &mode, &Overlay::None, buffers),
            Some(Action::FilterInput(ref s)) if s == "ab"
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Enter), &mode, &Overlay::None, buffers),
            Some(Action::BlurFilter)
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Char('q')), &mode, &Overlay::None, buffers),
            Some(Action::FilterInput(_))
        ));
        assert!(matches!(
            key_to_action(ctrl('u'), &mode, &Overlay::None, buffers),
            Some(Action::ClearFilter(FilterField::Subject))
        ));
    }

    #[test]
    fn confirm_overlay_routes_to_restart() {
        let overlay = Overlay::Confirm(RestartConfirm {
            id: 1,
            in_flight: false,
        });
        let buffers = Buffers::default();
        assert!(matches!(
            key_to_action(key(KeyCode::Char('y')), &InputMode::Normal, &overlay, buffers),
            Some(Action::ConfirmRestart)
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Esc), &InputMode::Normal, &overlay, buffers),
            Some(Action::CancelRestart)
        ));
    }

    #[test]
    fn date_picker_enter_depends_on_typed_text() {
        let empty = Buffers::default();
        let typed = Buffers {
            date: "2024-01-01",
            ..Buffers::default()
        };
        assert!(matches!(
            key_to_action(key(KeyCode::Enter), &InputMode::Normal, &Overlay::DateRange, empty),
            Some(Action::SelectorConfirm)
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Enter), &InputMode::Normal, &Overlay::DateRange, typed),
            Some(Action::ApplyDateInput)
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Esc), &InputMode::Normal, &Overlay::DateRange, typed),
            Some(Action::CancelDateRange)
        ));
    }

    #[test]
    fn command_tab_completes() {
        let buffers = Buffers {
            command: "len",
            ..Buffers::default()
        };
        assert!(matches!(
            key_to_action(key(KeyCode::Tab), &InputMode::Command, &Overlay::None, buffers),
            Some(Action::UpdateInputBuffer(ref s)) if s == "length "
        ));
    }
}
