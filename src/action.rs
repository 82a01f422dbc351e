use crate::domain::MailPage;
use crate::filter::{FilterField, RangePreset};

#[derive(Debug, Clone)]
pub enum Action {
    // Row navigation
    NavigateUp,
    NavigateDown,
    NavigateTop,
    NavigateBottom,

    // Vim chord
    EnterPendingG,

    // Pagination
    NextPage,
    PrevPage,
    GoToPage(u64),
    OpenPageSizeSelector,

    // Text filters
    FocusFilter(FilterField),
    FilterInput(String),
    /// Enter, Esc: end editing through the blur path.
    BlurFilter,
    /// Tab/BackTab: blur toward the neighbouring text field.
    FocusNextFilter,
    FocusPrevFilter,
    ClearFilter(FilterField),
    ClearAllFilters,

    // Pickers
    OpenSelector(FilterField),
    OpenDateRange,
    SelectorUp,
    SelectorDown,
    SelectorConfirm,
    ApplyRangePreset(RangePreset),
    DateInput(String),
    ApplyDateInput,
    CancelDateRange,

    // Row actions
    QuickFilter(FilterField),
    RequestRestart,
    ConfirmRestart,
    CancelRestart,

    // UI
    OpenCommandInput,
    CloseOverlay,
    SubmitCommandInput(String),
    UpdateInputBuffer(String),
    ToggleHelp,
    OpenLink(String),

    // Data responses
    MailsLoaded(MailPage),
    FetchFailed(String),
    RestartSucceeded(i64),
    RestartFailed { id: i64, message: String },

    // App control
    Refresh,
    Quit,
    Tick,
}
