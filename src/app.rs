use std::time::{Duration, Instant};

use chrono::Local;
use ratatui::widgets::TableState;

use crate::action::Action;
use crate::columns::record_value;
use crate::domain::{options_for, MailPage, MailRecord};
use crate::filter::date_range::display_for;
use crate::filter::{
    normalize, BlurTarget, CommitOutcome, FieldEdit, FilterControl, FilterEvent, FilterField,
    FilterState, PickerResult, RangePreset,
};
use crate::input::commands;
use crate::nav::{decode, encode, format_link, parse_link, Overrides, QueryParams};
use crate::pagination::{PageSizeOption, Pagination, PAGE_SIZE_OPTIONS};

const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    /// A text filter has focus and receives keystrokes.
    Filter(FilterField),
    PendingG,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    Selector(SelectorTarget),
    DateRange,
    Confirm(RestartConfirm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorTarget {
    Filter(FilterField),
    PageSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartConfirm {
    pub id: i64,
    pub in_flight: bool,
}

/// Rows of the last page that arrived. They stay on screen while a newer
/// request is loading or after it failed.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub page: Option<MailPage>,
    pub loading: bool,
}

impl Listing {
    pub fn rows(&self) -> &[MailRecord] {
        self.page.as_ref().map(|p| p.body.as_slice()).unwrap_or(&[])
    }

    pub fn count(&self) -> Option<u64> {
        self.page.as_ref().map(|p| p.meta.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(QueryParams),
    RestartMail(i64),
    Quit,
}

pub struct App {
    pub input_mode: InputMode,
    pub overlay: Overlay,

    // Connection
    pub base_url: String,
    pub connection_status: ConnectionStatus,

    // Filters and the params derived from them
    pub filters: FilterState,
    pub field_edit: FieldEdit,
    pub params: QueryParams,
    pub pagination: Pagination,
    /// Text shown in the date range cell.
    pub date_display: String,
    /// Custom range typed in the picker.
    pub date_draft: String,

    // Data
    pub listing: Listing,
    pub table_state: TableState,
    pub selector_state: TableState,

    // Input
    pub input_buffer: String,

    // App
    pub should_quit: bool,
    pub last_error: Option<(String, Instant)>,
    pub notice: Option<(String, Instant)>,
    pub last_refresh: Option<Instant>,
    requested_query: Option<String>,
}

impl App {
    pub fn new(base_url: String) -> Self {
        Self {
            input_mode: InputMode::Normal,
            overlay: Overlay::None,

            base_url,
            connection_status: ConnectionStatus::Connecting,

            filters: FilterState::default(),
            field_edit: FieldEdit::default(),
            params: QueryParams::new(),
            pagination: Pagination::default(),
            date_display: String::new(),
            date_draft: String::new(),

            listing: Listing::default(),
            table_state: TableState::default(),
            selector_state: TableState::default(),

            input_buffer: String::new(),

            should_quit: false,
            last_error: None,
            notice: None,
            last_refresh: None,
            requested_query: None,
        }
    }

    /// Seed filters and page size from `initial`, then re-encode at page 1.
    /// Filters absent from `initial` are reset.
    pub fn mount(&mut self, initial: QueryParams) -> Vec<Effect> {
        let hydration = decode(&initial);
        self.field_edit = FieldEdit::Idle;
        if matches!(self.input_mode, InputMode::Filter(_)) {
            self.input_mode = InputMode::Normal;
        }
        self.filters = FilterState::default().merge(&hydration.filters);
        self.pagination = Pagination::new(hydration.page_size);
        self.date_display = display_for(
            self.filters.get(FilterField::Since),
            self.filters.get(FilterField::Until),
        );
        self.params = initial;

        let params = encode(
            &self.params,
            &self.filters,
            &self.pagination,
            true,
            &Overrides::Store,
        );
        self.publish(params)
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        // Clear stale toasts
        if let Some((_, at)) = &self.last_error {
            if at.elapsed() > TOAST_TTL {
                self.last_error = None;
            }
        }
        if let Some((_, at)) = &self.notice {
            if at.elapsed() > TOAST_TTL {
                self.notice = None;
            }
        }

        match action {
            // Navigation
            Action::NavigateUp => {
                self.table_state.select_previous();
                vec![]
            }
            Action::NavigateDown => {
                if !self.listing.rows().is_empty() {
                    self.table_state.select_next();
                }
                vec![]
            }
            Action::NavigateTop => {
                self.input_mode = InputMode::Normal;
                self.table_state.select_first();
                vec![]
            }
            Action::NavigateBottom => {
                self.table_state.select_last();
                vec![]
            }
            Action::EnterPendingG => {
                self.input_mode = InputMode::PendingG;
                vec![]
            }

            // Pagination
            Action::NextPage => match self.pagination.next_page() {
                Some(page) => self.go_to_page(page),
                None => vec![],
            },
            Action::PrevPage => match self.pagination.prev_page() {
                Some(page) => self.go_to_page(page),
                None => vec![],
            },
            Action::GoToPage(page) => self.go_to_page(page),
            Action::OpenPageSizeSelector => {
                self.open_selector(SelectorTarget::PageSize);
                vec![]
            }

            // Text filters
            Action::FocusFilter(field) => self.focus_filter(field),
            Action::FilterInput(value) => {
                if let Some(field) = self.field_edit.editing() {
                    self.filters.set_one(field, value);
                }
                vec![]
            }
            Action::BlurFilter => self.blur_filter(BlurTarget::Elsewhere),
            Action::FocusNextFilter => match self.field_edit.editing() {
                Some(field) => self.focus_filter(field.next_text()),
                None => vec![],
            },
            Action::FocusPrevFilter => match self.field_edit.editing() {
                Some(field) => self.focus_filter(field.prev_text()),
                None => vec![],
            },
            Action::ClearFilter(field) => self.clear_filter(field),
            Action::ClearAllFilters => self.clear_all_filters(),

            // Pickers
            Action::OpenSelector(field) => {
                if field.control() == FilterControl::Select {
                    self.open_selector(SelectorTarget::Filter(field));
                }
                vec![]
            }
            Action::OpenDateRange => {
                self.date_draft.clear();
                self.selector_state.select(Some(0));
                self.overlay = Overlay::DateRange;
                vec![]
            }
            Action::SelectorUp => {
                let prev = self
                    .selector_state
                    .selected()
                    .map_or(0, |i| i.saturating_sub(1));
                self.selector_state.select(Some(prev));
                vec![]
            }
            Action::SelectorDown => {
                let last = self.selector_len().saturating_sub(1);
                let next = self.selector_state.selected().map_or(0, |i| (i + 1).min(last));
                self.selector_state.select(Some(next));
                vec![]
            }
            Action::SelectorConfirm => self.confirm_selector(),
            Action::ApplyRangePreset(preset) => self.apply_preset(preset),
            Action::DateInput(buf) => {
                self.date_draft = buf;
                vec![]
            }
            Action::ApplyDateInput => {
                let result = PickerResult::custom(&self.date_draft);
                self.apply_date_range(result)
            }
            Action::CancelDateRange => {
                self.overlay = Overlay::None;
                self.date_draft.clear();
                self.date_display.clear();
                vec![]
            }

            // Row actions
            Action::QuickFilter(field) => self.quick_filter(field),
            Action::RequestRestart => {
                if let Some(mail) = self.selected_mail() {
                    self.overlay = Overlay::Confirm(RestartConfirm {
                        id: mail.id,
                        in_flight: false,
                    });
                }
                vec![]
            }
            Action::ConfirmRestart => match &mut self.overlay {
                Overlay::Confirm(confirm) if !confirm.in_flight => {
                    confirm.in_flight = true;
                    tracing::info!(id = confirm.id, "restart confirmed");
                    vec![Effect::RestartMail(confirm.id)]
                }
                _ => vec![],
            },
            Action::CancelRestart => {
                if matches!(self.overlay, Overlay::Confirm(c) if !c.in_flight) {
                    self.overlay = Overlay::None;
                }
                vec![]
            }

            // UI
            Action::OpenCommandInput => {
                self.input_mode = InputMode::Command;
                self.input_buffer.clear();
                vec![]
            }
            Action::CloseOverlay => {
                if self.overlay != Overlay::None {
                    self.overlay = Overlay::None;
                } else if self.input_mode != InputMode::Normal {
                    self.input_mode = InputMode::Normal;
                    self.input_buffer.clear();
                }
                vec![]
            }
            Action::SubmitCommandInput(cmd) => {
                self.input_mode = InputMode::Normal;
                let effects = self.execute_command(&cmd);
                self.input_buffer.clear();
                effects
            }
            Action::UpdateInputBuffer(buf) => {
                self.input_buffer = buf;
                vec![]
            }
            Action::ToggleHelp => {
                self.overlay = if self.overlay == Overlay::Help {
                    Overlay::None
                } else {
                    Overlay::Help
                };
                vec![]
            }
            Action::OpenLink(link) => self.open_link(&link),

            // Data responses
            Action::MailsLoaded(page) => {
                self.pagination.set_total_count(page.meta.count);
                let len = page.body.len();
                match self.table_state.selected() {
                    Some(i) if i < len => {}
                    _ if len > 0 => self.table_state.select(Some(0)),
                    _ => self.table_state.select(None),
                }
                self.listing.page = Some(page);
                self.listing.loading = false;
                self.connection_status = ConnectionStatus::Connected;
                self.last_refresh = Some(Instant::now());
                vec![]
            }
            Action::FetchFailed(msg) => {
                self.listing.loading = false;
                self.connection_status = ConnectionStatus::Error(msg.clone());
                self.last_error = Some((msg, Instant::now()));
                vec![]
            }
            Action::RestartSucceeded(id) => {
                tracing::info!(id, "mail restarted");
                let effects = self.refresh();
                if matches!(self.overlay, Overlay::Confirm(c) if c.id == id) {
                    self.overlay = Overlay::None;
                }
                effects
            }
            Action::RestartFailed { id, message } => {
                tracing::warn!(id, "restart failed: {}", message);
                if let Overlay::Confirm(confirm) = &mut self.overlay {
                    if confirm.id == id {
                        confirm.in_flight = false;
                    }
                }
                self.last_error = Some((
                    format!("restart of mail {} failed: {}", id, message),
                    Instant::now(),
                ));
                vec![]
            }

            // App control
            Action::Refresh => {
                if self.listing.loading {
                    vec![]
                } else {
                    self.refresh()
                }
            }
            Action::Quit => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
            Action::Tick => vec![],
        }
    }

    /// Deep link for the current params.
    pub fn link(&self) -> String {
        format_link(&self.params)
    }

    pub fn selected_mail(&self) -> Option<&MailRecord> {
        let idx = self.table_state.selected()?;
        self.listing.rows().get(idx)
    }

    /// Value shown in a filter cell, including an uncommitted draft.
    pub fn filter_value(&self, field: FilterField) -> &str {
        self.filters.get(field)
    }

    /// Filters in the committed params, ignoring any draft being typed.
    pub fn committed_filter_count(&self) -> usize {
        FilterField::ALL
            .iter()
            .filter(|field| self.params.contains_key(field.param_name()))
            .count()
    }

    fn selector_len(&self) -> usize {
        match self.overlay {
            Overlay::Selector(SelectorTarget::Filter(field)) => options_for(field).len(),
            Overlay::Selector(SelectorTarget::PageSize) => PAGE_SIZE_OPTIONS.len(),
            Overlay::DateRange => RangePreset::ALL.len(),
            _ => 0,
        }
    }

    fn open_selector(&mut self, target: SelectorTarget) {
        let idx = match target {
            SelectorTarget::Filter(field) => {
                let current = self.filters.get(field);
                options_for(field).iter().position(|o| o.value == current)
            }
            SelectorTarget::PageSize => PAGE_SIZE_OPTIONS
                .iter()
                .position(|o| *o == self.pagination.page_size),
        };
        self.selector_state.select(Some(idx.unwrap_or(0)));
        self.overlay = Overlay::Selector(target);
    }

    fn confirm_selector(&mut self) -> Vec<Effect> {
        let Some(idx) = self.selector_state.selected() else {
            return vec![];
        };
        match self.overlay {
            Overlay::Selector(SelectorTarget::Filter(field)) => {
                self.overlay = Overlay::None;
                match options_for(field).get(idx) {
                    Some(option) => self.commit_value(field, option.value.to_string()),
                    None => vec![],
                }
            }
            Overlay::Selector(SelectorTarget::PageSize) => {
                self.overlay = Overlay::None;
                match PAGE_SIZE_OPTIONS.get(idx) {
                    Some(option) => self.change_page_size(*option),
                    None => vec![],
                }
            }
            Overlay::DateRange => match RangePreset::ALL.get(idx) {
                Some(preset) => self.apply_preset(*preset),
                None => vec![],
            },
            _ => vec![],
        }
    }

    fn focus_filter(&mut self, field: FilterField) -> Vec<Effect> {
        if !field.is_text() {
            return vec![];
        }
        let effects = match self.field_edit.editing() {
            Some(current) if current == field => return vec![],
            Some(_) => self.blur_filter(BlurTarget::Elsewhere),
            None => vec![],
        };
        self.field_edit.focus(field, self.filters.get(field));
        self.input_mode = InputMode::Filter(field);
        effects
    }

    fn blur_filter(&mut self, toward: BlurTarget) -> Vec<Effect> {
        let Some(field) = self.field_edit.editing() else {
            return vec![];
        };
        self.input_mode = InputMode::Normal;
        let value = self.filters.get(field).to_string();
        match self.field_edit.resolve(FilterEvent::Blur {
            field,
            value,
            toward,
        }) {
            CommitOutcome::Committed { field, value } => {
                self.commit_filters(Overrides::one(field, value))
            }
            CommitOutcome::Discarded => vec![],
        }
    }

    fn clear_filter(&mut self, field: FilterField) -> Vec<Effect> {
        if matches!(self.overlay, Overlay::Selector(_) | Overlay::DateRange) {
            self.overlay = Overlay::None;
        }
        let mut effects = match self.field_edit.editing() {
            Some(current) if current == field => self.blur_filter(BlurTarget::ClearAffordance),
            Some(_) => self.blur_filter(BlurTarget::Elsewhere),
            None => vec![],
        };

        if field.control() == FilterControl::DateRange {
            self.date_display.clear();
            let cleared = [String::new(), String::new()];
            self.filters
                .set_many(&[FilterField::Since, FilterField::Until], &cleared);
            effects.extend(self.commit_filters(Overrides::Fields(vec![
                (FilterField::Since, String::new()),
                (FilterField::Until, String::new()),
            ])));
            return effects;
        }

        if let CommitOutcome::Committed { field, value } =
            self.field_edit.resolve(FilterEvent::Clear { field })
        {
            effects.extend(self.commit_value(field, value));
        }
        effects
    }

    fn clear_all_filters(&mut self) -> Vec<Effect> {
        self.field_edit = FieldEdit::Idle;
        if matches!(self.input_mode, InputMode::Filter(_)) {
            self.input_mode = InputMode::Normal;
        }
        self.filters = FilterState::default();
        self.date_display.clear();
        let cleared = FilterField::ALL
            .into_iter()
            .map(|field| (field, String::new()))
            .collect();
        self.commit_filters(Overrides::Fields(cleared))
    }

    fn quick_filter(&mut self, field: FilterField) -> Vec<Effect> {
        let Some(value) = self
            .selected_mail()
            .and_then(|mail| record_value(mail, field))
        else {
            return vec![];
        };
        if value.is_empty() {
            return vec![];
        }
        self.commit_value(field, value)
    }

    fn apply_preset(&mut self, preset: RangePreset) -> Vec<Effect> {
        self.apply_date_range(preset.pick(Local::now().naive_local()))
    }

    fn apply_date_range(&mut self, result: PickerResult) -> Vec<Effect> {
        self.overlay = Overlay::None;
        self.date_draft.clear();
        let selection = normalize(&result);
        self.date_display = selection.display;
        self.filters.set_many(
            &[FilterField::Since, FilterField::Until],
            &[selection.since.clone(), selection.until.clone()],
        );
        self.commit_filters(Overrides::Fields(vec![
            (FilterField::Since, selection.since),
            (FilterField::Until, selection.until),
        ]))
    }

    fn commit_value(&mut self, field: FilterField, value: String) -> Vec<Effect> {
        self.filters.set_one(field, value.clone());
        self.commit_filters(Overrides::one(field, value))
    }

    fn commit_filters(&mut self, overrides: Overrides) -> Vec<Effect> {
        self.pagination.reset_to_first_page();
        let params = encode(
            &self.params,
            &self.filters,
            &self.pagination,
            true,
            &overrides,
        );
        self.publish(params)
    }

    fn go_to_page(&mut self, page: u64) -> Vec<Effect> {
        let page = match self.pagination.total_pages() {
            Some(total) => page.min(total),
            None => page,
        };
        self.pagination.go_to_page(page);
        self.reencode_page()
    }

    fn change_page_size(&mut self, option: PageSizeOption) -> Vec<Effect> {
        self.pagination.change_page_size(option);
        self.reencode_page()
    }

    fn reencode_page(&mut self) -> Vec<Effect> {
        let params = encode(
            &self.params,
            &self.filters,
            &self.pagination,
            false,
            &Overrides::none(),
        );
        self.publish(params)
    }

    /// Adopt `params`; fetch only when the query string changed.
    fn publish(&mut self, params: QueryParams) -> Vec<Effect> {
        let query = params.to_query_string();
        self.params = params;
        if self.requested_query.as_deref() == Some(query.as_str()) {
            return vec![];
        }
        tracing::debug!(%query, "params changed");
        self.requested_query = Some(query);
        self.refresh()
    }

    fn refresh(&mut self) -> Vec<Effect> {
        self.listing.loading = true;
        vec![Effect::Fetch(self.params.clone())]
    }

    fn open_link(&mut self, link: &str) -> Vec<Effect> {
        match parse_link(link) {
            Ok(params) => self.mount(params),
            Err(err) => {
                self.last_error = Some((format!("invalid link: {}", err), Instant::now()));
                vec![]
            }
        }
    }

    fn execute_command(&mut self, cmd: &str) -> Vec<Effect> {
        let mut parts = cmd.trim().splitn(2, ' ');
        let command = parts.next().unwrap_or_default();
        let args = parts.next().map(str::trim).filter(|s| !s.is_empty());

        match commands::resolve(command) {
            Some("open") => match args {
                Some(link) => self.open_link(link),
                None => {
                    self.last_error = Some((
                        "usage: :open m9s://mail/server?<query>".to_string(),
                        Instant::now(),
                    ));
                    vec![]
                }
            },
            Some("link") => {
                self.notice = Some((self.link(), Instant::now()));
                vec![]
            }
            Some("clear") => self.clear_all_filters(),
            Some("page") => match args.and_then(|a| a.parse::<u64>().ok()) {
                Some(page) if page >= 1 => self.go_to_page(page),
                _ => {
                    self.last_error = Some(("usage: :page <n>".to_string(), Instant::now()));
                    vec![]
                }
            },
            Some("length") => match args.and_then(PageSizeOption::parse) {
                Some(option) => self.change_page_size(option),
                None => {
                    self.last_error = Some((
                        "usage: :length 10|25|50|100".to_string(),
                        Instant::now(),
                    ));
                    vec![]
                }
            },
            Some("refresh") => self.update(Action::Refresh),
            Some("quit") => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
            Some("help") => {
                self.overlay = Overlay::Help;
                vec![]
            }
            _ => {
                self.last_error = Some((format!("unknown command: {}", command), Instant::now()));
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::PageMeta;
    use crate::filter::PickedInstant;

    fn mounted(query: &str) -> (App, Vec<Effect>) {
        let mut app = App::new("http://localhost:8080/api".to_string());
        let effects = app.mount(QueryParams::parse(query));
        (app, effects)
    }

    fn loaded(query: &str, ids: &[i64], count: u64) -> App {
        let (mut app, _) = mounted(query);
        app.update(Action::MailsLoaded(page_of(ids, count)));
        app
    }

    fn page_of(ids: &[i64], count: u64) -> MailPage {
        MailPage {
            body: ids
                .iter()
                .map(|id| MailRecord {
                    id: *id,
                    from: format!("sender{}@example.com", id),
                    status: "error".to_string(),
                    ..MailRecord::default()
                })
                .collect(),
            meta: PageMeta { count },
        }
    }

    fn fetches(effects: &[Effect]) -> Vec<String> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Fetch(params) => Some(params.to_query_string()),
                _ => None,
            })
            .collect()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> PickedInstant {
        let dt = NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid date");
        PickedInstant::exact(dt)
    }

    fn type_into(app: &mut App, field: FilterField, value: &str) -> Vec<Effect> {
        let mut effects = app.update(Action::FocusFilter(field));
        effects.extend(app.update(Action::FilterInput(value.to_string())));
        effects
    }

    #[test]
    fn mount_hydrates_and_fetches_from_first_page() {
        let (app, effects) = mounted("subject=invoice&length=50&start=100&tab=raw");
        assert_eq!(
            fetches(&effects),
            ["length=50&start=0&subject=invoice&tab=raw"]
        );
        assert_eq!(app.filters.get(FilterField::Subject), "invoice");
        assert_eq!(app.pagination.page_size.value, 50);
        assert!(app.listing.loading);
    }

    #[test]
    fn mount_with_unknown_length_uses_default() {
        let (app, effects) = mounted("length=37");
        assert_eq!(app.pagination.length, 25);
        assert_eq!(fetches(&effects), ["length=25&start=0"]);
    }

    #[test]
    fn mount_restores_date_display() {
        let (app, _) = mounted("since=2024-01-01+09%3A00%3A00&until=2024-01-02+00%3A00%3A00");
        assert_eq!(
            app.date_display,
            "2024-01-01 09:00:00 - 2024-01-02 00:00:00"
        );
    }

    #[test]
    fn changed_text_commits_on_blur_at_first_page() {
        let mut app = loaded("subject=abc", &[1, 2], 100);
        app.update(Action::GoToPage(3));
        assert_eq!(app.pagination.page, 3);

        type_into(&mut app, FilterField::Subject, "abcd");
        let effects = app.update(Action::BlurFilter);
        assert_eq!(fetches(&effects), ["length=25&start=0&subject=abcd"]);
        assert_eq!(app.pagination.page, 1);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn unchanged_text_does_not_fetch() {
        let mut app = loaded("subject=abc", &[1], 1);
        let before = app.params.clone();
        type_into(&mut app, FilterField::Subject, "abc");
        let effects = app.update(Action::BlurFilter);
        assert!(effects.is_empty());
        assert_eq!(app.params, before);
    }

    #[test]
    fn filter_count_ignores_uncommitted_draft() {
        let mut app = loaded("status=error", &[1], 1);
        type_into(&mut app, FilterField::Subject, "draft");
        assert_eq!(app.committed_filter_count(), 1);

        app.update(Action::BlurFilter);
        assert_eq!(app.committed_filter_count(), 2);
    }

    #[test]
    fn emptied_text_drops_param() {
        let mut app = loaded("from=a%40b.c", &[1], 1);
        type_into(&mut app, FilterField::From, "");
        let effects = app.update(Action::BlurFilter);
        assert_eq!(fetches(&effects), ["length=25&start=0"]);
    }

    #[test]
    fn tab_commits_and_moves_focus() {
        let mut app = loaded("", &[1], 1);
        type_into(&mut app, FilterField::Id, "42");
        let effects = app.update(Action::FocusNextFilter);
        assert_eq!(fetches(&effects), ["id=42&length=25&start=0"]);
        assert_eq!(app.input_mode, InputMode::Filter(FilterField::From));
        assert_eq!(app.field_edit.editing(), Some(FilterField::From));
    }

    #[test]
    fn clear_while_editing_commits_once() {
        let mut app = loaded("subject=old", &[1], 1);
        type_into(&mut app, FilterField::Subject, "draft");
        let effects = app.update(Action::ClearFilter(FilterField::Subject));
        assert_eq!(fetches(&effects), ["length=25&start=0"]);
        assert_eq!(app.filters.get(FilterField::Subject), "");
        assert!(!app.field_edit.is_editing());
    }

    #[test]
    fn clear_resets_page() {
        let mut app = loaded("subject=x", &[1], 100);
        let effects = app.update(Action::GoToPage(3));
        assert_eq!(fetches(&effects), ["length=25&start=50&subject=x"]);
        let effects = app.update(Action::ClearFilter(FilterField::Subject));
        assert_eq!(fetches(&effects), ["length=25&start=0"]);
        assert_eq!(app.pagination.page, 1);
    }

    #[test]
    fn page_change_keeps_filters() {
        let mut app = loaded("status=error", &[1], 100);
        let effects = app.update(Action::NextPage);
        assert_eq!(fetches(&effects), ["length=25&start=25&status=error"]);
        let effects = app.update(Action::PrevPage);
        assert_eq!(fetches(&effects), ["length=25&start=0&status=error"]);
        assert!(app.update(Action::PrevPage).is_empty());
    }

    #[test]
    fn page_size_change_keeps_page_index() {
        let mut app = loaded("length=10", &[1], 100);
        app.update(Action::GoToPage(3));
        let effects = app.update(Action::SubmitCommandInput("length 50".to_string()));
        assert_eq!(fetches(&effects), ["length=50&start=100"]);
        assert_eq!(app.pagination.page, 3);

        let again = app.update(Action::SubmitCommandInput("length 50".to_string()));
        assert!(again.is_empty());
        assert_eq!(app.params.to_query_string(), "length=50&start=100");
    }

    #[test]
    fn huge_page_before_first_load_does_not_overflow() {
        let (mut app, _) = mounted("");
        app.update(Action::FetchFailed("connection refused".to_string()));
        let effects = app.update(Action::SubmitCommandInput(format!("page {}", u64::MAX)));
        assert_eq!(
            fetches(&effects),
            [format!("length=25&start={}", u64::MAX)]
        );
    }

    #[test]
    fn identical_selection_does_not_refetch() {
        let mut app = loaded("", &[1], 1);
        app.update(Action::OpenSelector(FilterField::Status));
        app.update(Action::SelectorDown);
        let first = app.update(Action::SelectorConfirm);
        assert_eq!(fetches(&first), ["length=25&start=0&status=new"]);
        assert_eq!(app.overlay, Overlay::None);

        app.update(Action::OpenSelector(FilterField::Status));
        let second = app.update(Action::SelectorConfirm);
        assert!(second.is_empty());
    }

    #[test]
    fn date_range_sets_both_bounds() {
        let (mut app, _) = mounted("");
        let effects = app.apply_date_range(PickerResult {
            start: at(2024, 1, 1, 9, 0),
            end: at(2024, 1, 1, 10, 0),
            label: None,
        });
        assert_eq!(fetches(&effects).len(), 1);
        assert_eq!(
            app.params.get_text("since").as_deref(),
            Some("2024-01-01 09:00:00")
        );
        assert_eq!(
            app.params.get_text("until").as_deref(),
            Some("2024-01-01 10:00:00")
        );
        assert_eq!(
            app.date_display,
            "2024-01-01 09:00:00 - 2024-01-01 10:00:00"
        );
    }

    #[test]
    fn point_in_time_range_drops_until() {
        let (mut app, _) = mounted("until=2023-12-31+00%3A00%3A00");
        app.apply_date_range(PickerResult {
            start: at(2024, 1, 1, 10, 0),
            end: at(2024, 1, 1, 10, 0),
            label: None,
        });
        assert_eq!(
            app.params.get_text("since").as_deref(),
            Some("2024-01-01 10:00:00")
        );
        assert!(!app.params.contains_key("until"));
        assert_eq!(app.date_display, "2024-01-01 10:00:00");
    }

    #[test]
    fn typed_range_applies_from_picker() {
        let (mut app, _) = mounted("");
        app.update(Action::OpenDateRange);
        app.update(Action::DateInput("2024-02-01 - 2024-02-03".to_string()));
        let effects = app.update(Action::ApplyDateInput);
        assert_eq!(fetches(&effects).len(), 1);
        assert_eq!(app.filters.get(FilterField::Since), "2024-02-01 00:00:00");
        assert_eq!(app.filters.get(FilterField::Until), "2024-02-03 00:00:00");
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn cancel_clears_only_visible_range() {
        let (mut app, _) = mounted("since=2024-01-01+10%3A00%3A00");
        app.update(Action::OpenDateRange);
        let effects = app.update(Action::CancelDateRange);
        assert!(effects.is_empty());
        assert_eq!(app.date_display, "");
        assert_eq!(app.filters.get(FilterField::Since), "2024-01-01 10:00:00");
        assert!(app.params.contains_key("since"));
    }

    #[test]
    fn quick_filter_commits_row_value() {
        let mut app = loaded("", &[7, 8], 2);
        app.update(Action::NavigateDown);
        let effects = app.update(Action::QuickFilter(FilterField::From));
        assert_eq!(
            fetches(&effects),
            ["from=sender8%40example.com&length=25&start=0"]
        );
    }

    #[test]
    fn restart_success_refreshes_once_then_closes() {
        let mut app = loaded("", &[7], 1);
        app.update(Action::RequestRestart);
        assert_eq!(
            app.overlay,
            Overlay::Confirm(RestartConfirm {
                id: 7,
                in_flight: false
            })
        );

        assert_eq!(app.update(Action::ConfirmRestart), [Effect::RestartMail(7)]);
        assert!(app.update(Action::ConfirmRestart).is_empty());
        assert!(app.update(Action::CancelRestart).is_empty());
        assert!(matches!(app.overlay, Overlay::Confirm(_)));

        let effects = app.update(Action::RestartSucceeded(7));
        assert_eq!(fetches(&effects), ["length=25&start=0"]);
        assert_eq!(effects.len(), 1);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn restart_failure_keeps_modal_for_retry() {
        let mut app = loaded("", &[7], 1);
        app.update(Action::RequestRestart);
        app.update(Action::ConfirmRestart);
        let effects = app.update(Action::RestartFailed {
            id: 7,
            message: "status 500".to_string(),
        });
        assert!(effects.is_empty());
        assert_eq!(
            app.overlay,
            Overlay::Confirm(RestartConfirm {
                id: 7,
                in_flight: false
            })
        );
        assert!(app.last_error.is_some());
        assert_eq!(app.update(Action::ConfirmRestart), [Effect::RestartMail(7)]);
    }

    #[test]
    fn refresh_is_ignored_while_loading() {
        let (mut app, _) = mounted("");
        assert!(app.update(Action::Refresh).is_empty());
        app.update(Action::MailsLoaded(page_of(&[1], 1)));
        assert_eq!(fetches(&app.update(Action::Refresh)), ["length=25&start=0"]);
    }

    #[test]
    fn fetch_failure_keeps_previous_rows() {
        let mut app = loaded("", &[1, 2], 2);
        app.update(Action::Refresh);
        app.update(Action::FetchFailed("connection refused".to_string()));
        assert!(!app.listing.loading);
        assert_eq!(app.listing.rows().len(), 2);
        assert!(matches!(app.connection_status, ConnectionStatus::Error(_)));
    }

    #[test]
    fn open_command_rehydrates() {
        let mut app = loaded("subject=old", &[1], 1);
        let effects =
            app.update(Action::SubmitCommandInput("open m9s://mail/server?status=done".to_string()));
        assert_eq!(fetches(&effects), ["length=25&start=0&status=done"]);
        assert_eq!(app.filters.get(FilterField::Subject), "");
        assert_eq!(app.filters.get(FilterField::Status), "done");
    }

    #[test]
    fn invalid_link_leaves_state_alone() {
        let mut app = loaded("subject=old", &[1], 1);
        let before = app.params.clone();
        let effects = app.update(Action::OpenLink("https://example.com".to_string()));
        assert!(effects.is_empty());
        assert_eq!(app.params, before);
        assert!(app.last_error.is_some());
    }

    #[test]
    fn clear_all_commits_once() {
        let mut app = loaded("subject=a&status=error&since=2024-01-01", &[1], 1);
        let effects = app.update(Action::ClearAllFilters);
        assert_eq!(fetches(&effects), ["length=25&start=0"]);
        assert!(app.filters.is_empty());
        assert_eq!(app.date_display, "");
    }

    #[test]
    fn unknown_command_sets_error() {
        let mut app = App::new(String::new());
        app.update(Action::SubmitCommandInput("bogus".to_string()));
        assert!(app
            .last_error
            .as_ref()
            .is_some_and(|(msg, _)| msg.contains("unknown command")));
    }
}
