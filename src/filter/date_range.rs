use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date the picker reports when it has nothing better to show.
const PLACEHOLDER_DATE: (i32, u32, u32) = (2000, 1, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    Last5Minutes,
    Last30Minutes,
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    ThisMonth,
    LastMonth,
}

impl RangePreset {
    pub const ALL: [RangePreset; 8] = [
        Self::Last5Minutes,
        Self::Last30Minutes,
        Self::Today,
        Self::Yesterday,
        Self::Last7Days,
        Self::Last30Days,
        Self::ThisMonth,
        Self::LastMonth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Last5Minutes => "Last 5 minutes",
            Self::Last30Minutes => "Last 30 minutes",
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::ThisMonth => "This month",
            Self::LastMonth => "Last month",
        }
    }

    /// Minute presets mean "now minus N minutes", not a calendar span.
    pub fn is_now_relative(&self) -> bool {
        matches!(self, Self::Last5Minutes | Self::Last30Minutes)
    }

    pub fn pick(&self, now: NaiveDateTime) -> PickerResult {
        let today = now.date();
        let (start, end) = match self {
            Self::Last5Minutes | Self::Last30Minutes => {
                let minutes = if *self == Self::Last5Minutes { 5 } else { 30 };
                let raw_start = now - Duration::minutes(minutes);
                return PickerResult {
                    start: PickedInstant {
                        calendar: Some(truncate_to_minute(raw_start)),
                        raw: Some(raw_start),
                    },
                    end: PickedInstant {
                        calendar: Some(truncate_to_minute(now)),
                        raw: Some(now),
                    },
                    label: Some(*self),
                };
            }
            Self::Today => (today, today),
            Self::Yesterday => {
                let day = today - Duration::days(1);
                (day, day)
            }
            Self::Last7Days => (today - Duration::days(6), today),
            Self::Last30Days => (today - Duration::days(29), today),
            Self::ThisMonth => (first_of_month(today), last_of_month(today)),
            Self::LastMonth => {
                let prev = first_of_month(today) - Duration::days(1);
                (first_of_month(prev), prev)
            }
        };
        PickerResult {
            start: PickedInstant::exact(start_of_day(start)),
            end: PickedInstant::exact(end_of_day(end)),
            label: Some(*self),
        }
    }
}

/// One end of a picked range: the picker's calendar-rounded value and the
/// underlying instant. `None` is an invalid date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickedInstant {
    pub calendar: Option<NaiveDateTime>,
    pub raw: Option<NaiveDateTime>,
}

impl PickedInstant {
    pub fn exact(at: NaiveDateTime) -> Self {
        Self {
            calendar: Some(at),
            raw: Some(at),
        }
    }

    pub fn invalid() -> Self {
        Self {
            calendar: None,
            raw: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerResult {
    pub start: PickedInstant,
    pub end: PickedInstant,
    pub label: Option<RangePreset>,
}

impl PickerResult {
    /// Parse a typed range: `start - end` or a single instant. Seconds and
    /// the time part are optional.
    pub fn custom(input: &str) -> Self {
        let input = input.trim();
        let (start, end) = match input.split_once(" - ") {
            Some((s, e)) => (parse_instant(s), parse_instant(e)),
            None => {
                let at = parse_instant(input);
                (at, at)
            }
        };
        Self {
            start: start.map(PickedInstant::exact).unwrap_or_else(PickedInstant::invalid),
            end: end.map(PickedInstant::exact).unwrap_or_else(PickedInstant::invalid),
            label: None,
        }
    }
}

/// `since`/`until` filter values plus the text shown in the range input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSelection {
    pub since: String,
    pub until: String,
    pub display: String,
}

pub fn normalize(result: &PickerResult) -> DateSelection {
    let use_raw = result.label.is_some_and(|l| l.is_now_relative());
    let choose = |instant: &PickedInstant| {
        if use_raw {
            instant.raw
        } else {
            instant.calendar
        }
    };

    let Some(start) = choose(&result.start) else {
        return DateSelection::default();
    };
    if is_placeholder(start) {
        return DateSelection::default();
    }

    let since = start.format(DATE_FORMAT).to_string();
    // An unreadable end leaves a point-in-time filter.
    let until = choose(&result.end)
        .map(|end| end.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| since.clone());

    if since == until {
        DateSelection {
            display: since.clone(),
            since,
            until: String::new(),
        }
    } else {
        DateSelection {
            display: format!("{} - {}", since, until),
            since,
            until,
        }
    }
}

/// Display text for an already-applied `since`/`until` pair.
pub fn display_for(since: &str, until: &str) -> String {
    match (since.is_empty(), until.is_empty()) {
        (true, _) => String::new(),
        (false, true) => since.to_string(),
        (false, false) => format!("{} - {}", since, until),
    }
}

fn is_placeholder(at: NaiveDateTime) -> bool {
    let (y, m, d) = PLACEHOLDER_DATE;
    at.year() == y && at.month() == m && at.day() == d
}

fn parse_instant(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    NaiveDateTime::parse_from_str(input, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(start_of_day)
        })
}

fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(23, 59, 59).unwrap_or_else(|| start_of_day(day))
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

fn last_of_month(day: NaiveDate) -> NaiveDate {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|next| next - Duration::days(1))
        .unwrap_or(day)
}
