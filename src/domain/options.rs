use crate::filter::FilterField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> FilterOption {
    FilterOption { value, label }
}

pub static STATUSES: &[FilterOption] = &[
    opt("", "All"),
    opt("new", "New"),
    opt("processing", "Processing"),
    opt("done", "Done"),
    opt("error", "Error"),
];

pub static RESULTS: &[FilterOption] = &[
    opt("", "All"),
    opt("sent", "Sent"),
    opt("deferred", "Deferred"),
    opt("bounced", "Bounced"),
    opt("rejected", "Rejected"),
];

pub static SOURCES: &[FilterOption] = &[
    opt("", "All"),
    opt("smtp", "SMTP"),
    opt("api", "API"),
    opt("restart", "Restart"),
];

pub fn options_for(field: FilterField) -> &'static [FilterOption] {
    match field {
        FilterField::Status => STATUSES,
        FilterField::Result => RESULTS,
        FilterField::Source => SOURCES,
        _ => &[],
    }
}

/// Option matching the current filter value, if any.
pub fn selected_option(field: FilterField, value: &str) -> Option<&'static FilterOption> {
    options_for(field).iter().find(|o| o.value == value)
}
