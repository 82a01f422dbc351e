use ratatui::layout::Constraint;
use ratatui::style::Style;

use crate::domain::MailRecord;
use crate::filter::FilterField;
use crate::theme;

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub title: &'static str,
    /// Filter control shown above the column. The date range is keyed by
    /// `Since` and always drives `since`/`until` together.
    pub filter: Option<FilterField>,
    pub width: Constraint,
    pub value: fn(&MailRecord) -> String,
    pub style: fn(&MailRecord) -> Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationId {
    RestartMail,
}

#[derive(Debug, Clone, Copy)]
pub struct OperationSpec {
    pub id: OperationId,
    pub label: &'static str,
    pub key: char,
}

#[derive(Debug, Clone, Copy)]
pub struct QuickFilterSpec {
    pub key: char,
    pub field: FilterField,
}

pub static COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        title: " ID",
        filter: Some(FilterField::Id),
        width: Constraint::Length(9),
        value: id_value,
        style: plain,
    },
    ColumnSpec {
        title: "From",
        filter: Some(FilterField::From),
        width: Constraint::Percentage(14),
        value: from_value,
        style: plain,
    },
    ColumnSpec {
        title: "To",
        filter: Some(FilterField::To),
        width: Constraint::Percentage(14),
        value: to_value,
        style: plain,
    },
    ColumnSpec {
        title: "Subject",
        filter: Some(FilterField::Subject),
        width: Constraint::Fill(1),
        value: subject_value,
        style: plain,
    },
    ColumnSpec {
        title: "Status",
        filter: Some(FilterField::Status),
        width: Constraint::Length(12),
        value: status_value,
        style: status_style,
    },
    ColumnSpec {
        title: "Result",
        filter: Some(FilterField::Result),
        width: Constraint::Length(10),
        value: result_value,
        style: result_style,
    },
    ColumnSpec {
        title: "Eml",
        filter: None,
        width: Constraint::Length(4),
        value: eml_value,
        style: dim,
    },
    ColumnSpec {
        title: "Received",
        filter: Some(FilterField::Since),
        width: Constraint::Length(20),
        value: put_time_value,
        style: plain,
    },
    ColumnSpec {
        title: "Processed",
        filter: None,
        width: Constraint::Length(20),
        value: processed_time_value,
        style: dim,
    },
    ColumnSpec {
        title: "Source",
        filter: Some(FilterField::Source),
        width: Constraint::Length(8),
        value: source_value,
        style: plain,
    },
];

pub static ROW_OPERATIONS: &[OperationSpec] = &[OperationSpec {
    id: OperationId::RestartMail,
    label: "restart",
    key: 'R',
}];

pub static QUICK_FILTERS: &[QuickFilterSpec] = &[
    QuickFilterSpec {
        key: 'F',
        field: FilterField::From,
    },
    QuickFilterSpec {
        key: 'T',
        field: FilterField::To,
    },
    QuickFilterSpec {
        key: 'S',
        field: FilterField::Status,
    },
    QuickFilterSpec {
        key: 'O',
        field: FilterField::Source,
    },
];

pub fn operation_for_key(key: char) -> Option<OperationId> {
    ROW_OPERATIONS
        .iter()
        .find(|op| op.key == key)
        .map(|op| op.id)
}

pub fn quick_filter_for_key(key: char) -> Option<FilterField> {
    QUICK_FILTERS
        .iter()
        .find(|spec| spec.key == key)
        .map(|spec| spec.field)
}

/// Value of `record` that a quick filter on `field` would commit.
pub fn record_value(record: &MailRecord, field: FilterField) -> Option<String> {
    match field {
        FilterField::Id => Some(record.id.to_string()),
        FilterField::From => Some(record.from.clone()),
        FilterField::To => Some(record.to.clone()),
        FilterField::Subject => Some(record.subject.clone()),
        FilterField::Status => Some(record.status.clone()),
        FilterField::Result => Some(record.result.clone()),
        FilterField::Source => Some(record.source.clone()),
        FilterField::Since | FilterField::Until => None,
    }
}

/// Filter behind the `n`th filter cell, counted from 1 left to right.
pub fn filter_for_slot(n: usize) -> Option<FilterField> {
    COLUMNS
        .iter()
        .filter_map(|c| c.filter)
        .nth(n.checked_sub(1)?)
}

pub fn widths() -> Vec<Constraint> {
    COLUMNS.iter().map(|c| c.width).collect()
}

fn id_value(r: &MailRecord) -> String {
    format!(" {}", r.id)
}

fn from_value(r: &MailRecord) -> String {
    r.from.clone()
}

fn to_value(r: &MailRecord) -> String {
    r.to.clone()
}

fn subject_value(r: &MailRecord) -> String {
    r.subject.clone()
}

fn status_value(r: &MailRecord) -> String {
    r.status.clone()
}

fn result_value(r: &MailRecord) -> String {
    r.result.clone()
}

fn eml_value(r: &MailRecord) -> String {
    if r.has_eml() { "✉" } else { "-" }.to_string()
}

fn put_time_value(r: &MailRecord) -> String {
    r.put_time.clone().unwrap_or_else(|| "-".to_string())
}

fn processed_time_value(r: &MailRecord) -> String {
    r.processed_time.clone().unwrap_or_else(|| "-".to_string())
}

fn source_value(r: &MailRecord) -> String {
    r.source.clone()
}

fn plain(_: &MailRecord) -> Style {
    Style::default().fg(theme::TEXT)
}

fn dim(_: &MailRecord) -> Style {
    Style::default().fg(theme::TEXT_DIM)
}

fn status_style(r: &MailRecord) -> Style {
    match r.status.as_str() {
        "done" => Style::default().fg(theme::GREEN),
        "processing" => Style::default().fg(theme::BLUE),
        "new" => Style::default().fg(theme::CYAN),
        "error" => Style::default().fg(theme::RED),
        _ => plain(r),
    }
}

fn result_style(r: &MailRecord) -> Style {
    match r.result.as_str() {
        "sent" => Style::default().fg(theme::GREEN),
        "deferred" => Style::default().fg(theme::YELLOW),
        "bounced" | "rejected" => Style::default().fg(theme::RED),
        _ => plain(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_filter_field_has_a_control() {
        for field in crate::filter::FilterField::ALL {
            if field == FilterField::Until {
                continue;
            }
            assert!(
                COLUMNS.iter().any(|c| c.filter == Some(field)),
                "no column for {}",
                field
            );
        }
    }

    #[test]
    fn key_lookups() {
        assert_eq!(operation_for_key('R'), Some(OperationId::RestartMail));
        assert_eq!(operation_for_key('x'), None);
        assert_eq!(quick_filter_for_key('S'), Some(FilterField::Status));
    }

    #[test]
    fn filter_slots_follow_column_order() {
        assert_eq!(filter_for_slot(1), Some(FilterField::Id));
        assert_eq!(filter_for_slot(4), Some(FilterField::Subject));
        assert_eq!(filter_for_slot(7), Some(FilterField::Since));
        assert_eq!(filter_for_slot(8), Some(FilterField::Source));
        assert_eq!(filter_for_slot(0), None);
        assert_eq!(filter_for_slot(9), None);
    }

    #[test]
    fn record_values_for_quick_filters() {
        let record = MailRecord {
            id: 5,
            from: "a@example.com".to_string(),
            ..MailRecord::default()
        };
        assert_eq!(
            record_value(&record, FilterField::From).as_deref(),
            Some("a@example.com")
        );
        assert_eq!(record_value(&record, FilterField::Id).as_deref(), Some("5"));
        assert_eq!(record_value(&record, FilterField::Since), None);
    }
}
