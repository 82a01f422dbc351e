pub mod commit;
pub mod date_range;

pub use commit::{BlurTarget, CommitOutcome, FieldEdit, FilterEvent};
pub use date_range::{
    normalize, DateSelection, PickedInstant, PickerResult, RangePreset, DATE_FORMAT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterField {
    Id,
    From,
    To,
    Subject,
    Status,
    Result,
    Since,
    Until,
    Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterControl {
    Text,
    Select,
    DateRange,
}

impl FilterField {
    pub const ALL: [FilterField; 9] = [
        Self::Id,
        Self::From,
        Self::To,
        Self::Subject,
        Self::Status,
        Self::Result,
        Self::Since,
        Self::Until,
        Self::Source,
    ];

    /// Text fields in the order Tab moves focus between them.
    pub const TEXT: [FilterField; 4] = [Self::Id, Self::From, Self::To, Self::Subject];

    pub fn param_name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::From => "from",
            Self::To => "to",
            Self::Subject => "subject",
            Self::Status => "status",
            Self::Result => "result",
            Self::Since => "since",
            Self::Until => "until",
            Self::Source => "source",
        }
    }

    pub fn from_param(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.param_name() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::From => "From",
            Self::To => "To",
            Self::Subject => "Subject",
            Self::Status => "Status",
            Self::Result => "Result",
            Self::Since => "Since",
            Self::Until => "Until",
            Self::Source => "Source",
        }
    }

    pub fn control(&self) -> FilterControl {
        match self {
            Self::Id | Self::From | Self::To | Self::Subject => FilterControl::Text,
            Self::Status | Self::Result | Self::Source => FilterControl::Select,
            Self::Since | Self::Until => FilterControl::DateRange,
        }
    }

    pub fn is_text(&self) -> bool {
        self.control() == FilterControl::Text
    }

    fn index(&self) -> usize {
        match self {
            Self::Id => 0,
            Self::From => 1,
            Self::To => 2,
            Self::Subject => 3,
            Self::Status => 4,
            Self::Result => 5,
            Self::Since => 6,
            Self::Until => 7,
            Self::Source => 8,
        }
    }

    pub fn next_text(&self) -> FilterField {
        let pos = Self::TEXT.iter().position(|f| f == self).unwrap_or(0);
        Self::TEXT[(pos + 1) % Self::TEXT.len()]
    }

    pub fn prev_text(&self) -> FilterField {
        let pos = Self::TEXT.iter().position(|f| f == self).unwrap_or(0);
        Self::TEXT[(pos + Self::TEXT.len() - 1) % Self::TEXT.len()]
    }
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.param_name())
    }
}

/// Current value of every filter field. Empty string means unset.
///
/// Mutators consume `self` and hand back a fresh state so a multi-field
/// update is observed as a single transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    values: [String; 9],
}

impl FilterState {
    pub fn get(&self, field: FilterField) -> &str {
        &self.values[field.index()]
    }

    pub fn with_one(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.values[field.index()] = value.into();
        self
    }

    /// Positions in `fields` and `values` are paired; a missing value is `""`.
    pub fn with_many(mut self, fields: &[FilterField], values: &[String]) -> Self {
        for (i, field) in fields.iter().enumerate() {
            self.values[field.index()] = values.get(i).cloned().unwrap_or_default();
        }
        self
    }

    /// Overlay every field that is present in `partial`.
    pub fn merge(mut self, partial: &PartialFilters) -> Self {
        for (field, value) in &partial.0 {
            self.values[field.index()] = value.clone();
        }
        self
    }

    pub fn set_one(&mut self, field: FilterField, value: impl Into<String>) {
        *self = std::mem::take(self).with_one(field, value);
    }

    pub fn set_many(&mut self, fields: &[FilterField], values: &[String]) {
        *self = std::mem::take(self).with_many(fields, values);
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &str)> + '_ {
        FilterField::ALL.into_iter().map(|f| (f, self.get(f)))
    }

    pub fn active(&self) -> impl Iterator<Item = (FilterField, &str)> + '_ {
        self.iter().filter(|(_, v)| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

/// Subset of filter values, as decoded from query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialFilters(pub Vec<(FilterField, String)>);

impl PartialFilters {
    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
