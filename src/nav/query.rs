//! Query-parameter view of the listing: filters plus `start`/`length`.
//!
//! The parameters are the shareable form of the view. They seed the filter
//! store and page size once, on mount, and are re-derived from the store on
//! every commit afterwards.

use std::collections::BTreeMap;

use crate::filter::{FilterField, FilterState, PartialFilters};
use crate::pagination::{PageSizeOption, Pagination, DEFAULT_PAGE_SIZE};

pub const START: &str = "start";
pub const LENGTH: &str = "length";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Int(u64),
    Text(String),
}

impl ParamValue {
    /// Numbers are always kept, zero included. Text is kept when non-empty.
    pub fn is_retained(&self) -> bool {
        match self {
            Self::Int(_) => true,
            Self::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, ParamValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let map = url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), ParamValue::Text(v.into_owned())))
            .collect();
        Self(map)
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            serializer.append_pair(key, &value.as_text());
        }
        serializer.finish()
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key).map(ParamValue::as_text)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) {
        self.0.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// String pairs for an HTTP query string.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.as_text()))
            .collect()
    }

    fn retain_present(&mut self) {
        self.0.retain(|_, v| v.is_retained());
    }
}

/// Which filter values an encode writes on top of the current parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overrides {
    /// Flush every non-empty field of the filter store.
    Store,
    /// Write exactly these fields, empty values included (and then dropped).
    Fields(Vec<(FilterField, String)>),
}

impl Overrides {
    pub fn none() -> Self {
        Self::Fields(Vec::new())
    }

    pub fn one(field: FilterField, value: impl Into<String>) -> Self {
        Self::Fields(vec![(field, value.into())])
    }
}

pub fn encode(
    current: &QueryParams,
    filters: &FilterState,
    pagination: &Pagination,
    to_first_page: bool,
    overrides: &Overrides,
) -> QueryParams {
    let mut params = current.clone();

    let start = if to_first_page { 0 } else { pagination.start() };
    params.insert(START, ParamValue::Int(start));
    params.insert(LENGTH, ParamValue::Int(pagination.length));

    match overrides {
        Overrides::Store => {
            for (field, value) in filters.active() {
                params.insert(field.param_name(), ParamValue::Text(value.to_string()));
            }
        }
        Overrides::Fields(fields) => {
            for (field, value) in fields {
                params.insert(field.param_name(), ParamValue::Text(value.clone()));
            }
        }
    }

    params.retain_present();
    params
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hydration {
    pub filters: PartialFilters,
    pub page_size: PageSizeOption,
}

pub fn decode(params: &QueryParams) -> Hydration {
    let filters = params
        .iter()
        .filter_map(|(key, value)| {
            FilterField::from_param(key).map(|field| (field, value.as_text()))
        })
        .collect();

    let page_size = params
        .get(LENGTH)
        .and_then(|raw| PageSizeOption::parse(&raw.as_text()))
        .unwrap_or(DEFAULT_PAGE_SIZE);

    Hydration {
        filters: PartialFilters(filters),
        page_size,
    }
}
