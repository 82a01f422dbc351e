pub mod link;
pub mod query;

pub use link::{format_link, parse_link, LinkError};
pub use query::{decode, encode, Hydration, Overrides, ParamValue, QueryParams};
