pub mod mail;
pub mod options;

pub use mail::*;
pub use options::*;
