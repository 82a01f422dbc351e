pub mod http;
pub mod traits;

pub use http::HttpMailClient;
pub use traits::{ClientError, ClientResult, MailServerClient};
