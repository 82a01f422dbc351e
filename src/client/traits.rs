use async_trait::async_trait;
use thiserror::Error;

use crate::domain::MailPage;
use crate::nav::QueryParams;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("server returned {code}: {body}")]
    Status { code: u16, body: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("timeout")]
    Timeout,
}

pub type ClientResult<T> = Result<T, ClientError>;

#[async_trait]
pub trait MailServerClient: Send + Sync {
    /// Fetch one page of the listing for the given view parameters.
    async fn fetch_mails(&self, params: &QueryParams) -> ClientResult<MailPage>;

    /// Re-send a mail. The server creates a copy of the record.
    async fn restart_mail(&self, id: i64) -> ClientResult<()>;
}
