use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use super::{ClientError, ClientResult, MailServerClient};
use crate::domain::MailPage;
use crate::nav::QueryParams;

const LIST_PATH: &str = "mail/server";
const RESTART_PATH: &str = "mail/server/restart";
const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Serialize)]
struct RestartRequest {
    id: i64,
}

pub struct HttpMailClient {
    http: Client,
    base_url: Url,
}

impl HttpMailClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ClientError::Config("base url must not be empty".to_string()));
        }
        // Trailing slash so relative joins keep the last path segment.
        let base_url = Url::parse(&format!("{}/", trimmed))
            .map_err(|e| ClientError::Config(format!("invalid base url {}: {}", trimmed, e)))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))?;

        tracing::info!("Using mail server API at {}", base_url);
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Config(format!("invalid endpoint {}: {}", path, e)))
    }

    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            code: status.as_u16(),
            body: body.trim().to_string(),
        })
    }
}

#[async_trait]
impl MailServerClient for HttpMailClient {
    async fn fetch_mails(&self, params: &QueryParams) -> ClientResult<MailPage> {
        let url = self.endpoint(LIST_PATH)?;
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(%request_id, query = %params.to_query_string(), "fetching mails");

        let response = self
            .http
            .get(url)
            .query(&params.pairs())
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(http_error)?;

        let response = Self::check(response).await?;
        response
            .json::<MailPage>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn restart_mail(&self, id: i64) -> ClientResult<()> {
        let url = self.endpoint(RESTART_PATH)?;
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(%request_id, id, "restarting mail");

        let response = self
            .http
            .post(url)
            .header(REQUEST_ID_HEADER, &request_id)
            .json(&RestartRequest { id })
            .send()
            .await
            .map_err(http_error)?;

        Self::check(response).await.map(|_| ())
    }
}

fn http_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Connection(err.to_string())
    }
}
