use std::sync::Arc;

use tokio::sync::mpsc;

use crate::action::Action;
use crate::client::MailServerClient;
use crate::nav::QueryParams;

#[derive(Debug)]
pub enum CliRequest {
    FetchMails { params: QueryParams },
    RestartMail { id: i64 },
}

#[derive(Clone)]
pub struct CliHandle {
    tx: mpsc::UnboundedSender<CliRequest>,
}

impl CliHandle {
    pub fn send(&self, request: CliRequest) {
        let _ = self.tx.send(request);
    }
}

pub struct CliWorker {
    client: Arc<dyn MailServerClient>,
    rx: mpsc::UnboundedReceiver<CliRequest>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl CliWorker {
    pub fn new(
        client: Arc<dyn MailServerClient>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> (Self, CliHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = CliHandle { tx };
        let worker = Self {
            client,
            rx,
            action_tx,
        };
        (worker, handle)
    }

    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            let action = process(self.client.as_ref(), request).await;
            if self.action_tx.send(action).is_err() {
                break;
            }
        }
    }
}

async fn process(client: &dyn MailServerClient, request: CliRequest) -> Action {
    match request {
        CliRequest::FetchMails { params } => match client.fetch_mails(&params).await {
            Ok(page) => Action::MailsLoaded(page),
            Err(e) => {
                tracing::error!("failed to load mails: {}", e);
                Action::FetchFailed(format!("failed to load mails: {}", e))
            }
        },
        CliRequest::RestartMail { id } => match client.restart_mail(id).await {
            Ok(()) => Action::RestartSucceeded(id),
            Err(e) => Action::RestartFailed {
                id,
                message: e.to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::client::{ClientError, ClientResult};
    use crate::domain::{MailPage, MailRecord, PageMeta};

    #[derive(Default)]
    struct FakeClient {
        fail_restart: bool,
        fetched: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MailServerClient for FakeClient {
        async fn fetch_mails(&self, params: &QueryParams) -> ClientResult<MailPage> {
            self.fetched
                .lock()
                .expect("lock")
                .push(params.to_query_string());
            Ok(MailPage {
                body: vec![MailRecord {
                    id: 1,
                    ..MailRecord::default()
                }],
                meta: PageMeta { count: 1 },
            })
        }

        async fn restart_mail(&self, id: i64) -> ClientResult<()> {
            if self.fail_restart {
                Err(ClientError::Status {
                    code: 500,
                    body: format!("cannot restart {}", id),
                })
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn fetch_turns_into_loaded_action() {
        let client = FakeClient::default();
        let params = QueryParams::parse("start=0&length=25");
        let action = process(&client, CliRequest::FetchMails { params }).await;
        assert!(matches!(action, Action::MailsLoaded(ref page) if page.meta.count == 1));
        assert_eq!(
            client.fetched.lock().expect("lock").as_slice(),
            ["length=25&start=0".to_string()]
        );
    }

    #[tokio::test]
    async fn restart_reports_success_and_failure() {
        let ok = FakeClient::default();
        let action = process(&ok, CliRequest::RestartMail { id: 9 }).await;
        assert!(matches!(action, Action::RestartSucceeded(9)));

        let failing = FakeClient {
            fail_restart: true,
            ..FakeClient::default()
        };
        let action = process(&failing, CliRequest::RestartMail { id: 9 }).await;
        assert!(matches!(action, Action::RestartFailed { id: 9, .. }));
    }

    #[tokio::test]
    async fn worker_forwards_responses_in_order() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let (worker, handle) = CliWorker::new(Arc::new(FakeClient::default()), action_tx);
        let task = tokio::spawn(worker.run());

        handle.send(CliRequest::RestartMail { id: 3 });
        handle.send(CliRequest::FetchMails {
            params: QueryParams::new(),
        });

        assert!(matches!(
            action_rx.recv().await,
            Some(Action::RestartSucceeded(3))
        ));
        assert!(matches!(action_rx.recv().await, Some(Action::MailsLoaded(_))));

        drop(handle);
        task.await.expect("worker exits");
    }
}
