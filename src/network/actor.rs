//! Network actor - runs fetches in the Tokio async runtime

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse, RequestId};
use crate::network::source::UserSource;

/// Cancellation handle of an in-flight fetch
struct ActiveFetch {
    cancel_tx: oneshot::Sender<()>,
}

/// Network actor that executes fetch commands against a `UserSource`
pub struct NetworkActor<S> {
    source: Arc<S>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_fetches: JoinSet<RequestId>,
    cancel_handles: HashMap<RequestId, ActiveFetch>,
}

impl<S: UserSource + 'static> NetworkActor<S> {
    pub fn new(source: S, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            source: Arc::new(source),
            response_tx,
            active_fetches: JoinSet::new(),
            cancel_handles: HashMap::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchUsers { id }) => self.spawn_fetch(id),

                        Some(NetworkCommand::CancelFetch(id)) => {
                            if let Some(active) = self.cancel_handles.remove(&id) {
                                tracing::info!(id, "Cancelling fetch");
                                let _ = active.cancel_tx.send(());
                            }
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            for (_, active) in self.cancel_handles.drain() {
                                let _ = active.cancel_tx.send(());
                            }
                            break;
                        }
                    }
                }

                // Drop the cancel handle of every task that finished
                Some(result) = self.active_fetches.join_next() => {
                    match result {
                        Ok(id) => {
                            self.cancel_handles.remove(&id);
                        }
                        Err(e) => tracing::error!(error = %e, "Fetch task failed"),
                    }
                }
            }
        }
    }

    fn spawn_fetch(&mut self, id: RequestId) {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.cancel_handles.insert(id, ActiveFetch { cancel_tx });

        let source = Arc::clone(&self.source);
        let response_tx = self.response_tx.clone();

        self.active_fetches.spawn(async move {
            let start = Instant::now();
            tracing::info!(id, source = %source.describe(), "Fetching users");

            tokio::select! {
                biased;

                _ = cancel_rx => {
                    tracing::info!(id, "Fetch abandoned");
                }
                outcome = source.fetch_users() => {
                    let time_ms = start.elapsed().as_millis() as u64;
                    match &outcome {
                        Ok(users) => tracing::info!(id, count = users.len(), time_ms, "Fetch completed"),
                        Err(e) => tracing::warn!(id, error = %e, time_ms, "Fetch completed with error"),
                    }
                    let _ = response_tx.send(NetworkResponse::Settled { id, outcome, time_ms });
                }
            }
            id
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::models::UserRecord;
    use crate::network::FetchError;

    struct SlowSource;

    #[async_trait]
    impl UserSource for SlowSource {
        async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }

        fn describe(&self) -> String {
            "slow".into()
        }
    }

    /// Stalls on the first call, answers every later call at once
    struct StallsOnceSource {
        calls: AtomicUsize,
        entered: Arc<Notify>,
    }

    #[async_trait]
    impl UserSource for StallsOnceSource {
        async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
            self.entered.notify_one();
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Ok(vec![UserRecord { id: 1, ..Default::default() }])
        }

        fn describe(&self) -> String {
            "stalls-once".into()
        }
    }

    struct FailingSource;

    #[async_trait]
    impl UserSource for FailingSource {
        async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
            Err(FetchError::new("Failed to fetch"))
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    #[tokio::test]
    async fn test_fetch_reports_settled() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(NetworkActor::new(FailingSource, resp_tx).run(cmd_rx));

        cmd_tx.send(NetworkCommand::FetchUsers { id: 7 }).unwrap();
        let NetworkResponse::Settled { id, outcome, .. } = resp_rx.recv().await.unwrap();
        assert_eq!(id, 7);
        assert_eq!(outcome.unwrap_err().message(), "Failed to fetch");

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_abandons_fetch() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(NetworkActor::new(SlowSource, resp_tx).run(cmd_rx));

        cmd_tx.send(NetworkCommand::FetchUsers { id: 1 }).unwrap();
        cmd_tx.send(NetworkCommand::CancelFetch(1)).unwrap();
        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
        // The abandoned task never reports a result
        assert!(resp_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_superseded_fetch_is_dropped() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let entered = Arc::new(Notify::new());
        let source = StallsOnceSource { calls: AtomicUsize::new(0), entered: Arc::clone(&entered) };
        let handle = tokio::spawn(NetworkActor::new(source, resp_tx).run(cmd_rx));

        cmd_tx.send(NetworkCommand::FetchUsers { id: 1 }).unwrap();
        entered.notified().await;

        // Same order the loader emits when a refetch supersedes a stalled fetch
        cmd_tx.send(NetworkCommand::CancelFetch(1)).unwrap();
        cmd_tx.send(NetworkCommand::FetchUsers { id: 2 }).unwrap();

        let NetworkResponse::Settled { id, outcome, .. } = resp_rx.recv().await.unwrap();
        assert_eq!(id, 2);
        assert_eq!(outcome.unwrap().len(), 1);

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
        assert!(resp_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_unknown_id_is_ignored() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(NetworkActor::new(FailingSource, resp_tx).run(cmd_rx));

        cmd_tx.send(NetworkCommand::CancelFetch(99)).unwrap();
        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
        assert!(resp_rx.recv().await.is_none());
    }
}
