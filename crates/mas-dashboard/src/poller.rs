use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::document::Document;
use crate::markup::MarkupContract;
use crate::render::render_snapshot;
use crate::source::StatusSource;
use crate::time_format::TimestampFormat;

/// Fixed polling cadence.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(2000);

pub type SharedDocument = Arc<Mutex<Document>>;

/// Periodically pulls a status snapshot and renders it into a shared document.
///
/// Refreshes are fire-and-forget: a slow response may still be in flight when
/// the next tick fires, and responses are applied in completion order, so a
/// stale snapshot can overwrite a fresher one.
#[derive(Clone)]
pub struct StatusPoller {
    source: Arc<dyn StatusSource>,
    document: SharedDocument,
    contract: MarkupContract,
    time_format: TimestampFormat,
    revisions: Arc<watch::Sender<u64>>,
}

impl StatusPoller {
    pub fn new(
        source: Arc<dyn StatusSource>,
        document: SharedDocument,
        contract: MarkupContract,
        time_format: TimestampFormat,
    ) -> Self {
        let (revisions, _rx) = watch::channel(0);
        Self {
            source,
            document,
            contract,
            time_format,
            revisions: Arc::new(revisions),
        }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    /// Receives the document revision whenever a render changes it.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revisions.subscribe()
    }

    /// One poll cycle. Failures are logged and leave the document untouched.
    pub async fn refresh(&self) {
        let snapshot = match self.source.fetch().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error=%e, "failed to load dashboard status");
                return;
            }
        };

        let mut doc = self.document.lock().await;
        render_snapshot(&snapshot, &mut doc, self.contract, &self.time_format);
        let revision = doc.revision();
        drop(doc);

        tracing::debug!(revision, alerts = snapshot.alerts.len(), "dashboard refreshed");
        self.revisions.send_if_modified(|current| {
            let modified = *current != revision;
            *current = revision;
            modified
        });
    }

    /// Refreshes now and then every [`REFRESH_INTERVAL`] until the handle is stopped.
    pub fn start(&self) -> PollerHandle {
        let poller = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
            loop {
                ticker.tick().await;
                let cycle = poller.clone();
                tokio::spawn(async move { cycle.refresh().await });
            }
        });
        PollerHandle { task }
    }
}

/// Owns the polling schedule. Dropping it leaves polling running.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Cancels future cycles; a refresh already in flight still completes.
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use mas_common::StatusSnapshot;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use crate::render::PLACEHOLDER;
    use crate::source::FetchError;

    #[derive(Default)]
    struct ScriptedSource {
        replies: std::sync::Mutex<VecDeque<Result<StatusSnapshot, FetchError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn push(&self, reply: Result<StatusSnapshot, FetchError>) {
            self.replies.lock().unwrap().push_back(reply);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusSource for ScriptedSource {
        async fn fetch(&self) -> Result<StatusSnapshot, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(StatusSnapshot::default()))
        }
    }

    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn poller(source: Arc<ScriptedSource>) -> StatusPoller {
        let contract = MarkupContract::Current;
        StatusPoller::new(
            source,
            Arc::new(Mutex::new(Document::for_contract(contract))),
            contract,
            TimestampFormat::default(),
        )
    }

    fn running() -> StatusSnapshot {
        StatusSnapshot {
            ansible_stage: Some("HTCONDOR_SETUP".into()),
            htcondor_status: Some("RUNNING".into()),
            alerts: vec!["node3 slow".into()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_refresh_renders_snapshot() {
        let source = Arc::new(ScriptedSource::default());
        source.push(Ok(running()));
        let poller = poller(source.clone());
        let mut rx = poller.subscribe();

        poller.refresh().await;

        let doc = poller.document().lock().await;
        assert_eq!(doc.text("ansible-status"), Some("HTCONDOR_SETUP"));
        assert_eq!(doc.text("htcondor-status"), Some("RUNNING"));
        assert_eq!(doc.items("alerts-list").map(|i| i.len()), Some(1));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), doc.revision());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_content() {
        let errors = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(errors.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let source = Arc::new(ScriptedSource::default());
        source.push(Ok(running()));
        source.push(Err(FetchError::Network(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))));
        let poller = poller(source.clone());

        poller.refresh().await;
        let before = poller.document().lock().await.clone();

        poller.refresh().await;
        let after = poller.document().lock().await.clone();

        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(before, after);
        assert_eq!(after.text("ansible-status"), Some("HTCONDOR_SETUP"));
    }

    #[tokio::test]
    async fn test_failed_first_fetch_leaves_document_empty() {
        let source = Arc::new(ScriptedSource::default());
        source.push(Err(FetchError::Status { status: 503 }));
        let poller = poller(source.clone());

        poller.refresh().await;

        let doc = poller.document().lock().await;
        assert_eq!(doc.revision(), 0);
        assert_ne!(doc.text("ansible-status"), Some(PLACEHOLDER));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_polls_every_interval() {
        let source = Arc::new(ScriptedSource::default());
        let poller = poller(source.clone());

        let handle = poller.start();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(source.calls(), 1);

        for expected in 2..=4 {
            tokio::time::sleep(REFRESH_INTERVAL).await;
            assert_eq!(source.calls(), expected);
        }
        assert!(handle.is_running());

        handle.stop();
        tokio::time::sleep(REFRESH_INTERVAL * 5).await;
        assert_eq!(source.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_keeps_polling() {
        let source = Arc::new(ScriptedSource::default());
        let poller = poller(source.clone());

        drop(poller.start());
        tokio::time::sleep(REFRESH_INTERVAL * 2 + Duration::from_millis(10)).await;
        assert_eq!(source.calls(), 3);
    }
}
