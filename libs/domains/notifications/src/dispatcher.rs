//! In-process notification dispatcher.
//!
//! The dispatcher owns a bounded job queue and a fixed pool of worker tasks.
//! Submission is non-blocking: handlers enqueue a fully-rendered
//! [`NotificationJob`] and return immediately, and workers deliver jobs
//! through the configured [`EmailProvider`]. Delivery is best-effort; a
//! failed send is logged and counted but never fails the originating request.
//!
//! The dispatcher is constructed once at the composition root and handed to
//! services as a dependency. There is no global instance.

use crate::error::{NotificationError, NotificationResult};
use crate::models::{NotificationJob, SubmissionReceipt};
use crate::providers::{EmailContent, EmailProvider};
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, mpsc};
use tracing::{error, info, warn};

/// Configuration for the notification dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Number of worker tasks delivering jobs concurrently.
    pub workers: usize,
    /// Bounded queue capacity. Submissions are rejected when full.
    pub queue_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            workers: std::env::var("NOTIFY_WORKERS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
            queue_capacity: std::env::var("NOTIFY_QUEUE_CAPACITY")
                .unwrap_or_else(|_| "256".to_string())
                .parse()
                .unwrap_or(256),
        }
    }
}

/// Snapshot of dispatcher counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherMetrics {
    /// Jobs accepted onto the queue.
    pub submitted: u64,
    /// Jobs delivered by the provider.
    pub delivered: u64,
    /// Jobs that reached a worker but failed to send.
    pub failed: u64,
    /// Submissions rejected because the queue was full.
    pub rejected: u64,
    /// Jobs dropped because no provider is configured.
    pub skipped_unconfigured: u64,
}

#[derive(Default)]
struct Counters {
    submitted: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
    rejected: AtomicU64,
    skipped_unconfigured: AtomicU64,
}

/// Dispatches notification jobs to worker tasks over a bounded queue.
pub struct Dispatcher {
    tx: mpsc::Sender<NotificationJob>,
    counters: Arc<Counters>,
    provider_configured: bool,
}

impl Dispatcher {
    /// Create a dispatcher and spawn its worker pool.
    ///
    /// `provider` is `None` when email delivery is not configured; jobs are
    /// then logged and counted but not sent, and requests proceed normally.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(provider: Option<Arc<dyn EmailProvider>>, config: DispatcherConfig) -> Self {
        let workers = config.workers.max(1);
        let capacity = config.queue_capacity.max(1);

        let (tx, rx) = mpsc::channel::<NotificationJob>(capacity);
        let rx = Arc::new(Mutex::new(rx));
        let counters = Arc::new(Counters::default());

        let provider_configured = provider.is_some();
        if !provider_configured {
            warn!("Email provider not configured; notifications will be skipped");
        }

        for worker_id in 0..workers {
            let rx = Arc::clone(&rx);
            let provider = provider.clone();
            let counters = Arc::clone(&counters);
            tokio::spawn(async move {
                worker_loop(worker_id, rx, provider, counters).await;
            });
        }

        info!(
            workers,
            queue_capacity = capacity,
            provider_configured,
            "Notification dispatcher started"
        );

        Self {
            tx,
            counters,
            provider_configured,
        }
    }

    /// Create a dispatcher with default configuration.
    pub fn with_default_config(provider: Option<Arc<dyn EmailProvider>>) -> Self {
        Self::new(provider, DispatcherConfig::default())
    }

    /// Submit a job for best-effort delivery. Never blocks.
    ///
    /// Returns `QueueFull` when the queue is at capacity and
    /// `DispatcherClosed` when the workers have shut down. Callers treat
    /// both as non-fatal for the originating request.
    pub fn submit(&self, job: NotificationJob) -> NotificationResult<SubmissionReceipt> {
        let job_id = job.id;
        let kind = job.kind;

        match self.tx.try_send(job) {
            Ok(()) => {
                self.counters.submitted.fetch_add(1, Ordering::Relaxed);
                info!(%job_id, %kind, "Notification queued");
                Ok(SubmissionReceipt { job_id })
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.counters.rejected.fetch_add(1, Ordering::Relaxed);
                warn!(%job_id, %kind, "Notification queue full, job rejected");
                Err(NotificationError::QueueFull)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.counters.rejected.fetch_add(1, Ordering::Relaxed);
                warn!(%job_id, %kind, "Notification dispatcher closed, job rejected");
                Err(NotificationError::DispatcherClosed)
            }
        }
    }

    /// Whether an email provider is configured.
    pub fn is_configured(&self) -> bool {
        self.provider_configured
    }

    /// Snapshot the dispatcher counters.
    pub fn metrics(&self) -> DispatcherMetrics {
        DispatcherMetrics {
            submitted: self.counters.submitted.load(Ordering::Relaxed),
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            rejected: self.counters.rejected.load(Ordering::Relaxed),
            skipped_unconfigured: self.counters.skipped_unconfigured.load(Ordering::Relaxed),
        }
    }
}

async fn worker_loop(
    worker_id: usize,
    rx: Arc<Mutex<mpsc::Receiver<NotificationJob>>>,
    provider: Option<Arc<dyn EmailProvider>>,
    counters: Arc<Counters>,
) {
    loop {
        // Hold the lock only while waiting for a job, not while sending,
        // so the other workers can keep pulling from the queue.
        let job = { rx.lock().await.recv().await };
        let Some(job) = job else {
            info!(worker_id, "Notification worker stopping, queue closed");
            break;
        };

        let queue_ms = (Utc::now() - job.created_at).num_milliseconds();

        let Some(provider) = provider.as_ref() else {
            counters.skipped_unconfigured.fetch_add(1, Ordering::Relaxed);
            info!(
                worker_id,
                job_id = %job.id,
                kind = %job.kind,
                "No email provider configured, skipping notification"
            );
            continue;
        };

        let content = EmailContent {
            to_email: job.to_email.clone(),
            to_name: job.to_name.clone(),
            subject: job.subject.clone(),
            html_body: job.html_body.clone(),
            text_body: job.text_body.clone(),
            reply_to: job.reply_to.clone(),
        };

        match provider.send(&content).await {
            Ok(sent) => {
                counters.delivered.fetch_add(1, Ordering::Relaxed);
                info!(
                    worker_id,
                    job_id = %job.id,
                    kind = %job.kind,
                    provider = provider.name(),
                    message_id = ?sent.message_id,
                    queue_ms,
                    "Notification delivered"
                );
            }
            Err(e) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                error!(
                    worker_id,
                    job_id = %job.id,
                    kind = %job.kind,
                    provider = provider.name(),
                    queue_ms,
                    error = %e,
                    "Notification delivery failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;

    fn job() -> NotificationJob {
        NotificationJob::new(
            NotificationKind::ContactEnquiry,
            "admin@example.com".to_string(),
            "Admin".to_string(),
            "subject".to_string(),
            "<p>body</p>".to_string(),
            "body".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn test_unconfigured_dispatcher_accepts_and_skips() {
        let dispatcher = Dispatcher::new(
            None,
            DispatcherConfig {
                workers: 1,
                queue_capacity: 4,
            },
        );
        assert!(!dispatcher.is_configured());

        dispatcher.submit(job()).unwrap();

        // Wait for the worker to drain the job.
        for _ in 0..50 {
            if dispatcher.metrics().skipped_unconfigured == 1 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        let metrics = dispatcher.metrics();
        assert_eq!(metrics.submitted, 1);
        assert_eq!(metrics.skipped_unconfigured, 1);
    }

    #[tokio::test]
    async fn test_configured_dispatcher_delivers_and_counts() {
        let mut provider = crate::providers::MockEmailProvider::new();
        provider.expect_send().times(1).returning(|_| {
            Ok(crate::providers::SentEmail {
                message_id: Some("msg-1".to_string()),
                accepted: true,
            })
        });
        provider.expect_name().return_const("mock");

        let dispatcher = Dispatcher::new(
            Some(Arc::new(provider)),
            DispatcherConfig {
                workers: 1,
                queue_capacity: 4,
            },
        );
        assert!(dispatcher.is_configured());

        dispatcher.submit(job()).unwrap();

        for _ in 0..50 {
            if dispatcher.metrics().delivered == 1 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        let metrics = dispatcher.metrics();
        assert_eq!(metrics.submitted, 1);
        assert_eq!(metrics.delivered, 1);
        assert_eq!(metrics.failed, 0);
    }

    struct PanickingProvider;

    #[async_trait::async_trait]
    impl EmailProvider for PanickingProvider {
        async fn send(&self, _email: &EmailContent) -> NotificationResult<crate::SentEmail> {
            panic!("provider crashed")
        }

        fn name(&self) -> &'static str {
            "panicking"
        }

        async fn health_check(&self) -> NotificationResult<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_closed_dispatcher_counts_rejections() {
        // A worker that dies drops its receiver handle; with a single worker
        // the channel closes and later submissions are rejected.
        let dispatcher = Dispatcher::new(
            Some(Arc::new(PanickingProvider)),
            DispatcherConfig {
                workers: 1,
                queue_capacity: 4,
            },
        );

        dispatcher.submit(job()).unwrap();

        let mut closed = false;
        for _ in 0..100 {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            if let Err(NotificationError::DispatcherClosed) = dispatcher.submit(job()) {
                closed = true;
                break;
            }
        }
        assert!(closed);

        let before = dispatcher.metrics().rejected;
        assert!(matches!(
            dispatcher.submit(job()),
            Err(NotificationError::DispatcherClosed)
        ));
        assert_eq!(dispatcher.metrics().rejected, before + 1);
    }

    #[tokio::test]
    async fn test_full_queue_rejects_submission() {
        // No workers can drain if we saturate faster than a single paused
        // worker picks up, so use a tiny queue and many submissions.
        let dispatcher = Dispatcher::new(
            None,
            DispatcherConfig {
                workers: 1,
                queue_capacity: 1,
            },
        );

        let mut saw_queue_full = false;
        for _ in 0..64 {
            if let Err(NotificationError::QueueFull) = dispatcher.submit(job()) {
                saw_queue_full = true;
                break;
            }
        }
        assert!(saw_queue_full);
        assert!(dispatcher.metrics().rejected >= 1);
    }
}
