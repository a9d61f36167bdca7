//! Behavioral tests for the notification dispatcher.

use async_trait::async_trait;
use domain_notifications::{
    Dispatcher, DispatcherConfig, EmailContent, EmailProvider, NotificationJob, NotificationKind,
    NotificationResult, SentEmail,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

fn job() -> NotificationJob {
    NotificationJob::new(
        NotificationKind::DemoRequest,
        "admin@example.com".to_string(),
        "Admin".to_string(),
        "New Demo Request".to_string(),
        "<p>demo</p>".to_string(),
        "demo".to_string(),
        None,
    )
}

/// Provider that takes a long time per send.
struct SlowProvider {
    delay: Duration,
}

#[async_trait]
impl EmailProvider for SlowProvider {
    async fn send(&self, _email: &EmailContent) -> NotificationResult<SentEmail> {
        tokio::time::sleep(self.delay).await;
        Ok(SentEmail {
            message_id: None,
            accepted: true,
        })
    }

    fn name(&self) -> &'static str {
        "slow-stub"
    }

    async fn health_check(&self) -> NotificationResult<bool> {
        Ok(true)
    }
}

/// Provider that fails every send.
struct FailingProvider;

#[async_trait]
impl EmailProvider for FailingProvider {
    async fn send(&self, _email: &EmailContent) -> NotificationResult<SentEmail> {
        Err(domain_notifications::NotificationError::ProviderError(
            "stub outage".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "failing-stub"
    }

    async fn health_check(&self) -> NotificationResult<bool> {
        Ok(true)
    }
}

/// Provider that records the peak number of concurrent sends.
struct ConcurrencyProvider {
    current: AtomicUsize,
    peak: AtomicUsize,
    sent: AtomicUsize,
}

impl ConcurrencyProvider {
    fn new() -> Self {
        Self {
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            sent: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EmailProvider for ConcurrencyProvider {
    async fn send(&self, _email: &EmailContent) -> NotificationResult<SentEmail> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.current.fetch_sub(1, Ordering::SeqCst);
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(SentEmail {
            message_id: None,
            accepted: true,
        })
    }

    fn name(&self) -> &'static str {
        "concurrency-stub"
    }

    async fn health_check(&self) -> NotificationResult<bool> {
        Ok(true)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn submit_does_not_block_on_slow_provider() {
    let provider = Arc::new(SlowProvider {
        delay: Duration::from_secs(5),
    });
    let dispatcher = Dispatcher::new(
        Some(provider),
        DispatcherConfig {
            workers: 2,
            queue_capacity: 64,
        },
    );

    let start = Instant::now();
    for _ in 0..10 {
        dispatcher.submit(job()).unwrap();
    }
    // All submissions return long before any send completes.
    assert!(start.elapsed() < Duration::from_millis(100));
    assert_eq!(dispatcher.metrics().submitted, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn delivery_failures_are_counted_not_propagated() {
    let dispatcher = Dispatcher::new(
        Some(Arc::new(FailingProvider)),
        DispatcherConfig {
            workers: 2,
            queue_capacity: 16,
        },
    );

    for _ in 0..4 {
        // Submission succeeds even though every send will fail.
        dispatcher.submit(job()).unwrap();
    }

    for _ in 0..100 {
        if dispatcher.metrics().failed == 4 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let metrics = dispatcher.metrics();
    assert_eq!(metrics.submitted, 4);
    assert_eq!(metrics.failed, 4);
    assert_eq!(metrics.delivered, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrency_is_bounded_by_worker_count() {
    let provider = Arc::new(ConcurrencyProvider::new());
    let workers = 3;
    let dispatcher = Dispatcher::new(
        Some(Arc::clone(&provider) as Arc<dyn EmailProvider>),
        DispatcherConfig {
            workers,
            queue_capacity: 64,
        },
    );

    let jobs = 12;
    for _ in 0..jobs {
        dispatcher.submit(job()).unwrap();
    }

    for _ in 0..200 {
        if provider.sent.load(Ordering::SeqCst) == jobs {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(provider.sent.load(Ordering::SeqCst), jobs);
    assert!(provider.peak.load(Ordering::SeqCst) <= workers);
}
