use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// How one `/analyze` call ended, for counting purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ClientError,
    Failure,
}

pub struct Metrics {
    // Counters
    total_requests: AtomicUsize,
    successful_requests: AtomicUsize,
    client_errors: AtomicUsize,
    failed_requests: AtomicUsize,

    // Upstream timing (in microseconds)
    upstream_calls: AtomicUsize,
    total_upstream_time_us: AtomicU64,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_requests: AtomicUsize::new(0),
            successful_requests: AtomicUsize::new(0),
            client_errors: AtomicUsize::new(0),
            failed_requests: AtomicUsize::new(0),
            upstream_calls: AtomicUsize::new(0),
            total_upstream_time_us: AtomicU64::new(0),
        })
    }

    pub fn record_request(&self, outcome: Outcome) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            Outcome::Success => &self.successful_requests,
            Outcome::ClientError => &self.client_errors,
            Outcome::Failure => &self.failed_requests,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream(&self, duration: Duration) {
        self.upstream_calls.fetch_add(1, Ordering::Relaxed);
        self.total_upstream_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let calls = self.upstream_calls.load(Ordering::Relaxed);
        let total_us = self.total_upstream_time_us.load(Ordering::Relaxed) as f64;
        let avg_upstream_time_ms = if calls > 0 {
            total_us / calls as f64 / 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_requests: self.successful_requests.load(Ordering::Relaxed),
            client_errors: self.client_errors.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            upstream_calls: calls,
            avg_upstream_time_ms,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub client_errors: usize,
    pub failed_requests: usize,
    pub upstream_calls: usize,
    pub avg_upstream_time_ms: f64,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
