//! The interval-driven reconciliation primitive behind every live view.
//!
//! One implementation serves all call sites (order lists, single-order
//! tracking, restaurant reviews, chat threads) so overlap and cancellation
//! semantics are decided once instead of per screen.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info, warn};

pub const ORDER_LIST_INTERVAL: Duration = Duration::from_secs(5);
pub const ORDER_TRACKING_INTERVAL: Duration = Duration::from_secs(5);
pub const REVIEW_LIST_INTERVAL: Duration = Duration::from_secs(10);
pub const CHAT_INTERVAL: Duration = Duration::from_secs(3);

/// Handle to a running poll loop.
///
/// The loop invokes the fetch once immediately, then once per tick. It awaits
/// each fetch before waiting for the next tick and skips ticks that elapsed
/// meanwhile, so at most one fetch is ever in flight (single-flight) and a
/// slow backend cannot cause a burst of catch-up requests.
///
/// A failed fetch is logged and retried unconditionally on the next tick; no
/// backoff, no circuit breaker — local state simply stays stale for one
/// interval.
pub struct Poller {
    name: &'static str,
    stop: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn start<F, Fut, E>(name: &'static str, interval: Duration, mut fetch: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send,
        E: Display,
    {
        let (stop, mut stopped) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(poller = name, ?interval, "Poller started");
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = fetch().await {
                            warn!(poller = name, error = %e, "Fetch failed, retrying on next tick");
                        }
                    }
                    _ = stopped.changed() => break,
                }
            }
            info!(poller = name, "Poller stopped");
        });
        Self {
            name,
            stop,
            handle: Some(handle),
        }
    }

    /// Graceful stop: signals the loop and waits for it to finish. An
    /// in-flight fetch is allowed to complete.
    pub async fn stop(mut self) {
        let _ = self.stop.send(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!(poller = self.name, "Poll task failed: {e:?}");
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        // A dropped view must not keep issuing authenticated requests.
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn fetch_runs_immediately_then_every_interval() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let poller = Poller::start("test", Duration::from_secs(5), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<(), Infallible>(())
            }
        });

        // Immediate fetch plus three ticks over 15 seconds.
        time::sleep(Duration::from_millis(15_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 4);
        poller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_poller_fetches_no_more() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let poller = Poller::start("test", Duration::from_secs(1), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<(), Infallible>(())
            }
        });

        time::sleep(Duration::from_millis(2_500)).await;
        poller.stop().await;
        let at_stop = count.load(Ordering::SeqCst);

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), at_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetches_never_overlap() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));
        let (flight, seen) = (Arc::clone(&in_flight), Arc::clone(&max_seen));
        let poller = Poller::start("slow", Duration::from_secs(1), move || {
            let flight = Arc::clone(&flight);
            let seen = Arc::clone(&seen);
            async move {
                let now = flight.fetch_add(1, Ordering::SeqCst) + 1;
                seen.fetch_max(now, Ordering::SeqCst);
                // Each fetch takes 2.5 intervals.
                time::sleep(Duration::from_millis(2_500)).await;
                flight.fetch_sub(1, Ordering::SeqCst);
                Ok::<(), Infallible>(())
            }
        });

        time::sleep(Duration::from_secs(12)).await;
        poller.stop().await;
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_are_retried_on_the_next_tick() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let poller = Poller::start("failing", Duration::from_secs(1), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), String>("backend unreachable".into())
            }
        });

        time::sleep(Duration::from_millis(3_500)).await;
        poller.stop().await;
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_a_poller_aborts_its_task() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let poller = Poller::start("dropped", Duration::from_secs(1), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<(), Infallible>(())
            }
        });

        time::sleep(Duration::from_millis(1_500)).await;
        drop(poller);
        let at_drop = count.load(Ordering::SeqCst);

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), at_drop);
    }
}
