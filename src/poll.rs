use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{error, info};

use crate::{error::Result, gateway::Gateway};

/// Default cadence of the ticket-count synchronizer.
pub const TICKET_COUNT_PERIOD: Duration = Duration::from_secs(1);

/// Default cadence of the log synchronizer.
pub const LOG_PERIOD: Duration = Duration::from_secs(2);

/// A timer-driven loop that repeatedly fetches one piece of remote state and
/// republishes the latest value.
///
/// Construction starts the loop; the poller owns its timer, so a second
/// concurrent start of the same loop cannot exist. The first tick fires one
/// full period after construction. Each tick issues its fetch as its own task:
/// ticks keep their nominal cadence with no back-pressure, and when responses
/// resolve out of order the one that arrives last wins.
///
/// A failed fetch is logged and otherwise ignored; the previous value stays
/// in place until the next tick succeeds. Dropping the poller cancels the
/// timer; an in-flight fetch at that point completes and its result is
/// discarded.
pub struct Poller<T> {
    name: &'static str,
    handle: JoinHandle<()>,
    rx: watch::Receiver<T>,
    cancelled: Arc<AtomicBool>,
}

impl<T: Clone + Send + Sync + 'static> Poller<T> {
    fn spawn<F, Fut>(name: &'static str, period: Duration, initial: T, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(initial);
        let tx = Arc::new(tx);
        let cancelled = Arc::new(AtomicBool::new(false));

        let handle = {
            let cancelled = cancelled.clone();

            tokio::spawn(async move {
                info!("{name} polling every {period:?}");

                let mut interval = interval_at(Instant::now() + period, period);

                loop {
                    interval.tick().await;

                    let fut = fetch();
                    let tx = tx.clone();
                    let cancelled = cancelled.clone();

                    tokio::spawn(async move {
                        match fut.await {
                            Ok(value) => {
                                if !cancelled.load(Ordering::Acquire) {
                                    let _ = tx.send(value);
                                }
                            }
                            Err(e) => error!("{name} poll failed: {e}"),
                        }
                    });
                }
            })
        };

        Self {
            name,
            handle,
            rx,
            cancelled,
        }
    }

    /// The most recently published value.
    pub fn latest(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Watch for every published value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.rx.clone()
    }

    /// Halt future ticks. In-flight fetches complete and are discarded.
    pub fn stop(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.handle.abort();

        info!("{} polling stopped", self.name);
    }
}

impl Poller<u64> {
    /// Synchronizer for the live ticket count.
    pub fn ticket_counts<G>(gateway: G, period: Duration) -> Self
    where
        G: Gateway + Clone + Send + Sync + 'static,
    {
        Self::spawn("ticket-count", period, 0, move || {
            let gateway = gateway.clone();

            async move { gateway.ticket_count().await }
        })
    }
}

impl Poller<Vec<String>> {
    /// Synchronizer for the engine's event log. Every successful fetch
    /// replaces the sequence wholesale.
    pub fn logs<G>(gateway: G, period: Duration) -> Self
    where
        G: Gateway + Clone + Send + Sync + 'static,
    {
        Self::spawn("log", period, Vec::new(), move || {
            let gateway = gateway.clone();

            async move { gateway.logs().await }
        })
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        self.handle.abort();
    }
}
