//! Cancellable periodic callbacks that drive the countdown.
//!
//! A subscription stays live until its [`TickHandle`] is cancelled or
//! dropped. Once cancelled, no further callback is delivered for it.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

pub trait TickSource: Send + Sync {
    fn subscribe(&self, period: Duration, callback: TickCallback) -> TickHandle;
}

#[derive(Debug)]
pub struct TickHandle {
    token: CancellationToken,
}

impl TickHandle {
    fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Fires callbacks from a tokio interval task on the given runtime.
#[derive(Debug, Clone)]
pub struct IntervalTickSource {
    runtime: Handle,
}

impl IntervalTickSource {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Uses the runtime of the calling context, if any.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl TickSource for IntervalTickSource {
    fn subscribe(&self, period: Duration, mut callback: TickCallback) -> TickHandle {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        self.runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => {
                        if cancelled.is_cancelled() {
                            break;
                        }
                        callback();
                    }
                }
            }
            tracing::trace!("tick subscription closed");
        });
        TickHandle::new(token)
    }
}

struct ManualSubscription {
    token: CancellationToken,
    callback: Arc<Mutex<TickCallback>>,
}

/// Delivers ticks only when told to. Used to drive the timer synchronously.
#[derive(Default, Clone)]
pub struct ManualTickSource {
    subscriptions: Arc<Mutex<Vec<ManualSubscription>>>,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers one tick to every live subscription and returns how many
    /// callbacks ran.
    pub fn fire(&self) -> usize {
        let live: Vec<(CancellationToken, Arc<Mutex<TickCallback>>)> = {
            let mut subscriptions = self
                .subscriptions
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            subscriptions.retain(|subscription| !subscription.token.is_cancelled());
            subscriptions
                .iter()
                .map(|subscription| {
                    (
                        subscription.token.clone(),
                        Arc::clone(&subscription.callback),
                    )
                })
                .collect()
        };

        let mut delivered = 0;
        for (token, callback) in live {
            // An earlier callback in this round may have cancelled this one.
            if token.is_cancelled() {
                continue;
            }
            let mut callback = callback.lock().unwrap_or_else(PoisonError::into_inner);
            (*callback)();
            delivered += 1;
        }
        delivered
    }

    pub fn advance(&self, ticks: u32) -> usize {
        (0..ticks).map(|_| self.fire()).sum()
    }

    pub fn live_subscriptions(&self) -> usize {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|subscription| !subscription.token.is_cancelled())
            .count()
    }
}

impl TickSource for ManualTickSource {
    fn subscribe(&self, _period: Duration, callback: TickCallback) -> TickHandle {
        let token = CancellationToken::new();
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ManualSubscription {
                token: token.clone(),
                callback: Arc::new(Mutex::new(callback)),
            });
        TickHandle::new(token)
    }
}
