//! Expiry and refresh timers for running giveaways.
//!
//! Every non-ended giveaway owns exactly two process-local tasks: a
//! long-delay expiry timer that settles it at `end_at`, and a 60-second
//! refresh loop that re-renders its display message. The handles live in a
//! [`TimerRegistry`] owned by the giveaway service; they are never persisted
//! and are rebuilt from the store after a restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error};

use crate::model::giveaway::{EndReason, GiveawayRecord};
use crate::service::GiveawayService;

/// Longest single sleep the expiry timer will schedule. Delays beyond this
/// are chained through [`next_delay_segment`]; the giveaway duration itself
/// has no upper bound.
pub const MAX_TIMER_DELAY: Duration = Duration::from_millis(2_147_483_647);

/// How often the display message of a running giveaway is re-rendered.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(60);

/// The length of the next sleep segment toward a deadline `remaining` away.
pub fn next_delay_segment(remaining: Duration, max_delay: Duration) -> Duration {
    remaining.min(max_delay)
}

struct GiveawayTimers {
    expiry: JoinHandle<()>,
    refresh: JoinHandle<()>,
}

impl GiveawayTimers {
    fn abort(&self) {
        self.expiry.abort();
        self.refresh.abort();
    }
}

/// Process-local table of running giveaway timers, keyed by giveaway id.
///
/// Owned by the giveaway service and injected wherever timers are started,
/// rather than living in module-level shared state. `remove` is idempotent:
/// stopping timers for an id that has none is a no-op.
#[derive(Clone, Default)]
pub struct TimerRegistry {
    inner: Arc<Mutex<HashMap<String, GiveawayTimers>>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, id: &str, timers: GiveawayTimers) {
        let mut registry = self.inner.lock().expect("timer registry poisoned");
        if let Some(previous) = registry.insert(id.to_string(), timers) {
            previous.abort();
        }
    }

    /// Stops and forgets both timers for `id`. Safe to call when none are
    /// registered.
    pub fn remove(&self, id: &str) {
        let mut registry = self.inner.lock().expect("timer registry poisoned");
        if let Some(timers) = registry.remove(id) {
            timers.abort();
        }
    }

    /// Whether `id` currently has timers registered.
    pub fn contains(&self, id: &str) -> bool {
        self.inner
            .lock()
            .expect("timer registry poisoned")
            .contains_key(id)
    }
}

/// Starts (or restarts) the expiry and refresh timers for a giveaway.
///
/// Called at creation and during restart recovery. Replaces any timers
/// already registered for the id.
pub fn schedule(service: GiveawayService, record: &GiveawayRecord) {
    let timers = GiveawayTimers {
        expiry: tokio::spawn(run_expiry(
            service.clone(),
            record.id.clone(),
            record.end_at,
        )),
        refresh: tokio::spawn(run_refresh(service.clone(), record.id.clone())),
    };
    service.timers().insert(&record.id, timers);
    debug!(
        "Scheduled timers for giveaway {} (ends at {})",
        record.id, record.end_at
    );
}

/// Sleeps in bounded segments until `end_at_ms`, then settles the giveaway.
///
/// The remaining delay is recomputed from the wall clock after every
/// segment, so the chain converges even for delays far beyond
/// [`MAX_TIMER_DELAY`]. An `end_at` already in the past fires immediately,
/// which is how restart recovery produces late settlements.
async fn run_expiry(service: GiveawayService, id: String, end_at_ms: i64) {
    loop {
        let remaining_ms = end_at_ms - Utc::now().timestamp_millis();
        if remaining_ms <= 0 {
            break;
        }
        let remaining = Duration::from_millis(remaining_ms as u64);
        tokio::time::sleep(next_delay_segment(remaining, MAX_TIMER_DELAY)).await;
    }

    // Settlement runs detached: it removes this id's timers from the
    // registry, and aborting the registered handle must not be able to
    // cancel the settlement itself mid-write.
    tokio::spawn(async move {
        if let Err(err) = service.settle(&id, EndReason::Time).await {
            error!("Failed to settle expired giveaway {id}: {err}");
        }
    });
}

/// Re-renders the giveaway display every [`REFRESH_PERIOD`].
///
/// Each tick re-reads the record from the store so joins handled elsewhere
/// show up in the entry count. The loop exits on its own once the record is
/// gone or ended.
async fn run_refresh(service: GiveawayService, id: String) {
    let mut ticker = tokio::time::interval(REFRESH_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // interval fires immediately on the first tick; the message was just
    // rendered at publish time, so skip it.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        match service.store().get(&id).await {
            Ok(Some(record)) if !record.ended => service.notifier().refresh(&record).await,
            Ok(_) => {
                debug!("Refresh loop for giveaway {id} stopping");
                return;
            }
            Err(err) => error!("Refresh loop failed to load giveaway {id}: {err}"),
        }
    }
}
