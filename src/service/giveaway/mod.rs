//! Giveaway lifecycle service.
//!
//! Owns the create → run → settle transition and the cancel short-circuit.
//! Every operation persists through the store's single writer gate first and
//! only then notifies Discord, so a transient notification failure never
//! rolls back a durable state change. Timer scheduling is delegated to
//! [`crate::scheduler::giveaway_timers`]; the registry of live timers is
//! owned here and injected into it.

#[cfg(test)]
mod test;

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::info;

use crate::data::GiveawayStore;
use crate::error::{AppError, GiveawayError};
use crate::model::giveaway::{EndReason, GiveawayRecord, RerollEntry};
use crate::scheduler::giveaway_timers;
use crate::scheduler::TimerRegistry;
use crate::service::draw;
use crate::service::notify::GiveawayNotifier;
use crate::util::parse::parse_duration;

/// Most winners a single giveaway (or reroll) may draw. Requested counts
/// outside `1..=MAX_WINNERS` are clamped, not rejected, matching the
/// behavior users already rely on.
pub const MAX_WINNERS: u32 = 20;

/// Validated-on-entry parameters for [`GiveawayService::create`].
pub struct CreateGiveaway {
    pub guild_id: u64,
    pub channel_id: u64,
    pub created_by: u64,
    pub title: String,
    pub prize: String,
    pub description: Option<String>,
    /// Raw duration string, e.g. `"30m"`.
    pub duration: String,
    /// Requested winner count, clamped to `1..=MAX_WINNERS`.
    pub winner_count: i64,
}

/// Whether a join actually added the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Entered,
    /// The user was already in; re-joining is a no-op success.
    AlreadyEntered,
}

struct ServiceInner {
    store: GiveawayStore,
    timers: TimerRegistry,
    notifier: Arc<dyn GiveawayNotifier>,
}

/// Handle to the giveaway subsystem. Cheap to clone; clones share the store,
/// the timer registry and the notifier.
#[derive(Clone)]
pub struct GiveawayService {
    inner: Arc<ServiceInner>,
}

impl GiveawayService {
    pub fn new(store: GiveawayStore, notifier: Arc<dyn GiveawayNotifier>) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                store,
                timers: TimerRegistry::new(),
                notifier,
            }),
        }
    }

    pub fn store(&self) -> &GiveawayStore {
        &self.inner.store
    }

    pub fn timers(&self) -> &TimerRegistry {
        &self.inner.timers
    }

    pub fn notifier(&self) -> &Arc<dyn GiveawayNotifier> {
        &self.inner.notifier
    }

    /// Creates a giveaway: validates input, publishes the display message,
    /// persists the active record and schedules its timers.
    ///
    /// # Returns
    /// - `Ok(record)` - The persisted record, timers running
    /// - `Err(AppError::GiveawayErr(InvalidInput))` - Empty title/prize or
    ///   unparsable duration
    /// - `Err(_)` - The display message could not be posted; nothing is
    ///   persisted in that case
    pub async fn create(&self, request: CreateGiveaway) -> Result<GiveawayRecord, AppError> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(GiveawayError::InvalidInput("Title must not be empty".to_string()).into());
        }
        let prize = request.prize.trim();
        if prize.is_empty() {
            return Err(GiveawayError::InvalidInput("Prize must not be empty".to_string()).into());
        }
        let duration = parse_duration(&request.duration)?;
        let winner_count = request.winner_count.clamp(1, MAX_WINNERS as i64) as u32;

        let now = Utc::now().timestamp_millis();
        let mut record = GiveawayRecord {
            id: new_giveaway_id(now),
            guild_id: request.guild_id,
            channel_id: request.channel_id,
            message_id: 0,
            title: title.to_string(),
            prize: prize.to_string(),
            description: request
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            winner_count,
            created_at: now,
            end_at: now + duration.as_millis() as i64,
            created_by: request.created_by,
            participants: Vec::new(),
            ended: false,
            end_reason: None,
            ended_at: None,
            winner_ids: Vec::new(),
            rerolls: Vec::new(),
        };

        // The display message is the join surface; without it the giveaway
        // is unusable, so publish failure aborts creation before persist.
        record.message_id = self.inner.notifier.publish(&record).await?;

        let stored = record.clone();
        self.inner
            .store
            .update(move |records| {
                records.insert(stored.id.clone(), stored);
            })
            .await?;

        giveaway_timers::schedule(self.clone(), &record);
        info!(
            "Created giveaway {} in channel {} ending at {}",
            record.id, record.channel_id, record.end_at
        );

        Ok(record)
    }

    /// Registers a participant. Idempotent: re-joining is reported as
    /// [`JoinOutcome::AlreadyEntered`], not an error.
    pub async fn join(&self, id: &str, user_id: u64) -> Result<JoinOutcome, AppError> {
        let id_owned = id.to_string();
        let (record, outcome) = self
            .inner
            .store
            .update(move |records| match records.get_mut(&id_owned) {
                None => Err(GiveawayError::NotFound(id_owned.clone())),
                Some(record) if record.ended => Err(GiveawayError::AlreadyEnded(id_owned.clone())),
                Some(record) => {
                    if record.participants.contains(&user_id) {
                        Ok((record.clone(), JoinOutcome::AlreadyEntered))
                    } else {
                        record.participants.push(user_id);
                        Ok((record.clone(), JoinOutcome::Entered))
                    }
                }
            })
            .await??;

        if outcome == JoinOutcome::Entered {
            self.inner.notifier.refresh(&record).await;
        }

        Ok(outcome)
    }

    /// Settles a giveaway: stops its timers, draws winners, freezes the
    /// record and announces the result.
    ///
    /// Idempotent by design - the expiry timer and a manual end race on the
    /// same record, and whichever fires second must be harmless. A missing
    /// or already-ended record is a no-op success.
    ///
    /// # Returns
    /// - `Ok(true)` - This call performed the settlement
    /// - `Ok(false)` - Nothing to do; the record was missing or already ended
    pub async fn settle(&self, id: &str, reason: EndReason) -> Result<bool, AppError> {
        self.inner.timers.remove(id);

        let id_owned = id.to_string();
        let outcome = self
            .inner
            .store
            .update(move |records| {
                let record = records.get_mut(&id_owned)?;
                if record.ended {
                    return None;
                }

                record.ended = true;
                record.end_reason = Some(reason);
                record.ended_at = Some(Utc::now().timestamp_millis());

                let pool = record.candidate_pool();
                record.winner_ids = draw::sample(
                    &mut rand::rng(),
                    &pool,
                    record.winner_count as usize,
                );

                Some((record.clone(), pool.len()))
            })
            .await?;

        let Some((record, participant_count)) = outcome else {
            return Ok(false);
        };

        info!(
            "Settled giveaway {} (reason: {reason}, {participant_count} participants, {} winners)",
            record.id,
            record.winner_ids.len()
        );
        self.inner.notifier.finalize(&record, participant_count).await;

        Ok(true)
    }

    /// Cancels a still-running giveaway, deleting its record entirely.
    ///
    /// This is the one operation that removes a record instead of marking it
    /// terminal; a settled giveaway cannot be cancelled.
    pub async fn cancel(&self, id: &str) -> Result<(), AppError> {
        self.inner.timers.remove(id);

        let id_owned = id.to_string();
        let record = self
            .inner
            .store
            .update(move |records| match records.get(&id_owned) {
                None => Err(GiveawayError::NotFound(id_owned.clone())),
                Some(record) if record.ended => Err(GiveawayError::AlreadyEnded(id_owned.clone())),
                Some(_) => records
                    .remove(&id_owned)
                    .ok_or(GiveawayError::NotFound(id_owned.clone())),
            })
            .await??;

        info!("Cancelled giveaway {}", record.id);
        self.inner.notifier.cancelled(&record).await;

        Ok(())
    }

    /// Draws fresh winners for a settled giveaway.
    ///
    /// Prefers the pool of participants who have never been announced as
    /// winners (original draw or any prior reroll); if everyone has already
    /// won, falls back to the full participant set. Appends an audit entry
    /// and leaves `winner_ids` untouched.
    pub async fn reroll(&self, id: &str, actor_id: u64, count: i64) -> Result<Vec<u64>, AppError> {
        let count = count.clamp(1, MAX_WINNERS as i64) as usize;

        let id_owned = id.to_string();
        let (record, winners) = self
            .inner
            .store
            .update(move |records| {
                let record = match records.get_mut(&id_owned) {
                    None => return Err(GiveawayError::NotFound(id_owned.clone())),
                    Some(record) => record,
                };
                if !record.ended {
                    return Err(GiveawayError::NotYetEnded(id_owned.clone()));
                }
                let participants = record.candidate_pool();
                if participants.is_empty() {
                    return Err(GiveawayError::NoParticipants(id_owned.clone()));
                }

                let previous = record.announced_winners();
                let fresh: Vec<u64> = participants
                    .iter()
                    .copied()
                    .filter(|user| !previous.contains(user))
                    .collect();
                let pool = if fresh.is_empty() { participants } else { fresh };

                let winners = draw::sample(&mut rand::rng(), &pool, count);
                record.rerolls.push(RerollEntry {
                    at: Utc::now().timestamp_millis(),
                    by: actor_id,
                    winners: winners.clone(),
                });

                Ok((record.clone(), winners))
            })
            .await??;

        info!(
            "Rerolled giveaway {} ({} new winners)",
            record.id,
            winners.len()
        );
        self.inner.notifier.announce_reroll(&record, &winners).await;

        Ok(winners)
    }

    /// Restart recovery: re-establishes timers for every non-ended record.
    ///
    /// Records whose `end_at` is already in the past get their expiry fired
    /// immediately, producing a late settlement with `EndReason::Time`. No
    /// giveaway is ever lost or left unsettled by a restart.
    pub async fn restore(&self) -> Result<usize, AppError> {
        let records = self.inner.store.load().await?;
        let mut rescheduled = 0;
        for record in records.values().filter(|record| !record.ended) {
            giveaway_timers::schedule(self.clone(), record);
            rescheduled += 1;
        }
        info!("Restored timers for {rescheduled} running giveaways");
        Ok(rescheduled)
    }

    /// Looks up a giveaway by the message displaying it, the id staff
    /// commands address it by.
    pub async fn find_by_message(
        &self,
        guild_id: u64,
        message_id: u64,
    ) -> Result<GiveawayRecord, AppError> {
        self.inner
            .store
            .find_by_message(guild_id, message_id)
            .await?
            .ok_or_else(|| GiveawayError::NotFound(format!("message {message_id}")).into())
    }
}

/// Allocates a giveaway id: creation instant in base36 plus a short random
/// suffix. Opaque, unique enough for a per-guild bot, and stable for the
/// record's lifetime.
fn new_giveaway_id(now_ms: i64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut id = String::new();
    let mut rest = now_ms.unsigned_abs();
    while rest > 0 {
        id.insert(0, ALPHABET[(rest % 36) as usize] as char);
        rest /= 36;
    }

    let mut rng = rand::rng();
    for _ in 0..5 {
        id.push(ALPHABET[rng.random_range(0..ALPHABET.len())] as char);
    }
    id
}
