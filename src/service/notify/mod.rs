//! Giveaway display and announcement adapter.
//!
//! The giveaway lifecycle never talks to Discord directly; it goes through
//! the [`GiveawayNotifier`] trait. The production implementation renders
//! embeds and buttons over the bot's shared HTTP client; tests substitute a
//! recording stub. Apart from the initial publish, every call is
//! best-effort: a transient Discord failure must never roll back a state
//! transition that is already durable.

pub mod discord;

use serenity::async_trait;

use crate::error::AppError;
use crate::model::giveaway::GiveawayRecord;

pub use discord::DiscordNotifier;

#[async_trait]
pub trait GiveawayNotifier: Send + Sync {
    /// Posts the initial giveaway message and returns its message id.
    ///
    /// The record's `message_id` is not yet set when this is called. This is
    /// the only notifier call allowed to fail the surrounding operation: a
    /// giveaway without a display message cannot be joined.
    async fn publish(&self, record: &GiveawayRecord) -> Result<u64, AppError>;

    /// Re-renders the running giveaway message (progress bar, entry count).
    async fn refresh(&self, record: &GiveawayRecord);

    /// Replaces the giveaway message with its terminal form and announces
    /// the winners (or the fact that nobody entered).
    async fn finalize(&self, record: &GiveawayRecord, participant_count: usize);

    /// Replaces the giveaway message with a cancellation notice.
    async fn cancelled(&self, record: &GiveawayRecord);

    /// Announces the winners of a reroll in the giveaway channel.
    async fn announce_reroll(&self, record: &GiveawayRecord, winners: &[u64]);
}

#[cfg(test)]
pub mod test_support {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// What a [`RecordingNotifier`] saw, in call order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum NotifierCall {
        Publish(String),
        Refresh(String),
        Finalize(String, usize),
        Cancelled(String),
        Reroll(String, Vec<u64>),
    }

    /// Notifier stub that fabricates message ids and records every call.
    #[derive(Default)]
    pub struct RecordingNotifier {
        next_message_id: AtomicU64,
        pub calls: Mutex<Vec<NotifierCall>>,
    }

    impl RecordingNotifier {
        pub fn calls(&self) -> Vec<NotifierCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GiveawayNotifier for RecordingNotifier {
        async fn publish(&self, record: &GiveawayRecord) -> Result<u64, AppError> {
            self.calls
                .lock()
                .unwrap()
                .push(NotifierCall::Publish(record.id.clone()));
            Ok(1_000 + self.next_message_id.fetch_add(1, Ordering::SeqCst))
        }

        async fn refresh(&self, record: &GiveawayRecord) {
            self.calls
                .lock()
                .unwrap()
                .push(NotifierCall::Refresh(record.id.clone()));
        }

        async fn finalize(&self, record: &GiveawayRecord, participant_count: usize) {
            self.calls
                .lock()
                .unwrap()
                .push(NotifierCall::Finalize(record.id.clone(), participant_count));
        }

        async fn cancelled(&self, record: &GiveawayRecord) {
            self.calls
                .lock()
                .unwrap()
                .push(NotifierCall::Cancelled(record.id.clone()));
        }

        async fn announce_reroll(&self, record: &GiveawayRecord, winners: &[u64]) {
            self.calls
                .lock()
                .unwrap()
                .push(NotifierCall::Reroll(record.id.clone(), winners.to_vec()));
        }
    }
}
