//! Giveaway domain model.
//!
//! A `GiveawayRecord` is the sole persisted entity of the giveaway subsystem.
//! Records are serialized in camelCase so the store file stays compatible
//! with the layout the bot has always written.

use serde::{Deserialize, Serialize};

/// Why a giveaway stopped running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// The expiry timer fired at (or after) `end_at`.
    Time,
    /// A staff member ended it early.
    Manual,
    /// Cancelled by staff. Cancellation deletes the record from the store,
    /// so this reason is only ever observed in transient log output.
    Cancelled,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndReason::Time => write!(f, "time"),
            EndReason::Manual => write!(f, "manual"),
            EndReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One post-settlement re-draw.
///
/// Rerolls are append-only audit entries; they never modify the original
/// `winner_ids` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RerollEntry {
    /// When the reroll happened, in ms since epoch.
    pub at: i64,
    /// The staff member who requested it.
    pub by: u64,
    /// The freshly drawn winners.
    pub winners: Vec<u64>,
}

/// A single giveaway, from creation through settlement and rerolls.
///
/// Lifecycle: created as active (`ended == false`) with empty participants,
/// mutated by joins, frozen by settlement (`ended` flips to true exactly
/// once and never reverts), optionally extended by reroll audit entries.
/// Cancellation removes the record entirely instead of marking it terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiveawayRecord {
    /// Opaque unique id, allocated at creation.
    pub id: String,
    pub guild_id: u64,
    /// Channel the giveaway message lives in. Set once, at creation.
    pub channel_id: u64,
    /// The giveaway display message. Set once, at creation.
    pub message_id: u64,
    pub title: String,
    pub prize: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How many winners to draw at settlement. Clamped to `1..=20`.
    pub winner_count: u32,
    /// Creation instant, ms since epoch.
    pub created_at: i64,
    /// Expiry instant, ms since epoch. Always greater than `created_at`.
    pub end_at: i64,
    pub created_by: u64,
    /// Entrants in join order. Deduplicated on entry; order carries no
    /// meaning for the draw.
    #[serde(default)]
    pub participants: Vec<u64>,
    /// False until settlement; once true, never reverts.
    #[serde(default)]
    pub ended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<EndReason>,
    /// Settlement instant, ms since epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<i64>,
    /// Winners drawn at settlement. A subset of `participants`; empty when
    /// nobody entered.
    #[serde(default)]
    pub winner_ids: Vec<u64>,
    /// Append-only audit of post-settlement re-draws.
    #[serde(default)]
    pub rerolls: Vec<RerollEntry>,
}

impl GiveawayRecord {
    /// Participants with duplicates removed, preserving join order.
    ///
    /// Joins are already idempotent, but the draw must not depend on that:
    /// a hand-edited or pre-fix store file may contain duplicates.
    pub fn candidate_pool(&self) -> Vec<u64> {
        let mut seen = std::collections::HashSet::new();
        self.participants
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Every user announced as a winner so far, across the original draw and
    /// all rerolls.
    pub fn announced_winners(&self) -> std::collections::HashSet<u64> {
        self.winner_ids
            .iter()
            .chain(self.rerolls.iter().flat_map(|r| r.winners.iter()))
            .copied()
            .collect()
    }
}
