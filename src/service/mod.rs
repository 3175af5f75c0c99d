//! Business logic for the giveaway lifecycle.
//!
//! - `giveaway` - create/join/settle/cancel/reroll state machine
//! - `draw` - uniform winner sampling
//! - `notify` - display and announcement adapter (Discord or test stub)

pub mod draw;
pub mod giveaway;
pub mod notify;

pub use giveaway::{CreateGiveaway, GiveawayService, JoinOutcome};
