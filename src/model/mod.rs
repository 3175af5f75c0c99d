//! Domain models persisted by and exchanged between the bot's layers.

pub mod giveaway;
