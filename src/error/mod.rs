//! Error types for the bot.
//!
//! The `AppError` enum is the top-level error type, aggregating configuration
//! and infrastructure failures alongside the giveaway domain errors. Domain
//! errors (`GiveawayError`) are the ones surfaced to users as inline replies;
//! everything else is logged and answered with a generic failure message.

pub mod config;
pub mod giveaway;

use thiserror::Error;

pub use config::ConfigError;
pub use giveaway::GiveawayError;

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic conversion. `serenity::Error` is
/// boxed to keep the enum small.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Giveaway domain error, reported inline to the invoking user.
    #[error(transparent)]
    GiveawayErr(#[from] GiveawayError),

    /// Filesystem error while reading or writing the giveaway store.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Serialization error while writing the giveaway store.
    ///
    /// Only raised on the write path. An unparsable store file on the read
    /// path is treated as an empty store, not an error.
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// The message shown to the user who triggered the failing interaction.
    ///
    /// Domain errors carry user-correctable detail; infrastructure errors are
    /// collapsed into a generic message to avoid leaking internals.
    pub fn user_message(&self) -> String {
        match self {
            AppError::GiveawayErr(err) => err.to_string(),
            _ => "Something went wrong, please try again later.".to_string(),
        }
    }
}
