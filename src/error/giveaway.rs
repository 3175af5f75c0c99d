use thiserror::Error;

/// Giveaway domain errors.
///
/// These are state-precondition and input-validation failures. They are
/// user-correctable and reported inline; none of them is fatal to the bot.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GiveawayError {
    /// User-supplied creation input failed validation (title, prize,
    /// duration format, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No giveaway exists with the given id.
    #[error("No giveaway found for '{0}'")]
    NotFound(String),

    /// The operation requires a still-running giveaway, but this one has
    /// already been settled.
    #[error("Giveaway '{0}' has already ended")]
    AlreadyEnded(String),

    /// Reroll requires a settled giveaway; this one is still running.
    #[error("Giveaway '{0}' has not ended yet")]
    NotYetEnded(String),

    /// Reroll on a giveaway nobody entered.
    #[error("Giveaway '{0}' has no participants")]
    NoParticipants(String),
}
