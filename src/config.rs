use std::path::PathBuf;

use crate::error::{AppError, ConfigError};

const DEFAULT_DATA_PATH: &str = "giveaways.json";

pub struct Config {
    pub discord_bot_token: String,
    /// Guild the slash commands are registered in.
    pub guild_id: u64,
    /// Flat-file giveaway store location.
    pub data_path: PathBuf,
    /// Role allowed to manage giveaways, in addition to Manage Guild.
    pub staff_role_id: Option<u64>,
    /// Channel receiving giveaway lifecycle log embeds.
    pub log_channel_id: Option<u64>,
    /// Image attached to the winner announcement embed.
    pub winner_gif_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            guild_id: required_u64("GUILD_ID")?,
            data_path: std::env::var("GIVEAWAY_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH)),
            staff_role_id: optional_u64("STAFF_ROLE_ID")?,
            log_channel_id: optional_u64("LOG_CHANNEL_ID")?,
            winner_gif_url: std::env::var("WINNER_GIF_URL").ok(),
        })
    }
}

fn required_u64(name: &str) -> Result<u64, AppError> {
    let value =
        std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
    parse_env_u64(name, &value)
}

fn optional_u64(name: &str) -> Result<Option<u64>, AppError> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(parse_env_u64(name, &value)?)),
        Err(_) => Ok(None),
    }
}

fn parse_env_u64(name: &str, value: &str) -> Result<u64, AppError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| {
            ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value: value.to_string(),
            }
            .into()
        })
}
