mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod util;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::data::GiveawayStore;
use crate::error::AppError;
use crate::service::notify::DiscordNotifier;
use crate::service::GiveawayService;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = bot::start::build_http(&config);
    let notifier = Arc::new(DiscordNotifier::new(
        http,
        config.log_channel_id,
        config.winner_gif_url.clone(),
    ));
    let store = GiveawayStore::new(config.data_path.clone());
    let service = GiveawayService::new(store, notifier);

    info!(
        "Giveaway store at {}, guild {}",
        config.data_path.display(),
        config.guild_id
    );

    // Timer recovery happens in the ready handler, once the gateway is up.
    let client = bot::start::init_bot(&config, service).await?;
    bot::start::start_bot(client).await?;

    Ok(())
}
