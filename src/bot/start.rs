use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};
use serenity::http::Http;
use tracing::info;

use crate::bot::handler::Handler;
use crate::config::Config;
use crate::error::AppError;
use crate::service::GiveawayService;

/// Builds a standalone Discord HTTP client for the giveaway notifier.
///
/// Created before the gateway client so the service (which the event
/// handler needs) can be constructed first; both clients share the token.
pub fn build_http(config: &Config) -> Arc<Http> {
    Arc::new(Http::new(&config.discord_bot_token))
}

/// Creates the gateway client with the giveaway event handler attached.
pub async fn init_bot(
    config: &Arc<Config>,
    service: GiveawayService,
) -> Result<Client, AppError> {
    // The bot only needs guild structure events; joins arrive as
    // interactions, not messages.
    let intents = GatewayIntents::GUILDS;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(service, config.clone()))
        .await?;

    Ok(client)
}

/// Starts the Discord bot in a blocking manner.
///
/// Should be called from within a spawned task since it blocks until the
/// bot shuts down.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    info!("Starting Discord bot...");
    client.start().await?;
    Ok(())
}
