use std::sync::Arc;

use serenity::all::{ActivityData, Context, GuildId, Ready};
use tracing::{error, info};

use crate::bot::commands;
use crate::config::Config;
use crate::service::GiveawayService;

/// Handles the ready event: registers the guild slash commands and rebuilds
/// giveaway timers from the store.
///
/// Timer recovery runs here rather than in `main` so that display updates
/// for late settlements go out after the gateway session is up.
pub async fn handle_ready(
    service: &GiveawayService,
    config: &Arc<Config>,
    ctx: Context,
    ready: Ready,
) {
    info!("{} is connected to Discord", ready.user.name);
    ctx.set_activity(Some(ActivityData::watching("the giveaways")));

    if let Err(e) = GuildId::new(config.guild_id)
        .set_commands(&ctx.http, commands::commands())
        .await
    {
        error!("Failed to register slash commands: {e}");
    }

    if let Err(e) = service.restore().await {
        error!("Failed to restore giveaway timers: {e}");
    }
}
