use std::sync::Arc;

use serenity::all::{Context, EventHandler, Interaction, Ready};
use serenity::async_trait;

use crate::config::Config;
use crate::service::GiveawayService;

pub mod command;
pub mod component;
pub mod ready;

/// Discord bot event handler.
pub struct Handler {
    pub service: GiveawayService,
    pub config: Arc<Config>,
}

impl Handler {
    pub fn new(service: GiveawayService, config: Arc<Config>) -> Self {
        Self { service, config }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord.
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.service, &self.config, ctx, ready).await;
    }

    /// Called for every slash command, button press or modal submit.
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => {
                command::handle_command(&self.service, &self.config, ctx, command).await;
            }
            Interaction::Component(component) => {
                component::handle_component(&self.service, &self.config, ctx, component).await;
            }
            _ => {}
        }
    }
}
