use std::sync::Arc;

use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use tracing::warn;

use crate::config::Config;
use crate::error::{AppError, GiveawayError};
use crate::model::giveaway::EndReason;
use crate::service::{GiveawayService, JoinOutcome};

use super::command::is_staff;

/// Handles the buttons on a giveaway message: `gw_join:<id>` for entering
/// and `gw_end:<id>` for a staff-triggered early settlement.
pub async fn handle_component(
    service: &GiveawayService,
    config: &Arc<Config>,
    ctx: Context,
    component: ComponentInteraction,
) {
    let custom_id = component.data.custom_id.clone();

    if let Some(giveaway_id) = custom_id.strip_prefix("gw_join:") {
        let content = match service.join(giveaway_id, component.user.id.get()).await {
            Ok(JoinOutcome::Entered) => "You're in, good luck!".to_string(),
            Ok(JoinOutcome::AlreadyEntered) => "You're already entered!".to_string(),
            Err(err) => err.user_message(),
        };
        reply(&ctx, &component, &content).await;
        return;
    }

    if let Some(giveaway_id) = custom_id.strip_prefix("gw_end:") {
        if !is_staff(component.member.as_ref(), config.staff_role_id) {
            reply(&ctx, &component, "Only staff can end a giveaway.").await;
            return;
        }
        let content = match service.settle(giveaway_id, EndReason::Manual).await {
            Ok(true) => "Ending the giveaway...".to_string(),
            Ok(false) => {
                AppError::from(GiveawayError::AlreadyEnded(giveaway_id.to_string())).user_message()
            }
            Err(err) => err.user_message(),
        };
        reply(&ctx, &component, &content).await;
    }
}

async fn reply(ctx: &Context, component: &ComponentInteraction, content: &str) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );
    if let Err(err) = component.create_response(&ctx.http, response).await {
        warn!("Failed to reply to component interaction: {err}");
    }
}
