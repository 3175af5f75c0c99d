use std::sync::Arc;

use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    Member, ResolvedOption, ResolvedValue, RoleId,
};
use tracing::warn;

use crate::config::Config;
use crate::error::{AppError, GiveawayError};
use crate::model::giveaway::EndReason;
use crate::service::{CreateGiveaway, GiveawayService};
use crate::util::parse::parse_u64_from_string;

/// Dispatches a slash command to the matching giveaway operation. Domain
/// errors come back as inline ephemeral replies.
pub async fn handle_command(
    service: &GiveawayService,
    config: &Arc<Config>,
    ctx: Context,
    command: CommandInteraction,
) {
    let Some(guild_id) = command.guild_id.map(|id| id.get()) else {
        return; // giveaways are guild-only
    };

    if !is_staff(command.member.as_deref(), config.staff_role_id) {
        reply(&ctx, &command, "Only staff can manage giveaways.").await;
        return;
    }

    let result = match command.data.name.as_str() {
        "giveaway" => create(service, &ctx, &command, guild_id).await,
        "gwend" => end(service, &ctx, &command, guild_id).await,
        "gwcancel" => cancel(service, &ctx, &command, guild_id).await,
        "gwreroll" => reroll(service, &ctx, &command, guild_id).await,
        _ => return,
    };

    if let Err(err) = result {
        reply(&ctx, &command, &err.user_message()).await;
    }
}

async fn create(
    service: &GiveawayService,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
) -> Result<(), AppError> {
    let options = command.data.options();
    let record = service
        .create(CreateGiveaway {
            guild_id,
            channel_id: channel_option(&options, "channel").unwrap_or(command.channel_id.get()),
            created_by: command.user.id.get(),
            title: str_option(&options, "title").unwrap_or_default().to_string(),
            prize: str_option(&options, "prize").unwrap_or_default().to_string(),
            description: str_option(&options, "description").map(str::to_string),
            duration: str_option(&options, "duration")
                .unwrap_or_default()
                .to_string(),
            winner_count: int_option(&options, "winners").unwrap_or(1),
        })
        .await?;

    reply(
        ctx,
        command,
        &format!(
            "Giveaway created in <#{}>. Message id: `{}`",
            record.channel_id, record.message_id
        ),
    )
    .await;
    Ok(())
}

async fn end(
    service: &GiveawayService,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
) -> Result<(), AppError> {
    let record = find_target(service, command, guild_id).await?;
    let content = if service.settle(&record.id, EndReason::Manual).await? {
        "Giveaway ended, winners drawn.".to_string()
    } else {
        AppError::from(GiveawayError::AlreadyEnded(record.id)).user_message()
    };
    reply(ctx, command, &content).await;
    Ok(())
}

async fn cancel(
    service: &GiveawayService,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
) -> Result<(), AppError> {
    let record = find_target(service, command, guild_id).await?;
    service.cancel(&record.id).await?;
    reply(ctx, command, "Giveaway cancelled and removed.").await;
    Ok(())
}

async fn reroll(
    service: &GiveawayService,
    ctx: &Context,
    command: &CommandInteraction,
    guild_id: u64,
) -> Result<(), AppError> {
    let record = find_target(service, command, guild_id).await?;
    let count = int_option(&command.data.options(), "count").unwrap_or(1);
    service
        .reroll(&record.id, command.user.id.get(), count)
        .await?;
    reply(ctx, command, "Reroll done, new winners announced.").await;
    Ok(())
}

/// Resolves the `message_id` option to a giveaway record.
async fn find_target(
    service: &GiveawayService,
    command: &CommandInteraction,
    guild_id: u64,
) -> Result<crate::model::giveaway::GiveawayRecord, AppError> {
    let options = command.data.options();
    let raw = str_option(&options, "message_id").unwrap_or_default();
    let message_id = parse_u64_from_string(raw)?;
    service.find_by_message(guild_id, message_id).await
}

/// Staff means the configured staff role or the Manage Guild permission.
pub fn is_staff(member: Option<&Member>, staff_role_id: Option<u64>) -> bool {
    let Some(member) = member else {
        return false;
    };
    if let Some(role_id) = staff_role_id {
        if member.roles.contains(&RoleId::new(role_id)) {
            return true;
        }
    }
    member
        .permissions
        .map(|permissions| permissions.manage_guild())
        .unwrap_or(false)
}

async fn reply(ctx: &Context, command: &CommandInteraction, content: &str) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );
    if let Err(err) = command.create_response(&ctx.http, response).await {
        warn!("Failed to reply to command interaction: {err}");
    }
}

fn str_option<'a>(options: &'a [ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    options.iter().find(|o| o.name == name).and_then(|o| match &o.value {
        ResolvedValue::String(value) => Some(*value),
        _ => None,
    })
}

fn int_option(options: &[ResolvedOption<'_>], name: &str) -> Option<i64> {
    options.iter().find(|o| o.name == name).and_then(|o| match &o.value {
        ResolvedValue::Integer(value) => Some(*value),
        _ => None,
    })
}

fn channel_option(options: &[ResolvedOption<'_>], name: &str) -> Option<u64> {
    options.iter().find(|o| o.name == name).and_then(|o| match &o.value {
        ResolvedValue::Channel(channel) => Some(channel.id.get()),
        _ => None,
    })
}
