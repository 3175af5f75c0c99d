//! Discord-backed giveaway notifier.
//!
//! Renders giveaway records as embeds with join/end buttons, edits them in
//! place on refresh and settlement, and posts winner announcements. Also
//! mirrors lifecycle events to the configured log channel, fire-and-forget.

use std::sync::Arc;

use chrono::Utc;
use serenity::all::{
    ButtonStyle, ChannelId, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateMessage, EditMessage, MessageId, Timestamp,
};
use serenity::async_trait;
use serenity::http::Http;
use tracing::warn;

use crate::error::AppError;
use crate::model::giveaway::GiveawayRecord;

use super::GiveawayNotifier;

const COLOR_RUNNING: u32 = 0x8b5cf6;
const COLOR_FINISHED: u32 = 0x22c55e;
const COLOR_LOG: u32 = 0x3b82f6;
const PROGRESS_BAR_WIDTH: usize = 12;

pub struct DiscordNotifier {
    http: Arc<Http>,
    /// Optional channel receiving created/ended/cancelled log embeds.
    log_channel_id: Option<u64>,
    /// Optional image attached to the winner announcement.
    winner_gif_url: Option<String>,
}

impl DiscordNotifier {
    pub fn new(
        http: Arc<Http>,
        log_channel_id: Option<u64>,
        winner_gif_url: Option<String>,
    ) -> Self {
        Self {
            http,
            log_channel_id,
            winner_gif_url,
        }
    }

    /// Posts a lifecycle event embed to the log channel, if one is
    /// configured. Failures are swallowed.
    async fn log_event(&self, title: &str, fields: Vec<(&str, String)>) {
        let Some(channel_id) = self.log_channel_id else {
            return;
        };

        let mut embed = CreateEmbed::new()
            .title(title.to_string())
            .colour(COLOR_LOG)
            .timestamp(Timestamp::now());
        for (name, value) in fields {
            embed = embed.field(name, value, false);
        }

        if let Err(err) = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await
        {
            warn!("Failed to send giveaway log event: {err}");
        }
    }

    async fn edit_giveaway_message(&self, record: &GiveawayRecord, edit: EditMessage) {
        if let Err(err) = ChannelId::new(record.channel_id)
            .edit_message(&self.http, MessageId::new(record.message_id), edit)
            .await
        {
            warn!("Failed to edit giveaway message for {}: {err}", record.id);
        }
    }
}

#[async_trait]
impl GiveawayNotifier for DiscordNotifier {
    async fn publish(&self, record: &GiveawayRecord) -> Result<u64, AppError> {
        let message = ChannelId::new(record.channel_id)
            .send_message(
                &self.http,
                CreateMessage::new()
                    .embed(running_embed(record))
                    .components(vec![action_row(record)]),
            )
            .await?;

        self.log_event(
            "Giveaway created",
            vec![
                ("Title", record.title.clone()),
                ("Prize", record.prize.clone()),
                ("Channel", format!("<#{}>", record.channel_id)),
                ("Ends", format!("<t:{}:F>", record.end_at / 1_000)),
            ],
        )
        .await;

        Ok(message.id.get())
    }

    async fn refresh(&self, record: &GiveawayRecord) {
        let edit = EditMessage::new()
            .embed(running_embed(record))
            .components(vec![action_row(record)]);
        self.edit_giveaway_message(record, edit).await;
    }

    async fn finalize(&self, record: &GiveawayRecord, participant_count: usize) {
        let edit = EditMessage::new()
            .embed(finished_embed(record, participant_count))
            .components(Vec::new());
        self.edit_giveaway_message(record, edit).await;

        let channel = ChannelId::new(record.channel_id);
        let announcement = if record.winner_ids.is_empty() {
            CreateMessage::new().content("Nobody entered the giveaway.")
        } else {
            let mut embed = CreateEmbed::new()
                .title("We have a winner!")
                .description(format!(
                    "Congratulations {}! You won **{}**.",
                    mention_list(&record.winner_ids),
                    record.prize
                ))
                .colour(COLOR_FINISHED)
                .footer(CreateEmbedFooter::new(format!(
                    "Giveaway: {}",
                    record.title
                )))
                .timestamp(Timestamp::now());
            if let Some(url) = &self.winner_gif_url {
                embed = embed.image(url.clone());
            }
            CreateMessage::new().embed(embed)
        };
        if let Err(err) = channel.send_message(&self.http, announcement).await {
            warn!("Failed to announce winners for {}: {err}", record.id);
        }

        self.log_event(
            "Giveaway ended",
            vec![
                ("Title", record.title.clone()),
                ("Prize", record.prize.clone()),
                ("Participants", participant_count.to_string()),
                ("Winners", winner_list(&record.winner_ids)),
            ],
        )
        .await;
    }

    async fn cancelled(&self, record: &GiveawayRecord) {
        let edit = EditMessage::new()
            .content("**Giveaway cancelled by staff.**")
            .embeds(Vec::new())
            .components(Vec::new());
        self.edit_giveaway_message(record, edit).await;

        self.log_event(
            "Giveaway cancelled",
            vec![
                ("Title", record.title.clone()),
                ("Prize", record.prize.clone()),
                ("Channel", format!("<#{}>", record.channel_id)),
            ],
        )
        .await;
    }

    async fn announce_reroll(&self, record: &GiveawayRecord, winners: &[u64]) {
        let content = format!(
            "**REROLL** — new winner(s) for **{}**: {}",
            record.prize,
            mention_list(winners)
        );
        if let Err(err) = ChannelId::new(record.channel_id)
            .send_message(&self.http, CreateMessage::new().content(content))
            .await
        {
            warn!("Failed to announce reroll for {}: {err}", record.id);
        }
    }
}

/// The embed shown while a giveaway is running.
fn running_embed(record: &GiveawayRecord) -> CreateEmbed {
    let description = record
        .description
        .as_deref()
        .map(|d| format!("{d}\n\n"))
        .unwrap_or_default();

    CreateEmbed::new()
        .title(format!("🎉 GIVEAWAY — {}", record.title))
        .description(format!(
            "{description}**Prize:** {}\n\
             **Winners:** {}\n\
             **Ends:** <t:{}:R>\n\
             **Progress:** {}\n\n\
             Hit **Join** to enter!\n\n_Auto-refreshes every 60s_",
            record.prize,
            record.winner_count,
            record.end_at / 1_000,
            progress_bar(
                record.created_at,
                record.end_at,
                Utc::now().timestamp_millis(),
                PROGRESS_BAR_WIDTH
            ),
        ))
        .colour(COLOR_RUNNING)
        .footer(CreateEmbedFooter::new(format!("ID: {}", record.id)))
        .timestamp(Timestamp::now())
}

/// The terminal embed that replaces the running one at settlement.
fn finished_embed(record: &GiveawayRecord, participant_count: usize) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("🏁 GIVEAWAY ended — {}", record.title))
        .description(format!(
            "**Prize:** {}\n**Participants:** {participant_count}\n**Winners:** {}",
            record.prize,
            winner_list(&record.winner_ids),
        ))
        .colour(COLOR_FINISHED)
        .footer(CreateEmbedFooter::new(format!("ID: {}", record.id)))
        .timestamp(Timestamp::now())
}

fn action_row(record: &GiveawayRecord) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(format!("gw_join:{}", record.id))
            .label(format!("Join ({})", record.participants.len()))
            .style(ButtonStyle::Success),
        CreateButton::new(format!("gw_end:{}", record.id))
            .label("End")
            .style(ButtonStyle::Danger),
    ])
}

fn mention_list(user_ids: &[u64]) -> String {
    user_ids
        .iter()
        .map(|id| format!("<@{id}>"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn winner_list(winner_ids: &[u64]) -> String {
    if winner_ids.is_empty() {
        "None (nobody entered)".to_string()
    } else {
        mention_list(winner_ids)
    }
}

/// Renders elapsed time as a fixed-width `▰▱` bar.
fn progress_bar(created_at: i64, end_at: i64, now: i64, width: usize) -> String {
    let total = (end_at - created_at).max(1);
    let done = (now - created_at).clamp(0, total) as f64;
    let total = total as f64;
    let filled = ((done / total * width as f64).round() as usize).min(width);
    format!("{}{}", "▰".repeat(filled), "▱".repeat(width - filled))
}
