//! Slash command definitions.

use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, Permissions};

/// The guild command set, registered on every `ready`.
pub fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("giveaway")
            .description("Start a giveaway in a channel (staff only)")
            .default_member_permissions(Permissions::MANAGE_GUILD)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Channel to post the giveaway in",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "title", "Giveaway title")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "prize", "What is being won")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "duration",
                    "How long it runs, e.g. 30m, 2h, 1d",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "winners",
                    "Number of winners (1-20)",
                )
                .required(true),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "description",
                "Optional extra text shown on the giveaway",
            )),
        CreateCommand::new("gwend")
            .description("End a giveaway now and draw its winners (staff only)")
            .default_member_permissions(Permissions::MANAGE_GUILD)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message_id",
                    "Id of the giveaway message",
                )
                .required(true),
            ),
        CreateCommand::new("gwcancel")
            .description("Cancel a giveaway without drawing winners (staff only)")
            .default_member_permissions(Permissions::MANAGE_GUILD)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message_id",
                    "Id of the giveaway message",
                )
                .required(true),
            ),
        CreateCommand::new("gwreroll")
            .description("Draw new winners for an ended giveaway (staff only)")
            .default_member_permissions(Permissions::MANAGE_GUILD)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message_id",
                    "Id of the giveaway message",
                )
                .required(true),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::Integer,
                "count",
                "Number of winners to draw (default 1)",
            )),
    ]
}
