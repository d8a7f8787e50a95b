//! Slash command registration and interaction translation.

use super::conversions::{actor_id, colour};
use super::{DiscordError, DiscordErrorKind, DiscordResult};
use crate::{AdminCommand, AdminInvocation, AdminReply};
use serenity::all::{
    Command, CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage, Http, Timestamp,
};
use std::time::Duration;
use warden_core::RoleId;

const ROLE_OPTION: &str = "role";

/// Slash commands registered at startup.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("ping").description(
            AdminCommand::Ping {
                latency: Duration::ZERO,
            }
            .description(),
        ),
        CreateCommand::new("setwhitelist")
            .description(AdminCommand::SetWhitelist(RoleId::new(0)).description())
            .add_option(
                CreateCommandOption::new(CommandOptionType::Role, ROLE_OPTION, "Role to whitelist")
                    .required(true),
            ),
        CreateCommand::new("viewconfig").description(AdminCommand::ViewConfig.description()),
    ]
}

/// Replace the bot's global slash commands with [`definitions`].
///
/// # Errors
///
/// Returns a registration error if Discord rejects the command set.
pub async fn register(http: &Http) -> DiscordResult<usize> {
    Command::set_global_commands(http, definitions())
        .await
        .map(|registered| registered.len())
        .map_err(|e| DiscordError::new(DiscordErrorKind::RegistrationFailed(e.to_string())))
}

/// Send `response` as the reply to `command`.
pub async fn respond(
    http: &Http,
    command: &CommandInteraction,
    response: CreateInteractionResponse,
) -> DiscordResult<()> {
    command.create_response(http, response).await?;
    Ok(())
}

/// Translate a slash command interaction into an admin invocation.
///
/// # Errors
///
/// Returns an error for unknown command names or a missing role option.
pub fn invocation(command: &CommandInteraction, latency: Duration) -> DiscordResult<AdminInvocation> {
    let admin_command = match command.data.name.as_str() {
        "ping" => AdminCommand::Ping { latency },
        "setwhitelist" => {
            let role = command
                .data
                .options
                .iter()
                .find(|option| option.name == ROLE_OPTION)
                .and_then(|option| option.value.as_role_id())
                .ok_or_else(|| {
                    DiscordError::new(DiscordErrorKind::InteractionFailed(
                        "setwhitelist requires a role".to_string(),
                    ))
                })?;
            AdminCommand::SetWhitelist(RoleId::new(role.get()))
        }
        "viewconfig" => AdminCommand::ViewConfig,
        other => {
            return Err(DiscordError::new(DiscordErrorKind::InteractionFailed(
                format!("Unknown command: {}", other),
            )));
        }
    };

    let is_admin = command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator());

    Ok(AdminInvocation::new(
        actor_id(command.user.id),
        is_admin,
        admin_command,
    ))
}

/// Interaction response for an admin reply.
pub fn response(reply: &AdminReply) -> CreateInteractionResponse {
    let mut message = CreateInteractionResponseMessage::new().ephemeral(*reply.ephemeral());

    if let Some(content) = reply.content() {
        message = message.content(content);
    }

    if let Some(panel) = reply.panel() {
        let embed = CreateEmbed::new()
            .title(panel.title())
            .colour(colour(*panel.severity()))
            .timestamp(Timestamp::now())
            .fields(
                panel
                    .fields()
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone(), false)),
            );
        message = message.embed(embed);
    }

    CreateInteractionResponse::Message(message)
}

/// Ephemeral reply for an interaction that could not be handled.
pub fn error_response(err: &DiscordError) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(format!("An error occurred: {}", err.kind()))
            .ephemeral(true),
    )
}
