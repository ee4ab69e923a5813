use crate::core::settings::AuditToggle;
use crate::discord::audit::command_log::log_command;
use crate::discord::commands::access::{operator_only, reply_private};
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Set the logging channel for bot actions.
#[poise::command(slash_command, prefix_command, guild_only, check = "operator_only")]
pub async fn setlogchannel(
    ctx: Context<'_>,
    #[description = "Channel to log to"] channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let channel_id = channel.id.get();
    ctx.data().settings.set_audit_channel(channel_id).await?;

    reply_private(ctx, format!("Log channel set to <#{}>.", channel_id)).await?;
    log_command(ctx, "setlogchannel", format!("Log channel set to: <#{}>", channel_id)).await;
    Ok(())
}

/// Toggle logging on or off.
#[poise::command(slash_command, prefix_command, check = "operator_only")]
pub async fn togglelogging(ctx: Context<'_>) -> Result<(), Error> {
    let toggle = ctx.data().settings.toggle_audit().await?;

    reply_private(ctx, toggle_reply(toggle)).await?;
    log_command(ctx, "togglelogging", format!("Logging now: {}", toggle_state(toggle))).await;
    Ok(())
}

pub fn toggle_reply(toggle: AuditToggle) -> String {
    match toggle {
        AuditToggle::ChannelRequired => {
            "Please configure a logging channel first using `/setlogchannel #channel`.".to_string()
        }
        _ => format!("Logging has been {}.", toggle_state(toggle)),
    }
}

fn toggle_state(toggle: AuditToggle) -> &'static str {
    match toggle {
        AuditToggle::Enabled => "enabled",
        AuditToggle::Disabled | AuditToggle::ChannelRequired => "disabled",
    }
}
