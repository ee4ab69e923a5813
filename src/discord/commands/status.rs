use crate::core::settings::ModerationSettings;
use crate::discord::audit::command_log::log_command;
use crate::discord::commands::access::reply_private;
use crate::discord::{Context, Error};

pub const BOT_VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "/adddomain [domain]: Add a new domain to the blacklist.\n\
    /removedomain [domain]: Remove a domain from the blacklist.\n\
    /listdomains: List all blacklisted domains.\n\
    /setwarning [message]: Update the warning message.\n\
    /setlogchannel [channel]: Set the channel for logging actions.\n\
    /togglelogging: Toggle logging on or off.\n\
    /status: Show current configuration and status.\n\
    /help: Display this help message.";

/// Show the current bot configuration and status.
#[poise::command(slash_command, prefix_command)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    let settings = ctx.data().settings.snapshot().await?;
    let text = status_text(&settings);

    reply_private(ctx, text.clone()).await?;
    log_command(ctx, "status", text).await;
    Ok(())
}

/// Display available commands.
#[poise::command(slash_command, prefix_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let mut text = HELP_TEXT.to_string();
    if let Some(operator_id) = ctx.data().operator.operator_id() {
        text.push_str(&format!(
            "\n\nConfiguration changes are restricted to <@{}>.",
            operator_id
        ));
    }

    reply_private(ctx, text).await?;
    log_command(ctx, "help", "Displayed help information.").await;
    Ok(())
}

pub fn status_text(settings: &ModerationSettings) -> String {
    let mut text = format!(
        "Bot Version: {}\n\
         Blacklisted domains: {}\n\
         Warning message: {}\n\
         Logging: {}",
        BOT_VERSION,
        settings.blacklist.join(", "),
        settings.warning_message,
        if settings.audit.enabled {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    if let Some(channel_id) = settings.audit.channel_id {
        text.push_str(&format!(" (Log channel ID: {})", channel_id));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::AuditConfig;

    #[test]
    fn test_status_text_without_channel() {
        let text = status_text(&ModerationSettings::default());

        assert!(text.starts_with(&format!("Bot Version: {}", BOT_VERSION)));
        assert!(text.contains("Blacklisted domains: x.com, twitter.com"));
        assert!(text.ends_with("Logging: Disabled"));
    }

    #[test]
    fn test_status_text_with_channel() {
        let settings = ModerationSettings::new(["x.com"], "Stop.", AuditConfig::from_channel(Some(55)));
        let text = status_text(&settings);

        assert!(text.contains("Warning message: Stop."));
        assert!(text.ends_with("Logging: Enabled (Log channel ID: 55)"));
    }
}
