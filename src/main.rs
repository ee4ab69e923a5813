// This is the entry point of the link censor bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic): link scanning, settings
// - `infra/` = Implementations of core traits and environment loading
// - `discord/` = Discord-specific adapters (commands, events, gateway)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::moderation::ModerationService;
use crate::core::settings::{OperatorGate, SettingsService};
use crate::discord::commands::prefix_dispatch::{self, ScreenedMessages};
use crate::discord::commands::{access, presence};
use crate::discord::{Data, Error};
use crate::infra::env_config::EnvConfig;
use crate::infra::settings::InMemorySettingsStore;
use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Event handler for non-command Discord events.
///
/// Every new message goes through the link filter first and only then through
/// `!` command dispatch, so a command can't change the blacklist that its own
/// message is judged against.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Message { new_message } = event {
        discord::moderation::handle_new_message(ctx, framework.bot_id, new_message, data).await;
        prefix_dispatch::dispatch_screened(ctx, framework, new_message, data).await;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EnvConfig::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let settings_store = InMemorySettingsStore::new(config.initial_settings());
    let settings_service = Arc::new(SettingsService::new(settings_store));
    let moderation_service = Arc::new(ModerationService::new(Arc::clone(&settings_service)));

    let data = Data {
        settings: Arc::clone(&settings_service),
        moderation: Arc::clone(&moderation_service),
        operator: OperatorGate::new(config.operator_id),
        screened: ScreenedMessages::new(),
    };

    tracing::info!(
        domains = config.blacklist.len(),
        audit_channel = ?config.audit_channel_id,
        operator_restricted = config.operator_id.is_some(),
        "Configuration loaded"
    );

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands::all(),
            // The `!` prefix only matches once the event handler has screened
            // the message; see `prefix_dispatch`.
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: None,
                stripped_dynamic_prefix: Some(prefix_dispatch::screened_prefix),
                mention_as_prefix: false,
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(access::on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                presence::on_ready(ctx);

                tracing::info!(
                    version = discord::commands::status::BOT_VERSION,
                    "Logged in as {}",
                    ready.user.name
                );
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    client.start().await.context("Error running bot")?;
    Ok(())
}
