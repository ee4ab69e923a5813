// Discord layer - commands, event handlers and the serenity-backed gateway.

use crate::core::moderation::ModerationService;
use crate::core::settings::{OperatorGate, SettingsService};
use crate::discord::commands::prefix_dispatch::ScreenedMessages;
use crate::infra::settings::InMemorySettingsStore;
use std::sync::Arc;

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "moderation/link_handler.rs"]
pub mod moderation;

#[path = "audit/mod.rs"]
pub mod audit;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Shared state handed to every command and event.
pub struct Data {
    pub settings: Arc<SettingsService<InMemorySettingsStore>>,
    pub moderation: Arc<ModerationService<InMemorySettingsStore>>,
    pub operator: OperatorGate,
    pub screened: ScreenedMessages,
}
