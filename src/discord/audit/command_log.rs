// Mirrors admin command usage to the audit channel.

use crate::core::moderation::{AuditEvent, AuditStatus};
use crate::discord::moderation::SerenityGateway;
use crate::discord::Context;
use std::sync::Arc;

/// Record that the invoking operator ran `command`. Failures only reach the local log.
pub async fn log_command(ctx: Context<'_>, command: &str, details: impl Into<String>) {
    let author = ctx.author();
    let event = AuditEvent::command_used(author.id.get(), author.name.clone(), command, details);
    let gateway = SerenityGateway::new(Arc::clone(&ctx.serenity_context().http));

    match ctx.data().moderation.emit_audit(&gateway, event).await {
        Ok(AuditStatus::Delivered) | Ok(AuditStatus::Inactive) => {}
        Ok(status) => tracing::debug!(command, ?status, "Command audit not delivered"),
        Err(e) => tracing::warn!(command, "Failed to read audit settings: {}", e),
    }
}
