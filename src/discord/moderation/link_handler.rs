// Discord-specific link filtering - feeds gateway messages into the core
// filter and carries out its actions through serenity.

use crate::core::moderation::{
    AuditEvent, GatewayError, MessageEvent, ModerationGateway, ModerationOutcome,
};
use crate::discord::audit::formatter::format_audit_event;
use crate::discord::Data;
use async_trait::async_trait;
use poise::serenity_prelude::{self as serenity, Mentionable};
use std::sync::Arc;
use std::time::Duration;

/// `ModerationGateway` backed by the Discord REST API.
#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<serenity::Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ModerationGateway for SerenityGateway {
    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), GatewayError> {
        serenity::ChannelId::new(channel_id)
            .delete_message(&*self.http, serenity::MessageId::new(message_id))
            .await
            .map_err(classify_error)
    }

    async fn send_message(&self, channel_id: u64, content: &str) -> Result<u64, GatewayError> {
        serenity::ChannelId::new(channel_id)
            .say(&*self.http, content)
            .await
            .map(|message| message.id.get())
            .map_err(classify_error)
    }

    fn schedule_delete(&self, channel_id: u64, message_id: u64, delay: Duration) {
        let http = Arc::clone(&self.http);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = serenity::ChannelId::new(channel_id)
                .delete_message(&*http, serenity::MessageId::new(message_id))
                .await
            {
                tracing::debug!(channel_id, message_id, "Scheduled delete failed: {}", e);
            }
        });
    }

    async fn channel_exists(&self, channel_id: u64) -> bool {
        self.http
            .get_channel(serenity::ChannelId::new(channel_id))
            .await
            .is_ok()
    }

    async fn send_audit(&self, channel_id: u64, event: &AuditEvent) -> Result<(), GatewayError> {
        let embed = format_audit_event(event);
        serenity::ChannelId::new(channel_id)
            .send_message(&*self.http, serenity::CreateMessage::new().embed(embed))
            .await
            .map(|_| ())
            .map_err(classify_error)
    }
}

/// Map HTTP 403/404 onto the core's error kinds.
fn classify_error(err: serenity::Error) -> GatewayError {
    if let serenity::Error::Http(::serenity::http::HttpError::UnsuccessfulRequest(response)) = &err {
        match response.status_code.as_u16() {
            403 => return GatewayError::PermissionDenied(err.to_string()),
            404 => return GatewayError::NotFound(err.to_string()),
            _ => {}
        }
    }
    GatewayError::Transport(err.to_string())
}

/// Build the platform-neutral snapshot of a gateway message.
pub fn to_message_event(message: &serenity::Message, bot_id: serenity::UserId) -> MessageEvent {
    MessageEvent {
        message_id: message.id.get(),
        channel_id: message.channel_id.get(),
        author_id: message.author.id.get(),
        author_name: message.author.name.clone(),
        author_mention: message.author.mention().to_string(),
        content: message.content.clone(),
        is_own: message.author.id == bot_id,
    }
}

/// Run a new message through the link filter.
///
/// Never fails: problems are logged so the next event is still handled.
pub async fn handle_new_message(
    ctx: &serenity::Context,
    bot_id: serenity::UserId,
    message: &serenity::Message,
    data: &Data,
) {
    let event = to_message_event(message, bot_id);
    let gateway = SerenityGateway::new(Arc::clone(&ctx.http));

    match data.moderation.handle_message(&gateway, &event).await {
        Ok(ModerationOutcome::Flagged { link, report }) => {
            tracing::info!(
                message_id = event.message_id,
                domain = %link.domain,
                deleted = report.deleted,
                warned = report.warning_id.is_some(),
                audit = ?report.audit,
                "Moderated blacklisted link"
            );
        }
        Ok(_) => {}
        Err(e) => tracing::error!("Failed to check message for blacklisted links: {}", e),
    }
}
