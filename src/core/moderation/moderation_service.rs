// Link filter service - core business logic for blacklisted links.
//
// This service handles:
// - Scanning a message for the first blacklisted link
// - Deleting the message and posting a short-lived warning
// - Mirroring moderation and admin actions to the audit channel
//
// NO Discord dependencies here. Platform calls go through `ModerationGateway`.

use super::link_scanner::{extract_links, normalize_domain, qualify_link};
use super::moderation_models::{
    ActionReport, AuditEvent, AuditStatus, LinkMatch, MessageEvent, ModerationOutcome,
    WARNING_LIFETIME,
};
use crate::core::settings::{
    AuditConfig, ModerationSettings, SettingsError, SettingsService, SettingsStore,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

// ============================================================================
// PLATFORM TRAIT (PORT)
// ============================================================================

/// The platform operations a moderation action needs.
#[async_trait]
pub trait ModerationGateway: Send + Sync {
    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), GatewayError>;

    /// Post a plain text message. Returns the new message id.
    async fn send_message(&self, channel_id: u64, content: &str) -> Result<u64, GatewayError>;

    /// Delete a message after `delay`. Detached; failures are not reported.
    fn schedule_delete(&self, channel_id: u64, message_id: u64, delay: Duration);

    /// Whether the channel can be resolved.
    async fn channel_exists(&self, channel_id: u64) -> bool;

    async fn send_audit(&self, channel_id: u64, event: &AuditEvent) -> Result<(), GatewayError>;
}

// ============================================================================
// SCANNING
// ============================================================================

/// Find the first link in `content` whose host is on the blacklist.
///
/// Scanning stops at the first hit; later links are never checked.
pub fn find_blacklisted_link(content: &str, settings: &ModerationSettings) -> Option<LinkMatch> {
    if settings.blacklist.is_empty() {
        return None;
    }

    for candidate in extract_links(content) {
        let Some(domain) = normalize_domain(candidate) else {
            continue;
        };

        if settings.is_blacklisted(&domain) {
            return Some(LinkMatch {
                domain,
                url: qualify_link(candidate).into_owned(),
            });
        }
    }

    None
}

/// Warning reply: mention, configured text, then the offending link.
pub fn warning_text(author_mention: &str, warning_message: &str, url: &str) -> String {
    format!("{} {}\n{}", author_mention, warning_message, url)
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct ModerationService<S: SettingsStore> {
    settings: Arc<SettingsService<S>>,
}

impl<S: SettingsStore> ModerationService<S> {
    pub fn new(settings: Arc<SettingsService<S>>) -> Self {
        Self { settings }
    }

    /// Run one message through the filter, acting on the first blacklisted link.
    ///
    /// Settings are read once, so a concurrent edit can't change the
    /// blacklist halfway through a message.
    pub async fn handle_message<G: ModerationGateway>(
        &self,
        gateway: &G,
        message: &MessageEvent,
    ) -> Result<ModerationOutcome, SettingsError> {
        if message.is_own {
            return Ok(ModerationOutcome::Ignored);
        }

        let settings = self.settings.snapshot().await?;

        let Some(link) = find_blacklisted_link(&message.content, &settings) else {
            return Ok(ModerationOutcome::Clean);
        };

        tracing::info!(
            author_id = message.author_id,
            channel_id = message.channel_id,
            domain = %link.domain,
            "Blacklisted link detected"
        );

        let report = self.act(gateway, message, &link, &settings).await;
        Ok(ModerationOutcome::Flagged { link, report })
    }

    /// Delete, warn, then audit. Each step runs even if an earlier one failed.
    async fn act<G: ModerationGateway>(
        &self,
        gateway: &G,
        message: &MessageEvent,
        link: &LinkMatch,
        settings: &ModerationSettings,
    ) -> ActionReport {
        let deleted = match gateway
            .delete_message(message.channel_id, message.message_id)
            .await
        {
            Ok(()) => true,
            Err(GatewayError::PermissionDenied(e)) => {
                tracing::warn!(
                    channel_id = message.channel_id,
                    "Bot lacks permission to delete messages: {}",
                    e
                );
                false
            }
            Err(e) => {
                tracing::warn!("Failed to delete message with blacklisted link: {}", e);
                false
            }
        };

        let text = warning_text(
            &message.author_mention,
            &settings.warning_message,
            &link.url,
        );
        let warning_id = match gateway.send_message(message.channel_id, &text).await {
            Ok(warning_id) => {
                gateway.schedule_delete(message.channel_id, warning_id, WARNING_LIFETIME);
                Some(warning_id)
            }
            Err(e) => {
                tracing::warn!(
                    channel_id = message.channel_id,
                    "Failed to send link warning: {}",
                    e
                );
                None
            }
        };

        let event = AuditEvent::link_removed(message, link);
        let audit = deliver_audit(gateway, &settings.audit, &event).await;

        ActionReport {
            deleted,
            warning_id,
            audit,
        }
    }

    /// Mirror an event to the audit channel using the current settings.
    pub async fn emit_audit<G: ModerationGateway>(
        &self,
        gateway: &G,
        event: AuditEvent,
    ) -> Result<AuditStatus, SettingsError> {
        let settings = self.settings.snapshot().await?;
        Ok(deliver_audit(gateway, &settings.audit, &event).await)
    }
}

async fn deliver_audit<G: ModerationGateway>(
    gateway: &G,
    audit: &AuditConfig,
    event: &AuditEvent,
) -> AuditStatus {
    let Some(channel_id) = audit.active_channel() else {
        return AuditStatus::Inactive;
    };

    if !gateway.channel_exists(channel_id).await {
        tracing::warn!(
            channel_id,
            record = %serde_json::to_string(event).unwrap_or_default(),
            "Log channel not found; audit record dropped"
        );
        return AuditStatus::ChannelUnavailable;
    }

    match gateway.send_audit(channel_id, event).await {
        Ok(()) => AuditStatus::Delivered,
        Err(e) => {
            tracing::warn!(channel_id, "Failed to send audit record: {}", e);
            AuditStatus::Failed
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
