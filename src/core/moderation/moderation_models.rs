// Moderation domain models - data structures for the link filter.
//
// These are pure domain types with no Discord dependencies.
// The Discord layer builds `MessageEvent`s from gateway messages and turns
// `AuditEvent`s into embeds.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// How long the warning reply stays up before it removes itself.
pub const WARNING_LIFETIME: Duration = Duration::from_secs(5);

/// Snapshot of an incoming message, consumed once by the filter.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub message_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub author_name: String,
    /// Platform-formatted mention of the author, used in the warning.
    pub author_mention: String,
    pub content: String,
    /// Set when the bot itself wrote the message.
    pub is_own: bool,
}

/// The first link in a message whose host is blacklisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    pub domain: String,
    /// The link as found in the message, with `http://` added if it had no scheme.
    pub url: String,
}

/// A record mirrored to the audit channel.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditEvent {
    LinkRemoved {
        author_id: u64,
        author_name: String,
        channel_id: u64,
        domain: String,
        url: String,
        content: String,
        at: DateTime<Utc>,
    },
    CommandUsed {
        operator_id: u64,
        operator_name: String,
        command: String,
        details: String,
        at: DateTime<Utc>,
    },
}

impl AuditEvent {
    pub fn link_removed(message: &MessageEvent, link: &LinkMatch) -> Self {
        AuditEvent::LinkRemoved {
            author_id: message.author_id,
            author_name: message.author_name.clone(),
            channel_id: message.channel_id,
            domain: link.domain.clone(),
            url: link.url.clone(),
            content: message.content.clone(),
            at: Utc::now(),
        }
    }

    pub fn command_used(
        operator_id: u64,
        operator_name: impl Into<String>,
        command: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        AuditEvent::CommandUsed {
            operator_id,
            operator_name: operator_name.into(),
            command: command.into(),
            details: details.into(),
            at: Utc::now(),
        }
    }
}

/// What happened to an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStatus {
    /// Auditing is off or has no destination.
    Inactive,
    Delivered,
    /// The configured channel could not be resolved.
    ChannelUnavailable,
    /// The channel resolved but the send failed.
    Failed,
}

/// Result of each step of a moderation action. Steps fail independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub deleted: bool,
    /// Id of the warning reply, if it was sent.
    pub warning_id: Option<u64>,
    pub audit: AuditStatus,
}

/// Final state of one message passing through the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationOutcome {
    /// The bot's own message; never scanned.
    Ignored,
    /// No blacklisted link.
    Clean,
    Flagged {
        link: LinkMatch,
        report: ActionReport,
    },
}
