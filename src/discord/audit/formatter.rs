use crate::core::moderation::AuditEvent;
use poise::serenity_prelude::{self as serenity, CreateEmbed, CreateEmbedFooter};

const DESCRIPTION_LIMIT: usize = 4096;
const FIELD_LIMIT: usize = 1024;

pub fn format_audit_event(event: &AuditEvent) -> CreateEmbed {
    match event {
        AuditEvent::LinkRemoved {
            author_id,
            author_name,
            channel_id,
            domain,
            url,
            content,
            at,
        } => CreateEmbed::default()
            .title("Blacklisted Link Removed")
            .description(display_text(content, DESCRIPTION_LIMIT))
            .color(serenity::Color::from_rgb(255, 165, 0)) // Orange
            .field("Author", format!("{} (`{}`)", author_name, author_id), false)
            .field("Channel", format!("<#{}>", channel_id), true)
            .field("Domain", format!("`{}`", domain), true)
            .field("Link", display_text(url, FIELD_LIMIT), false)
            .footer(CreateEmbedFooter::new(format!("User ID: {}", author_id)))
            .timestamp(to_timestamp(at)),

        AuditEvent::CommandUsed {
            operator_id,
            operator_name,
            command,
            details,
            at,
        } => {
            let mut embed = CreateEmbed::default()
                .title("Command Used")
                .description(format!("{} used `/{}`", operator_name, command))
                .color(serenity::Color::BLURPLE)
                .footer(CreateEmbedFooter::new(format!("User ID: {}", operator_id)))
                .timestamp(to_timestamp(at));

            if !details.is_empty() {
                embed = embed.field("Details", display_text(details, FIELD_LIMIT), false);
            }
            embed
        }
    }
}

/// Placeholder for empty text, char-safe truncation for long text.
fn display_text(text: &str, limit: usize) -> String {
    if text.is_empty() {
        return "*No content*".to_string();
    }
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(limit - 1).collect();
    truncated.push('…');
    truncated
}

fn to_timestamp(at: &chrono::DateTime<chrono::Utc>) -> serenity::Timestamp {
    serenity::Timestamp::from_unix_timestamp(at.timestamp())
        .unwrap_or_else(|_| serenity::Timestamp::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_placeholder() {
        assert_eq!(display_text("", 10), "*No content*");
    }

    #[test]
    fn test_display_text_truncates_on_char_boundary() {
        let text = "é".repeat(20);
        let shown = display_text(&text, 10);
        assert_eq!(shown.chars().count(), 10);
        assert!(shown.ends_with('…'));
    }

    #[test]
    fn test_display_text_short_text_unchanged() {
        assert_eq!(display_text("hello", 10), "hello");
    }
}
