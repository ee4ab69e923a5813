// Startup configuration read from the environment (and `.env`, loaded in main).
//
// Only the token is mandatory. Anything malformed degrades to a safe default
// with a warning instead of stopping the bot.

use crate::core::settings::{
    AuditConfig, ModerationSettings, DEFAULT_BLACKLIST, DEFAULT_WARNING_MESSAGE,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing DISCORD_BOT_TOKEN environment variable! Create a .env file with your bot token.")]
    MissingToken,
}

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub token: String,
    pub warning_message: String,
    pub blacklist: Vec<String>,
    pub audit_channel_id: Option<u64>,
    pub operator_id: Option<u64>,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("DISCORD_BOT_TOKEN")
            .or_else(|| lookup("DISCORD_TOKEN"))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let warning_message =
            lookup("WARNING_MESSAGE").unwrap_or_else(|| DEFAULT_WARNING_MESSAGE.to_string());

        let blacklist = match lookup("BLACKLISTED_DOMAINS") {
            Some(raw) => parse_domain_list(&raw),
            None => DEFAULT_BLACKLIST.iter().map(|d| d.to_string()).collect(),
        };

        let audit_channel_id = parse_optional_id("LOG_CHANNEL_ID", lookup("LOG_CHANNEL_ID"))
            .or_warn("LOG_CHANNEL_ID is not a valid integer; logging will be disabled.");

        let operator_id = parse_optional_id("OWNER_ID", lookup("OWNER_ID"))
            .or_warn("Invalid OWNER_ID provided; falling back to no owner restriction.");

        Ok(Self {
            token,
            warning_message,
            blacklist,
            audit_channel_id,
            operator_id,
        })
    }

    /// Initial runtime settings seeded from this configuration.
    pub fn initial_settings(&self) -> ModerationSettings {
        ModerationSettings::new(
            &self.blacklist,
            self.warning_message.clone(),
            AuditConfig::from_channel(self.audit_channel_id),
        )
    }
}

/// Comma separated, trimmed, lowercased, blanks dropped.
pub fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}

enum IdValue {
    Unset,
    Valid(u64),
    Invalid { key: &'static str, raw: String },
}

impl IdValue {
    fn or_warn(self, message: &str) -> Option<u64> {
        match self {
            IdValue::Unset => None,
            IdValue::Valid(id) => Some(id),
            IdValue::Invalid { key, raw } => {
                tracing::warn!(key, value = %raw, "{}", message);
                None
            }
        }
    }
}

fn parse_optional_id(key: &'static str, value: Option<String>) -> IdValue {
    let Some(raw) = value else {
        return IdValue::Unset;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return IdValue::Unset;
    }
    match trimmed.parse::<u64>() {
        Ok(id) => IdValue::Valid(id),
        Err(_) => IdValue::Invalid { key, raw },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let result = EnvConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingToken)));
    }

    #[test]
    fn test_defaults() {
        let config = EnvConfig::from_lookup(lookup_from(&[("DISCORD_BOT_TOKEN", "abc")])).unwrap();

        assert_eq!(config.token, "abc");
        assert_eq!(config.warning_message, DEFAULT_WARNING_MESSAGE);
        assert_eq!(config.blacklist, vec!["x.com", "twitter.com"]);
        assert_eq!(config.audit_channel_id, None);
        assert_eq!(config.operator_id, None);
    }

    #[test]
    fn test_legacy_token_name_accepted() {
        let config = EnvConfig::from_lookup(lookup_from(&[("DISCORD_TOKEN", "legacy")])).unwrap();
        assert_eq!(config.token, "legacy");
    }

    #[test]
    fn test_blacklist_parsing() {
        assert_eq!(
            parse_domain_list(" Example.com,, BAD.org ,  "),
            vec!["example.com", "bad.org"]
        );
    }

    #[test]
    fn test_invalid_ids_degrade() {
        let config = EnvConfig::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "abc"),
            ("LOG_CHANNEL_ID", "not-a-number"),
            ("OWNER_ID", "12x"),
        ]))
        .unwrap();

        assert_eq!(config.audit_channel_id, None);
        assert_eq!(config.operator_id, None);
        assert!(!config.initial_settings().audit.enabled);
    }

    #[test]
    fn test_valid_log_channel_enables_audit() {
        let config = EnvConfig::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "abc"),
            ("LOG_CHANNEL_ID", "1234"),
            ("OWNER_ID", " 42 "),
            ("BLACKLISTED_DOMAINS", "bad.com"),
        ]))
        .unwrap();

        let settings = config.initial_settings();
        assert_eq!(settings.audit.active_channel(), Some(1234));
        assert_eq!(settings.blacklist, vec!["bad.com"]);
        assert_eq!(config.operator_id, Some(42));
    }
}
