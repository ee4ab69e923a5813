// Runtime settings shared by the link filter and the admin commands.
//
// Pure data, no Discord types. Everything here lives in memory only and
// resets to the startup values when the process restarts.

pub const DEFAULT_WARNING_MESSAGE: &str = "Don't post that trash here:";
pub const DEFAULT_BLACKLIST: &[&str] = &["x.com", "twitter.com"];

/// Where moderation and command records get mirrored to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditConfig {
    pub enabled: bool,
    pub channel_id: Option<u64>,
}

impl AuditConfig {
    /// Audit starts enabled only when a destination is known.
    pub fn from_channel(channel_id: Option<u64>) -> Self {
        Self {
            enabled: channel_id.is_some(),
            channel_id,
        }
    }

    /// The channel to write to, if auditing is currently on.
    pub fn active_channel(&self) -> Option<u64> {
        if self.enabled {
            self.channel_id
        } else {
            None
        }
    }
}

/// A consistent view of every runtime setting.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationSettings {
    /// Normalized domains, kept in insertion order for display.
    pub blacklist: Vec<String>,
    pub warning_message: String,
    pub audit: AuditConfig,
}

impl ModerationSettings {
    /// Build settings from startup values, normalizing and de-duplicating the blacklist.
    pub fn new<I, D>(blacklist: I, warning_message: impl Into<String>, audit: AuditConfig) -> Self
    where
        I: IntoIterator<Item = D>,
        D: AsRef<str>,
    {
        let mut domains: Vec<String> = Vec::new();
        for domain in blacklist {
            if let Some(domain) = normalize_domain_input(domain.as_ref()) {
                if !domains.contains(&domain) {
                    domains.push(domain);
                }
            }
        }

        Self {
            blacklist: domains,
            warning_message: warning_message.into(),
            audit,
        }
    }

    /// Exact match only; `sub.x.com` is not covered by `x.com`.
    pub fn is_blacklisted(&self, domain: &str) -> bool {
        self.blacklist.iter().any(|entry| entry == domain)
    }
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self::new(
            DEFAULT_BLACKLIST.iter().copied(),
            DEFAULT_WARNING_MESSAGE,
            AuditConfig::default(),
        )
    }
}

/// Trim, lowercase and drop a leading `www.` from an operator-supplied domain,
/// producing the same key the link scanner derives from messages.
/// Empty input yields `None`.
pub fn normalize_domain_input(raw: &str) -> Option<String> {
    let lowered = raw.trim().to_lowercase();
    let domain = lowered.strip_prefix("www.").unwrap_or(&lowered).to_string();
    if domain.is_empty() {
        None
    } else {
        Some(domain)
    }
}

/// Outcome of a blacklist mutation. Both "no-op" variants leave the list untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainChange {
    Added(String),
    AlreadyPresent(String),
    Removed(String),
    NotFound(String),
}

/// Outcome of flipping the audit switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditToggle {
    Enabled,
    Disabled,
    /// Enabling was refused because no destination channel is configured.
    ChannelRequired,
}

/// Restricts mutating commands to a single operator, when one is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatorGate {
    operator_id: Option<u64>,
}

impl OperatorGate {
    pub fn new(operator_id: Option<u64>) -> Self {
        Self { operator_id }
    }

    pub fn permits(&self, user_id: u64) -> bool {
        match self.operator_id {
            Some(operator_id) => operator_id == user_id,
            None => true,
        }
    }

    pub fn operator_id(&self) -> Option<u64> {
        self.operator_id
    }
}
