// Settings service - the single source of truth for the blacklist, warning
// text and audit destination.
//
// Commands mutate through here, the link filter reads through here.
// NO Discord dependencies.

use super::settings_models::{
    normalize_domain_input, AuditConfig, AuditToggle, DomainChange, ModerationSettings,
};
use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Domain must not be empty")]
    EmptyDomain,
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Backing store for runtime settings.
///
/// Every method is one atomic step: a reader never sees half of a write.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Copy of all settings taken under a single read.
    async fn snapshot(&self) -> Result<ModerationSettings, SettingsError>;

    /// Insert a normalized domain. Returns `false` if it was already present.
    async fn add_domain(&self, domain: String) -> Result<bool, SettingsError>;

    /// Remove a normalized domain. Returns `false` if it was absent.
    async fn remove_domain(&self, domain: &str) -> Result<bool, SettingsError>;

    async fn set_warning_message(&self, message: String) -> Result<(), SettingsError>;

    /// Point auditing at a channel and switch it on.
    async fn set_audit_channel(&self, channel_id: u64) -> Result<(), SettingsError>;

    /// Flip the audit switch and return the resulting config.
    ///
    /// Switching on without a destination channel leaves auditing off.
    async fn toggle_audit(&self) -> Result<AuditConfig, SettingsError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct SettingsService<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> SettingsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn snapshot(&self) -> Result<ModerationSettings, SettingsError> {
        self.store.snapshot().await
    }

    /// Add a domain to the blacklist. Adding a present domain is a no-op.
    pub async fn add_domain(&self, raw: &str) -> Result<DomainChange, SettingsError> {
        let domain = normalize_domain_input(raw).ok_or(SettingsError::EmptyDomain)?;

        if self.store.add_domain(domain.clone()).await? {
            tracing::info!(domain = %domain, "Domain added to blacklist");
            Ok(DomainChange::Added(domain))
        } else {
            Ok(DomainChange::AlreadyPresent(domain))
        }
    }

    /// Remove a domain from the blacklist. Removing an absent domain is a no-op.
    pub async fn remove_domain(&self, raw: &str) -> Result<DomainChange, SettingsError> {
        let domain = normalize_domain_input(raw).ok_or(SettingsError::EmptyDomain)?;

        if self.store.remove_domain(&domain).await? {
            tracing::info!(domain = %domain, "Domain removed from blacklist");
            Ok(DomainChange::Removed(domain))
        } else {
            Ok(DomainChange::NotFound(domain))
        }
    }

    pub async fn list_domains(&self) -> Result<Vec<String>, SettingsError> {
        Ok(self.store.snapshot().await?.blacklist)
    }

    pub async fn set_warning_message(&self, message: &str) -> Result<(), SettingsError> {
        self.store.set_warning_message(message.to_string()).await
    }

    pub async fn set_audit_channel(&self, channel_id: u64) -> Result<(), SettingsError> {
        self.store.set_audit_channel(channel_id).await?;
        tracing::info!(channel_id, "Audit channel updated");
        Ok(())
    }

    pub async fn toggle_audit(&self) -> Result<AuditToggle, SettingsError> {
        let audit = self.store.toggle_audit().await?;

        Ok(match (audit.enabled, audit.channel_id) {
            (true, _) => AuditToggle::Enabled,
            (false, None) => AuditToggle::ChannelRequired,
            (false, Some(_)) => AuditToggle::Disabled,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::DEFAULT_WARNING_MESSAGE;
    use crate::infra::settings::InMemorySettingsStore;

    fn service_with(domains: &[&str], audit: AuditConfig) -> SettingsService<InMemorySettingsStore> {
        let settings = ModerationSettings::new(domains.iter().copied(), DEFAULT_WARNING_MESSAGE, audit);
        SettingsService::new(InMemorySettingsStore::new(settings))
    }

    #[tokio::test]
    async fn test_add_domain_normalizes_input() {
        let service = service_with(&[], AuditConfig::default());

        let change = service.add_domain("  Example.COM ").await.unwrap();

        assert_eq!(change, DomainChange::Added("example.com".to_string()));
        assert_eq!(service.list_domains().await.unwrap(), vec!["example.com"]);
    }

    #[tokio::test]
    async fn test_add_domain_drops_www_prefix() {
        let service = service_with(&["x.com"], AuditConfig::default());

        let change = service.add_domain("WWW.evil.com").await.unwrap();
        assert_eq!(change, DomainChange::Added("evil.com".to_string()));

        let change = service.remove_domain("www.x.com").await.unwrap();
        assert_eq!(change, DomainChange::Removed("x.com".to_string()));
    }

    #[tokio::test]
    async fn test_add_existing_domain_is_noop() {
        let service = service_with(&["x.com"], AuditConfig::default());

        let change = service.add_domain("X.com").await.unwrap();

        assert_eq!(change, DomainChange::AlreadyPresent("x.com".to_string()));
        assert_eq!(service.list_domains().await.unwrap(), vec!["x.com"]);
    }

    #[tokio::test]
    async fn test_remove_missing_domain_is_noop() {
        let service = service_with(&["x.com"], AuditConfig::default());

        let change = service.remove_domain("y.com").await.unwrap();

        assert_eq!(change, DomainChange::NotFound("y.com".to_string()));
        assert_eq!(service.list_domains().await.unwrap(), vec!["x.com"]);
    }

    #[tokio::test]
    async fn test_remove_domain() {
        let service = service_with(&["x.com", "twitter.com"], AuditConfig::default());

        let change = service.remove_domain("x.com").await.unwrap();

        assert_eq!(change, DomainChange::Removed("x.com".to_string()));
        assert_eq!(service.list_domains().await.unwrap(), vec!["twitter.com"]);
    }

    #[tokio::test]
    async fn test_blank_domain_rejected() {
        let service = service_with(&["x.com"], AuditConfig::default());

        assert!(matches!(
            service.add_domain("   ").await,
            Err(SettingsError::EmptyDomain)
        ));
        assert!(matches!(
            service.remove_domain("").await,
            Err(SettingsError::EmptyDomain)
        ));
    }

    #[tokio::test]
    async fn test_set_warning_message() {
        let service = service_with(&[], AuditConfig::default());

        service.set_warning_message("No links please.").await.unwrap();

        let settings = service.snapshot().await.unwrap();
        assert_eq!(settings.warning_message, "No links please.");
    }

    #[tokio::test]
    async fn test_set_audit_channel_enables_audit() {
        let service = service_with(&[], AuditConfig::default());

        service.set_audit_channel(99).await.unwrap();

        let audit = service.snapshot().await.unwrap().audit;
        assert!(audit.enabled);
        assert_eq!(audit.active_channel(), Some(99));
    }

    #[tokio::test]
    async fn test_toggle_audit_twice_round_trips() {
        let service = service_with(&[], AuditConfig::from_channel(Some(5)));
        let before = service.snapshot().await.unwrap().audit;

        assert_eq!(service.toggle_audit().await.unwrap(), AuditToggle::Disabled);
        assert_eq!(service.toggle_audit().await.unwrap(), AuditToggle::Enabled);

        assert_eq!(service.snapshot().await.unwrap().audit, before);
    }

    #[tokio::test]
    async fn test_toggle_audit_without_channel() {
        let service = service_with(&[], AuditConfig::default());

        assert_eq!(
            service.toggle_audit().await.unwrap(),
            AuditToggle::ChannelRequired
        );
        assert!(!service.snapshot().await.unwrap().audit.enabled);
    }
}
