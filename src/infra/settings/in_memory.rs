// In-memory implementation of SettingsStore.
//
// Settings are not persisted; a restart goes back to whatever the
// environment seeded. One RwLock guards the whole settings value, so every
// trait method is a single lock acquisition and writes are never torn.

use crate::core::settings::{AuditConfig, ModerationSettings, SettingsError, SettingsStore};
use async_trait::async_trait;
use tokio::sync::RwLock;

pub struct InMemorySettingsStore {
    settings: RwLock<ModerationSettings>,
}

impl InMemorySettingsStore {
    pub fn new(initial: ModerationSettings) -> Self {
        Self {
            settings: RwLock::new(initial),
        }
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new(ModerationSettings::default())
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn snapshot(&self) -> Result<ModerationSettings, SettingsError> {
        Ok(self.settings.read().await.clone())
    }

    async fn add_domain(&self, domain: String) -> Result<bool, SettingsError> {
        let mut settings = self.settings.write().await;
        if settings.blacklist.contains(&domain) {
            return Ok(false);
        }
        settings.blacklist.push(domain);
        Ok(true)
    }

    async fn remove_domain(&self, domain: &str) -> Result<bool, SettingsError> {
        let mut settings = self.settings.write().await;
        let before = settings.blacklist.len();
        settings.blacklist.retain(|entry| entry != domain);
        Ok(settings.blacklist.len() != before)
    }

    async fn set_warning_message(&self, message: String) -> Result<(), SettingsError> {
        self.settings.write().await.warning_message = message;
        Ok(())
    }

    async fn set_audit_channel(&self, channel_id: u64) -> Result<(), SettingsError> {
        self.settings.write().await.audit = AuditConfig::from_channel(Some(channel_id));
        Ok(())
    }

    async fn toggle_audit(&self) -> Result<AuditConfig, SettingsError> {
        let mut settings = self.settings.write().await;
        let audit = &mut settings.audit;

        if audit.enabled || audit.channel_id.is_some() {
            audit.enabled = !audit.enabled;
        }
        Ok(audit.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_snapshot_reflects_writes() {
        let store = InMemorySettingsStore::default();

        assert!(store.add_domain("example.com".to_string()).await.unwrap());
        store.set_warning_message("Nope.".to_string()).await.unwrap();

        let settings = store.snapshot().await.unwrap();
        assert!(settings.is_blacklisted("example.com"));
        assert_eq!(settings.warning_message, "Nope.");
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_all_visible() {
        let store = Arc::new(InMemorySettingsStore::new(ModerationSettings::new(
            Vec::<String>::new(),
            "",
            AuditConfig::default(),
        )));

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.add_domain(format!("site{}.com", i)).await.unwrap()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        assert_eq!(store.snapshot().await.unwrap().blacklist.len(), 32);
    }
}
