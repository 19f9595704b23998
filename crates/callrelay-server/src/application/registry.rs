//! Call Registry
//!
//! Process-lifetime map from the carrier's call id to what was known when
//! the call was created. Status callbacks only carry the carrier id, so
//! this is the sole link back to the original request and voice session.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use callrelay::{DomainError, RegistryEntry};

/// Shared, cloneable registry handle
#[derive(Debug, Clone, Default)]
pub struct CallRegistry {
    entries: Arc<RwLock<HashMap<String, RegistryEntry>>>,
    ttl: Option<chrono::Duration>,
}

impl CallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expire entries older than `ttl`
    pub fn with_ttl(mut self, ttl: std::time::Duration) -> Self {
        self.ttl = chrono::Duration::from_std(ttl).ok();
        self
    }

    /// Store an entry, replacing any previous one for the same id
    pub fn put(&self, carrier_call_id: &str, entry: RegistryEntry) -> Result<(), DomainError> {
        if carrier_call_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "carrier call id must not be empty".to_string(),
            ));
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.insert(carrier_call_id.to_string(), entry).is_some() {
            tracing::warn!(call_sid = %carrier_call_id, "Registry entry overwritten");
        } else {
            tracing::debug!(
                call_sid = %carrier_call_id,
                stored = entries.len(),
                "Registry entry stored"
            );
        }
        Ok(())
    }

    /// Look up an entry; absence is a normal outcome
    pub fn get(&self, carrier_call_id: &str) -> Option<RegistryEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(carrier_call_id)?;
        match self.ttl {
            Some(ttl) if entry.is_expired(Utc::now(), ttl) => None,
            _ => Some(entry.clone()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop entries that have expired as of `now`, returning how many
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now, ttl));
        before - entries.len()
    }
}
