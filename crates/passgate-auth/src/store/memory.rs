//! In-memory credential store for single-node deployments and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use passgate_core::error::AppError;
use passgate_core::result::AppResult;
use passgate_entity::Identity;

use super::CredentialStore;

/// Credential store backed by a sharded concurrent map.
///
/// The entry API locks the username's shard for the duration of the
/// insert-if-absent check, which serializes racing registrations. Contents
/// are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    identities: DashMap<String, Identity>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn insert(&self, identity: Identity) -> AppResult<()> {
        match self.identities.entry(identity.username.clone()) {
            Entry::Occupied(_) => Err(AppError::duplicate_identity(format!(
                "Username '{}' is already registered",
                identity.username
            ))),
            Entry::Vacant(slot) => {
                debug!(username = %identity.username, "Identity stored");
                slot.insert(identity);
                Ok(())
            }
        }
    }

    async fn find(&self, username: &str) -> AppResult<Identity> {
        self.identities
            .get(username)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Identity '{username}' not found")))
    }

    async fn contains(&self, username: &str) -> AppResult<bool> {
        Ok(self.identities.contains_key(username))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.identities.len() as u64)
    }
}
