//! Credential storage abstraction and the in-memory backend.

pub mod memory;

use async_trait::async_trait;

use passgate_core::result::AppResult;
use passgate_entity::Identity;

pub use memory::MemoryCredentialStore;

/// Owns registered identities, keyed by exact username.
///
/// Implementations must make `insert` atomic per username: of two
/// concurrent inserts for the same name exactly one succeeds and the other
/// fails with `DuplicateIdentity`.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Stores a new identity. Fails with `DuplicateIdentity` if the username
    /// is already present.
    async fn insert(&self, identity: Identity) -> AppResult<()>;

    /// Looks up an identity by username. Fails with `NotFound` if absent.
    async fn find(&self, username: &str) -> AppResult<Identity>;

    /// Returns whether the username is registered.
    async fn contains(&self, username: &str) -> AppResult<bool>;

    /// Counts registered identities.
    async fn count(&self) -> AppResult<u64>;
}
