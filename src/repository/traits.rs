//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for blob persistence.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::DomainResult;

/// Key-value blob storage used by the persisted stores
///
/// All operations are async to support various backends.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`
    async fn get(&self, key: &str) -> DomainResult<Option<Vec<u8>>>;

    /// Insert or replace the blob stored under `key`
    async fn set(&self, key: &str, value: Vec<u8>) -> DomainResult<()>;

    /// Delete `key`; deleting a missing key succeeds
    async fn remove(&self, key: &str) -> DomainResult<()>;
}
