//! Token store seam.
//!
//! The workflow only needs lookup and delete-by-id; any backend offering those
//! two calls can sit behind `TokenStore`.

pub mod memory;

use async_trait::async_trait;

use tokenward_core::error::StoreError;
use tokenward_core::AccessToken;

pub use memory::InMemoryTokenStore;

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// `Ok(None)` when no token has this identifier.
    async fn find_one(&self, id: &str) -> Result<Option<AccessToken>, StoreError>;

    /// Remove by internal id. A missing record is `StoreError::NotFound`.
    async fn delete_one_by_id(&self, id: &str) -> Result<(), StoreError>;
}
