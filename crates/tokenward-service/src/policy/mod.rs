//! Policy engine seam (subjects, role links, permission grants).
//!
//! Subjects are keyed by the token *value*, not the storage id. The workflow
//! only ever removes state here; granting lives with whoever issues tokens.

pub mod memory;

use async_trait::async_trait;

use tokenward_core::error::PolicyError;

pub use memory::{InMemoryPolicyEngine, Permission};

#[async_trait]
pub trait PolicyEngine: Send + Sync {
    /// Remove the subject record (its role memberships). Idempotent.
    async fn delete_subject(&self, subject: &str) -> Result<(), PolicyError>;

    /// Remove every permission granted directly to the subject. Idempotent.
    async fn delete_permissions_for_subject(&self, subject: &str) -> Result<(), PolicyError>;
}
