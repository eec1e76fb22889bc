use async_trait::async_trait;
use dashmap::DashMap;

use tokenward_core::error::StoreError;
use tokenward_core::AccessToken;

use super::TokenStore;

/// Process-local token store keyed by internal id.
#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: DashMap<String, AccessToken>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: DashMap::new(),
        }
    }

    /// Insert or replace. Returns the previous record if any.
    pub fn insert(&self, token: AccessToken) -> Option<AccessToken> {
        self.tokens.insert(token.id.clone(), token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn find_one(&self, id: &str) -> Result<Option<AccessToken>, StoreError> {
        Ok(self.tokens.get(id).map(|r| r.value().clone()))
    }

    async fn delete_one_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.tokens
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
