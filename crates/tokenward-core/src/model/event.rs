use serde::{Deserialize, Serialize};

use crate::model::AccessToken;

/// Published once a token is gone from both the policy engine and the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDeletedEvent {
    /// Snapshot taken at lookup time.
    pub access_token: AccessToken,
}

impl TokenDeletedEvent {
    pub const TOPIC: &'static str = "access_token.deleted";

    pub fn new(access_token: AccessToken) -> Self {
        Self { access_token }
    }

    pub fn topic(&self) -> &'static str {
        Self::TOPIC
    }
}
