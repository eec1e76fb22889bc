use serde::{Deserialize, Serialize};

use crate::error::{Result, RevokeError};
use crate::model::AccessToken;

/// Request to revoke one access token by its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRequest")]
pub struct RevocationRequest {
    id: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRequest {
    id: String,
}

impl TryFrom<RawRequest> for RevocationRequest {
    type Error = RevokeError;

    fn try_from(raw: RawRequest) -> Result<Self> {
        Self::new(raw.id)
    }
}

impl RevocationRequest {
    /// Rejects an empty or whitespace-only identifier.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RevokeError::BadRequest("token id must not be empty".into()));
        }
        Ok(Self { id })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Outcome of a successful revocation: the token as it was before deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevocationResult {
    pub access_token: AccessToken,
}

impl From<AccessToken> for RevocationResult {
    fn from(access_token: AccessToken) -> Self {
        Self { access_token }
    }
}
