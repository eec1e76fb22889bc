//! Shared error types across tokenward crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// No access token matches the identifier.
    NotFound,
    /// Token store or policy engine failed.
    DependencyFailed,
    /// Token deleted but the event sink refused the notification.
    PublishFailed,
    /// Caller deadline elapsed.
    Timeout,
    /// Server-side failure (startup, I/O).
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::DependencyFailed => "DEPENDENCY_FAILED",
            ClientCode::PublishFailed => "PUBLISH_FAILED",
            ClientCode::Timeout => "TIMEOUT",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Which collaborator produced a dependency failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    TokenStore,
    PolicyEngine,
}

impl Collaborator {
    pub fn as_str(self) -> &'static str {
        match self {
            Collaborator::TokenStore => "token_store",
            Collaborator::PolicyEngine => "policy_engine",
        }
    }
}

impl std::fmt::Display for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token store failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Record is not (or no longer) present.
    #[error("access token not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Backend(String),
}

/// Policy engine failure. The message is surfaced unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct PolicyError(pub String);

/// Event sink refused the event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct SinkError(pub String);

/// Shared result type.
pub type Result<T> = std::result::Result<T, RevokeError>;

/// Classified failure of a revocation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RevokeError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("access token by id not found: {0}")]
    NotFound(String),
    /// Message is the collaborator's own, unchanged.
    #[error("{message}")]
    DependencyFailure {
        collaborator: Collaborator,
        message: String,
    },
    /// The token is already deleted; needs out-of-band reconciliation.
    #[error("{0}")]
    PublishFailure(String),
    #[error("deadline elapsed after {0}ms")]
    Timeout(u64),
    #[error("internal: {0}")]
    Internal(String),
}

impl RevokeError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            RevokeError::BadRequest(_) => ClientCode::BadRequest,
            RevokeError::NotFound(_) => ClientCode::NotFound,
            RevokeError::DependencyFailure { .. } => ClientCode::DependencyFailed,
            RevokeError::PublishFailure(_) => ClientCode::PublishFailed,
            RevokeError::Timeout(_) => ClientCode::Timeout,
            RevokeError::Internal(_) => ClientCode::Internal,
        }
    }

    pub fn store(err: StoreError) -> Self {
        RevokeError::DependencyFailure {
            collaborator: Collaborator::TokenStore,
            message: err.to_string(),
        }
    }

    pub fn policy(err: PolicyError) -> Self {
        RevokeError::DependencyFailure {
            collaborator: Collaborator::PolicyEngine,
            message: err.0,
        }
    }

    /// Collapse into the uniform transport-level failure.
    pub fn into_rpc(self) -> RpcFailure {
        RpcFailure {
            code: self.client_code(),
            message: self.to_string(),
        }
    }
}

impl From<SinkError> for RevokeError {
    fn from(err: SinkError) -> Self {
        RevokeError::PublishFailure(err.0)
    }
}

/// Uniform "remote call failed" signal seen at the transport boundary.
///
/// Every `RevokeError` collapses into this one shape; `code` is advisory and
/// callers that only understand the generic failure can ignore it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("remote call failed: {message}")]
pub struct RpcFailure {
    pub code: ClientCode,
    pub message: String,
}

impl RpcFailure {
    /// Generic error tag shared by every failure.
    pub const ERROR: &'static str = "REMOTE_CALL_FAILED";
}

impl From<RevokeError> for RpcFailure {
    fn from(err: RevokeError) -> Self {
        err.into_rpc()
    }
}
