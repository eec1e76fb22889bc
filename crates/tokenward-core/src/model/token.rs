use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Access token entity as owned by the token store.
///
/// Only `id` and `token` are interpreted. Every other field lands in
/// `attributes` and is forwarded untouched into results and events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Internal storage identifier.
    pub id: String,
    /// Token value; doubles as the policy-engine subject key.
    pub token: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl AccessToken {
    pub fn new(id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
            attributes: Map::new(),
        }
    }

    /// Builder-style helper for pass-through attributes.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Subject key used by the policy engine.
    pub fn subject(&self) -> &str {
        &self.token
    }
}
