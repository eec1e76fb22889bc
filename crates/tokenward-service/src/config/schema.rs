use std::collections::HashSet;
use std::net::SocketAddr;

use serde::Deserialize;
use tokenward_core::error::{Result, RevokeError};
use tokenward_core::AccessToken;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub service: ServiceSection,

    #[serde(default)]
    pub events: EventsSection,

    #[serde(default)]
    pub seed: SeedSection,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RevokeError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.service.validate()?;
        self.events.validate()?;
        self.seed.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Deadline applied by the HTTP caller around one revocation.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ServiceSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(100..=60000).contains(&self.request_timeout_ms) {
            return Err(RevokeError::BadRequest(
                "service.request_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            RevokeError::BadRequest(format!("service.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_request_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsSection {
    /// Broadcast buffer size; slow subscribers past this lag and lose events.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for EventsSection {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl EventsSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=65536).contains(&self.capacity) {
            return Err(RevokeError::BadRequest(
                "events.capacity must be between 1 and 65536".into(),
            ));
        }
        Ok(())
    }
}

fn default_capacity() -> usize {
    1024
}

/// Initial contents for the in-memory collaborators.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SeedSection {
    #[serde(default)]
    pub tokens: Vec<AccessToken>,
    #[serde(default)]
    pub grants: Vec<GrantSeed>,
    #[serde(default)]
    pub roles: Vec<RoleSeed>,
}

impl SeedSection {
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for t in &self.tokens {
            if t.id.trim().is_empty() || t.token.is_empty() {
                return Err(RevokeError::BadRequest(
                    "seed.tokens entries need a non-empty id and token".into(),
                ));
            }
            if !ids.insert(t.id.as_str()) {
                return Err(RevokeError::BadRequest(format!(
                    "seed.tokens has duplicate id: {}",
                    t.id
                )));
            }
        }
        for g in &self.grants {
            if g.subject.is_empty() || g.object.is_empty() || g.action.is_empty() {
                return Err(RevokeError::BadRequest(
                    "seed.grants entries need subject, object and action".into(),
                ));
            }
        }
        for r in &self.roles {
            if r.subject.is_empty() || r.role.is_empty() {
                return Err(RevokeError::BadRequest(
                    "seed.roles entries need subject and role".into(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrantSeed {
    pub subject: String,
    pub object: String,
    pub action: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleSeed {
    pub subject: String,
    pub role: String,
}
