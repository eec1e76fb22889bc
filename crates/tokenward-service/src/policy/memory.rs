use async_trait::async_trait;
use dashmap::{DashMap, DashSet};

use tokenward_core::error::PolicyError;

use super::PolicyEngine;

/// One `(object, action)` grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission {
    pub object: String,
    pub action: String,
}

impl Permission {
    pub fn new(object: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            action: action.into(),
        }
    }
}

/// In-process policy state:
/// - `subject -> {(object, action)...}` grants
/// - `subject -> {role...}` role links
///
/// Roles are subjects too, so a role's grants are looked up the same way.
#[derive(Default)]
pub struct InMemoryPolicyEngine {
    grants: DashMap<String, DashSet<Permission>>,
    roles: DashMap<String, DashSet<String>>,
}

impl InMemoryPolicyEngine {
    pub fn new() -> Self {
        Self {
            grants: DashMap::new(),
            roles: DashMap::new(),
        }
    }

    pub fn add_permission(&self, subject: &str, perm: Permission) {
        self.grants
            .entry(subject.to_string())
            .or_insert_with(DashSet::new)
            .insert(perm);
    }

    pub fn add_role_for_subject(&self, subject: &str, role: &str) {
        self.roles
            .entry(subject.to_string())
            .or_insert_with(DashSet::new)
            .insert(role.to_string());
    }

    /// Direct grants only, sorted.
    pub fn permissions_for_subject(&self, subject: &str) -> Vec<Permission> {
        let mut out: Vec<Permission> = self
            .grants
            .get(subject)
            .map(|set| set.iter().map(|p| p.key().clone()).collect())
            .unwrap_or_default();
        out.sort();
        out
    }

    pub fn roles_for_subject(&self, subject: &str) -> Vec<String> {
        let mut out: Vec<String> = self
            .roles
            .get(subject)
            .map(|set| set.iter().map(|r| r.key().to_string()).collect())
            .unwrap_or_default();
        out.sort();
        out
    }

    /// Whether the engine holds any state for this subject.
    pub fn has_subject(&self, subject: &str) -> bool {
        self.grants.contains_key(subject) || self.roles.contains_key(subject)
    }

    /// Grant check: direct, or through one role hop.
    pub fn enforce(&self, subject: &str, object: &str, action: &str) -> bool {
        let want = Permission::new(object, action);
        if self.has_grant(subject, &want) {
            return true;
        }
        self.roles_for_subject(subject)
            .iter()
            .any(|role| self.has_grant(role, &want))
    }

    fn has_grant(&self, subject: &str, perm: &Permission) -> bool {
        self.grants
            .get(subject)
            .map(|set| set.contains(perm))
            .unwrap_or(false)
    }
}

#[async_trait]
impl PolicyEngine for InMemoryPolicyEngine {
    async fn delete_subject(&self, subject: &str) -> Result<(), PolicyError> {
        if let Some((_, roles)) = self.roles.remove(subject) {
            tracing::debug!(roles = roles.len(), "policy subject removed");
        }
        Ok(())
    }

    async fn delete_permissions_for_subject(&self, subject: &str) -> Result<(), PolicyError> {
        if let Some((_, perms)) = self.grants.remove(subject) {
            tracing::debug!(grants = perms.len(), "policy grants removed");
        }
        Ok(())
    }
}
