//! Shared application state for the tokenward service.
//!
//! Builds the in-memory collaborators from config, seeds them, and wires the
//! revocation workflow. Startup errors are returned, never panicked.

use std::sync::Arc;

use tokenward_core::error::{Result, RevokeError};

use crate::config::ServiceConfig;
use crate::events::InMemoryEventBus;
use crate::obs::ServiceMetrics;
use crate::policy::{InMemoryPolicyEngine, Permission, PolicyEngine};
use crate::store::InMemoryTokenStore;
use crate::workflow::RevocationWorkflow;

/// Concrete collaborator handles, kept so the binary and tests can inspect them.
#[derive(Clone)]
pub struct Backends {
    pub store: Arc<InMemoryTokenStore>,
    pub policy: Arc<InMemoryPolicyEngine>,
    pub bus: Arc<InMemoryEventBus>,
}

impl Backends {
    pub fn from_config(cfg: &ServiceConfig) -> Result<Self> {
        let store = Arc::new(InMemoryTokenStore::new());
        let policy = Arc::new(InMemoryPolicyEngine::new());
        let bus = Arc::new(InMemoryEventBus::new(cfg.events.capacity));

        for t in &cfg.seed.tokens {
            if store.insert(t.clone()).is_some() {
                return Err(RevokeError::BadRequest(format!(
                    "duplicate seed token id: {}",
                    t.id
                )));
            }
        }
        for g in &cfg.seed.grants {
            policy.add_permission(&g.subject, Permission::new(&g.object, &g.action));
        }
        for r in &cfg.seed.roles {
            policy.add_role_for_subject(&r.subject, &r.role);
        }

        tracing::info!(
            tokens = store.len(),
            grants = cfg.seed.grants.len(),
            roles = cfg.seed.roles.len(),
            "in-memory backends seeded"
        );

        Ok(Self { store, policy, bus })
    }
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    backends: Backends,
    workflow: RevocationWorkflow,
    metrics: Arc<ServiceMetrics>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ServiceConfig) -> Result<Self> {
        let backends = Backends::from_config(&cfg)?;
        let policy: Arc<dyn PolicyEngine> = backends.policy.clone();
        Self::assemble(cfg, backends, policy)
    }

    /// Same as `new`, but revocations clean up through an external policy
    /// engine. The seeded in-memory engine stays reachable via `backends()`.
    pub fn with_policy_engine(cfg: ServiceConfig, policy: Arc<dyn PolicyEngine>) -> Result<Self> {
        let backends = Backends::from_config(&cfg)?;
        Self::assemble(cfg, backends, policy)
    }

    fn assemble(cfg: ServiceConfig, backends: Backends, policy: Arc<dyn PolicyEngine>) -> Result<Self> {
        let metrics = Arc::new(ServiceMetrics::new());

        let workflow = RevocationWorkflow::new(backends.store.clone(), policy, backends.bus.clone())
            .with_metrics(Arc::clone(&metrics));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                backends,
                workflow,
                metrics,
            }),
        })
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn backends(&self) -> &Backends {
        &self.inner.backends
    }

    pub fn workflow(&self) -> &RevocationWorkflow {
        &self.inner.workflow
    }

    pub fn metrics(&self) -> Arc<ServiceMetrics> {
        Arc::clone(&self.inner.metrics)
    }
}
