use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::Instrument;

use tokenward_core::error::{Result, RevokeError, StoreError};
use tokenward_core::{AccessToken, RevocationRequest, RevocationResult, TokenDeletedEvent};

use crate::events::EventSink;
use crate::obs::ServiceMetrics;
use crate::policy::PolicyEngine;
use crate::store::TokenStore;

/// Access-token revocation: lookup, policy cleanup, storage delete, notify.
///
/// Each step runs only after the previous one succeeded. Policy state is
/// cleaned before the record is deleted, so a failure in between leaves a
/// record that a retry will find again. Nothing is compensated: once a step
/// has run, its effect stays even if a later step fails.
pub struct RevocationWorkflow {
    store: Arc<dyn TokenStore>,
    policy: Arc<dyn PolicyEngine>,
    events: Arc<dyn EventSink>,
    metrics: Option<Arc<ServiceMetrics>>,
}

impl RevocationWorkflow {
    pub fn new(
        store: Arc<dyn TokenStore>,
        policy: Arc<dyn PolicyEngine>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            store,
            policy,
            events,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<ServiceMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub async fn revoke(&self, req: RevocationRequest) -> Result<RevocationResult> {
        let started = Instant::now();
        let span = tracing::info_span!("revoke", token_id = %req.id());

        let res = self.run(&req).instrument(span.clone()).await;

        let _enter = span.enter();
        match &res {
            Ok(_) => tracing::info!("access token revoked"),
            Err(RevokeError::PublishFailure(msg)) => {
                tracing::error!(error = %msg, "access token deleted but event not published; needs reconciliation")
            }
            Err(e) => tracing::warn!(code = e.client_code().as_str(), error = %e, "revocation failed"),
        }
        self.record(&res, started.elapsed());
        res
    }

    async fn run(&self, req: &RevocationRequest) -> Result<RevocationResult> {
        let snapshot = self
            .store
            .find_one(req.id())
            .await
            .map_err(RevokeError::store)?
            .ok_or_else(|| RevokeError::NotFound(req.id().to_string()))?;
        tracing::debug!("token found");

        self.clean_policy(&snapshot).await?;
        tracing::debug!("policy state removed");

        match self.store.delete_one_by_id(&snapshot.id).await {
            Ok(()) => {}
            // Lost a race with a concurrent revoke of the same token.
            Err(StoreError::NotFound(_)) => return Err(RevokeError::NotFound(snapshot.id)),
            Err(e) => return Err(RevokeError::store(e)),
        }
        tracing::debug!("token record deleted");

        self.events
            .publish(TokenDeletedEvent::new(snapshot.clone()))
            .await?;

        Ok(RevocationResult::from(snapshot))
    }

    /// Both calls are attempted; the first failure aborts the revocation.
    async fn clean_policy(&self, token: &AccessToken) -> Result<()> {
        let subject = token.subject();
        let subject_res = self.policy.delete_subject(subject).await;
        let perms_res = self.policy.delete_permissions_for_subject(subject).await;

        subject_res.map_err(RevokeError::policy)?;
        perms_res.map_err(RevokeError::policy)?;
        Ok(())
    }

    fn record(&self, res: &Result<RevocationResult>, elapsed: Duration) {
        let Some(m) = &self.metrics else { return };
        let outcome = match res {
            Ok(_) => "ok",
            Err(e) => e.client_code().as_str(),
        };
        m.revocations.inc(&[("outcome", outcome)]);
        m.revoke_duration.observe(&[("outcome", outcome)], elapsed);
    }
}
