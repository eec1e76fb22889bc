#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use serde_json::json;

use tokenward_core::error::{Collaborator, RevokeError, StoreError};
use tokenward_core::{AccessToken, RevocationRequest};
use tokenward_service::events::{EventSink, InMemoryEventBus};
use tokenward_service::obs::ServiceMetrics;
use tokenward_service::policy::{InMemoryPolicyEngine, Permission, PolicyEngine};
use tokenward_service::store::{InMemoryTokenStore, TokenStore};
use tokenward_service::RevocationWorkflow;

use recording::{Faults, Harness};

fn t1() -> AccessToken {
    AccessToken::new("t1", "abc123")
}

fn req(id: &str) -> RevocationRequest {
    RevocationRequest::new(id).unwrap()
}

#[tokio::test]
async fn revokes_in_order_and_returns_snapshot() {
    let h = Harness::new(vec![t1()]);

    let res = h.workflow.revoke(req("t1")).await.unwrap();

    assert_eq!(
        h.log.calls(),
        vec![
            "find_one(t1)",
            "delete_subject(abc123)",
            "delete_permissions_for_subject(abc123)",
            "delete_one_by_id(t1)",
            "publish(t1)",
        ]
    );
    assert_eq!(res.access_token, t1());
    assert_eq!(h.sink.published()[0].access_token, t1());
    assert!(!h.store.contains("t1").await);
}

#[tokio::test]
async fn missing_token_touches_nothing() {
    let h = Harness::new(vec![t1()]);

    let err = h.workflow.revoke(req("t2")).await.unwrap_err();

    assert_eq!(err, RevokeError::NotFound("t2".into()));
    assert_eq!(h.log.calls(), vec!["find_one(t2)"]);
    assert!(h.sink.published().is_empty());
}

#[tokio::test]
async fn result_and_event_carry_lookup_time_fields() {
    let tok = t1()
        .with_attribute("name", "ci-deploy")
        .with_attribute("scopes", json!(["read"]));
    let h = Harness::new(vec![tok.clone()]);

    let res = h.workflow.revoke(req("t1")).await.unwrap();

    assert_eq!(res.access_token, tok);
    assert_eq!(h.sink.published()[0].access_token, tok);
    let wire = serde_json::to_value(&res).unwrap();
    assert_eq!(wire["access_token"]["name"], json!("ci-deploy"));
}

#[tokio::test]
async fn subject_failure_aborts_before_storage() {
    let h = Harness::with_faults(
        vec![t1()],
        Faults {
            delete_subject: Some("enforcer adapter offline"),
            ..Faults::default()
        },
    );

    let err = h.workflow.revoke(req("t1")).await.unwrap_err();

    assert_eq!(
        err,
        RevokeError::DependencyFailure {
            collaborator: Collaborator::PolicyEngine,
            message: "enforcer adapter offline".into(),
        }
    );
    // both policy calls are attempted, nothing after
    assert_eq!(
        h.log.calls(),
        vec![
            "find_one(t1)",
            "delete_subject(abc123)",
            "delete_permissions_for_subject(abc123)",
        ]
    );
    assert!(h.store.contains("t1").await);
    assert!(h.sink.published().is_empty());
}

#[tokio::test]
async fn permission_failure_aborts_before_storage() {
    let h = Harness::with_faults(
        vec![t1()],
        Faults {
            delete_permissions: Some("policy write conflict"),
            ..Faults::default()
        },
    );

    let err = h.workflow.revoke(req("t1")).await.unwrap_err();

    assert_eq!(err.client_code().as_str(), "DEPENDENCY_FAILED");
    assert_eq!(err.to_string(), "policy write conflict");
    assert!(!h.log.calls().iter().any(|c| c.starts_with("delete_one_by_id")));
    assert!(h.store.contains("t1").await);
    assert!(h.sink.published().is_empty());
}

#[tokio::test]
async fn policy_failure_leaves_record_for_retry() {
    let h = Harness::with_faults(
        vec![t1()],
        Faults {
            delete_subject: Some("down"),
            policy_fails_once: true,
            ..Faults::default()
        },
    );

    let err = h.workflow.revoke(req("t1")).await.unwrap_err();
    assert_eq!(
        err,
        RevokeError::DependencyFailure {
            collaborator: Collaborator::PolicyEngine,
            message: "down".into(),
        }
    );
    assert!(h.store.contains("t1").await);
    assert!(h.sink.published().is_empty());

    // same store, engine recovered
    let res = h.workflow.revoke(req("t1")).await.unwrap();
    assert_eq!(res.access_token, t1());
    assert!(!h.store.contains("t1").await);
    assert_eq!(h.sink.published().len(), 1);
    assert_eq!(
        h.log.calls().iter().filter(|c| c.as_str() == "find_one(t1)").count(),
        2
    );
}

#[tokio::test]
async fn lookup_failure_is_a_dependency_failure() {
    let h = Harness::with_faults(
        vec![t1()],
        Faults {
            find: Some(StoreError::Backend("connection refused".into())),
            ..Faults::default()
        },
    );

    let err = h.workflow.revoke(req("t1")).await.unwrap_err();

    assert_eq!(
        err,
        RevokeError::DependencyFailure {
            collaborator: Collaborator::TokenStore,
            message: "connection refused".into(),
        }
    );
    assert_eq!(h.log.calls(), vec!["find_one(t1)"]);
}

#[tokio::test]
async fn storage_failure_skips_publish() {
    let h = Harness::with_faults(
        vec![t1()],
        Faults {
            delete: Some(StoreError::Backend("write timeout".into())),
            ..Faults::default()
        },
    );

    let err = h.workflow.revoke(req("t1")).await.unwrap_err();

    assert_eq!(err.client_code().as_str(), "DEPENDENCY_FAILED");
    assert_eq!(err.to_string(), "write timeout");
    assert!(h.sink.published().is_empty());
    assert_eq!(h.log.calls().last().map(String::as_str), Some("delete_one_by_id(t1)"));
}

#[tokio::test]
async fn record_gone_at_delete_time_is_not_found() {
    let h = Harness::with_faults(
        vec![t1()],
        Faults {
            delete: Some(StoreError::NotFound("t1".into())),
            ..Faults::default()
        },
    );

    let err = h.workflow.revoke(req("t1")).await.unwrap_err();

    assert_eq!(err, RevokeError::NotFound("t1".into()));
    assert!(h.sink.published().is_empty());
}

#[tokio::test]
async fn publish_failure_surfaces_after_delete() {
    let h = Harness::with_faults(
        vec![t1()],
        Faults {
            publish: Some("bus unavailable"),
            ..Faults::default()
        },
    );

    let err = h.workflow.revoke(req("t1")).await.unwrap_err();

    assert_eq!(err, RevokeError::PublishFailure("bus unavailable".into()));
    assert_eq!(err.clone().into_rpc().to_string(), "remote call failed: bus unavailable");
    assert!(!h.store.contains("t1").await);
}

#[tokio::test]
async fn second_revoke_is_not_found_without_duplicate_event() {
    let h = Harness::new(vec![t1()]);

    h.workflow.revoke(req("t1")).await.unwrap();
    let err = h.workflow.revoke(req("t1")).await.unwrap_err();

    assert_eq!(err.client_code().as_str(), "NOT_FOUND");
    assert_eq!(h.sink.published().len(), 1);
}

fn in_memory(
    tokens: &[AccessToken],
) -> (Arc<InMemoryTokenStore>, Arc<InMemoryPolicyEngine>, Arc<InMemoryEventBus>) {
    let store = Arc::new(InMemoryTokenStore::new());
    for t in tokens {
        store.insert(t.clone());
    }
    let policy = Arc::new(InMemoryPolicyEngine::new());
    for t in tokens {
        policy.add_permission(&t.token, Permission::new("reports", "read"));
        policy.add_role_for_subject(&t.token, "reader");
    }
    (store, policy, Arc::new(InMemoryEventBus::new(16)))
}

#[tokio::test]
async fn in_memory_backends_end_to_end() {
    let (store, policy, bus) = in_memory(&[t1(), AccessToken::new("t9", "zzz")]);
    let mut rx = bus.subscribe();
    let metrics = Arc::new(ServiceMetrics::new());
    let wf = RevocationWorkflow::new(store.clone(), policy.clone(), bus.clone())
        .with_metrics(metrics.clone());

    wf.revoke(req("t1")).await.unwrap();
    assert!(wf.revoke(req("t2")).await.is_err());

    assert!(!policy.has_subject("abc123"));
    assert!(policy.has_subject("zzz"));
    assert!(store.find_one("t1").await.unwrap().is_none());
    assert_eq!(store.len(), 1);
    assert_eq!(rx.recv().await.unwrap().access_token.id, "t1");

    assert_eq!(metrics.revocations.get(&[("outcome", "ok")]), 1);
    assert_eq!(metrics.revocations.get(&[("outcome", "NOT_FOUND")]), 1);
    assert_eq!(metrics.revoke_duration.count(&[("outcome", "ok")]), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_revokes_of_one_token_publish_once() {
    let (store, policy, bus) = in_memory(&[t1()]);
    let mut rx = bus.subscribe();
    let wf = Arc::new(RevocationWorkflow::new(store, policy, bus.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let wf = Arc::clone(&wf);
            tokio::spawn(async move { wf.revoke(req("t1")).await })
        })
        .collect();

    let mut ok = 0;
    for h in handles {
        match h.await.unwrap() {
            Ok(_) => ok += 1,
            Err(e) => assert_eq!(e.client_code().as_str(), "NOT_FOUND"),
        }
    }
    assert_eq!(ok, 1);

    drop(wf);
    assert_eq!(rx.recv().await.unwrap().access_token.id, "t1");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn policy_engine_cleanup_is_idempotent_on_retry() {
    let (_, policy, _) = in_memory(&[t1()]);
    policy.delete_subject("abc123").await.unwrap();
    policy.delete_permissions_for_subject("abc123").await.unwrap();
    policy.delete_subject("abc123").await.unwrap();
    policy.delete_permissions_for_subject("abc123").await.unwrap();
    assert!(!policy.has_subject("abc123"));
}

#[tokio::test]
async fn closed_bus_yields_publish_failure() {
    let (store, policy, bus) = in_memory(&[t1()]);
    bus.close();
    let wf = RevocationWorkflow::new(store.clone(), policy, bus.clone());

    let err = wf.revoke(req("t1")).await.unwrap_err();

    assert_eq!(err.client_code().as_str(), "PUBLISH_FAILED");
    assert!(store.is_empty());
    assert!(bus.publish(tokenward_core::TokenDeletedEvent::new(t1())).await.is_err());
}
