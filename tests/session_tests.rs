//! Tests for context switching and generation-scoped readiness

mod common;

use common::{FakeCluster, FakeConnector};
use podminator::EngineEvent;
use podminator::engine::Engine;
use podminator::fetch::FetchError;
use podminator::session::{NamespaceScope, SessionError};
use std::sync::Arc;
use std::time::Duration;

fn engine(connector: FakeConnector) -> (Engine, podminator::events::EventReceiver) {
    Engine::new(
        Arc::new(connector),
        Duration::from_secs(60),
        Duration::from_millis(300),
    )
}

#[tokio::test]
async fn test_connect_publishes_session_and_namespaces() {
    let cluster = Arc::new(FakeCluster::with_pods(&[("b", &["api-0"]), ("a", &["web-1"])]));
    let (engine, mut rx) = engine(FakeConnector::default().with("dev", Duration::ZERO, Some(cluster)));

    let session = engine.manager.connect("dev").await.unwrap();
    assert_eq!(session.generation, 1);
    assert!(engine.store.readiness().is_ready(1));

    match rx.recv().await {
        Some(EngineEvent::SessionReady {
            generation,
            context,
            metrics_available,
        }) => {
            assert_eq!(generation, 1);
            assert_eq!(context, "dev");
            assert!(!metrics_available);
        }
        other => panic!("expected SessionReady, got {:?}", other),
    }
    match rx.recv().await {
        Some(EngineEvent::NamespacesLoaded { generation, result }) => {
            assert_eq!(generation, 1);
            assert_eq!(result, Ok(vec!["a".to_string(), "b".to_string()]));
        }
        other => panic!("expected NamespacesLoaded, got {:?}", other),
    }
    assert_eq!(engine.store.lock().namespaces, vec!["a", "b"]);
}

#[tokio::test]
async fn test_failed_connect_keeps_previous_session() {
    let cluster = Arc::new(FakeCluster::with_pods(&[("a", &["web-1"])]));
    let connector = FakeConnector::default()
        .with("dev", Duration::ZERO, Some(cluster))
        .with("broken", Duration::ZERO, None);
    let (engine, mut rx) = engine(connector);

    engine.manager.connect("dev").await.unwrap();
    let error = engine.manager.connect("broken").await.unwrap_err();
    assert!(matches!(error, SessionError::Handshake { .. }));

    let state = engine.store.lock();
    assert_eq!(state.context_name(), Some("dev"));
    assert_eq!(state.generation(), 1);
    drop(state);

    // SessionReady, NamespacesLoaded, then the failure
    rx.recv().await.unwrap();
    rx.recv().await.unwrap();
    match rx.recv().await {
        Some(EngineEvent::SessionFailed { context, .. }) => assert_eq!(context, "broken"),
        other => panic!("expected SessionFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_context_reports_error() {
    let (engine, mut rx) = engine(FakeConnector::default());
    let error = engine.manager.connect("prod").await.unwrap_err();
    assert_eq!(
        error,
        SessionError::UnknownContext {
            context: "prod".to_string()
        }
    );
    assert!(matches!(rx.recv().await, Some(EngineEvent::SessionFailed { .. })));
    assert!(engine.store.session().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_slow_connect_superseded_by_newer_one() {
    let slow = Arc::new(FakeCluster::with_pods(&[("slow-ns", &["a"])]));
    let fast = Arc::new(FakeCluster::with_pods(&[("fast-ns", &["b"])]));
    let connector = FakeConnector::default()
        .with("slow", Duration::from_secs(5), Some(slow))
        .with("fast", Duration::from_secs(1), Some(fast));
    let (engine, _rx) = engine(connector);

    let first = engine.manager.clone();
    let slow_task = tokio::spawn(async move { first.connect("slow").await });
    // Let the slow connect reserve its generation first
    tokio::task::yield_now().await;
    let second = engine.manager.clone();
    let fast_task = tokio::spawn(async move { second.connect("fast").await });

    let fast_session = fast_task.await.unwrap().unwrap();
    let slow_result = slow_task.await.unwrap();

    assert!(matches!(slow_result, Err(SessionError::Superseded { .. })));
    assert_eq!(engine.store.lock().context_name(), Some("fast"));
    assert!(engine.store.readiness().is_ready(fast_session.generation));
    assert_eq!(engine.store.readiness().latest(), fast_session.generation);
}

#[tokio::test]
async fn test_fetch_before_ready_fails_without_requests() {
    let (engine, _rx) = engine(FakeConnector::default());
    engine.store.lock().scope = Some(NamespaceScope::AllNamespaces);

    let result = engine.fetcher.fetch(&NamespaceScope::AllNamespaces, "").await;
    assert_eq!(result, Err(FetchError::NotReady));

    // Nothing in the store was touched by the attempt
    let state = engine.store.lock();
    assert!(state.selection.is_none());
    assert!(state.expansion.is_empty());
}

#[tokio::test]
async fn test_publish_resets_scope_and_search() {
    let a = Arc::new(FakeCluster::with_pods(&[("a", &["web-1"])]));
    let b = Arc::new(FakeCluster::with_pods(&[("b", &["api-0"])]));
    let connector = FakeConnector::default()
        .with("dev", Duration::ZERO, Some(a))
        .with("staging", Duration::ZERO, Some(b.clone()));
    let (engine, _rx) = engine(connector);

    engine.manager.connect("dev").await.unwrap();
    {
        let mut state = engine.store.lock();
        state.scope = Some(NamespaceScope::SingleNamespace("a".to_string()));
        state.search = "web".to_string();
        state.expansion.set("a", true);
    }

    engine.manager.connect("staging").await.unwrap();
    let state = engine.store.lock();
    assert_eq!(state.scope, None);
    assert_eq!(state.search, "");
    assert!(state.expansion.is_empty());
    assert_eq!(state.namespaces, vec!["b"]);
}
