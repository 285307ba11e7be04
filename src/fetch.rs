//! Pod identity fetching for a namespace scope

use crate::cluster::{ClusterApi, PodRecord};
use crate::session::{NamespaceScope, SessionStore};
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use thiserror::Error;

/// Concurrent namespace listings in all-namespaces mode
const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Kubernetes clients are not initialized yet")]
    NotReady,

    #[error("Failed to list namespaces: {0}")]
    Namespaces(String),

    #[error("Failed to list pods in {namespace}: {message}")]
    Pods { namespace: String, message: String },
}

/// Namespace to pods, plus the generation the fetch ran against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub generation: u64,
    pub namespaces: BTreeMap<String, Vec<PodRecord>>,
}

#[derive(Debug, Clone)]
pub struct ResourceFetcher {
    store: SessionStore,
    concurrency: usize,
}

impl ResourceFetcher {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Fetch `scope` through the active session
    ///
    /// Returns `NotReady` immediately when no session is ready. The session
    /// is snapshotted and the lock released before any request is made.
    pub async fn fetch(
        &self,
        scope: &NamespaceScope,
        query: &str,
    ) -> Result<FetchOutcome, FetchError> {
        let session = self.store.session().ok_or(FetchError::NotReady)?;
        if !self.store.readiness().is_ready(session.generation) {
            return Err(FetchError::NotReady);
        }

        let namespaces =
            fetch_pods(session.cluster.as_ref(), scope, query, self.concurrency).await?;
        tracing::debug!(
            generation = session.generation,
            scope = scope.label(),
            query,
            namespaces = namespaces.len(),
            "Fetched pods"
        );
        Ok(FetchOutcome {
            generation: session.generation,
            namespaces,
        })
    }
}

/// Fetch pods for `scope` from `cluster`, filtered by `query`
///
/// Per-namespace failures are skipped in all-namespaces mode; a failure of
/// the single namespace fails the call.
pub async fn fetch_pods(
    cluster: &dyn ClusterApi,
    scope: &NamespaceScope,
    query: &str,
    concurrency: usize,
) -> Result<BTreeMap<String, Vec<PodRecord>>, FetchError> {
    let mut result = BTreeMap::new();
    match scope {
        NamespaceScope::SingleNamespace(namespace) => {
            let pods = cluster
                .list_pods(namespace)
                .await
                .map_err(|e| FetchError::Pods {
                    namespace: namespace.clone(),
                    message: format!("{:#}", e),
                })?;
            insert_filtered(&mut result, namespace.clone(), pods, query);
        }
        NamespaceScope::AllNamespaces => {
            let namespaces = cluster
                .list_namespaces()
                .await
                .map_err(|e| FetchError::Namespaces(format!("{:#}", e)))?;

            let listings: Vec<_> = stream::iter(namespaces)
                .map(|namespace| async move {
                    let pods = cluster.list_pods(&namespace).await;
                    (namespace, pods)
                })
                .buffered(concurrency.max(1))
                .collect()
                .await;

            for (namespace, pods) in listings {
                match pods {
                    Ok(pods) => insert_filtered(&mut result, namespace, pods, query),
                    Err(e) => {
                        tracing::warn!(namespace = %namespace, error = %format!("{:#}", e), "Skipping namespace")
                    }
                }
            }
        }
    }
    Ok(result)
}

fn insert_filtered(
    result: &mut BTreeMap<String, Vec<PodRecord>>,
    namespace: String,
    pods: Vec<PodRecord>,
    query: &str,
) {
    let pods = filter_by_query(pods, query);
    if !pods.is_empty() {
        result.insert(namespace, pods);
    }
}

/// Keep pods whose name contains `query`, ignoring case
pub fn filter_by_query(pods: Vec<PodRecord>, query: &str) -> Vec<PodRecord> {
    if query.is_empty() {
        return pods;
    }
    let needle = query.to_lowercase();
    pods.into_iter()
        .filter(|pod| pod.name.to_lowercase().contains(&needle))
        .collect()
}
