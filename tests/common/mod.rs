//! In-memory cluster and connector shared by the integration tests

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use podminator::cluster::{ClusterApi, ContainerPhase, PodDetails, PodRecord};
use podminator::session::{Connector, SessionError, SessionHandles};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Cluster serving a fixed set of namespaces and pods
#[derive(Default)]
pub struct FakeCluster {
    pub pods: BTreeMap<String, Vec<String>>,
    /// Containers reported for every pod
    pub containers: Vec<String>,
    pub fail_namespaces: bool,
    pub list_calls: AtomicUsize,
}

impl FakeCluster {
    pub fn with_pods(entries: &[(&str, &[&str])]) -> Self {
        Self {
            pods: entries
                .iter()
                .map(|(ns, pods)| (ns.to_string(), pods.iter().map(|p| p.to_string()).collect()))
                .collect(),
            containers: vec!["app".to_string()],
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClusterApi for FakeCluster {
    async fn list_namespaces(&self) -> Result<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_namespaces {
            return Err(anyhow!("forbidden"));
        }
        Ok(self.pods.keys().cloned().collect())
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let pods = self.pods.get(namespace).cloned().unwrap_or_default();
        Ok(pods.into_iter().map(|p| PodRecord::new(namespace, p)).collect())
    }

    async fn pod_details(&self, namespace: &str, name: &str) -> Result<Option<PodDetails>> {
        let exists = self
            .pods
            .get(namespace)
            .is_some_and(|pods| pods.iter().any(|p| p == name));
        if !exists {
            return Ok(None);
        }
        Ok(Some(PodDetails {
            name: name.to_string(),
            namespace: namespace.to_string(),
            phase: Some("Running".to_string()),
            pod_ip: Some("10.0.0.7".to_string()),
            node_name: Some("node-1".to_string()),
            host_ip: None,
            start_time: None,
            containers: self
                .containers
                .iter()
                .map(|c| (c.clone(), ContainerPhase::Running))
                .collect(),
        }))
    }
}

/// How a fake connect to one context behaves
#[derive(Clone)]
pub struct FakeContext {
    pub delay: Duration,
    pub cluster: Option<Arc<FakeCluster>>,
}

/// Connector resolving contexts from a fixed table
#[derive(Default)]
pub struct FakeConnector {
    pub contexts: HashMap<String, FakeContext>,
}

impl FakeConnector {
    pub fn with(mut self, context: &str, delay: Duration, cluster: Option<Arc<FakeCluster>>) -> Self {
        self.contexts
            .insert(context.to_string(), FakeContext { delay, cluster });
        self
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self, context: &str) -> Result<SessionHandles, SessionError> {
        let Some(entry) = self.contexts.get(context).cloned() else {
            return Err(SessionError::UnknownContext {
                context: context.to_string(),
            });
        };
        tokio::time::sleep(entry.delay).await;
        match entry.cluster {
            Some(cluster) => Ok(SessionHandles {
                cluster,
                metrics: None,
            }),
            None => Err(SessionError::Handshake {
                context: context.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}
