//! Cluster access layer
//!
//! Everything the engine needs from the Kubernetes API sits behind two
//! traits: `ClusterApi` (namespace listing, pod metadata, pod details) and
//! `MetricsApi` (optional metrics.k8s.io usage). The kube-rs implementations
//! live in `kube_api`; tests substitute mocks or fakes.

mod connect;
mod kube_api;
pub mod quantity;

pub use connect::*;
pub use kube_api::*;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Minimal identity of a pod, as carried by tree nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PodRecord {
    pub name: String,
    pub namespace: String,
}

impl PodRecord {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

/// Lifecycle state of a single container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerPhase {
    Running,
    Waiting,
    Terminated,
    Unknown,
}

impl ContainerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerPhase::Running => "Running",
            ContainerPhase::Waiting => "Waiting",
            ContainerPhase::Terminated => "Terminated",
            ContainerPhase::Unknown => "Unknown",
        }
    }
}

/// Full pod information shown in the output pane when a pod is activated
#[derive(Debug, Clone, PartialEq)]
pub struct PodDetails {
    pub name: String,
    pub namespace: String,
    pub phase: Option<String>,
    pub pod_ip: Option<String>,
    pub node_name: Option<String>,
    pub host_ip: Option<String>,
    /// RFC 3339 start time as reported by the API server
    pub start_time: Option<String>,
    pub containers: Vec<(String, ContainerPhase)>,
}

impl PodDetails {
    pub fn container_names(&self) -> Vec<String> {
        self.containers.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Age relative to `now`, e.g. `5m` or `3d`; `None` without a parseable start time
    pub fn age(&self, now: DateTime<Utc>) -> Option<String> {
        let started = DateTime::parse_from_rfc3339(self.start_time.as_deref()?).ok()?;
        let duration = now.signed_duration_since(started.with_timezone(&Utc));

        Some(if duration.num_seconds() < 60 {
            format!("{}s", duration.num_seconds().max(0))
        } else if duration.num_minutes() < 60 {
            format!("{}m", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h", duration.num_hours())
        } else {
            format!("{}d", duration.num_days())
        })
    }
}

/// Summed container usage of a pod
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PodUsage {
    pub cpu_millis: u64,
    pub memory_bytes: u64,
}

/// List and metadata handle of a connected session
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// List namespace names, in API order
    async fn list_namespaces(&self) -> Result<Vec<String>>;

    /// List pod identities of one namespace from partial object metadata
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodRecord>>;

    /// Fetch the full pod; `Ok(None)` when the pod no longer exists
    async fn pod_details(&self, namespace: &str, name: &str) -> Result<Option<PodDetails>>;
}

/// Optional metrics handle, present when the cluster serves metrics.k8s.io
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsApi: Send + Sync {
    async fn pod_usage(&self, namespace: &str, name: &str) -> Result<PodUsage>;
}
