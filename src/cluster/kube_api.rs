//! kube-rs backed implementations of the cluster traits

use super::quantity::{parse_cpu_millis, parse_memory_bytes};
use super::{ClusterApi, ContainerPhase, MetricsApi, PodDetails, PodRecord, PodUsage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, Pod};
use kube::api::{ApiResource, DynamicObject, GroupVersionKind, ListParams};
use kube::{Api, Client};

/// API group served by metrics-server
pub const METRICS_API_GROUP: &str = "metrics.k8s.io";

/// Namespace and pod access through a kube client
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterApi for KubeCluster {
    async fn list_namespaces(&self) -> Result<Vec<String>> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let list = api
            .list_metadata(&ListParams::default())
            .await
            .context("Failed to list namespaces")?;
        Ok(list
            .items
            .into_iter()
            .filter_map(|ns| ns.metadata.name)
            .collect())
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodRecord>> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = api
            .list_metadata(&ListParams::default())
            .await
            .with_context(|| format!("Failed to list pods in namespace {}", namespace))?;
        Ok(list
            .items
            .into_iter()
            .filter_map(|pod| pod.metadata.name)
            .map(|name| PodRecord::new(namespace, name))
            .collect())
    }

    async fn pod_details(&self, namespace: &str, name: &str) -> Result<Option<PodDetails>> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let pod = api
            .get_opt(name)
            .await
            .with_context(|| format!("Failed to fetch pod {}/{}", namespace, name))?;
        Ok(pod.map(|pod| pod_to_details(namespace, name, pod)))
    }
}

fn pod_to_details(namespace: &str, name: &str, pod: Pod) -> PodDetails {
    let status = pod.status.unwrap_or_default();
    let statuses = status.container_statuses.unwrap_or_default();
    let spec = pod.spec.unwrap_or_default();

    let containers = spec
        .containers
        .into_iter()
        .map(|container| {
            let phase = statuses
                .iter()
                .find(|s| s.name == container.name)
                .and_then(|s| s.state.as_ref())
                .map(|state| {
                    if state.running.is_some() {
                        ContainerPhase::Running
                    } else if state.waiting.is_some() {
                        ContainerPhase::Waiting
                    } else if state.terminated.is_some() {
                        ContainerPhase::Terminated
                    } else {
                        ContainerPhase::Unknown
                    }
                })
                .unwrap_or(ContainerPhase::Unknown);
            (container.name, phase)
        })
        .collect();

    // Time is serialized as an RFC 3339 string on the wire
    let start_time = status
        .start_time
        .and_then(|t| serde_json::to_value(t).ok())
        .and_then(|v| v.as_str().map(str::to_string));

    PodDetails {
        name: name.to_string(),
        namespace: namespace.to_string(),
        phase: status.phase,
        pod_ip: status.pod_ip,
        node_name: spec.node_name,
        host_ip: status.host_ip,
        start_time,
        containers,
    }
}

/// metrics.k8s.io PodMetrics access through a kube client
#[derive(Clone)]
pub struct KubeMetrics {
    client: Client,
    resource: ApiResource,
}

impl KubeMetrics {
    pub fn new(client: Client) -> Self {
        let gvk = GroupVersionKind::gvk(METRICS_API_GROUP, "v1beta1", "PodMetrics");
        Self {
            client,
            resource: ApiResource::from_gvk_with_plural(&gvk, "pods"),
        }
    }
}

#[async_trait]
impl MetricsApi for KubeMetrics {
    async fn pod_usage(&self, namespace: &str, name: &str) -> Result<PodUsage> {
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), namespace, &self.resource);
        let metrics = api
            .get(name)
            .await
            .with_context(|| format!("Failed to fetch metrics for pod {}/{}", namespace, name))?;
        Ok(sum_container_usage(&metrics.data))
    }
}

/// Sum `containers[].usage` of a PodMetrics object
pub fn sum_container_usage(data: &serde_json::Value) -> PodUsage {
    let mut usage = PodUsage::default();
    let Some(containers) = data.get("containers").and_then(|c| c.as_array()) else {
        return usage;
    };
    for container in containers {
        let Some(container_usage) = container.get("usage") else {
            continue;
        };
        if let Some(cpu) = container_usage.get("cpu").and_then(|v| v.as_str()) {
            usage.cpu_millis += parse_cpu_millis(cpu).unwrap_or(0);
        }
        if let Some(memory) = container_usage.get("memory").and_then(|v| v.as_str()) {
            usage.memory_bytes += parse_memory_bytes(memory).unwrap_or(0);
        }
    }
    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sum_container_usage() {
        let data = json!({
            "containers": [
                {"name": "app", "usage": {"cpu": "250m", "memory": "64Mi"}},
                {"name": "sidecar", "usage": {"cpu": "1000000n", "memory": "1024Ki"}}
            ]
        });
        let usage = sum_container_usage(&data);
        assert_eq!(usage.cpu_millis, 251);
        assert_eq!(usage.memory_bytes, 65 * 1024 * 1024);
    }

    #[test]
    fn test_sum_container_usage_without_containers() {
        assert_eq!(sum_container_usage(&json!({})), PodUsage::default());
    }

    #[test]
    fn test_pod_to_details_maps_container_states() {
        let pod: Pod = serde_json::from_value(json!({
            "metadata": {"name": "web-1", "namespace": "a"},
            "spec": {
                "nodeName": "node-7",
                "containers": [
                    {"name": "app", "image": "nginx"},
                    {"name": "init-proxy", "image": "envoy"}
                ]
            },
            "status": {
                "phase": "Running",
                "podIP": "10.0.0.12",
                "hostIP": "192.168.1.4",
                "startTime": "2024-05-01T10:00:00Z",
                "containerStatuses": [
                    {
                        "name": "app", "ready": true, "restartCount": 0,
                        "image": "nginx", "imageID": "",
                        "state": {"running": {"startedAt": "2024-05-01T10:00:05Z"}}
                    },
                    {
                        "name": "init-proxy", "ready": false, "restartCount": 2,
                        "image": "envoy", "imageID": "",
                        "state": {"waiting": {"reason": "CrashLoopBackOff"}}
                    }
                ]
            }
        }))
        .unwrap();

        let details = pod_to_details("a", "web-1", pod);
        assert_eq!(details.phase.as_deref(), Some("Running"));
        assert_eq!(details.pod_ip.as_deref(), Some("10.0.0.12"));
        assert_eq!(details.node_name.as_deref(), Some("node-7"));
        assert_eq!(details.start_time.as_deref(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(
            details.containers,
            vec![
                ("app".to_string(), ContainerPhase::Running),
                ("init-proxy".to_string(), ContainerPhase::Waiting),
            ]
        );
    }
}
