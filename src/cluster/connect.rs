//! Kubeconfig loading and session handshake

use super::{ClusterApi, KubeCluster, KubeMetrics, METRICS_API_GROUP, MetricsApi};
use crate::session::{Connector, SessionError, SessionHandles};
use async_trait::async_trait;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Contexts found in a kubeconfig file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextList {
    /// Context names, sorted
    pub names: Vec<String>,
    /// The kubeconfig's `current-context`
    pub current: Option<String>,
}

/// Default kubeconfig location: `~/.kube/config`
pub fn default_kubeconfig_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".kube").join("config"))
}

fn read_kubeconfig(path: &Path) -> Result<Kubeconfig, SessionError> {
    Kubeconfig::read_from(path).map_err(|e| SessionError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Read the context names and current context from a kubeconfig file
pub fn load_contexts(path: &Path) -> Result<ContextList, SessionError> {
    let kubeconfig = read_kubeconfig(path)?;
    let mut names: Vec<String> = kubeconfig
        .contexts
        .iter()
        .map(|context| context.name.clone())
        .collect();
    names.sort();
    names.dedup();
    Ok(ContextList {
        names,
        current: kubeconfig.current_context,
    })
}

/// Connects to a named context of a kubeconfig file with kube-rs
#[derive(Debug, Clone)]
pub struct KubeConnector {
    kubeconfig_path: PathBuf,
}

impl KubeConnector {
    pub fn new(kubeconfig_path: impl Into<PathBuf>) -> Self {
        Self {
            kubeconfig_path: kubeconfig_path.into(),
        }
    }

    pub fn kubeconfig_path(&self) -> &Path {
        &self.kubeconfig_path
    }

    async fn create_client(&self, context: &str) -> Result<Client, SessionError> {
        let kubeconfig = read_kubeconfig(&self.kubeconfig_path)?;
        if !kubeconfig.contexts.iter().any(|c| c.name == context) {
            return Err(SessionError::UnknownContext {
                context: context.to_string(),
            });
        }

        let handshake = |message: String| SessionError::Handshake {
            context: context.to_string(),
            message,
        };

        let options = KubeConfigOptions {
            context: Some(context.to_string()),
            cluster: None,
            user: None,
        };
        let config = Config::from_custom_kubeconfig(kubeconfig, &options)
            .await
            .map_err(|e| handshake(e.to_string()))?;
        tracing::debug!(context, cluster_url = %config.cluster_url, "Built client config");

        let client = Client::try_from(config).map_err(|e| handshake(e.to_string()))?;

        // Fail fast on unreachable or unauthorized API servers
        let version = client
            .apiserver_version()
            .await
            .map_err(|e| handshake(e.to_string()))?;
        tracing::info!(context, git_version = %version.git_version, "Connected to API server");

        Ok(client)
    }
}

/// Non-fatal probe for metrics.k8s.io
async fn probe_metrics(client: &Client) -> Option<Arc<dyn MetricsApi>> {
    match client.list_api_groups().await {
        Ok(groups) if groups.groups.iter().any(|g| g.name == METRICS_API_GROUP) => {
            Some(Arc::new(KubeMetrics::new(client.clone())))
        }
        Ok(_) => {
            tracing::info!("metrics.k8s.io not served, pod usage disabled");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Metrics capability probe failed");
            None
        }
    }
}

#[async_trait]
impl Connector for KubeConnector {
    async fn connect(&self, context: &str) -> Result<SessionHandles, SessionError> {
        let client = self.create_client(context).await?;
        let metrics = probe_metrics(&client).await;
        let cluster: Arc<dyn ClusterApi> = Arc::new(KubeCluster::new(client));
        Ok(SessionHandles { cluster, metrics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: staging
clusters:
- name: c1
  cluster:
    server: https://127.0.0.1:6443
contexts:
- name: staging
  context:
    cluster: c1
    user: u1
- name: dev
  context:
    cluster: c1
    user: u1
users:
- name: u1
  user:
    token: abc
"#;

    #[test]
    fn test_load_contexts_sorted_with_current() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(KUBECONFIG.as_bytes()).unwrap();

        let contexts = load_contexts(file.path()).unwrap();
        assert_eq!(contexts.names, vec!["dev", "staging"]);
        assert_eq!(contexts.current.as_deref(), Some("staging"));
    }

    #[test]
    fn test_load_contexts_missing_file() {
        let err = load_contexts(Path::new("/nonexistent/kubeconfig")).unwrap_err();
        assert!(matches!(err, SessionError::Config { .. }));
    }

    #[tokio::test]
    async fn test_connect_unknown_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(KUBECONFIG.as_bytes()).unwrap();

        let connector = KubeConnector::new(file.path());
        let err = connector.connect("prod").await.err().unwrap();
        assert_eq!(
            err,
            SessionError::UnknownContext {
                context: "prod".to_string()
            }
        );
    }
}
