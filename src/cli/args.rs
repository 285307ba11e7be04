use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// podminator - browse Kubernetes namespaces and pods from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "podminator", version)]
#[command(about = "A terminal dashboard for Kubernetes namespaces and pods", long_about = None)]
pub struct Args {
    /// Path to the kubeconfig file [default: ~/.kube/config]
    #[arg(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Prometheus base URL for the metrics action
    #[arg(long)]
    pub prometheus_url: Option<Url>,

    /// Context to connect to instead of the kubeconfig's current context
    #[arg(long)]
    pub context: Option<String>,

    /// Enable debug logging to a temporary file
    #[arg(long, short = 'd')]
    pub debug: bool,
}

impl Args {
    /// Kubeconfig to read, taking the first entry of a KUBECONFIG list
    pub fn kubeconfig_path(&self) -> Option<PathBuf> {
        match &self.kubeconfig {
            Some(path) => std::env::split_paths(path).find(|p| !p.as_os_str().is_empty()),
            None => crate::cluster::default_kubeconfig_path(),
        }
    }
}
