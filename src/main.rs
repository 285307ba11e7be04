//! podminator - a terminal dashboard for Kubernetes namespaces and pods
//!
//! Connects to a kubeconfig context, lists namespaces and pods in a tree and
//! runs kubectl actions against the selected pod.

use anyhow::{Context, Result};
use clap::Parser;
use podminator::actions::{ActionRunner, ActionSettings};
use podminator::cli::{Args, init_logging};
use podminator::cluster::{ContextList, KubeConnector, load_contexts};
use podminator::config::{Config, ConfigLoader};
use podminator::engine::Engine;
use podminator::tui::{App, Theme, run_tui};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_path) = init_logging(args.debug)? {
        eprintln!("Debug logging to {}", log_path.display());
    }

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let kubeconfig = args
        .kubeconfig_path()
        .context("Could not determine the kubeconfig path; pass --kubeconfig")?;
    let contexts = match load_contexts(&kubeconfig) {
        Ok(contexts) => contexts,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read kubeconfig contexts");
            ContextList::default()
        }
    };
    let initial_context = args.context.clone().or_else(|| contexts.current.clone());
    tracing::info!(
        kubeconfig = %kubeconfig.display(),
        contexts = contexts.names.len(),
        context = ?initial_context,
        "Starting podminator"
    );

    let connector = Arc::new(KubeConnector::new(kubeconfig.clone()));
    let (engine, event_rx) = Engine::new(
        connector,
        config.refresh_interval(),
        config.search_debounce(),
    );
    let _periodic = engine.scheduler.spawn_periodic();

    let runner = ActionRunner::new(ActionSettings {
        kubeconfig: Some(kubeconfig),
        prometheus_url: args.prometheus_url.clone(),
        terminal_command: config.terminal.command.clone(),
    });

    let mut app = App::new(engine, runner, config, Theme::default(), contexts);
    match initial_context {
        Some(context) => app.request_connect(context),
        None => app.set_status_message((
            "No current context in kubeconfig. Press c to pick one".to_string(),
            true,
        )),
    }

    run_tui(app, event_rx).await
}
