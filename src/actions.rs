//! Pod actions carried out with kubectl
//!
//! Read-only kinds run captured and return their output. Interactive kinds
//! need a terminal, so they are handed to the configured launcher, or shown
//! as a command line when no launcher is configured.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::process::Command;
use url::Url;

pub const DEFAULT_EXEC_COMMAND: &str = "/bin/sh";

/// Split a command line typed at the exec prompt into argv
pub fn split_exec_command(command: &str) -> Result<Vec<String>> {
    let words = shell_words::split(command.trim())
        .map_err(|_| anyhow::anyhow!("Unbalanced quotes in exec command"))?;
    if words.is_empty() {
        anyhow::bail!("Exec command is empty");
    }
    Ok(words)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Logs,
    TailLogs,
    Exec { command: String },
    Describe,
    Yaml,
    MetricsGraph,
}

impl ActionKind {
    /// Kinds that address a single container
    pub fn needs_container(&self) -> bool {
        matches!(
            self,
            ActionKind::Logs | ActionKind::TailLogs | ActionKind::Exec { .. }
        )
    }

    /// Kinds that stay attached to a terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self, ActionKind::TailLogs | ActionKind::Exec { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Logs => "logs",
            ActionKind::TailLogs => "tail logs",
            ActionKind::Exec { .. } => "exec",
            ActionKind::Describe => "describe",
            ActionKind::Yaml => "yaml",
            ActionKind::MetricsGraph => "metrics",
        }
    }
}

/// An action emitted by the UI for one pod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub pod: String,
    pub namespace: String,
    pub container: Option<String>,
    pub kind: ActionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutput {
    /// Captured stdout of a finished command
    Captured { title: String, text: String },
    /// Command handed to a new terminal window
    Launched { command: String },
    /// Lines to show in the output pane
    Shown { title: String, lines: Vec<String> },
    Unavailable(String),
}

/// Runtime knobs for actions
#[derive(Debug, Clone, Default)]
pub struct ActionSettings {
    pub kubeconfig: Option<PathBuf>,
    pub prometheus_url: Option<Url>,
    /// Launcher prefix, e.g. `["x-terminal-emulator", "-e"]`
    pub terminal_command: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ActionRunner {
    settings: ActionSettings,
}

impl ActionRunner {
    pub fn new(settings: ActionSettings) -> Self {
        Self { settings }
    }

    /// kubectl arguments for `request` against `context`
    ///
    /// An exec command is tokenized with shell quoting rules.
    pub fn kubectl_args(&self, request: &ActionRequest, context: &str) -> Result<Vec<String>> {
        let mut args = self.target_args(request, context);
        if let ActionKind::Exec { command } = &request.kind {
            args.push("--".into());
            args.extend(split_exec_command(command)?);
        }
        Ok(args)
    }

    /// Shell-style rendering of the kubectl invocation
    ///
    /// The exec command is shown as typed.
    pub fn command_line(&self, request: &ActionRequest, context: &str) -> String {
        let mut line = std::iter::once("kubectl".to_string())
            .chain(self.target_args(request, context))
            .collect::<Vec<_>>()
            .join(" ");
        if let ActionKind::Exec { command } = &request.kind {
            line.push_str(" -- ");
            line.push_str(command.trim());
        }
        line
    }

    fn target_args(&self, request: &ActionRequest, context: &str) -> Vec<String> {
        let mut args: Vec<String> = match &request.kind {
            ActionKind::Logs => vec!["logs".into(), request.pod.clone()],
            ActionKind::TailLogs => vec!["logs".into(), "-f".into(), request.pod.clone()],
            ActionKind::Exec { .. } => vec!["exec".into(), "-it".into(), request.pod.clone()],
            ActionKind::Describe => vec!["describe".into(), "pod".into(), request.pod.clone()],
            ActionKind::Yaml | ActionKind::MetricsGraph => vec![
                "get".into(),
                "pod".into(),
                request.pod.clone(),
                "-o".into(),
                "yaml".into(),
            ],
        };
        args.push(format!("--namespace={}", request.namespace));
        if let Some(container) = request.container.as_ref().filter(|_| request.kind.needs_container()) {
            args.push("-c".into());
            args.push(container.clone());
        }
        args.push(format!("--context={}", context));
        if let Some(path) = &self.settings.kubeconfig {
            args.push(format!("--kubeconfig={}", path.display()));
        }
        args
    }

    pub async fn run(
        &self,
        request: &ActionRequest,
        context: &str,
        new_terminal: bool,
    ) -> Result<ActionOutput> {
        if request.kind == ActionKind::MetricsGraph {
            return Ok(self.metrics_queries(request));
        }

        if request.kind.is_interactive() || new_terminal {
            return self.launch_in_terminal(request, context);
        }

        let args = self.kubectl_args(request, context)?;
        tracing::debug!(?args, "Running kubectl");
        let output = Command::new("kubectl")
            .args(&args)
            .output()
            .await
            .context("Failed to run kubectl")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("kubectl {} failed: {}", request.kind.label(), stderr.trim());
        }
        Ok(ActionOutput::Captured {
            title: format!("{} {}/{}", request.kind.label(), request.namespace, request.pod),
            text: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    fn launch_in_terminal(&self, request: &ActionRequest, context: &str) -> Result<ActionOutput> {
        let command = self.command_line(request, context);
        let args = self.kubectl_args(request, context)?;
        let Some((program, prefix)) = self.settings.terminal_command.split_first() else {
            return Ok(ActionOutput::Shown {
                title: format!("{} {}/{}", request.kind.label(), request.namespace, request.pod),
                lines: vec![
                    "No terminal launcher configured (terminal.command). Run:".to_string(),
                    String::new(),
                    command,
                ],
            });
        };

        Command::new(program)
            .args(prefix)
            .arg("kubectl")
            .args(args)
            .spawn()
            .with_context(|| format!("Failed to launch terminal '{}'", program))?;
        tracing::info!(%command, "Launched in new terminal");
        Ok(ActionOutput::Launched { command })
    }

    fn metrics_queries(&self, request: &ActionRequest) -> ActionOutput {
        let Some(url) = &self.settings.prometheus_url else {
            return ActionOutput::Unavailable("Prometheus not detected".to_string());
        };
        let selector = format!(r#"pod="{}",namespace="{}""#, request.pod, request.namespace);
        ActionOutput::Shown {
            title: format!("metrics {}/{}", request.namespace, request.pod),
            lines: vec![
                format!("Prometheus: {}", url),
                String::new(),
                "CPU:".to_string(),
                format!("  rate(container_cpu_usage_seconds_total{{{}}}[5m])", selector),
                "Memory:".to_string(),
                format!("  container_memory_usage_bytes{{{}}}", selector),
            ],
        }
    }
}
