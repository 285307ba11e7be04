//! Async operation management
//!
//! Dispatches queued UI requests onto background tasks. Results come back
//! as [`EngineEvent`]s on the engine channel and are applied by the main loop.

use super::core::App;
use super::state::UiRequest;
use crate::cluster::PodRecord;
use crate::events::{EngineEvent, PodReport};
use crate::session::Session;

impl App {
    /// Spawn a task for every queued request
    pub fn process_requests(&mut self) {
        for request in self.take_requests() {
            match request {
                UiRequest::Connect(context) => {
                    self.engine.manager.spawn_connect(context);
                }
                UiRequest::Refresh => {
                    if self.engine.scheduler.manual().is_none() {
                        tracing::debug!("Refresh requested without a namespace");
                    }
                }
                UiRequest::SearchChanged => self.engine.scheduler.search_changed(),
                UiRequest::LoadDetails(pod) => self.spawn_details(pod),
                UiRequest::LoadContainers { pod, action } => self.spawn_containers(pod, action),
                UiRequest::RunAction(request) => self.spawn_action(request),
            }
        }
    }

    fn current_session(&mut self) -> Option<Session> {
        let session = self.engine.store.session();
        if session.is_none() {
            self.set_status_message(("Kubernetes clients are not initialized yet".to_string(), true));
        }
        session
    }

    fn spawn_details(&mut self, pod: PodRecord) {
        let Some(session) = self.current_session() else {
            return;
        };
        let events = self.engine.events().clone();
        tokio::spawn(async move {
            let result = match session.cluster.pod_details(&pod.namespace, &pod.name).await {
                Ok(Some(details)) => {
                    let usage = match &session.metrics {
                        Some(metrics) => match metrics.pod_usage(&pod.namespace, &pod.name).await {
                            Ok(usage) => Some(usage),
                            Err(e) => {
                                tracing::debug!(pod = %pod.name, error = %e, "Pod usage unavailable");
                                None
                            }
                        },
                        None => None,
                    };
                    Ok(Some(PodReport { details, usage }))
                }
                Ok(None) => Ok(None),
                Err(e) => Err(format!("Failed to load pod {}: {}", pod.name, e)),
            };
            let _ = events.send(EngineEvent::PodDetails {
                generation: session.generation,
                pod,
                result,
            });
        });
    }

    fn spawn_containers(&mut self, pod: PodRecord, action: crate::actions::ActionKind) {
        let Some(session) = self.current_session() else {
            return;
        };
        let events = self.engine.events().clone();
        tokio::spawn(async move {
            let result = match session.cluster.pod_details(&pod.namespace, &pod.name).await {
                Ok(Some(details)) => Ok(details.container_names()),
                Ok(None) => Err(format!("Pod {} no longer exists", pod.name)),
                Err(e) => Err(format!("Failed to load containers of {}: {}", pod.name, e)),
            };
            let _ = events.send(EngineEvent::Containers {
                generation: session.generation,
                pod,
                action,
                result,
            });
        });
    }

    fn spawn_action(&mut self, request: crate::actions::ActionRequest) {
        let Some(session) = self.current_session() else {
            return;
        };
        let runner = self.runner.clone();
        let events = self.engine.events().clone();
        let new_terminal = self.ui_state.use_new_terminal;
        self.set_status_message((
            format!("Running {} for {}...", request.kind.label(), request.pod),
            false,
        ));
        tokio::spawn(async move {
            let result = runner
                .run(&request, &session.context_name, new_terminal)
                .await
                .map_err(|e| format!("{:#}", e));
            let _ = events.send(EngineEvent::ActionFinished { result });
        });
    }
}
