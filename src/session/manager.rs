use super::{Session, SessionError, SessionStore};
use crate::cluster::{ClusterApi, MetricsApi};
use crate::events::{EngineEvent, EventSender};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handles produced by a successful handshake
#[derive(Clone)]
pub struct SessionHandles {
    pub cluster: Arc<dyn ClusterApi>,
    pub metrics: Option<Arc<dyn MetricsApi>>,
}

/// Resolves a context name to connected client handles
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, context: &str) -> Result<SessionHandles, SessionError>;
}

/// Creates sessions on context switches and publishes them into the store
#[derive(Clone)]
pub struct ClientSessionManager {
    store: SessionStore,
    connector: Arc<dyn Connector>,
    events: EventSender,
}

impl ClientSessionManager {
    pub fn new(store: SessionStore, connector: Arc<dyn Connector>, events: EventSender) -> Self {
        Self {
            store,
            connector,
            events,
        }
    }

    /// Connect to `context` and make it the active session
    ///
    /// The previous session stays active on failure. Once published, the
    /// namespace list is loaded and delivered as `NamespacesLoaded`.
    pub async fn connect(&self, context: &str) -> Result<Session, SessionError> {
        let generation = self.store.reserve_generation();
        tracing::info!(context, generation, "Connecting");

        let handles = match self.connector.connect(context).await {
            Ok(handles) => handles,
            Err(error) => {
                if !self.store.is_latest_request(generation) {
                    tracing::debug!(context, generation, error = %error, "Dropping failure of superseded connect");
                    return Err(SessionError::Superseded { generation });
                }
                tracing::warn!(context, error = %error, "Connect failed");
                let _ = self.events.send(EngineEvent::SessionFailed {
                    context: context.to_string(),
                    error: error.clone(),
                });
                return Err(error);
            }
        };

        let session = Session {
            generation,
            context_name: context.to_string(),
            cluster: handles.cluster,
            metrics: handles.metrics,
        };
        self.store.publish(session.clone())?;

        let metrics_available = session.metrics.is_some();
        tracing::info!(context, generation, metrics_available, "Session ready");
        let _ = self.events.send(EngineEvent::SessionReady {
            generation,
            context: context.to_string(),
            metrics_available,
        });

        self.load_namespaces(&session).await;
        Ok(session)
    }

    /// Run `connect` on a background task
    pub fn spawn_connect(&self, context: String) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            match manager.connect(&context).await {
                Ok(_) => {}
                Err(SessionError::Superseded { generation }) => {
                    tracing::debug!(context = %context, generation, "Connect superseded")
                }
                // Already reported through SessionFailed
                Err(_) => {}
            }
        })
    }

    async fn load_namespaces(&self, session: &Session) {
        let result = session
            .cluster
            .list_namespaces()
            .await
            .map(|mut names| {
                names.sort();
                names
            })
            .map_err(|e| format!("{:#}", e));

        if let Ok(names) = &result {
            let mut state = self.store.lock();
            if state.generation() == session.generation {
                state.namespaces = names.clone();
            }
        }

        let _ = self.events.send(EngineEvent::NamespacesLoaded {
            generation: session.generation,
            result,
        });
    }
}
