//! Results delivered from background tasks to the interactive loop

use crate::actions::{ActionKind, ActionOutput};
use crate::cluster::{PodDetails, PodRecord, PodUsage};
use crate::refresh::RefreshOutcome;
use crate::session::SessionError;
use tokio::sync::mpsc;

/// Full pod information plus optional usage
#[derive(Debug, Clone, PartialEq)]
pub struct PodReport {
    pub details: PodDetails,
    pub usage: Option<PodUsage>,
}

/// Messages drained by the interactive loop, in send order
#[derive(Debug)]
pub enum EngineEvent {
    SessionReady {
        generation: u64,
        context: String,
        metrics_available: bool,
    },
    SessionFailed {
        context: String,
        error: SessionError,
    },
    NamespacesLoaded {
        generation: u64,
        result: Result<Vec<String>, String>,
    },
    Refreshed(RefreshOutcome),
    /// `Ok(None)` when the pod vanished between listing and activation
    PodDetails {
        generation: u64,
        pod: PodRecord,
        result: Result<Option<PodReport>, String>,
    },
    /// Container names of a pod, fetched before an action that needs one
    Containers {
        generation: u64,
        pod: PodRecord,
        action: ActionKind,
        result: Result<Vec<String>, String>,
    },
    ActionFinished {
        result: Result<ActionOutput, String>,
    },
}

pub type EventSender = mpsc::UnboundedSender<EngineEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<EngineEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
