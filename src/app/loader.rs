//! Data loader - the fetch lifecycle of the user directory
//!
//! The loader never performs I/O itself. `start()` moves to `Loading` and
//! hands back the commands the app actor forwards to the network layer; the
//! matching response comes back through `settle()`.
//!
//! Every fetch is stamped with a fresh generation number. Only the result of
//! the latest fetch may touch the state, and nothing is committed once the
//! loader has been torn down.

use chrono::{DateTime, Local};

use crate::messages::{NetworkCommand, RequestId};
use crate::models::UserRecord;
use crate::network::FetchError;

/// Progress of the directory fetch
#[derive(Clone, Debug, PartialEq, Default)]
pub enum LoadState {
    /// Before the first fetch starts
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Records in payload order
    Success(Vec<UserRecord>),
    /// Failure message, never empty
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn records(&self) -> &[UserRecord] {
        match self {
            LoadState::Success(records) => records,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Success(_) => "success",
            LoadState::Error(_) => "error",
        }
    }
}

/// Owns one `LoadState` and the bookkeeping around it
#[derive(Debug)]
pub struct DataLoader {
    state: LoadState,
    next_request_id: RequestId,
    pending: Option<RequestId>,
    mounted: bool,
    torn_down: bool,
    last_success_at: Option<DateTime<Local>>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        DataLoader {
            state: LoadState::Idle,
            next_request_id: 1,
            pending: None,
            mounted: false,
            torn_down: false,
            last_success_at: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Id of the fetch whose result would currently be accepted
    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn last_success_at(&self) -> Option<DateTime<Local>> {
        self.last_success_at
    }

    /// Activation hook. Fires the first fetch once per mount.
    pub fn on_mount(&mut self) -> Vec<NetworkCommand> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;
        self.torn_down = false;
        self.start()
    }

    /// Teardown hook. Drops the data and cancels whatever is in flight.
    pub fn on_unmount(&mut self) -> Option<NetworkCommand> {
        self.mounted = false;
        self.torn_down = true;
        self.state = LoadState::Idle;
        self.pending.take().map(NetworkCommand::CancelFetch)
    }

    /// Begin a new fetch cycle.
    ///
    /// A fetch still in flight is superseded: its cancellation is issued
    /// ahead of the new fetch so the network layer can drop the task.
    pub fn start(&mut self) -> Vec<NetworkCommand> {
        let id = self.next_id();
        let mut cmds = Vec::with_capacity(2);
        if let Some(previous) = self.pending.replace(id) {
            tracing::debug!(previous, id, "Superseding in-flight fetch");
            cmds.push(NetworkCommand::CancelFetch(previous));
        }
        self.state = LoadState::Loading;
        tracing::info!(id, "Fetch started");
        cmds.push(NetworkCommand::FetchUsers { id });
        cmds
    }

    /// Retry affordance; same as `start()`.
    pub fn refetch(&mut self) -> Vec<NetworkCommand> {
        self.start()
    }

    /// Commit the result of fetch `id`. Returns false when the result was stale.
    pub fn settle(&mut self, id: RequestId, outcome: Result<Vec<UserRecord>, FetchError>) -> bool {
        if self.torn_down || self.pending != Some(id) {
            tracing::debug!(id, pending = ?self.pending, "Dropping stale fetch result");
            return false;
        }
        self.pending = None;

        match outcome {
            Ok(records) => {
                tracing::info!(id, count = records.len(), "Fetch succeeded");
                self.last_success_at = Some(Local::now());
                self.state = LoadState::Success(records);
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Fetch failed");
                self.state = LoadState::Error(e.message().to_string());
            }
        }
        true
    }

    fn next_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}
