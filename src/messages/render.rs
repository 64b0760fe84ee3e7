//! Render state - data structure sent from App layer to UI for rendering

use crate::app::loader::LoadState;
use crate::constants::DEFAULT_USERS_URL;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Fetch
    pub load_state: LoadState,
    pub source: String,
    pub last_fetch_ms: Option<u64>,
    /// Local time of the last successful fetch, already formatted
    pub fetched_at: Option<String>,

    // Table
    pub selected_row: usize,

    // Popups
    pub show_help: bool,
}

impl RenderState {
    /// State drawn before the app actor publishes anything
    pub fn initial() -> Self {
        RenderState {
            source: String::from(DEFAULT_USERS_URL),
            ..Default::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_state.is_loading()
    }
}
