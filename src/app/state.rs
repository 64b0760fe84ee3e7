//! App state - pure data structure with no I/O logic

use crate::app::loader::DataLoader;
use crate::messages::RenderState;

/// Main application state - pure data, no I/O
pub struct AppState {
    // Fetch lifecycle
    pub loader: DataLoader,
    pub source: String,
    pub last_fetch_ms: Option<u64>,

    // Table
    pub selected_row: usize,

    // Popups
    pub show_help: bool,
}

impl AppState {
    pub fn new(source: impl Into<String>) -> Self {
        AppState {
            loader: DataLoader::new(),
            source: source.into(),
            last_fetch_ms: None,
            selected_row: 0,
            show_help: false,
        }
    }

    /// Number of rows currently shown in the table
    pub fn row_count(&self) -> usize {
        self.loader.state().records().len()
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            load_state: self.loader.state().clone(),
            source: self.source.clone(),
            selected_row: self.selected_row,
            last_fetch_ms: self.last_fetch_ms,
            fetched_at: self
                .loader
                .last_success_at()
                .map(|t| t.format("%H:%M:%S").to_string()),
            show_help: self.show_help,
        }
    }
}
