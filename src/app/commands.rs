//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::messages::{NetworkCommand, NetworkResponse};

impl AppState {
    // ========================
    // Fetch lifecycle
    // ========================

    pub fn mount(&mut self) -> Vec<NetworkCommand> {
        self.loader.on_mount()
    }

    pub fn unmount(&mut self) -> Option<NetworkCommand> {
        self.selected_row = 0;
        self.loader.on_unmount()
    }

    pub fn refetch(&mut self) -> Vec<NetworkCommand> {
        self.selected_row = 0;
        self.loader.refetch()
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let NetworkResponse::Settled { id, outcome, time_ms } = response;
        if self.loader.settle(id, outcome) {
            self.last_fetch_ms = Some(time_ms);
            self.clamp_selection();
        }
    }

    // ========================
    // Table navigation
    // ========================

    pub fn select_prev(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected_row + 1 < self.row_count() {
            self.selected_row += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_row = self.row_count().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected_row = self.selected_row.min(self.row_count().saturating_sub(1));
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
