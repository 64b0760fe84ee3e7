//! # Roster TUI
//!
//! A terminal viewer for the JSONPlaceholder user directory.
//!
//! ## Features
//! - One GET against the directory endpoint at startup
//! - Name / Location / Username table
//! - Spinner while loading, inline error with manual refetch
//! - Optional YAML config (endpoint, timeout, log file)
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (Data loader state machine)
//! - Network Layer (Tokio runtime)

pub mod config;
pub mod constants;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{Address, Company, Geo, UserRecord};
pub use config::Config;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, DataLoader, LoadState};
pub use network::{FetchError, HttpUserSource, NetworkActor, UserSource};
