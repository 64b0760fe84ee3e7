//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Directory of users served by JSONPlaceholder
pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Message stored when a failure carries no text of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "roster.log";

/// Config directory name under the user's home
pub const CONFIG_DIR_NAME: &str = ".roster-tui";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Application name
pub const APP_NAME: &str = "Roster TUI";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent sent with every fetch
pub const USER_AGENT: &str = concat!("roster-tui/", env!("CARGO_PKG_VERSION"));
