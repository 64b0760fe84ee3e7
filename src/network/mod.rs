//! Network layer - fetching the user directory
//!
//! The Network actor receives fetch commands, runs them against a
//! `UserSource` and sends back responses.

pub mod actor;
pub mod error;
pub mod source;

pub use actor::NetworkActor;
pub use error::FetchError;
pub use source::{decode_users, HttpUserSource, UserSource};
