//! Network messages - communication between App and Network layers

use crate::models::UserRecord;
use crate::network::FetchError;

/// Generation number stamped on every fetch
pub type RequestId = u64;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// Fetch the whole user directory
    FetchUsers { id: RequestId },
    /// Abandon an in-flight fetch
    CancelFetch(RequestId),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A fetch settled, one way or the other. Cancelled fetches never report.
    Settled {
        id: RequestId,
        outcome: Result<Vec<UserRecord>, FetchError>,
        time_ms: u64,
    },
}
