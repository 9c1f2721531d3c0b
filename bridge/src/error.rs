use std::{io, net::SocketAddr, time::Duration};
use thiserror::Error;

/// Failures moving a message across the local callback bridge.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The bot's receiver could not be reached, typically because it is not running.
    #[error("Failed to connect to callback receiver at {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The exchange did not complete within the allotted time.
    #[error("Callback bridge timed out after {0:?}")]
    Timeout(Duration),

    /// The peer closed the connection before sending a message.
    #[error("Callback bridge connection closed before a message was received")]
    Closed,

    /// Reading or writing a frame failed, including oversized frames.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A frame did not contain a valid message.
    #[error("Malformed callback bridge message: {0}")]
    Malformed(#[from] serde_json::Error),
}
