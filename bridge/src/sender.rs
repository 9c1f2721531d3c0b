//! Relay side of the bridge: forwards one envelope and waits for one result.

use std::{net::SocketAddr, time::Duration};
use tokio::net::TcpStream;

use crate::{
    error::BridgeError,
    protocol::{BridgeConnection, CallbackEnvelope, CallbackResult},
};

/// Shown to the end user when the bot's receiver cannot be reached in time.
pub const UNREACHABLE_MESSAGE: &str =
    "The registration service is temporarily unavailable, please try again shortly.";

/// Client for the bot's callback receiver.
///
/// Every call opens a fresh connection which carries a single envelope and a single
/// result. The whole exchange, including connecting, is bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct BridgeSender {
    addr: SocketAddr,
    timeout: Duration,
}

impl BridgeSender {
    /// Creates a sender targeting the receiver at `addr`.
    ///
    /// # Arguments
    /// - `addr` - Loopback address the bot's receiver listens on
    /// - `timeout` - Upper bound for connecting, sending and awaiting the result
    pub fn new(addr: SocketAddr, timeout: Duration) -> Self {
        Self { addr, timeout }
    }

    /// Forwards an envelope to the receiver and returns its verdict.
    ///
    /// # Returns
    /// - `Ok(CallbackResult)` - The receiver processed the callback (successfully or not)
    /// - `Err(BridgeError::Connect)` - Receiver is not accepting connections
    /// - `Err(BridgeError::Timeout)` - No result arrived within the timeout
    /// - `Err(BridgeError)` - Connection dropped or sent an invalid result
    pub async fn forward(
        &self,
        envelope: &CallbackEnvelope,
    ) -> Result<CallbackResult, BridgeError> {
        match tokio::time::timeout(self.timeout, self.exchange(envelope)).await {
            Ok(result) => result,
            Err(_) => Err(BridgeError::Timeout(self.timeout)),
        }
    }

    async fn exchange(&self, envelope: &CallbackEnvelope) -> Result<CallbackResult, BridgeError> {
        let stream = TcpStream::connect(self.addr)
            .await
            .map_err(|source| BridgeError::Connect {
                addr: self.addr,
                source,
            })?;

        let mut connection = BridgeConnection::new(stream);
        connection.send(envelope).await?;

        let result = connection.recv::<CallbackResult>().await?;
        tracing::debug!(success = result.success, "Received callback result from bot");

        Ok(result)
    }
}
