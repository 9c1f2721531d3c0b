use std::{net::SocketAddr, panic::AssertUnwindSafe, time::Duration};

use anzt_bridge::{BridgeConnection, BridgeError, CallbackEnvelope, CallbackResult};
use futures::FutureExt;
use tokio::net::{TcpListener, TcpStream};

use crate::{
    error::{
        config::ConfigError,
        signup::{SignupError, SIGNUP_SUCCESS_MESSAGE},
        AppError,
    },
    service::{incident::IncidentReporter, signup::SignupService},
};

/// How long a connected relay has to deliver its envelope.
const ENVELOPE_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Returned when the relay sent something other than a callback envelope.
const MALFORMED_MESSAGE: &str = "The registration request was malformed, please try again.";

/// Binds the receiver's listener.
///
/// # Arguments
/// - `addr` - Address to listen on, must be a loopback address since the bridge
///   carries authorization codes
///
/// # Returns
/// - `Ok(TcpListener)` - Listener bound and ready
/// - `Err(AppError::ConfigErr)` - `addr` is not a loopback address
/// - `Err(AppError::IoErr)` - Binding failed, e.g. the port is taken
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, AppError> {
    if !addr.ip().is_loopback() {
        return Err(ConfigError::InvalidEnvVar {
            name: "BRIDGE_BIND_ADDR".to_string(),
            reason: format!("{addr} is not a loopback address"),
        }
        .into());
    }

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Callback receiver listening on {}", listener.local_addr()?);

    Ok(listener)
}

/// Accepts callback connections from the relay and completes signups.
///
/// Each connection is handled in its own task. Failures and panics while handling one
/// connection are turned into a failed `CallbackResult` and never reach the accept loop.
#[derive(Clone)]
pub struct CallbackReceiver {
    signup: SignupService,
    incidents: IncidentReporter,
}

impl CallbackReceiver {
    pub fn new(signup: SignupService, incidents: IncidentReporter) -> Self {
        Self { signup, incidents }
    }

    /// Serves connections until the process exits.
    pub async fn serve(self, listener: TcpListener) {
        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    // Usually descriptor exhaustion; back off instead of spinning.
                    tracing::warn!("Failed to accept callback connection: {}", e);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    continue;
                }
            };

            tracing::debug!("Accepted callback connection from {}", peer);

            let receiver = self.clone();
            tokio::spawn(async move {
                if let Err(e) = receiver.handle_connection(stream).await {
                    tracing::warn!("Callback connection from {} failed: {}", peer, e);
                }
            });
        }
    }

    /// Reads one envelope, writes one result, then closes the connection.
    async fn handle_connection(&self, stream: TcpStream) -> Result<(), BridgeError> {
        let mut connection = BridgeConnection::new(stream);

        let received =
            match tokio::time::timeout(ENVELOPE_READ_TIMEOUT, connection.recv::<CallbackEnvelope>())
                .await
            {
                Ok(received) => received,
                Err(_) => return Err(BridgeError::Timeout(ENVELOPE_READ_TIMEOUT)),
            };

        let result = match received {
            Ok(envelope) => self.process(&envelope).await,
            Err(BridgeError::Malformed(e)) => {
                tracing::warn!("Received malformed callback envelope: {}", e);
                CallbackResult::failure(MALFORMED_MESSAGE)
            }
            Err(e) => return Err(e),
        };

        connection.send(&result).await?;
        connection.close().await
    }

    /// Completes the signup for one envelope and renders the outcome.
    ///
    /// Always produces a result, even if signup processing panics.
    pub async fn process(&self, envelope: &CallbackEnvelope) -> CallbackResult {
        let outcome = AssertUnwindSafe(self.signup.complete(&envelope.code, &envelope.state))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(SignupError::Internal(panic_message(panic.as_ref()))));

        match outcome {
            Ok(_) => CallbackResult::success(SIGNUP_SUCCESS_MESSAGE),
            Err(e) => {
                if e.is_internal() {
                    self.incidents
                        .report("Signup callback failed", &e.to_string())
                        .await;
                } else {
                    tracing::info!("Signup rejected: {}", e);
                }

                CallbackResult::failure(e.user_message())
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("signup processing panicked: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("signup processing panicked: {message}")
    } else {
        "signup processing panicked".to_string()
    }
}
