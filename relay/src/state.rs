use anzt_bridge::BridgeSender;

/// Shared state for the relay's request handlers.
#[derive(Clone)]
pub struct RelayState {
    /// Client for the bot's callback receiver. Opens a new connection per request.
    pub sender: BridgeSender,
}

impl RelayState {
    pub fn new(sender: BridgeSender) -> Self {
        Self { sender }
    }
}
