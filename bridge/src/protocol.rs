//! Messages exchanged over the callback bridge and their framing.

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{Framed, LengthDelimitedCodec};

use crate::error::BridgeError;

/// Largest frame either side will accept.
pub const MAX_FRAME_LENGTH: usize = 16 * 1024;

/// Authorization code and state token forwarded from the relay to the bot.
///
/// Both fields are opaque to the bridge. The code is single-use and short-lived and is
/// redacted from `Debug` output so it never reaches the logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackEnvelope {
    pub code: String,
    pub state: String,
}

impl CallbackEnvelope {
    pub fn new(code: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            state: state.into(),
        }
    }
}

impl std::fmt::Debug for CallbackEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackEnvelope")
            .field("code", &"[REDACTED]")
            .field("state", &"[REDACTED]")
            .finish()
    }
}

/// Outcome of a callback, returned from the bot to the relay.
///
/// `message` is always present and is safe to show to the end user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackResult {
    pub success: bool,
    pub message: String,
}

impl CallbackResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// One end of a bridge connection, exchanging length-prefixed JSON messages.
pub struct BridgeConnection<S> {
    framed: Framed<S, LengthDelimitedCodec>,
}

impl<S> BridgeConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps a connected stream.
    pub fn new(stream: S) -> Self {
        let codec = LengthDelimitedCodec::builder()
            .max_frame_length(MAX_FRAME_LENGTH)
            .new_codec();

        Self {
            framed: Framed::new(stream, codec),
        }
    }

    /// Serializes and writes a single message.
    ///
    /// # Returns
    /// - `Ok(())` - Frame written and flushed
    /// - `Err(BridgeError::Malformed)` - Message failed to serialize
    /// - `Err(BridgeError::Io)` - Write failed or message exceeds the frame limit
    pub async fn send<T: Serialize>(&mut self, message: &T) -> Result<(), BridgeError> {
        let payload = serde_json::to_vec(message)?;
        self.framed.send(Bytes::from(payload)).await?;

        Ok(())
    }

    /// Reads and deserializes a single message.
    ///
    /// # Returns
    /// - `Ok(T)` - Message received
    /// - `Err(BridgeError::Closed)` - Peer closed the connection first
    /// - `Err(BridgeError::Io)` - Read failed or the frame exceeds the frame limit
    /// - `Err(BridgeError::Malformed)` - Frame was not a valid `T`
    pub async fn recv<T: DeserializeOwned>(&mut self) -> Result<T, BridgeError> {
        let frame = self.framed.next().await.ok_or(BridgeError::Closed)??;

        Ok(serde_json::from_slice(&frame)?)
    }

    /// Flushes pending writes and shuts down the write half.
    pub async fn close(mut self) -> Result<(), BridgeError> {
        SinkExt::<Bytes>::close(&mut self.framed).await?;

        Ok(())
    }
}
