//! Local callback bridge between the OAuth redirect relay and the bot process.
//!
//! The relay receives the identity provider's redirect and forwards the `code`/`state`
//! pair to the bot over a loopback TCP connection. Each connection carries exactly one
//! [`CallbackEnvelope`] from the relay followed by exactly one [`CallbackResult`] from
//! the bot, then closes.
//!
//! # Wire format
//!
//! Both messages are JSON documents framed with a 4-byte big-endian length prefix
//! (see [`protocol::BridgeConnection`]). The format is independent of either side's
//! implementation language.

pub mod error;
pub mod protocol;
pub mod sender;

pub use error::BridgeError;
pub use protocol::{BridgeConnection, CallbackEnvelope, CallbackResult};
pub use sender::BridgeSender;
