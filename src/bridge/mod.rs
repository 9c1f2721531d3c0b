//! Bot side of the callback bridge.
//!
//! The relay process forwards each OAuth redirect over a loopback TCP connection; the
//! receiver here completes the signup and answers with exactly one `CallbackResult`.

pub mod receiver;
