//! HTTP transport with retry logic and error classification.
//!
//! [`AsyncTransport`] and [`Transport`] share header construction, response
//! classification and the retry state machine; only the I/O differs.

mod blocking;
mod client;
mod headers;
mod response;
mod retry;

#[cfg(test)]
pub(crate) mod test_support;

pub use blocking::Transport;
pub use client::AsyncTransport;
