//! webOS Runtime - transport, correlation and pairing for LG TVs
//!
//! This crate talks to the TV's SSAP endpoint:
//!
//! - **Transport**: WebSocket framing of JSON values
//! - **Connection**: request/response correlation by message id
//! - **Client**: registration handshake (pairing prompt, client key) and
//!   input commands
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  WebOsClient │  register, list/current/switch input
//! └──────┬───────┘
//! ┌──────▼───────┐
//! │  Connection  │  id routing, timeouts
//! └──────┬───────┘
//! ┌──────▼───────┐
//! │  Transport   │  WebSocket <-> serde_json::Value
//! └──────────────┘
//! ```

pub mod client;
pub mod connection;
pub mod error;
pub mod transport;

#[cfg(test)]
pub(crate) mod fake_tv;

pub use client::{ClientConfig, DEFAULT_PORT, WebOsClient};
pub use connection::Connection;
pub use error::{Error, Result};
pub use transport::{TransportParts, TransportReceiver, TransportSender, WebSocketTransport};
