//! Wire types for the LG webOS "SSAP" protocol.
//!
//! SSAP (Second Screen Application Protocol) is JSON over a WebSocket. Every
//! frame is an [`Envelope`] tagged with a `type`; requests and their replies
//! share an `id`.
//!
//! 1. Client sends [`MessageKind::Register`] with a [`RegisterPayload`]
//! 2. TV answers [`MessageKind::Response`] with `pairingType: "PROMPT"` when it
//!    is showing the on-screen pairing prompt (first connection only)
//! 3. TV sends [`MessageKind::Registered`] carrying the `client-key`
//! 4. Client sends [`MessageKind::Request`] frames addressed by `ssap://` URI
//!
//! # Main Types
//!
//! - [`Envelope`] - Frame format shared by both directions
//! - [`RegisterPayload`] / [`Manifest`] - Registration handshake body
//! - [`ExternalInput`] / [`ExternalInputList`] - Switchable input sources
//! - [`ForegroundAppInfo`] - Active app, which identifies the current input

mod inputs;
mod message;
mod register;

pub use inputs::{ExternalInput, ExternalInputList, ForegroundAppInfo, SwitchInput, uri};
pub use message::{Envelope, MessageKind, REGISTER_ID};
pub use register::{Manifest, PairingType, RegisterPayload, SignedManifest, Signature};
