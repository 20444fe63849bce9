//! Pair with and control LG webOS TVs, caching pairing keys between runs.
//!
//! - [`key_store`]: device address to client key, persisted as JSON
//! - [`session`]: the orchestrator, failure classification and the
//!   device session traits
//! - [`commands`]: verb dispatch and result emission

pub mod cli;
pub mod commands;
pub mod error;
pub mod key_store;
pub mod logging;
pub mod output;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
