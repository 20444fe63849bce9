//! Device session orchestration.
//!
//! [`SessionManager`] looks up a cached key, opens a [`DeviceSession`] through
//! a [`DeviceConnector`], runs one [`Operation`], classifies any failure and
//! always closes the session before returning a [`SessionReport`].

pub mod classify;
pub mod device;
pub mod manager;
pub mod outcome;
pub mod webos;


pub use classify::{FailureClass, PAIRING_GUIDANCE, classify, classify_message};
pub use device::{DeviceConnector, DeviceError, DeviceErrorKind, DeviceSession, InputDescriptor, OpenedSession};
pub use manager::{Observer, SessionManager};
pub use outcome::{
	CredentialSource, Operation, OperationOutput, SessionEvent, SessionFailure, SessionReport, Stage,
};
pub use webos::{WebOsConnector, WebOsSession};
