//! Testing infrastructure for lgtv-cli.
//!
//! [`MockConnector`] implements [`DeviceConnector`] without touching the
//! network. Connector and sessions share one state, so a test configures
//! the device up front and inspects the recorded [`MockAction`]s after the
//! run.
//!
//! # Example
//!
//! ```ignore
//! use crate::testing::{MockAction, MockConnector};
//!
//! let connector = MockConnector::new();
//! connector.issue_key("ABC123");
//! connector.set_inputs(vec![InputDescriptor::new("HDMI_1", "HDMI 1")]);
//!
//! let report = SessionManager::new(&connector, &mut store).run("10.0.0.5", &Operation::ListInputs).await;
//! assert_eq!(connector.close_count(), 1);
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::session::{DeviceConnector, DeviceError, DeviceSession, InputDescriptor, OpenedSession};

/// Calls recorded by [`MockConnector`] and [`MockSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockAction {
	Open { device_id: String, client_key: Option<String> },
	CurrentInput,
	ListInputs,
	SetInput { input_id: String },
	Close,
}

#[derive(Debug, Default)]
struct MockState {
	issued_key: Option<String>,
	open_error: Option<DeviceError>,
	current_input: Option<String>,
	current_error: Option<DeviceError>,
	inputs: Vec<InputDescriptor>,
	list_error: Option<DeviceError>,
	set_error: Option<DeviceError>,
	actions: Vec<MockAction>,
}

/// Scriptable device connector.
///
/// Unless configured otherwise, `open` succeeds without issuing a key,
/// the device has no inputs, and reading the current input fails.
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
	state: Arc<Mutex<MockState>>,
}

impl MockConnector {
	pub fn new() -> Self {
		Self::default()
	}

	/// Key reported as issued by every successful `open`.
	pub fn issue_key(&self, key: &str) {
		self.state.lock().unwrap().issued_key = Some(key.to_string());
	}

	pub fn fail_open(&self, err: DeviceError) {
		self.state.lock().unwrap().open_error = Some(err);
	}

	pub fn set_current_input(&self, input: &str) {
		self.state.lock().unwrap().current_input = Some(input.to_string());
	}

	pub fn fail_current_input(&self, err: DeviceError) {
		self.state.lock().unwrap().current_error = Some(err);
	}

	pub fn set_inputs(&self, inputs: Vec<InputDescriptor>) {
		self.state.lock().unwrap().inputs = inputs;
	}

	pub fn fail_list_inputs(&self, err: DeviceError) {
		self.state.lock().unwrap().list_error = Some(err);
	}

	pub fn fail_set_input(&self, err: DeviceError) {
		self.state.lock().unwrap().set_error = Some(err);
	}

	/// Returns all recorded actions in call order.
	pub fn actions(&self) -> Vec<MockAction> {
		self.state.lock().unwrap().actions.clone()
	}

	/// Number of [`MockAction::Close`] calls recorded.
	pub fn close_count(&self) -> usize {
		self.actions().iter().filter(|a| **a == MockAction::Close).count()
	}

	fn record(&self, action: MockAction) {
		self.state.lock().unwrap().actions.push(action);
	}
}

#[async_trait]
impl DeviceConnector for MockConnector {
	type Session = MockSession;

	async fn open(&self, device_id: &str, client_key: Option<&str>) -> Result<OpenedSession<MockSession>, DeviceError> {
		self.record(MockAction::Open {
			device_id: device_id.to_string(),
			client_key: client_key.map(str::to_string),
		});

		let state = self.state.lock().unwrap();
		if let Some(err) = state.open_error.clone() {
			return Err(err);
		}
		Ok(OpenedSession {
			session: MockSession {
				connector: self.clone(),
			},
			issued_key: state.issued_key.clone(),
		})
	}
}

/// Session handed out by [`MockConnector`].
#[derive(Debug)]
pub struct MockSession {
	connector: MockConnector,
}

impl MockSession {
	fn with_state<T>(&self, f: impl FnOnce(&MockState) -> T) -> T {
		f(&self.connector.state.lock().unwrap())
	}
}

#[async_trait]
impl DeviceSession for MockSession {
	async fn current_input(&mut self) -> Result<String, DeviceError> {
		self.connector.record(MockAction::CurrentInput);
		self.with_state(|s| match (&s.current_error, &s.current_input) {
			(Some(err), _) => Err(err.clone()),
			(None, Some(input)) => Ok(input.clone()),
			(None, None) => Err(DeviceError::other("no current input configured")),
		})
	}

	async fn list_inputs(&mut self) -> Result<Vec<InputDescriptor>, DeviceError> {
		self.connector.record(MockAction::ListInputs);
		self.with_state(|s| match &s.list_error {
			Some(err) => Err(err.clone()),
			None => Ok(s.inputs.clone()),
		})
	}

	async fn set_input(&mut self, input_id: &str) -> Result<(), DeviceError> {
		self.connector.record(MockAction::SetInput {
			input_id: input_id.to_string(),
		});
		self.with_state(|s| match &s.set_error {
			Some(err) => Err(err.clone()),
			None => Ok(()),
		})
	}

	async fn close(&mut self) {
		self.connector.record(MockAction::Close);
	}
}
