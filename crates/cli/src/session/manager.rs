//! One device operation end to end: key lookup, open, execute, close.

use tracing::{debug, info, warn};

use super::device::{DeviceConnector, DeviceError, DeviceSession, OpenedSession};
use super::outcome::{
	CredentialSource, Operation, OperationOutput, SessionEvent, SessionFailure, SessionReport, Stage,
};
use crate::key_store::KeyStore;

/// Callback receiving [`SessionEvent`]s as a run advances.
pub type Observer<'a> = Box<dyn FnMut(&SessionEvent) + Send + 'a>;

/// Runs operations against a device with cached-key handling.
///
/// The session is closed exactly once per run that managed to open one,
/// whatever the outcome. Failures are classified but never retried.
pub struct SessionManager<'a, C: DeviceConnector> {
	connector: &'a C,
	store: &'a mut KeyStore,
	observer: Option<Observer<'a>>,
}

impl<'a, C: DeviceConnector> SessionManager<'a, C> {
	pub fn new(connector: &'a C, store: &'a mut KeyStore) -> Self {
		Self {
			connector,
			store,
			observer: None,
		}
	}

	pub fn with_observer(mut self, observer: impl FnMut(&SessionEvent) + Send + 'a) -> Self {
		self.observer = Some(Box::new(observer));
		self
	}

	/// Executes `operation` against `device_id`.
	pub async fn run(&mut self, device_id: &str, operation: &Operation) -> SessionReport {
		let cached = self.store.get(device_id).map(str::to_owned);
		let credential = match cached {
			Some(_) => CredentialSource::Cached,
			None => CredentialSource::PairingRequired,
		};
		info!(target: "lgtv.session", device = device_id, ?credential, op = operation.name(), "starting");
		self.emit(SessionEvent::CredentialLookup(credential));
		self.emit(SessionEvent::Connecting {
			device_id: device_id.to_string(),
		});

		let mut warnings = Vec::new();
		let OpenedSession { mut session, issued_key } =
			match self.connector.open(device_id, cached.as_deref()).await {
				Ok(opened) => opened,
				Err(e) => {
					warn!(target: "lgtv.session", device = device_id, error = %e, "open failed");
					let failure = SessionFailure::new(Stage::Open, e);
					return self.report(device_id, credential, false, warnings, Err(failure));
				}
			};
		self.emit(SessionEvent::Connected);

		let key_issued = match issued_key.filter(|key| !key.is_empty() && cached.as_deref() != Some(key.as_str())) {
			Some(key) => {
				self.store.set(device_id, &key);
				self.emit(SessionEvent::KeyIssued);
				true
			}
			None => false,
		};

		let outcome = self.execute(&mut session, operation, &mut warnings).await;
		session.close().await;
		debug!(target: "lgtv.session", device = device_id, ok = outcome.is_ok(), "session closed");

		self.report(device_id, credential, key_issued, warnings, outcome)
	}

	async fn execute(
		&mut self,
		session: &mut C::Session,
		operation: &Operation,
		warnings: &mut Vec<String>,
	) -> Result<OperationOutput, SessionFailure> {
		let failed = |e: DeviceError| SessionFailure::new(Stage::Execute, e);

		match operation {
			Operation::ListInputs => session.list_inputs().await.map(OperationOutput::Inputs).map_err(failed),
			Operation::CurrentInput => session
				.current_input()
				.await
				.map(|input| OperationOutput::Current { input })
				.map_err(failed),
			Operation::SwitchInput { input_id } => {
				let previous = match session.current_input().await {
					Ok(input) => {
						self.emit(SessionEvent::CurrentInput(input.clone()));
						Some(input)
					}
					Err(e) => {
						warn!(target: "lgtv.session", error = %e, "could not read current input");
						self.emit(SessionEvent::CurrentInputUnavailable(e.message.clone()));
						warnings.push(format!("Could not read current input: {e}"));
						None
					}
				};

				self.emit(SessionEvent::Switching(input_id.clone()));
				session.set_input(input_id).await.map_err(failed)?;
				info!(target: "lgtv.session", input = %input_id, "switched");
				Ok(OperationOutput::Switched {
					input_id: input_id.clone(),
					previous,
				})
			}
		}
	}

	fn report(
		&mut self,
		device_id: &str,
		credential: CredentialSource,
		key_issued: bool,
		run_warnings: Vec<String>,
		outcome: Result<OperationOutput, SessionFailure>,
	) -> SessionReport {
		let mut warnings = self.store.take_warnings();
		warnings.extend(run_warnings);
		SessionReport {
			device_id: device_id.to_string(),
			credential,
			key_issued,
			warnings,
			outcome,
		}
	}

	fn emit(&mut self, event: SessionEvent) {
		if let Some(observer) = self.observer.as_mut() {
			observer(&event);
		}
	}
}
