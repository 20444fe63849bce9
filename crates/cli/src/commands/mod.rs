//! Command dispatch: one verb, one orchestrated session, one result envelope.

mod progress;

use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::cli::Cli;
use crate::error::{LgtvError, Result};
use crate::key_store::KeyStore;
use crate::output::{
	CommandInputs, CurrentData, InputsData, OutputFormat, ResultBuilder, SessionInfo, SwitchData, TextOutput,
	print_result,
};
use crate::session::{
	DeviceConnector, Operation, OperationOutput, SessionManager, SessionReport, WebOsConnector,
};

pub async fn dispatch(cli: Cli, format: OutputFormat) -> Result<()> {
	let connector = WebOsConnector::new(cli.client_config());
	let mut store = KeyStore::open(cli.keys_path());
	info!(target: "lgtv.session", keys = %store.path().display(), "key store opened");

	execute(&connector, &mut store, &cli.device, &cli.operation(), format).await
}

/// Runs `operation` against `device` and emits the result.
///
/// Progress lines go to stderr in text mode only.
pub async fn execute<C: DeviceConnector>(
	connector: &C,
	store: &mut KeyStore,
	device: &str,
	operation: &Operation,
	format: OutputFormat,
) -> Result<()> {
	let started = Instant::now();

	let mut manager = SessionManager::new(connector, store);
	if format == OutputFormat::Text {
		manager = manager.with_observer(progress::print_event);
	}
	let report = manager.run(device, operation).await;

	emit(report, operation, started, format)
}

fn emit(report: SessionReport, operation: &Operation, started: Instant, format: OutputFormat) -> Result<()> {
	let command = operation.name();
	let SessionReport {
		device_id,
		credential,
		key_issued,
		warnings,
		outcome,
	} = report;

	let output = match outcome {
		Ok(output) => output,
		Err(failure) => {
			return Err(LgtvError::Session {
				command,
				device: device_id,
				failure,
				warnings,
			});
		}
	};

	let inputs = CommandInputs {
		device: device_id.clone(),
		input: match operation {
			Operation::SwitchInput { input_id } => Some(input_id.clone()),
			_ => None,
		},
	};
	let envelope = Envelope {
		command,
		inputs,
		session: SessionInfo::new(credential, key_issued),
		warnings,
		started,
		format,
	};

	match output {
		OperationOutput::Inputs(list) => envelope.print(InputsData::new(&device_id, list)),
		OperationOutput::Current { input } => envelope.print(CurrentData {
			device: device_id,
			input,
		}),
		OperationOutput::Switched { input_id, previous } => envelope.print(SwitchData {
			device: device_id,
			input: input_id,
			previous,
		}),
	}
	Ok(())
}

struct Envelope {
	command: &'static str,
	inputs: CommandInputs,
	session: SessionInfo,
	warnings: Vec<String>,
	started: Instant,
	format: OutputFormat,
}

impl Envelope {
	fn print<T: Serialize + TextOutput>(self, data: T) {
		let result = ResultBuilder::new(self.command)
			.started_at(self.started)
			.inputs(self.inputs)
			.data(data)
			.session(self.session)
			.warnings(self.warnings, "session")
			.build();
		print_result(&result, self.format);
	}
}
