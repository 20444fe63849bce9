//! [`DeviceConnector`] backed by the webOS runtime.

use async_trait::async_trait;
use lgtv_runtime::{ClientConfig, Error as RuntimeError, WebOsClient};

use super::device::{DeviceConnector, DeviceError, DeviceErrorKind, DeviceSession, InputDescriptor, OpenedSession};

impl From<RuntimeError> for DeviceError {
	fn from(err: RuntimeError) -> Self {
		let kind = match &err {
			e if e.is_pairing() => DeviceErrorKind::Pairing,
			e if e.is_unreachable() => DeviceErrorKind::Unreachable,
			e if e.is_timeout() => DeviceErrorKind::Timeout,
			RuntimeError::Remote { .. } => DeviceErrorKind::Rejected,
			RuntimeError::ChannelClosed | RuntimeError::TransportError(_) => DeviceErrorKind::Closed,
			RuntimeError::ProtocolError(_) | RuntimeError::Json(_) => DeviceErrorKind::Protocol,
			_ => DeviceErrorKind::Other,
		};
		DeviceError::new(kind, err.to_string())
	}
}

/// Opens [`WebOsSession`]s over SSAP.
#[derive(Debug, Clone, Default)]
pub struct WebOsConnector {
	config: ClientConfig,
}

impl WebOsConnector {
	pub fn new(config: ClientConfig) -> Self {
		Self { config }
	}
}

#[async_trait]
impl DeviceConnector for WebOsConnector {
	type Session = WebOsSession;

	async fn open(&self, device_id: &str, client_key: Option<&str>) -> Result<OpenedSession<WebOsSession>, DeviceError> {
		let client = WebOsClient::connect(device_id, client_key, &self.config).await?;
		let issued_key = Some(client.client_key().to_string());
		Ok(OpenedSession {
			session: WebOsSession { client },
			issued_key,
		})
	}
}

pub struct WebOsSession {
	client: WebOsClient,
}

#[async_trait]
impl DeviceSession for WebOsSession {
	async fn current_input(&mut self) -> Result<String, DeviceError> {
		Ok(self.client.current_input().await?)
	}

	async fn list_inputs(&mut self) -> Result<Vec<InputDescriptor>, DeviceError> {
		let inputs = self.client.list_inputs().await?;
		Ok(inputs
			.into_iter()
			.map(|input| InputDescriptor {
				id: input.id,
				label: input.label,
				app_id: input.app_id,
			})
			.collect())
	}

	async fn set_input(&mut self, input_id: &str) -> Result<(), DeviceError> {
		Ok(self.client.set_input(input_id).await?)
	}

	async fn close(&mut self) {
		self.client.disconnect().await;
	}
}
