use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub fn init_logging(verbosity: u8) {
	// 0 = errors only; progress and results are printed, not logged
	// 1 (-v) = lifecycle events (lgtv.keys, lgtv.session, lgtv.runtime)
	// 2+ (-vv) = debug, including SSAP frames
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.init();
}

fn default_filter(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "error",
		1 => "warn,lgtv.keys=info,lgtv.session=info,lgtv.runtime=info",
		_ => "debug,tungstenite=info,tokio_tungstenite=info",
	}
}
