
use std::path::PathBuf;
use std::time::Duration;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{Parser, Subcommand};
use lgtv_runtime::{ClientConfig, DEFAULT_PORT};

use crate::key_store::{KEYS_FILE_ENV, default_keys_path};
use crate::output::OutputFormat;
use crate::session::Operation;

/// Returns clap Styles configured to match cargo's help output colors.
pub fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().bold())
		.usage(AnsiColor::Green.on_default().bold())
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Cyan.on_default())
		.valid(AnsiColor::Cyan.on_default())
}

/// Pair with and switch inputs on LG webOS TVs.
#[derive(Parser, Debug)]
#[command(name = "lgtv")]
#[command(about = "Pair with and switch inputs on LG webOS TVs")]
#[command(version)]
#[command(styles = cli_styles())]
#[command(arg_required_else_help = true)]
#[command(after_help = "\
First-time setup:
  1. Run `lgtv <DEVICE> list` and accept the pairing prompt on the TV
  2. The key is saved automatically
  3. Later commands connect without a prompt")]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: text (default), json, ndjson, or toon
	#[arg(short = 'f', long, global = true, value_enum, default_value = "text")]
	pub format: OutputFormat,

	/// File holding saved pairing keys [default: ~/.lg_tv_keys.json]
	#[arg(long, global = true, value_name = "FILE", env = KEYS_FILE_ENV)]
	pub keys_file: Option<PathBuf>,

	/// TV WebSocket port
	#[arg(long, global = true, value_name = "PORT", default_value_t = DEFAULT_PORT)]
	pub port: u16,

	/// Connect and request timeout in milliseconds
	#[arg(long, global = true, value_name = "MS", default_value_t = 10_000)]
	pub timeout: u64,

	/// How long to wait for the pairing prompt to be accepted, in seconds
	#[arg(long, global = true, value_name = "SECS", default_value_t = 60)]
	pub pairing_timeout: u64,

	/// TV address (IP, hostname, or ws:// URL)
	#[arg(value_name = "DEVICE")]
	pub device: String,

	/// Defaults to `list`
	#[command(subcommand)]
	pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
	/// List the TV's inputs
	List,
	/// Show the active input
	Current,
	/// Switch the active input
	Switch {
		/// Input id as shown by `list` (e.g. HDMI_1)
		#[arg(value_name = "INPUT")]
		input: String,
	},
}

impl Cli {
	/// Operation selected by the verb.
	pub fn operation(&self) -> Operation {
		match &self.command {
			None | Some(Commands::List) => Operation::ListInputs,
			Some(Commands::Current) => Operation::CurrentInput,
			Some(Commands::Switch { input }) => Operation::SwitchInput {
				input_id: input.clone(),
			},
		}
	}

	/// Runtime settings from the connection flags.
	pub fn client_config(&self) -> ClientConfig {
		let timeout = Duration::from_millis(self.timeout);
		ClientConfig {
			port: self.port,
			connect_timeout: timeout,
			pairing_timeout: Duration::from_secs(self.pairing_timeout),
			request_timeout: timeout,
		}
	}

	/// Key file to use, honouring `--keys-file` and the environment.
	pub fn keys_path(&self) -> PathBuf {
		self.keys_file.clone().unwrap_or_else(default_keys_path)
	}
}
