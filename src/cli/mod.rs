//! CLI module for sseconv.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - One-shot conversion of SSE text, files and event objects
//! - Launching the HTTP service and the stdio tool server
//!
//! # Usage
//!
//! ```ignore
//! use sseconv::cli::{parse_args, run_cli_command};
//!
//! let code = match parse_args(std::env::args()) {
//!     Ok(command) => run_cli_command(command).await?,
//!     Err(e) => e.exit_code(),
//! };
//! std::process::exit(code);
//! ```
//!
//! Converted records go to stdout; status and error lines go to stderr.

pub mod args;
pub mod convert;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, ConvertArgs, InputSource};
pub use convert::{run_convert, ConvertOutcome};
pub use version::{version_line, VERSION};

use color_eyre::Result;

use crate::config::ServerConfig;
use crate::converter::Converter;
use crate::error::ConvertError;

pub const USAGE: &str = "\
Usage:
  sseconv [options]
  sseconv serve [--host <host>] [--port <port>] [--strategy <name>]
  sseconv mcp [--strategy <name>]

Options:
  --raw <sse-data>     Convert an SSE string
  --file <file-path>   Convert SSE data read from a file
  --object <json>      Convert a JSON event object
  --output <file>      Write the result to a file (default: stdout)
  --timestamp <ts>     Fallback timestamp
  --strategy <name>    Timestamp strategy: payload (default) or synthetic
  -h, --help           Show this help
  -V, --version        Show version

Commands:
  serve                Run the HTTP service (env: HOST, PORT, SSECONV_MAX_BODY_BYTES)
  mcp                  Run the tool server on stdin/stdout

Examples:
  sseconv --raw \"event:message\\ndata:{\\\"test\\\":\\\"data\\\"}\\n\\n\"
  sseconv --file input.txt --output preset-data/converted.json
  sseconv --object '{\"event\":\"message\",\"sseId\":\"123\",\"content\":\"hello\"}'
";

/// Run a parsed command and return the process exit code.
///
/// Only failures to start or run a server surface as `Err`; conversion
/// failures are reported on stderr and mapped to an exit code.
pub async fn run_cli_command(command: CliCommand) -> Result<i32> {
    match command {
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(0)
        }
        CliCommand::Version => {
            println!("{}", version_line());
            Ok(0)
        }
        CliCommand::Convert(args) => {
            let converter = Converter::new().with_strategy(args.strategy);
            let mut stdout = std::io::stdout().lock();
            Ok(report_convert(run_convert(&args, &converter, &mut stdout)))
        }
        CliCommand::Serve {
            host,
            port,
            strategy,
        } => {
            let mut config = ServerConfig::from_env();
            if let Some(host) = host {
                config = config.with_host(host);
            }
            if let Some(port) = port {
                config = config.with_port(port);
            }
            crate::server::run_server(config, Converter::new().with_strategy(strategy)).await?;
            Ok(0)
        }
        CliCommand::Mcp { strategy } => {
            crate::mcp::run_stdio(Converter::new().with_strategy(strategy)).await?;
            Ok(0)
        }
    }
}

/// Print the status line for a conversion and pick the exit code.
fn report_convert(result: Result<ConvertOutcome, ConvertError>) -> i32 {
    match result {
        Ok(ConvertOutcome::Printed { .. }) => 0,
        Ok(ConvertOutcome::Written { path, count }) => {
            eprintln!("Conversion complete! Result saved to: {}", path.display());
            eprintln!("Generated {} events", count);
            0
        }
        Err(ConvertError::InputMissing { .. }) => {
            eprintln!("Error: please provide data to convert");
            eprintln!("{}", USAGE);
            0
        }
        Err(e) => {
            tracing::debug!(code = e.error_code(), "Conversion failed");
            eprintln!("Conversion failed: {}", e);
            e.category().exit_code()
        }
    }
}
