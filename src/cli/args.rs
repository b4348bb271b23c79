//! Command-line argument parsing for the sseconv CLI.
//!
//! Parsing is a single pass over the arguments; flags that take a value
//! consume the next argument. When several input flags are given the last
//! one wins.

use std::path::PathBuf;

use thiserror::Error;

use crate::sse::TimestampStrategy;

/// Where the text to convert comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// SSE text given inline (`--raw`)
    Raw(String),
    /// SSE text read from a file (`--file`)
    File(PathBuf),
    /// A JSON event object (`--object`)
    Object(String),
}

/// Options of the one-shot conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertArgs {
    pub input: Option<InputSource>,
    pub output: Option<PathBuf>,
    pub timestamp: Option<String>,
    pub strategy: TimestampStrategy,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Print usage
    Help,
    /// Show version information
    Version,
    /// Convert input and print or write the records
    Convert(ConvertArgs),
    /// Run the HTTP service
    Serve {
        host: Option<String>,
        port: Option<u16>,
        strategy: TimestampStrategy,
    },
    /// Run the stdio tool server
    Mcp { strategy: TimestampStrategy },
}

/// Invalid command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("Unknown option: {0}")]
    UnknownFlag(String),

    #[error("Option {0} requires a value")]
    MissingValue(String),

    #[error("Invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },
}

impl ArgsError {
    /// Usage errors share the exit code of other bad input.
    pub fn exit_code(&self) -> i32 {
        crate::error::ErrorCategory::User.exit_code()
    }
}

/// Parse command-line arguments and return the appropriate command.
///
/// The first item is the program name and is skipped.
///
/// # Examples
///
/// ```
/// use sseconv::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["sseconv".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let args: Vec<String> = args.skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        return Ok(CliCommand::Help);
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        return Ok(CliCommand::Version);
    }

    let subcommand = args.first().cloned();
    let mut iter = args.into_iter();
    match subcommand.as_deref() {
        Some("serve") => {
            iter.next();
            parse_serve(iter)
        }
        Some("mcp") => {
            iter.next();
            parse_mcp(iter)
        }
        _ => parse_convert(iter),
    }
}

fn parse_convert(mut iter: impl Iterator<Item = String>) -> Result<CliCommand, ArgsError> {
    let mut convert = ConvertArgs::default();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--raw" => convert.input = Some(InputSource::Raw(value_of(&arg, &mut iter)?)),
            "--file" => {
                convert.input = Some(InputSource::File(value_of(&arg, &mut iter)?.into()))
            }
            "--object" => convert.input = Some(InputSource::Object(value_of(&arg, &mut iter)?)),
            "--output" => convert.output = Some(value_of(&arg, &mut iter)?.into()),
            "--timestamp" => convert.timestamp = Some(value_of(&arg, &mut iter)?),
            "--strategy" => convert.strategy = parse_strategy(&arg, &mut iter)?,
            _ => return Err(ArgsError::UnknownFlag(arg)),
        }
    }

    Ok(CliCommand::Convert(convert))
}

fn parse_serve(mut iter: impl Iterator<Item = String>) -> Result<CliCommand, ArgsError> {
    let mut host = None;
    let mut port = None;
    let mut strategy = TimestampStrategy::default();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--host" => host = Some(value_of(&arg, &mut iter)?),
            "--port" => {
                let value = value_of(&arg, &mut iter)?;
                port = Some(value.parse().map_err(|_| ArgsError::InvalidValue {
                    flag: arg.clone(),
                    value,
                })?);
            }
            "--strategy" => strategy = parse_strategy(&arg, &mut iter)?,
            _ => return Err(ArgsError::UnknownFlag(arg)),
        }
    }

    Ok(CliCommand::Serve {
        host,
        port,
        strategy,
    })
}

fn parse_mcp(mut iter: impl Iterator<Item = String>) -> Result<CliCommand, ArgsError> {
    let mut strategy = TimestampStrategy::default();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--strategy" => strategy = parse_strategy(&arg, &mut iter)?,
            _ => return Err(ArgsError::UnknownFlag(arg)),
        }
    }
    Ok(CliCommand::Mcp { strategy })
}

fn value_of(flag: &str, iter: &mut impl Iterator<Item = String>) -> Result<String, ArgsError> {
    iter.next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

fn parse_strategy(
    flag: &str,
    iter: &mut impl Iterator<Item = String>,
) -> Result<TimestampStrategy, ArgsError> {
    let value = value_of(flag, iter)?;
    TimestampStrategy::from_name(&value).ok_or(ArgsError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}
