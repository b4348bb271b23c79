//! One-shot conversion command.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::args::{ConvertArgs, InputSource};
use crate::converter::{render_records, Converter, InputFormat};
use crate::error::{ConvertError, ConvertResult};

/// What the conversion did with its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// Records were printed to the given writer
    Printed { count: usize },
    /// Records were written to a file
    Written { path: PathBuf, count: usize },
}

/// Convert the input named by `args`.
///
/// The rendered records go to `--output` when given, otherwise to `out`.
/// Empty input is reported as [`ConvertError::InputMissing`].
pub fn run_convert<W: Write>(
    args: &ConvertArgs,
    converter: &Converter,
    out: &mut W,
) -> ConvertResult<ConvertOutcome> {
    let (text, format) = match &args.input {
        Some(InputSource::Raw(raw)) => (raw.clone(), InputFormat::Single),
        Some(InputSource::File(path)) => (read_input(path)?, InputFormat::Single),
        Some(InputSource::Object(json)) => (json.clone(), InputFormat::Object),
        None => (String::new(), InputFormat::Single),
    };
    if text.is_empty() {
        return Err(ConvertError::input_missing("--raw, --file or --object"));
    }

    let records = converter.convert_raw(&text, format, args.timestamp.as_deref())?;
    let rendered = render_records(&records)?;
    tracing::debug!(count = records.len(), "Converted input");

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|source| ConvertError::FileWrite {
                path: path.clone(),
                source,
            })?;
            Ok(ConvertOutcome::Written {
                path: path.clone(),
                count: records.len(),
            })
        }
        None => {
            writeln!(out, "{}", rendered).map_err(|source| ConvertError::FileWrite {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
            Ok(ConvertOutcome::Printed {
                count: records.len(),
            })
        }
    }
}

fn read_input(path: &Path) -> ConvertResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConvertError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FixedClock;

    fn converter() -> Converter {
        Converter::new().with_clock(FixedClock(1_000))
    }

    fn args(input: InputSource) -> ConvertArgs {
        ConvertArgs {
            input: Some(input),
            ..ConvertArgs::default()
        }
    }

    #[test]
    fn test_raw_input_printed() {
        let mut out = Vec::new();
        let outcome = run_convert(
            &args(InputSource::Raw("event:ping\n\n".to_string())),
            &converter(),
            &mut out,
        )
        .unwrap();
        assert_eq!(outcome, ConvertOutcome::Printed { count: 1 });
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(
            printed,
            "[\n  {\n    \"timestamp\": \"1000\",\n    \"value\": \"event:ping\\n\\n\"\n  }\n]\n"
        );
    }

    #[test]
    fn test_object_input() {
        let mut out = Vec::new();
        let mut convert = args(InputSource::Object(r#"{"event":"x","a":1}"#.to_string()));
        convert.timestamp = Some("77".to_string());
        run_convert(&convert, &converter(), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("\"timestamp\": \"77\""));
        assert!(printed.contains(r#"event:x\ndata:{\"a\":1}\n\n"#));
    }

    #[test]
    fn test_missing_input() {
        let mut out = Vec::new();
        let err = run_convert(&ConvertArgs::default(), &converter(), &mut out).unwrap_err();
        assert!(matches!(err, ConvertError::InputMissing { .. }));

        let err = run_convert(&args(InputSource::Raw(String::new())), &converter(), &mut out)
            .unwrap_err();
        assert!(matches!(err, ConvertError::InputMissing { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unreadable_file() {
        let mut out = Vec::new();
        let err = run_convert(
            &args(InputSource::File(PathBuf::from("/definitely/not/here.txt"))),
            &converter(),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::FileRead { .. }));
    }

    #[test]
    fn test_invalid_object_json() {
        let mut out = Vec::new();
        let err = run_convert(
            &args(InputSource::Object("{broken".to_string())),
            &converter(),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidJson { .. }));
    }
}
