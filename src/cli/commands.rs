//! CLI command implementations
//!
//! Commands are thin wrappers over the library. Each produces one JSON data
//! object; `run` wraps it in the response envelope.

use std::path::Path;

use serde_json::{json, Value};

use crate::config::{CorrelationConfig, CorrelationContext};
use crate::observability::{log_event, Event, NullSink};
use crate::vector::{
    validate, CorrelationVector, CorrelationVectorVersion, SpinParameters, DELIMITER,
};

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{write_error, write_response};

/// Parse arguments, run the command and print the response.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let outcome = build_context(cli.config.as_deref(), cli.validate)
        .and_then(|ctx| run_command(&cli.command, &ctx, cli.verbose));

    match outcome {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Build the derivation context from an optional config file and the
/// `--validate` flag. The flag can only switch validation on.
pub fn build_context(config_path: Option<&Path>, validate: bool) -> CliResult<CorrelationContext> {
    let config = match config_path {
        Some(path) => CorrelationConfig::load(path)?,
        None => CorrelationConfig::default(),
    };

    let ctx = CorrelationContext::new(config);
    if validate {
        Ok(ctx.with_validation(true))
    } else {
        Ok(ctx)
    }
}

/// Execute one command and return its JSON data.
pub fn run_command(command: &Command, ctx: &CorrelationContext, verbose: bool) -> CliResult<Value> {
    match command {
        Command::New { version } => {
            let cv = match parse_version(version.as_deref())? {
                Some(v) => CorrelationVector::with_version(v),
                None => ctx.create_root(),
            };
            trace(verbose, Event::Created, &cv);
            Ok(describe(&cv))
        }

        Command::Extend { cv } => {
            let extended = ctx.extend(cv);
            trace(verbose, Event::Extended, &extended);
            Ok(describe(&extended))
        }

        Command::Spin {
            cv,
            interval,
            periodicity,
            entropy,
        } => {
            let defaults = ctx.config().spin;
            let parameters = SpinParameters::new(
                interval.map_or(defaults.interval, Into::into),
                periodicity.map_or(defaults.periodicity, Into::into),
                entropy.map_or(defaults.entropy, Into::into),
            );
            let spun = ctx.spin_with(cv, &parameters);
            trace(verbose, Event::Spun, &spun);

            let mut data = describe(&spun);
            data["total_bits"] = json!(parameters.total_bits());
            Ok(data)
        }

        Command::Parse { cv } => {
            let parsed = ctx.parse(cv);
            trace(verbose, Event::Parsed, &parsed);
            Ok(describe(&parsed))
        }

        Command::Increment { cv, count } => {
            let parsed = ctx.parse(cv);
            let values: Vec<String> = (0..*count).map(|_| parsed.increment()).collect();

            let saturated = parsed.is_saturated();
            if saturated {
                trace(verbose, Event::Saturated, &parsed);
            }

            Ok(json!({
                "vector": describe(&parsed),
                "values": values,
                "saturated": saturated,
            }))
        }

        Command::Validate { cv, version } => {
            let version = parse_version(version.as_deref())?
                .unwrap_or_else(|| CorrelationVectorVersion::infer(cv, false, &NullSink));

            Ok(match validate(cv, version) {
                Ok(()) => json!({ "valid": true, "version": version }),
                Err(e) => json!({
                    "valid": false,
                    "version": version,
                    "code": e.code(),
                    "message": e.to_string(),
                }),
            })
        }

        Command::Infer { cv } => {
            let recognized = cv
                .find(DELIMITER)
                .and_then(CorrelationVectorVersion::from_base_length)
                .is_some();
            let version = CorrelationVectorVersion::infer(cv, false, &NullSink);
            Ok(json!({ "version": version, "recognized": recognized }))
        }
    }
}

/// An unknown version name is an invalid argument, not a format report.
fn parse_version(name: Option<&str>) -> CliResult<Option<CorrelationVectorVersion>> {
    Ok(name.map(str::parse::<CorrelationVectorVersion>).transpose()?)
}

fn describe(cv: &CorrelationVector) -> Value {
    json!({
        "value": cv.value(),
        "base": cv.base(),
        "extension": cv.extension(),
        "version": cv.version(),
        "immutable": cv.is_immutable(),
    })
}

fn trace(verbose: bool, event: Event, cv: &CorrelationVector) {
    if verbose {
        let value = cv.value();
        log_event(event, &[("cv", value.as_str())]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{EntropyArg, PeriodicityArg};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CV_V1: &str = "tul4NUsfs9Cl7mOf.1";

    fn ctx() -> CorrelationContext {
        CorrelationContext::with_sink(
            CorrelationConfig::default(),
            std::sync::Arc::new(NullSink),
        )
    }

    #[test]
    fn test_new_with_version() {
        let data = run_command(
            &Command::New {
                version: Some("v2".into()),
            },
            &ctx(),
            false,
        )
        .unwrap();

        assert_eq!(data["version"], "v2");
        assert_eq!(data["base"].as_str().unwrap().len(), 22);
        assert_eq!(data["extension"], 0);
    }

    #[test]
    fn test_new_with_unknown_version() {
        let err = run_command(
            &Command::New {
                version: Some("v3".into()),
            },
            &ctx(),
            false,
        )
        .unwrap_err();

        assert_eq!(err.code_str(), "CV_CLI_INVALID_ARGUMENT");
        assert!(err.message().contains("v3"));
    }

    #[test]
    fn test_validate_with_explicit_version() {
        let command = Command::Validate {
            cv: "KZY-dsX2jEaZesgCPjJ2Ng.1".into(),
            version: Some("V1".into()),
        };
        let data = run_command(&command, &ctx(), false).unwrap();

        assert_eq!(data["version"], "v1");
        assert_eq!(data["code"], "CV_INVALID_BASE");
    }

    #[test]
    fn test_extend() {
        let data = run_command(&Command::Extend { cv: CV_V1.into() }, &ctx(), false).unwrap();
        assert_eq!(data["value"], "tul4NUsfs9Cl7mOf.1.0");
        assert_eq!(data["immutable"], false);
    }

    #[test]
    fn test_spin_reports_total_bits() {
        let command = Command::Spin {
            cv: CV_V1.into(),
            interval: None,
            periodicity: Some(PeriodicityArg::Long),
            entropy: Some(EntropyArg::Four),
        };
        let data = run_command(&command, &ctx(), false).unwrap();

        assert_eq!(data["total_bits"], 64);
        let value = data["value"].as_str().unwrap();
        // base, prior extension, two spin segments, fresh extension
        assert_eq!(value.split('.').count(), 5);
    }

    #[test]
    fn test_increment_values() {
        let command = Command::Increment {
            cv: CV_V1.into(),
            count: 3,
        };
        let data = run_command(&command, &ctx(), false).unwrap();

        assert_eq!(
            data["values"],
            json!(["tul4NUsfs9Cl7mOf.2", "tul4NUsfs9Cl7mOf.3", "tul4NUsfs9Cl7mOf.4"])
        );
        assert_eq!(data["saturated"], false);
    }

    #[test]
    fn test_validate_reports_code() {
        let command = Command::Validate {
            cv: "tul4NUsfs9Cl7mOf.-1".into(),
            version: None,
        };
        let data = run_command(&command, &ctx(), false).unwrap();

        assert_eq!(data["valid"], false);
        assert_eq!(data["code"], "CV_INVALID_EXTENSION");
    }

    #[test]
    fn test_infer_unrecognized() {
        let data = run_command(&Command::Infer { cv: "abc.1".into() }, &ctx(), false).unwrap();
        assert_eq!(data["version"], "v1");
        assert_eq!(data["recognized"], false);
    }

    #[test]
    fn test_build_context_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"default_version": "v2"}"#).unwrap();

        let ctx = build_context(Some(file.path()), true).unwrap();
        assert!(ctx.validate_on_creation());
        assert_eq!(ctx.config().default_version, CorrelationVectorVersion::V2);
    }

    #[test]
    fn test_build_context_bad_file() {
        let err = build_context(Some(Path::new("/nonexistent/cv.json")), false).unwrap_err();
        assert_eq!(err.code_str(), "CV_CLI_CONFIG_ERROR");
    }
}
