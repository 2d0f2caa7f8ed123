//! Configuration validation command
//!
//! Loads every file given on the command line and reports each outcome.
//! The command fails if any file fails, after all files have been checked.

use std::path::Path;

use serde_json::{Value, json};

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{CamvirtError, ConfigError};
use crate::registry::Registries;

/// Validate configuration files against the site registries.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationFailed`] when one or more files do not
/// load cleanly.
pub fn run(args: &ValidateArgs) -> Result<(), CamvirtError> {
    let registries = Registries::site();
    let mut failures = 0usize;

    for path in &args.files {
        tracing::info!(file = %path.display(), "validating configuration");
        match Config::load(path, registries) {
            Ok(config) => report_success(args.format, path, &config),
            Err(err) => {
                failures += 1;
                report_failure(args.format, path, &err);
            }
        }
    }

    if failures > 0 {
        return Err(ConfigError::ValidationFailed { count: failures }.into());
    }
    Ok(())
}

fn report_success(format: OutputFormat, path: &Path, config: &Config) {
    match format {
        OutputFormat::Human => {
            println!(
                "{}: ok ({} cameras in {} domains)",
                path.display(),
                config.cameras.len(),
                config.domains.len()
            );
        }
        OutputFormat::Json => {
            println!(
                "{}",
                json!({
                    "file": path.display().to_string(),
                    "status": "ok",
                    "daemon": config.daemon.name,
                    "domains": config.domains.len(),
                    "cameras": config.cameras.len(),
                })
            );
        }
    }
}

fn report_failure(format: OutputFormat, path: &Path, err: &ConfigError) {
    match format {
        OutputFormat::Human => match err {
            ConfigError::Schema { issues, .. } => {
                println!("{}: {} issue(s)", path.display(), issues.len());
                for issue in issues {
                    println!("  {issue}");
                }
            }
            other => println!("{}: {other}", path.display()),
        },
        OutputFormat::Json => {
            let issues: Vec<Value> = match err {
                ConfigError::Schema { issues, .. } => issues
                    .iter()
                    .map(|issue| json!({"path": issue.path, "message": issue.message}))
                    .collect(),
                other => vec![json!({"path": "", "message": other.to_string()})],
            };
            println!(
                "{}",
                json!({
                    "file": path.display().to_string(),
                    "status": "error",
                    "issues": issues,
                })
            );
        }
    }
}
