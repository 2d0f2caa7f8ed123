//! Resolved configuration display command
//!
//! Loads a configuration file and prints the resolved daemon, machines,
//! and camera bindings.

use crate::cli::args::{OutputFormat, ShowArgs};
use crate::config::Config;
use crate::error::{CamvirtError, ConfigError};
use crate::registry::Registries;

/// Load one configuration file and print its resolved form.
///
/// # Errors
///
/// Returns an error if the file does not load cleanly or the resolved
/// configuration cannot be serialized. Schema violations are listed on
/// stderr before the error is returned.
pub fn run(args: &ShowArgs) -> Result<(), CamvirtError> {
    let registries = Registries::site();
    let config = match Config::load(&args.file, registries) {
        Ok(config) => config,
        Err(err) => {
            if let ConfigError::Schema { issues, .. } = &err {
                for issue in issues {
                    eprintln!("{issue}");
                }
            }
            return Err(err.into());
        }
    };

    match args.format {
        OutputFormat::Human => print_human(&config),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}

fn print_human(config: &Config) {
    println!("daemon:             {}", config.daemon);
    println!("log name:           {}", config.log_name);
    println!("initialize timeout: {}s", config.initialize_timeout);
    println!("shutdown timeout:   {}s", config.shutdown_timeout);

    println!("control machines:");
    for machine in &config.control_ips {
        println!("  {machine}");
    }

    for domain in &config.domains {
        println!("domain '{domain}':");
        for (camera_id, binding) in &config.cameras {
            if binding.domain == *domain {
                println!("  {camera_id} via {}", binding.daemon);
            }
        }
    }
}
