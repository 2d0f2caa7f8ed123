//! Registry listing command
//!
//! Prints the built-in site catalog of daemons and control machines.

use serde_json::{Value, json};

use crate::cli::args::{OutputFormat, RegistryArgs, RegistryCategory};
use crate::registry::Registries;

/// List the site registries.
pub fn run(args: &RegistryArgs) {
    let registries = Registries::site();
    let show_daemons = matches!(
        args.category,
        RegistryCategory::All | RegistryCategory::Daemons
    );
    let show_machines = matches!(
        args.category,
        RegistryCategory::All | RegistryCategory::Machines
    );

    match args.format {
        OutputFormat::Human => {
            if show_daemons {
                println!("daemons:");
                for (_, daemon) in registries.daemons.iter() {
                    println!("  {daemon}");
                }
            }
            if show_machines {
                println!("machines:");
                for (_, machine) in registries.machines.iter() {
                    println!("  {machine}");
                }
            }
        }
        OutputFormat::Json => {
            let mut output = serde_json::Map::new();
            if show_daemons {
                let daemons: Vec<_> = registries.daemons.iter().map(|(_, d)| d).collect();
                output.insert("daemons".to_string(), json!(daemons));
            }
            if show_machines {
                let machines: Vec<_> = registries.machines.iter().map(|(_, m)| m).collect();
                output.insert("machines".to_string(), json!(machines));
            }
            println!("{}", Value::Object(output));
        }
    }
}
