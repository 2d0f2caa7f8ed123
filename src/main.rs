//! `camvirt` - configuration tooling for multi-domain camera-control daemons

use clap::Parser;
use clap::error::ErrorKind;

use camvirt::cli::args::Cli;
use camvirt::cli::commands;
use camvirt::error::ExitCode;
use camvirt::observability::{LogFormat, init_logging};

fn main() {
    // clap routes --help and --version through its error path; everything
    // else on that path is a usage error, not a config error.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let code = match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::USAGE_ERROR,
            };
            let _ = error.print();
            std::process::exit(code);
        }
    };

    if !cli.quiet {
        init_logging(LogFormat::Human, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
