//! Entry point for the dupecheck CLI.

use clap::Parser;
use dupecheck::{cli::Cli, error::ExitCode, logging};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    match dupecheck::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            log::error!("{err:#}");
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    }
}
