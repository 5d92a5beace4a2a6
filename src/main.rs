use clap::Parser;
use restverify::cli::{run_cli, Cli, EXIT_SETUP};
use restverify::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: {e}");
    }

    match run_cli(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::from(EXIT_SETUP)
        }
    }
}
