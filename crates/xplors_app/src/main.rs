mod platform;

use std::process::ExitCode;

use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();
    let cli = platform::cli::Cli::parse();
    platform::logging::initialize(cli.log.into());
    platform::app::run_app(cli)
}
