//! PharmaPlus Promotions CLI

use std::process::ExitCode;

use clap::Parser;
use pharmaplus_app::{config::load_dotenv, observability::init_subscriber};

mod cli;

fn main() -> ExitCode {
    load_dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = init_subscriber(&cli.config.logging) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    if let Err(error) = cli.run() {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
