use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use geocfg::cli::{CheckArgs, render, run};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CheckArgs::parse();
    match run(&args) {
        Ok(report) => {
            print!("{}", render(&report, args.json));
            if report.passes() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
