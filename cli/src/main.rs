//! tester-unit - lifecycle installer for the prometheus-tester workload

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tester_unit::cli::Cli;
use tester_unit::output::json;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{e:#}");
            match json::format_error(&message, "ERROR") {
                Ok(obj) if json_mode => println!("{obj}"),
                _ => eprintln!("Error: {message}"),
            }
            ExitCode::FAILURE
        }
    }
}
