//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;
use crate::domain::LifecycleEvent;

/// Lifecycle installer for the prometheus-tester workload
#[derive(Parser)]
#[command(
    name = "tester-unit",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file
    #[arg(long, global = true, env = "TESTER_UNIT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install OS packages, the runtime library and the tester artifact
    Install,

    /// Publish the service unit and (re)start it
    Start,

    /// Stop the service if it is running
    Stop,

    /// Show persisted unit phase and status
    Status,

    /// Show the scrape jobs registered with monitoring
    ScrapeJobs,

    /// Inspect configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error for failures outside the lifecycle state machine.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            config,
            command,
        } = self;
        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            config,
        });

        match command {
            Command::Install => commands::lifecycle::run(&app, LifecycleEvent::Install).await,
            Command::Start => commands::lifecycle::run(&app, LifecycleEvent::Start).await,
            Command::Stop => commands::lifecycle::run(&app, LifecycleEvent::Stop).await,
            Command::Status => commands::status::run(&app).await,
            Command::ScrapeJobs => commands::scrape::run(&app),
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
