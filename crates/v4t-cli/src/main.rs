//! v4t - command-line client for VS Code 4 Teaching.
//!
//! A thin front end over `v4t-client`: prompts and status lines from the
//! client are printed by a console notifier, command results go to stdout.

mod cli;
mod commands;
mod notifier;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{comment, course, exercise, login, logout, signup, tree, whoami};
use session::CliContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let ctx = CliContext::new(cli.session_file)?;

    match cli.command {
        Commands::Login(args) => login::run(args, &ctx).await,
        Commands::Signup(args) => signup::run(args, &ctx).await,
        Commands::Logout(args) => logout::run(args, &ctx).await,
        Commands::Whoami(args) => whoami::run(args, &ctx).await,
        Commands::Tree(args) => tree::run(args, &ctx).await,
        Commands::Course(cmd) => course::handle(cmd, &ctx).await,
        Commands::Exercise(cmd) => exercise::handle(cmd, &ctx).await,
        Commands::Comment(cmd) => comment::handle(cmd, &ctx).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
