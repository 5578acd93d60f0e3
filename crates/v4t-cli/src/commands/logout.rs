//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::CliContext;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.client()?;
    client
        .restore_session()
        .context("Failed to read session file")?;
    client.logout().context("Failed to write session file")?;

    output::success("Logged out");
    Ok(())
}
