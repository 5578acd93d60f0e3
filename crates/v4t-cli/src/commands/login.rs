//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;

use v4t_core::Credentials;

use super::parse_server;
use crate::output;
use crate::session::CliContext;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username
    #[arg(long)]
    pub username: String,

    /// Password
    #[arg(long, env = "V4T_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Server base URL (defaults to the last server used)
    #[arg(long, env = "V4T_SERVER")]
    pub server: Option<String>,
}

pub async fn run(args: LoginArgs, ctx: &CliContext) -> Result<()> {
    // Always pass a server so the login starts from an invalidated session.
    let server = match parse_server(args.server.as_deref())? {
        Some(server) => Some(server),
        None => ctx.last_server()?,
    };
    let client = ctx.client()?;

    let credentials = Credentials::new(&args.username, &args.password);
    let user = client
        .login(&credentials, server)
        .await
        .context("Failed to login")?;

    output::success(&format!("Logged in as {}", user.username));
    if let Some(url) = client.session().base_url() {
        output::field("Server", url.as_str());
    }

    Ok(())
}
