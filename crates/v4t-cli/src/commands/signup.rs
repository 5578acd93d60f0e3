//! Signup command implementation.

use anyhow::{Context, Result};
use clap::Args;

use v4t_core::model::UserSignup;

use super::parse_server;
use crate::output;
use crate::session::CliContext;

#[derive(Args, Debug)]
pub struct SignupArgs {
    /// Username
    #[arg(long)]
    pub username: String,

    /// Password
    #[arg(long, env = "V4T_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// First name
    #[arg(long)]
    pub name: String,

    /// Last name
    #[arg(long)]
    pub last_name: String,

    /// Register a teacher (requires a teacher session)
    #[arg(long)]
    pub teacher: bool,

    /// Server base URL (student signup only)
    #[arg(long, env = "V4T_SERVER", conflicts_with = "teacher")]
    pub server: Option<String>,
}

pub async fn run(args: SignupArgs, ctx: &CliContext) -> Result<()> {
    let server = parse_server(args.server.as_deref())?;
    let user = UserSignup {
        username: args.username,
        password: args.password,
        email: args.email,
        name: args.name,
        last_name: args.last_name,
    };

    let (client, server) = if args.teacher {
        (ctx.logged_in_client()?, None)
    } else {
        let server = match server {
            Some(server) => Some(server),
            None => ctx.last_server()?,
        };
        (ctx.client()?, server)
    };

    let created = client
        .signup(&user, server, args.teacher)
        .await
        .context("Failed to sign up")?;

    output::success(&format!("Created user {}", created.username));
    output::field("ID", &created.id.to_string());

    Ok(())
}
