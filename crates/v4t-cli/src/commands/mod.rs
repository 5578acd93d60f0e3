//! Subcommand implementations.

pub mod comment;
pub mod course;
pub mod exercise;
pub mod login;
pub mod logout;
pub mod signup;
pub mod tree;
pub mod whoami;

use anyhow::{Context, Result};
use v4t_core::ServerUrl;

/// Parse a `--server` value.
fn parse_server(server: Option<&str>) -> Result<Option<ServerUrl>> {
    server
        .map(|s| ServerUrl::new(s).context("Invalid server URL"))
        .transpose()
}
