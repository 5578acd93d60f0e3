//! Whoami command implementation.

use anyhow::Result;
use clap::Args;

use crate::output;
use crate::session::{CliContext, current_user};

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let user = current_user(&client).await?;

    output::field("Username", &user.username);
    output::field("Name", &user.display_name());
    if let Some(email) = &user.email {
        output::field("Email", email);
    }
    let role = if user.is_teacher() { "teacher" } else { "student" };
    output::field("Role", role);
    if let Some(url) = client.session().base_url() {
        output::field("Server", url.as_str());
    }
    output::field("Session", &ctx.session_file().display().to_string());

    Ok(())
}
