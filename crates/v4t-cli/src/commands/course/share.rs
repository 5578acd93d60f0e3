//! Sharing codes.

use anyhow::{Context, Result};
use clap::Args;

use v4t_core::model::{Id, Shareable};

use crate::output;
use crate::session::CliContext;

#[derive(Args, Debug)]
pub struct CodeArgs {
    /// Course ID
    pub course_id: Id,
}

#[derive(Args, Debug)]
pub struct JoinArgs {
    /// Sharing code received from the teacher
    pub code: String,
}

pub async fn code(args: CodeArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let code = client
        .reported(client.get_sharing_code(Shareable::Course(args.course_id)))
        .await
        .context("Failed to get sharing code")?;

    println!("{}", code);
    Ok(())
}

pub async fn join(args: JoinArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let course = client
        .reported(client.get_course_with_code(&args.code))
        .await
        .context("Failed to join course")?;

    output::success(&format!("Joined course {}", course.name));
    output::field("ID", &course.id.to_string());
    Ok(())
}
