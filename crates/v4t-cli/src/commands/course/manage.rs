//! Course create/rename/delete.

use anyhow::{Context, Result};
use clap::Args;

use v4t_core::model::Id;

use crate::output;
use crate::session::CliContext;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Course name
    #[arg(long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Course ID
    pub course_id: Id,

    /// New course name
    #[arg(long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Course ID
    pub course_id: Id,
}

pub async fn add(args: AddArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let course = client
        .reported(client.add_course(&args.name))
        .await
        .context("Failed to create course")?;

    output::success(&format!("Created course {}", course.name));
    output::field("ID", &course.id.to_string());
    Ok(())
}

pub async fn edit(args: EditArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let course = client
        .reported(client.edit_course(args.course_id, &args.name))
        .await
        .context("Failed to edit course")?;

    output::success(&format!("Renamed course {} to {}", course.id, course.name));
    Ok(())
}

pub async fn delete(args: DeleteArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    client
        .reported(client.delete_course(args.course_id))
        .await
        .context("Failed to delete course")?;

    output::success(&format!("Deleted course {}", args.course_id));
    Ok(())
}
