//! Exercise create/rename/delete.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use v4t_core::model::Id;

use crate::output;
use crate::session::CliContext;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Course ID
    pub course_id: Id,

    /// Exercise name
    #[arg(long)]
    pub name: String,

    /// Template zip archive
    #[arg(long)]
    pub template: PathBuf,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Exercise ID
    pub exercise_id: Id,

    /// New exercise name
    #[arg(long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Exercise ID
    pub exercise_id: Id,
}

pub async fn add(args: AddArgs, ctx: &CliContext) -> Result<()> {
    let template = tokio::fs::read(&args.template)
        .await
        .with_context(|| format!("Failed to read {}", args.template.display()))?;

    let client = ctx.logged_in_client()?;
    let exercise = client
        .reported(client.add_exercise_with_template(args.course_id, &args.name, template))
        .await
        .context("Failed to create exercise")?;

    output::success(&format!("Created exercise {}", exercise.name));
    output::field("ID", &exercise.id.to_string());
    Ok(())
}

pub async fn edit(args: EditArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let exercise = client
        .reported(client.edit_exercise(args.exercise_id, &args.name))
        .await
        .context("Failed to edit exercise")?;

    output::success(&format!(
        "Renamed exercise {} to {}",
        exercise.id, exercise.name
    ));
    Ok(())
}

pub async fn delete(args: DeleteArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    client
        .reported(client.delete_exercise(args.exercise_id))
        .await
        .context("Failed to delete exercise")?;

    output::success(&format!("Deleted exercise {}", args.exercise_id));
    Ok(())
}
