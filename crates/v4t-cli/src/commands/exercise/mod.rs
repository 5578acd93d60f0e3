//! Exercise subcommand implementations.

mod files;
mod manage;
mod progress;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use v4t_core::model::{Id, Shareable};

use crate::output;
use crate::session::CliContext;

#[derive(Args, Debug)]
pub struct ExerciseCommand {
    #[command(subcommand)]
    pub command: ExerciseSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ExerciseSubcommand {
    /// List the exercises of a course
    List(ListArgs),

    /// Create an exercise from a template zip (teachers)
    Add(manage::AddArgs),

    /// Rename an exercise (teachers)
    Edit(manage::EditArgs),

    /// Delete an exercise (teachers)
    Delete(manage::DeleteArgs),

    /// Download your files for an exercise
    Download(files::DownloadArgs),

    /// Download the exercise template
    Template(files::DownloadArgs),

    /// Download every student's files (teachers)
    StudentFiles(files::DownloadArgs),

    /// Upload your files as a zip archive
    Upload(files::UploadArgs),

    /// List the files stored for a user's exercise
    Files(files::FilesArgs),

    /// Show the sharing code of an exercise (teachers)
    Code(CodeArgs),

    /// Show exercise progress
    Info(progress::InfoArgs),

    /// Mark an exercise as finished
    Finish(progress::FinishArgs),
}

pub async fn handle(cmd: ExerciseCommand, ctx: &CliContext) -> Result<()> {
    match cmd.command {
        ExerciseSubcommand::List(args) => list(args, ctx).await,
        ExerciseSubcommand::Add(args) => manage::add(args, ctx).await,
        ExerciseSubcommand::Edit(args) => manage::edit(args, ctx).await,
        ExerciseSubcommand::Delete(args) => manage::delete(args, ctx).await,
        ExerciseSubcommand::Download(args) => files::download(args, ctx).await,
        ExerciseSubcommand::Template(args) => files::template(args, ctx).await,
        ExerciseSubcommand::StudentFiles(args) => files::student_files(args, ctx).await,
        ExerciseSubcommand::Upload(args) => files::upload(args, ctx).await,
        ExerciseSubcommand::Files(args) => files::info(args, ctx).await,
        ExerciseSubcommand::Code(args) => code(args, ctx).await,
        ExerciseSubcommand::Info(args) => progress::info(args, ctx).await,
        ExerciseSubcommand::Finish(args) => progress::finish(args, ctx).await,
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Course ID
    pub course_id: Id,

    /// Print exercises as JSON lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CodeArgs {
    /// Exercise ID
    pub exercise_id: Id,
}

async fn list(args: ListArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let exercises = client
        .reported(client.get_exercises(args.course_id))
        .await
        .context("Failed to list exercises")?;

    if exercises.is_empty() {
        eprintln!("{}", "No exercises found.".dimmed());
        return Ok(());
    }

    for exercise in &exercises {
        if args.json {
            output::json(exercise)?;
        } else {
            output::entry(exercise.id, &exercise.name);
        }
    }

    Ok(())
}

async fn code(args: CodeArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let code = client
        .reported(client.get_sharing_code(Shareable::Exercise(args.exercise_id)))
        .await
        .context("Failed to get sharing code")?;

    println!("{}", code);
    Ok(())
}
