//! Course subcommand implementations.

mod manage;
mod share;
mod users;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::output;
use crate::session::{CliContext, current_user};

#[derive(Args, Debug)]
pub struct CourseCommand {
    #[command(subcommand)]
    pub command: CourseSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CourseSubcommand {
    /// List the courses of the logged-in user
    List(ListArgs),

    /// Create a course (teachers)
    Add(manage::AddArgs),

    /// Rename a course (teachers)
    Edit(manage::EditArgs),

    /// Delete a course (teachers)
    Delete(manage::DeleteArgs),

    /// List the users of a course
    Users(users::UsersArgs),

    /// Add users to a course (teachers)
    AddUsers(users::ManageUsersArgs),

    /// Remove users from a course (teachers)
    RemoveUsers(users::ManageUsersArgs),

    /// Show the sharing code of a course (teachers)
    Code(share::CodeArgs),

    /// Join a course with a sharing code
    Join(share::JoinArgs),
}

pub async fn handle(cmd: CourseCommand, ctx: &CliContext) -> Result<()> {
    match cmd.command {
        CourseSubcommand::List(args) => list(args, ctx).await,
        CourseSubcommand::Add(args) => manage::add(args, ctx).await,
        CourseSubcommand::Edit(args) => manage::edit(args, ctx).await,
        CourseSubcommand::Delete(args) => manage::delete(args, ctx).await,
        CourseSubcommand::Users(args) => users::list(args, ctx).await,
        CourseSubcommand::AddUsers(args) => users::add(args, ctx).await,
        CourseSubcommand::RemoveUsers(args) => users::remove(args, ctx).await,
        CourseSubcommand::Code(args) => share::code(args, ctx).await,
        CourseSubcommand::Join(args) => share::join(args, ctx).await,
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print courses as JSON lines
    #[arg(long)]
    pub json: bool,
}

async fn list(args: ListArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let user = current_user(&client).await.context("Failed to list courses")?;

    let courses = user.courses.unwrap_or_default();
    if courses.is_empty() {
        eprintln!("{}", "No courses found.".dimmed());
        return Ok(());
    }

    for course in &courses {
        if args.json {
            output::json(course)?;
        } else {
            output::entry(course.id, &course.name);
        }
    }

    Ok(())
}
