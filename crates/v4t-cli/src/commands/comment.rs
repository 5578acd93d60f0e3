//! Comment subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use v4t_core::model::{Id, ServerComment, ServerCommentThread};

use crate::output;
use crate::session::{CliContext, current_user};

#[derive(Args, Debug)]
pub struct CommentCommand {
    #[command(subcommand)]
    pub command: CommentSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CommentSubcommand {
    /// List the comment threads of a file
    List(ListArgs),

    /// List every commented file of a user's exercise
    All(AllArgs),

    /// Start a comment thread on a line
    Add(AddArgs),

    /// Move a comment thread to another line
    Move(MoveArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// File ID
    pub file_id: Id,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct AllArgs {
    /// Exercise ID
    pub exercise_id: Id,

    /// Whose files to inspect (defaults to the logged-in user)
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// File ID
    pub file_id: Id,

    /// Line number
    #[arg(long)]
    pub line: u32,

    /// Current text of the line
    #[arg(long)]
    pub line_text: String,

    /// Comment text
    #[arg(long)]
    pub text: String,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Comment thread ID
    pub thread_id: Id,

    /// New line number
    #[arg(long)]
    pub line: u32,

    /// Text of the new line
    #[arg(long)]
    pub line_text: String,
}

pub async fn handle(cmd: CommentCommand, ctx: &CliContext) -> Result<()> {
    match cmd.command {
        CommentSubcommand::List(args) => list(args, ctx).await,
        CommentSubcommand::All(args) => all(args, ctx).await,
        CommentSubcommand::Add(args) => add(args, ctx).await,
        CommentSubcommand::Move(args) => move_thread(args, ctx).await,
    }
}

async fn list(args: ListArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let threads = client
        .reported(client.get_comments(args.file_id))
        .await
        .context("Failed to fetch comments")?;

    if threads.is_empty() {
        eprintln!("{}", "No comments found.".dimmed());
        return Ok(());
    }

    for thread in &threads {
        if args.pretty {
            output::json_pretty(thread)?;
        } else {
            output::json(thread)?;
        }
    }
    Ok(())
}

async fn all(args: AllArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let username = match args.user {
        Some(user) => user,
        None => current_user(&client).await?.username,
    };

    let files = client
        .reported(client.get_all_comments(&username, args.exercise_id))
        .await
        .context("Failed to fetch comments")?;

    if files.is_empty() {
        eprintln!("{}", "No comments found.".dimmed());
        return Ok(());
    }

    for file in &files {
        println!("{}", file.path.bold());
        for thread in file.comments.iter().flatten() {
            println!("  {} {}", format!("{}:", thread.line).dimmed(), thread.line_text);
            for comment in &thread.comments {
                println!("    {} {}", format!("{}:", comment.author).cyan(), comment.text);
            }
        }
    }
    Ok(())
}

async fn add(args: AddArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let author = current_user(&client).await?.username;

    let thread = ServerCommentThread {
        id: None,
        line: args.line,
        line_text: args.line_text,
        comments: vec![ServerComment {
            id: None,
            text: args.text,
            author,
        }],
    };
    let saved = client
        .reported(client.save_comment(args.file_id, &thread))
        .await
        .context("Failed to save comment")?;

    output::success(&format!("Comment saved on line {}", saved.line));
    if let Some(id) = saved.id {
        output::field("Thread", &id.to_string());
    }
    Ok(())
}

async fn move_thread(args: MoveArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let thread = client
        .reported(client.update_comment_thread_line(args.thread_id, args.line, &args.line_text))
        .await
        .context("Failed to move comment thread")?;

    output::success(&format!("Thread moved to line {}", thread.line));
    Ok(())
}
