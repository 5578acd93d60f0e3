//! Exercise file transfer.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use v4t_core::model::Id;

use crate::output;
use crate::session::{CliContext, current_user};

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Exercise ID
    pub exercise_id: Id,

    /// Where to write the zip archive
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Exercise ID
    pub exercise_id: Id,

    /// Zip archive to upload
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Exercise ID
    pub exercise_id: Id,

    /// Whose files to list (defaults to the logged-in user)
    #[arg(long)]
    pub user: Option<String>,
}

pub async fn download(args: DownloadArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let zip = client
        .reported(client.get_exercise_files(args.exercise_id))
        .await
        .context("Failed to download exercise files")?;
    save(&args.output, &zip).await
}

pub async fn template(args: DownloadArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let zip = client
        .reported(client.get_template(args.exercise_id))
        .await
        .context("Failed to download template")?;
    save(&args.output, &zip).await
}

pub async fn student_files(args: DownloadArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let zip = client
        .reported(client.get_all_student_files(args.exercise_id))
        .await
        .context("Failed to download student files")?;
    save(&args.output, &zip).await
}

pub async fn upload(args: UploadArgs, ctx: &CliContext) -> Result<()> {
    let zip = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let client = ctx.logged_in_client()?;
    client
        .reported(client.upload_files(args.exercise_id, zip))
        .await
        .context("Failed to upload files")?;

    output::success(&format!("Uploaded {}", args.file.display()));
    Ok(())
}

pub async fn info(args: FilesArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let username = match args.user {
        Some(user) => user,
        None => current_user(&client).await?.username,
    };

    let files = client
        .reported(client.get_files_info(&username, args.exercise_id))
        .await
        .context("Failed to list files")?;

    if files.is_empty() {
        eprintln!("{}", "No files found.".dimmed());
    }
    for file in &files {
        output::entry(file.id, &file.path);
    }
    Ok(())
}

async fn save(path: &Path, zip: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    tokio::fs::write(path, zip)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    output::success(&format!("Saved {} ({} bytes)", path.display(), zip.len()));
    Ok(())
}
