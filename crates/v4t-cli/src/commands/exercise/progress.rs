//! Exercise progress.

use anyhow::{Context, Result};
use clap::Args;

use v4t_core::model::{ExerciseUserInfo, Id};

use crate::output;
use crate::session::CliContext;

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Exercise ID
    pub exercise_id: Id,

    /// Show every student's progress (teachers)
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct FinishArgs {
    /// Exercise ID
    pub exercise_id: Id,
}

pub async fn info(args: InfoArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;

    if args.all {
        let infos = client
            .reported(client.get_all_students_exercise_user_info(args.exercise_id))
            .await
            .context("Failed to fetch students' progress")?;
        for info in &infos {
            let who = info
                .user
                .as_ref()
                .map_or_else(|| "unknown".to_string(), |u| u.display_name());
            output::field(&who, state(info));
        }
        return Ok(());
    }

    let info = client
        .reported(client.get_exercise_user_info(args.exercise_id))
        .await
        .context("Failed to fetch exercise progress")?;
    if let Some(exercise) = &info.exercise {
        output::field("Exercise", &exercise.name);
    }
    output::field("Status", state(&info));
    Ok(())
}

pub async fn finish(args: FinishArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    client
        .reported(client.update_exercise_user_info(args.exercise_id, true))
        .await
        .context("Failed to update exercise progress")?;

    output::success(&format!("Exercise {} marked as finished", args.exercise_id));
    Ok(())
}

fn state(info: &ExerciseUserInfo) -> &'static str {
    if info.finished { "finished" } else { "in progress" }
}
