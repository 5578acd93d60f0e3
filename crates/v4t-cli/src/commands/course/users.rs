//! Course membership.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use v4t_core::model::{Id, User};

use crate::output;
use crate::session::CliContext;

#[derive(Args, Debug)]
pub struct UsersArgs {
    /// Course ID
    pub course_id: Id,
}

#[derive(Args, Debug)]
pub struct ManageUsersArgs {
    /// Course ID
    pub course_id: Id,

    /// User ID; repeat for several users. Without any, the candidates are listed.
    #[arg(long = "user")]
    pub users: Vec<Id>,
}

pub async fn list(args: UsersArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let users = client
        .reported(client.get_users_in_course(args.course_id))
        .await
        .context("Failed to list course users")?;

    print_users(&users);
    Ok(())
}

pub async fn add(args: ManageUsersArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let candidates = client
        .reported(client.users_not_in_course(args.course_id))
        .await
        .context("Failed to list users")?;

    let Some(ids) = select(&args.users, &candidates)? else {
        return Ok(());
    };
    let course = client
        .reported(client.add_users_to_course(args.course_id, ids))
        .await
        .context("Failed to add users")?;

    output::success(&format!("Added {} user(s) to {}", args.users.len(), course.name));
    Ok(())
}

pub async fn remove(args: ManageUsersArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.logged_in_client()?;
    let candidates = client
        .reported(client.removable_users(args.course_id))
        .await
        .context("Failed to list users")?;

    let Some(ids) = select(&args.users, &candidates)? else {
        return Ok(());
    };
    let course = client
        .reported(client.remove_users_from_course(args.course_id, ids))
        .await
        .context("Failed to remove users")?;

    output::success(&format!(
        "Removed {} user(s) from {}",
        args.users.len(),
        course.name
    ));
    Ok(())
}

/// Check the requested ids against the candidates.
///
/// With no ids the candidates are printed and `None` is returned.
fn select(requested: &[Id], candidates: &[User]) -> Result<Option<Vec<Id>>> {
    if requested.is_empty() {
        if candidates.is_empty() {
            eprintln!("{}", "No users available.".dimmed());
        } else {
            print_users(candidates);
        }
        return Ok(None);
    }

    if let Some(id) = requested
        .iter()
        .find(|id| !candidates.iter().any(|u| u.id == **id))
    {
        bail!("User {} cannot be selected for this course", id);
    }
    Ok(Some(requested.to_vec()))
}

fn print_users(users: &[User]) {
    for user in users {
        output::entry(user.id, &user.display_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: Id) -> User {
        User {
            id,
            username: format!("user{}", id),
            email: None,
            name: None,
            last_name: None,
            roles: vec![],
            courses: None,
        }
    }

    #[test]
    fn select_accepts_candidates() {
        let ids = select(&[2, 3], &[user(2), user(3), user(4)]).unwrap();
        assert_eq!(ids, Some(vec![2, 3]));
    }

    #[test]
    fn select_rejects_non_candidates() {
        let err = select(&[1], &[user(2)]).unwrap_err();
        assert!(err.to_string().contains("User 1"));
    }

    #[test]
    fn select_without_ids_lists_only() {
        assert_eq!(select(&[], &[user(2)]).unwrap(), None);
    }
}
