//! Tree command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use v4t_client::TreeItem;
use v4t_client::tree::{load_children, load_roots};

use crate::session::CliContext;

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Also list the exercises of every course
    #[arg(long)]
    pub expand: bool,
}

pub async fn run(args: TreeArgs, ctx: &CliContext) -> Result<()> {
    let client = ctx.client()?;

    for item in load_roots(&client).await {
        print_item(&item, 0);
        if let TreeItem::Course { course, .. } = &item
            && args.expand
        {
            for child in load_children(&client, course).await {
                print_item(&child, 1);
            }
        }
    }

    Ok(())
}

fn print_item(item: &TreeItem, depth: usize) {
    let indent = "  ".repeat(depth);
    match item {
        TreeItem::Course { course, .. } => {
            println!("{}{} {}", indent, item.label().bold(), format!("#{}", course.id).dimmed())
        }
        TreeItem::Exercise { exercise, .. } => {
            println!("{}{} {}", indent, item.label(), format!("#{}", exercise.id).dimmed())
        }
        _ => println!("{}{}", indent, item.label().italic()),
    }
}
