//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::comment::CommentCommand;
use crate::commands::course::CourseCommand;
use crate::commands::exercise::ExerciseCommand;
use crate::commands::{login, logout, signup, tree, whoami};

/// Command-line client for VS Code 4 Teaching.
#[derive(Parser, Debug)]
#[command(name = "v4t")]
#[command(author, version = env!("V4T_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Session file (defaults to the platform data directory)
    #[arg(long, env = "V4T_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to a server
    Login(login::LoginArgs),

    /// Create a student account, or a teacher account when logged in as a teacher
    Signup(signup::SignupArgs),

    /// Forget the current session
    Logout(logout::LogoutArgs),

    /// Display the logged-in user
    Whoami(whoami::WhoamiArgs),

    /// Show the course tree
    Tree(tree::TreeArgs),

    /// Course operations
    Course(CourseCommand),

    /// Exercise operations
    Exercise(ExerciseCommand),

    /// Comment operations
    Comment(CommentCommand),
}
