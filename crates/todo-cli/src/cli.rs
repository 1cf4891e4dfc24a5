use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use todo_server::StorageKind;
use todo_types::{ListId, TodoId};

pub const DEFAULT_DB: &str = "todos.db";

#[derive(Parser)]
#[command(name = "todos", about = "Keep lists of things to do", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Database file for list and todo commands.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

impl Cli {
    pub fn db_path(&self) -> PathBuf {
        self.db.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DB))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API
    Serve(ServeArgs),
    /// Show all lists
    Lists,
    /// Create a list
    Create(CreateArgs),
    /// Rename a list
    Rename(RenameArgs),
    /// Delete a list and its todos
    Delete(ListArgs),
    /// Show one list with its todos
    Show(ListArgs),
    /// Add a todo to a list
    Add(AddArgs),
    /// Mark a todo completed
    Done(DoneArgs),
    /// Remove a todo
    Rm(TodoArgs),
    /// Mark every todo of a list completed
    CompleteAll(ListArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file).
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// `session` or `database` (overrides the config file).
    #[arg(long)]
    pub storage: Option<StorageKind>,
    /// TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CreateArgs {
    pub name: String,
}

#[derive(Args)]
pub struct RenameArgs {
    pub list: ListId,
    pub name: String,
}

#[derive(Args)]
pub struct ListArgs {
    pub list: ListId,
}

#[derive(Args)]
pub struct AddArgs {
    pub list: ListId,
    pub name: String,
}

#[derive(Args)]
pub struct DoneArgs {
    pub list: ListId,
    pub todo: TodoId,
    /// Mark the todo open again instead.
    #[arg(long)]
    pub undo: bool,
}

#[derive(Args)]
pub struct TodoArgs {
    pub list: ListId,
    pub todo: TodoId,
}
