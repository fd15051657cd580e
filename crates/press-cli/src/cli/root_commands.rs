use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Strip template scaffolding from generated article text.
    Clean(CleanArgs),
    /// Show trending discussions in the configured community.
    Trends,
    /// Stored article ideas.
    Ideas {
        #[command(subcommand)]
        action: ListCommands,
    },
    /// Published articles.
    Articles {
        #[command(subcommand)]
        action: ListCommands,
    },
    /// Print the JSON Schema of a record type.
    Schema(SchemaArgs),
    /// Interactive idea → draft → publish session.
    Session,
}

#[derive(Clone, Debug, Args)]
pub struct CleanArgs {
    /// File to clean (reads stdin when omitted).
    pub file: Option<PathBuf>,

    /// Article title; duplicated title lines at the top are dropped.
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum ListCommands {
    /// List every record in the collection.
    List,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Idea,
    Draft,
    Article,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Record type.
    #[arg(value_enum)]
    pub type_name: SchemaType,
}
