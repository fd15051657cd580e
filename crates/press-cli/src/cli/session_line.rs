//! Command grammar for lines typed into `press session`.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "session",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Commands available inside a press session"
)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub enum SessionCommand {
    /// Ask for a new batch of article ideas.
    Generate {
        /// Feed current community trends into the prompt.
        #[arg(long)]
        trends: bool,
    },
    /// List ideas (pending only unless --all).
    Ideas {
        #[arg(long)]
        all: bool,
    },
    /// Turn a pending idea into the current draft.
    Approve { id: String },
    /// Reject a pending idea.
    Reject { id: String },
    /// Show the current draft.
    Draft {
        /// Show the generated text before cleaning.
        #[arg(long)]
        raw: bool,
    },
    /// Copy the cleaned draft to the clipboard.
    Copy,
    /// Copy the draft as one CSV row to the clipboard.
    Export,
    /// Drop the current draft.
    Discard,
    /// Save the draft to the published history.
    Publish,
    /// Post the draft through the relay, then save it.
    PublishRemote,
    /// List published articles.
    Articles,
    /// Reload ideas and articles from the store.
    Sync,
    /// Show the workflow phase and last error.
    Status,
    /// Leave the session.
    #[command(alias = "exit")]
    Quit,
}

impl SessionLine {
    /// Parse one whitespace-separated input line.
    ///
    /// # Errors
    ///
    /// Returns the clap error, which also carries `help` output.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(line.split_whitespace())
    }
}
