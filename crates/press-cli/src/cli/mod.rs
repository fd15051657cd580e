use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod session_line;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{CleanArgs, Commands, ListCommands, SchemaArgs, SchemaType};

/// Top-level CLI parser for the `press` binary.
#[derive(Debug, Parser)]
#[command(name = "press", version, about = "Pressroom - article ideas to published posts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, text, raw
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, ListCommands, OutputFormat, SchemaType};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["press", "--format", "json", "--verbose", "trends"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Trends));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["press", "ideas", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Ideas {
                action: ListCommands::List
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["press", "--format", "xml", "trends"]).is_err());
    }

    #[test]
    fn clean_takes_optional_file_and_title() {
        let cli = Cli::try_parse_from(["press", "clean", "draft.md", "--title", "Grow Fast"])
            .expect("cli should parse");
        let Commands::Clean(args) = cli.command else {
            panic!("expected clean");
        };
        assert_eq!(args.file.as_deref(), Some(Path::new("draft.md")));
        assert_eq!(args.title.as_deref(), Some("Grow Fast"));

        let cli = Cli::try_parse_from(["press", "clean"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Clean(args) if args.file.is_none()));
    }

    #[test]
    fn schema_accepts_known_types_only() {
        let cli = Cli::try_parse_from(["press", "schema", "article"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Schema(args) if args.type_name == SchemaType::Article));
        assert!(Cli::try_parse_from(["press", "schema", "trail"]).is_err());
    }
}
