use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `medkb` binary.
#[derive(Debug, Parser)]
#[command(
    name = "medkb",
    version,
    about = "medkb - medical knowledge search and symptom checks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON corpus snapshot (defaults to general.corpus_path)
    #[arg(short, long, global = true)]
    pub corpus: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            corpus: self.corpus.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "medkb",
            "--format",
            "table",
            "--limit",
            "10",
            "--verbose",
            "stats",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["medkb", "stats", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["medkb", "--format", "xml", "stats"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn search_collects_filters() {
        let cli = Cli::try_parse_from([
            "medkb",
            "search",
            "tăng huyết áp",
            "--category",
            "tim mạch",
            "--content-type",
            "FAQ",
        ])
        .expect("cli should parse");

        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.query, "tăng huyết áp");
        assert_eq!(args.filters.category.as_deref(), Some("tim mạch"));
        assert_eq!(args.filters.content_type.as_deref(), Some("FAQ"));
        assert_eq!(args.filters.difficulty, None);
    }

    #[test]
    fn check_takes_many_phrases_and_context() {
        let cli = Cli::try_parse_from([
            "medkb",
            "check",
            "đau ngực",
            "khó thở",
            "--age",
            "70",
            "--duration-days",
            "2",
        ])
        .expect("cli should parse");

        let Commands::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.symptoms, vec!["đau ngực", "khó thở"]);
        assert_eq!(args.age, Some(70));
        assert_eq!(args.duration_days, Some(2));
    }

    #[test]
    fn check_requires_a_phrase() {
        assert!(Cli::try_parse_from(["medkb", "check"]).is_err());
    }

    #[test]
    fn recommend_exclude_is_repeatable() {
        let cli = Cli::try_parse_from([
            "medkb",
            "recommend",
            "huyết áp",
            "--exclude",
            "kb-1",
            "--exclude",
            "kb-2",
        ])
        .expect("cli should parse");

        let Commands::Recommend(args) = cli.command else {
            panic!("expected recommend command");
        };
        assert_eq!(args.exclude, vec!["kb-1", "kb-2"]);
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["medkb", "--corpus", "/tmp/corpus.json", "stats"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.corpus.as_deref(), Some(Path::new("/tmp/corpus.json")));
    }
}
