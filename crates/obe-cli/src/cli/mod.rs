use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `obe` binary.
#[derive(Debug, Parser)]
#[command(name = "obe", version, about = "OBE - CO/PO/PSO attainment calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Table coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Dataset file, TOML or JSON (defaults to general.dataset from config)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            data: self.data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{MatrixCommands, OutcomeKindArg};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "obe",
            "--format",
            "table",
            "--data",
            "term.toml",
            "--verbose",
            "program",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.data, Some(PathBuf::from("term.toml")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Program));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["obe", "course", "C001", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Course(ref args) if args.course_id == "C001"));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["obe", "--format", "xml", "validate"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn department_accepts_semester_filter() {
        let cli = Cli::try_parse_from(["obe", "department", "--semester", "3"])
            .expect("cli should parse");
        let Commands::Department(args) = cli.command else {
            panic!("expected department command");
        };
        assert_eq!(args.semester, Some(3));
        assert_eq!(args.department, None);
    }

    #[test]
    fn matrix_set_accepts_negative_value() {
        let cli = Cli::try_parse_from([
            "obe", "matrix", "set", "C001", "C001.1", "PO1", "-2", "--output", "out.json",
        ])
        .expect("cli should parse");
        let Commands::Matrix(args) = cli.command else {
            panic!("expected matrix command");
        };
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert!(matches!(
            args.action,
            MatrixCommands::Set { ref value, .. } if value == "-2"
        ));
    }

    #[test]
    fn matrix_add_outcome_parses_kind() {
        let cli = Cli::try_parse_from(["obe", "matrix", "add-outcome", "pso", "--description", "x"])
            .expect("cli should parse");
        let Commands::Matrix(args) = cli.command else {
            panic!("expected matrix command");
        };
        assert!(matches!(
            args.action,
            MatrixCommands::AddOutcome {
                kind: OutcomeKindArg::Pso,
                ..
            }
        ));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["obe", "--data", "/tmp/term.json", "validate"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.data, Some(PathBuf::from("/tmp/term.json")));
    }
}
