//! Command-line arguments for tastetune

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tastetune_common::config::CliOverrides;

/// Command-line arguments for tastetune
#[derive(Parser, Debug)]
#[command(name = "tastetune")]
#[command(about = "Build the food → mood → music document from the taste sheets")]
#[command(version)]
pub struct Args {
    /// TOML config file (default: ./tastetune.toml, then the user config dir)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert the sheets into the JSON document (default)
    Convert(ConvertArgs),
    /// Pick one track for a food and mood from a written document
    Pick(PickArgs),
}

#[derive(ClapArgs, Debug, Default)]
pub struct ConvertArgs {
    /// Workbook (.xlsx/.xls/.ods) or directory of <sheet>.csv files
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output document path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Name of the food → taste sheet
    #[arg(long)]
    pub sheet_a: Option<String>,

    /// Name of the taste → mood → music sheet
    #[arg(long)]
    pub sheet_b: Option<String>,
}

impl ConvertArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            input: self.input.clone(),
            output: self.output.clone(),
            sheet_a: self.sheet_a.clone(),
            sheet_b: self.sheet_b.clone(),
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct PickArgs {
    /// Food name as it appears in the document
    #[arg(long)]
    pub food: String,

    /// Mood (relaxation/excitement/focus/calm or a Japanese spelling)
    #[arg(long)]
    pub mood: String,

    /// Document to read (default: the configured output path)
    #[arg(short, long)]
    pub document: Option<PathBuf>,

    /// Seed for a reproducible weighted draw
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_convert_defaults() {
        let args = Args::try_parse_from(["tastetune"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_convert_overrides() {
        let args = Args::try_parse_from([
            "tastetune",
            "convert",
            "-i",
            "book.xlsx",
            "--sheet-a",
            "foods",
            "-o",
            "out.json",
        ])
        .unwrap();
        let Some(Command::Convert(convert)) = args.command else {
            panic!("expected convert");
        };
        let overrides = convert.overrides();
        assert_eq!(overrides.input, Some(PathBuf::from("book.xlsx")));
        assert_eq!(overrides.output, Some(PathBuf::from("out.json")));
        assert_eq!(overrides.sheet_a.as_deref(), Some("foods"));
        assert_eq!(overrides.sheet_b, None);
    }

    #[test]
    fn test_pick_args() {
        let args = Args::try_parse_from([
            "tastetune",
            "pick",
            "--food",
            "カレー",
            "--mood",
            "元気",
            "--seed",
            "7",
            "--config",
            "x.toml",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
        let Some(Command::Pick(pick)) = args.command else {
            panic!("expected pick");
        };
        assert_eq!(pick.food, "カレー");
        assert_eq!(pick.mood, "元気");
        assert_eq!(pick.seed, Some(7));
        assert!(pick.document.is_none());
    }

    #[test]
    fn test_pick_requires_food_and_mood() {
        assert!(Args::try_parse_from(["tastetune", "pick", "--food", "x"]).is_err());
    }
}
