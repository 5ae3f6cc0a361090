//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Abstract-shape dataset builder: IDS decomposition, alias resolution, and
/// variant unification for CJK ideographs
#[derive(Parser, Debug)]
#[command(name = "abshape")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file (default: .abshape.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the dataset and write the JSON artifact
    Build {
        /// Source directory (overrides config)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        input: Option<PathBuf>,

        /// Artifact path (overrides config)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Read and classify all sources without writing anything
    Check {
        /// Source directory (overrides config)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        input: Option<PathBuf>,
    },

    /// Parse an IDS expression and print its tree
    Tree {
        /// IDS expression, e.g. ⿰氵工
        ids: String,
    },

    /// Show resolved settings
    Info,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
