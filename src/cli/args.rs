//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::application::services::OutputFormat;

/// Hierarchical menu rendering and deterministic text decoration
#[derive(Parser, Debug)]
#[command(name = "menudeco")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, env = "MENUDECO_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and render menu trees
    Menu {
        #[command(subcommand)]
        command: MenuCommands,
    },

    /// Decorate text
    Text {
        #[command(subcommand)]
        command: TextCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum MenuCommands {
    /// Render a menu definition (.toml or .json)
    Render {
        /// Menu definition file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Output projection (default from settings)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Render the built-in sample menu
    Demo {
        /// Output projection (default from settings)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TextCommands {
    /// Wrap text in the selected decorators
    Decorate {
        /// Raw text
        text: String,
        #[arg(short, long)]
        bold: bool,
        #[arg(short, long)]
        italic: bool,
        #[arg(short, long)]
        underline: bool,
        /// Additional decorator by name (repeatable)
        #[arg(short = 'w', long = "with", value_name = "NAME")]
        with: Vec<String>,
    },
    /// List decorators in nesting order
    List,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file location
    Path,
}
