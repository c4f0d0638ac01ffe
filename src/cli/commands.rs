//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gptref")]
#[command(about = "Manage named custom GPT references", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print debug diagnostics on stderr (GPTREF_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new workspace
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Add a reference
    Add {
        /// Display name
        name: String,

        /// The GPT reference (id or URL)
        reference: String,

        /// Optional description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List all references in insertion order
    #[command(alias = "ls")]
    List,

    /// Show the selected reference
    Show,

    /// Select a reference by id
    Select {
        /// Entry id (see `gptref list`)
        id: String,
    },

    /// Remove a reference by id
    #[command(alias = "rm")]
    Remove {
        /// Entry id (see `gptref list`)
        id: String,
    },

    /// Export all references to a JSON file
    Export {
        /// Output file, or directory for a timestamped file
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Replace all references with the contents of a JSON export
    Import {
        /// Exported JSON file
        file: PathBuf,

        /// Only validate the file, do not import it
        #[arg(long)]
        check: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
