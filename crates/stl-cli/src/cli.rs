//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stl_core::TableRowRequest;

/// staging2live - Carry selected staging changes over to a production site
#[derive(Parser, Debug)]
#[command(name = "stl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List every file under a root with its SHA-256 hash
    Scan {
        /// Directory to scan
        root: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Copy the production tree into the staging snapshot directory
    Snapshot {
        /// Site configuration (TOML or JSON)
        #[arg(short, long, env = "STL_CONFIG")]
        config: PathBuf,
    },

    /// Record the production inventory in the file-hash table
    Index {
        /// Site configuration (TOML or JSON)
        #[arg(short, long, env = "STL_CONFIG")]
        config: PathBuf,
    },

    /// Apply selected staging changes to production
    ///
    /// Examples:
    ///   stl sync -c stl.toml --file-changes files.json --file wp-config.php
    ///   stl sync -c stl.toml --db-changes db.json --row posts:42 --row options:blogname
    Sync {
        /// Site configuration (TOML or JSON)
        #[arg(short, long, env = "STL_CONFIG")]
        config: PathBuf,

        /// JSON map of path -> change type from the file comparer
        #[arg(long)]
        file_changes: Option<PathBuf>,

        /// JSON change list from the database comparer
        #[arg(long)]
        db_changes: Option<PathBuf>,

        /// Relative file path to sync (repeatable)
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<String>,

        /// Row to sync as TABLE:ID (repeatable)
        #[arg(long = "row", value_name = "TABLE:ID")]
        rows: Vec<TableRowRequest>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
