//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Binary search tree playground: build, mutate, inspect and rebalance
#[derive(Parser, Debug)]
#[command(name = "bstree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d -d -d)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a random tree, unbalance it, rebalance it and report each step
    Demo {
        /// Number of random values (overrides config)
        #[arg(short, long)]
        size: Option<usize>,

        /// RNG seed for a reproducible run (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Also print the tree structure
        #[arg(short, long)]
        tree: bool,
    },

    /// Build a tree from the given values, apply edits and report it
    Show {
        /// Initial values, duplicates and order do not matter
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<i64>,

        /// Insert a value after building (repeatable)
        #[arg(short, long, allow_negative_numbers = true)]
        insert: Vec<i64>,

        /// Delete a value after inserting (repeatable)
        #[arg(short = 'x', long, allow_negative_numbers = true)]
        delete: Vec<i64>,

        /// Rebalance after all edits
        #[arg(short, long)]
        rebalance: bool,

        /// Also print the tree structure
        #[arg(short, long)]
        tree: bool,
    },

    /// Inspect settings
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

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,

    /// Print a commented config template
    Template,

    /// Print the global config file location
    Path,
}
