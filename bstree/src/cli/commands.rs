//! Command dispatch: thin driver over the tree API

use std::io;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::sample::{random_values, unbalancing_values};
use crate::tree::BinarySearchTree;
use crate::tree_traits::TreeDisplay;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Demo { size, seed, tree }) => demo(cli, *size, *seed, *tree),
        Some(Commands::Show {
            values,
            insert,
            delete,
            rebalance,
            tree,
        }) => show(values, insert, delete, *rebalance, *tree),
        Some(Commands::Config { command }) => config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        )),
    }
}

/// Print balance, size and all four traversals of `tree`.
pub fn report(title: &str, tree: &BinarySearchTree<i64>, show_tree: bool) {
    output::header(title);
    output::check("Balanced", tree.is_balanced());
    output::detail(&format!("Size: {}, height: {}", tree.len(), tree.height()));
    output::sequence("Level order", &tree.level_order());
    output::sequence("Preorder", &tree.preorder());
    output::sequence("Postorder", &tree.postorder());
    output::sequence("Inorder", &tree.inorder());
    if show_tree {
        output::info(&tree.to_tree_string());
    }
}

#[instrument(level = "debug", skip(cli))]
fn demo(cli: &Cli, size: Option<usize>, seed: Option<u64>, show_tree: bool) -> CliResult<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(size) = size {
        settings.sample_size = size;
    }
    if seed.is_some() {
        settings.seed = seed;
    }
    debug!(?settings, "effective settings");

    let values = random_values(&settings)?;
    output::sequence("Sample", &values);
    let mut tree = BinarySearchTree::build(values);
    report("Initial tree", &tree, show_tree);

    let extra = unbalancing_values(&settings);
    for value in &extra {
        tree.insert(*value);
    }
    output::header("After inserting values above the range");
    output::sequence("Inserted", &extra);
    output::check("Balanced", tree.is_balanced());
    if show_tree {
        output::info(&tree.to_tree_string());
    }

    tree.rebalance();
    report("After rebalancing", &tree, show_tree);
    Ok(())
}

#[instrument(level = "debug")]
fn show(
    values: &[i64],
    insert: &[i64],
    delete: &[i64],
    rebalance: bool,
    show_tree: bool,
) -> CliResult<()> {
    let mut tree = BinarySearchTree::build(values.iter().copied());

    for value in insert {
        if !tree.insert(*value) {
            output::detail(&format!("{value} already present, not inserted"));
        }
    }
    for value in delete {
        if tree.delete(value).is_none() {
            output::detail(&format!("{value} not present, nothing deleted"));
        }
    }
    if rebalance {
        tree.rebalance();
        output::action("Rebalanced", &format!("height {}", tree.height()));
    }

    report("Tree", &tree, show_tree);
    Ok(())
}

fn config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::detail("no home directory, global config unavailable"),
        },
    }
    Ok(())
}
