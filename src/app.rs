// Declare modules
pub mod cli;
pub mod config;
pub mod extractor;
pub mod formatter;
pub mod models;
pub mod parser;
pub mod scaffold;
pub mod source;

use anyhow::{bail, Context, Result};
use std::env;
use std::io;
use std::path;

use self::cli::Cli;
use self::config::resolve_config;
use self::extractor::{extract_tree_block, filter_tree_lines};
use self::formatter::OutputGenerator;
use self::models::{Action, RuntimeConfig};
use self::parser::{parse_tree, CURRENT_DIR};
use self::scaffold::{ScaffoldBuilder, ScaffoldOptions};
use self::source::load_source;

/// Text to actions: extract, filter, parse and build.
pub fn scaffold_from_text(markdown: &str, config: &RuntimeConfig) -> Result<Vec<Action>> {
    let block = extract_tree_block(markdown);
    let lines = filter_tree_lines(&block);
    log::debug!("{} candidate line(s) in tree block", lines.len());

    let tree = parse_tree(&lines);
    if tree.entries.is_empty() && tree.root == CURRENT_DIR {
        bail!("No entries parsed; is your tree block correct?");
    }

    let base = path::absolute(&config.base_dir)
        .context(format!("Failed to resolve base directory {:?}", config.base_dir))?;
    let builder = ScaffoldBuilder::new(
        base,
        ScaffoldOptions {
            dry_run: config.dry_run,
            force: config.force,
            default_file_content: config.default_file_content.clone(),
        },
    );

    builder.build(&tree.root, &tree.entries)
}

/// Initializes components and orchestrates data flow.
pub fn run(args: Cli) -> Result<()> {
    // 1. Identify the working directory name for preset auto-detection
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let project_name = current_dir.file_name().and_then(|n| n.to_str());

    // 2. Resolve Configuration
    let config = resolve_config(args, project_name)?;

    // 3. Load input
    let markdown = load_source(&config.source, io::stdin().lock())?;

    // 4. Parse and build
    let actions = scaffold_from_text(&markdown, &config)?;
    if config.dry_run {
        log::info!("Dry run: {} action(s) planned, nothing written", actions.len());
    }

    // 5. Print to Stdout
    println!("{}", OutputGenerator::generate_report(&actions));

    Ok(())
}
