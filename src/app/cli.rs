use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Create folders and files from an ASCII tree in Markdown",
    group(
        ArgGroup::new("source")
            .required(true)
            .args(["stdin", "text", "from_file"]),
    )
)]
pub struct Cli {
    /// Read the tree from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Provide the tree text directly
    #[arg(long)]
    pub text: Option<String>,

    /// Read the tree from a Markdown file
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<PathBuf>,

    /// Base directory to create content in (default: .)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// List actions, make no changes
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,

    /// Content to place into new files
    #[arg(long, value_name = "TEXT")]
    pub default_file_content: Option<String>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Log parse and write decisions to stderr
    #[arg(long, short)]
    pub verbose: bool,
}
