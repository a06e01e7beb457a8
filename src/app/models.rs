use std::fmt;
use std::path::PathBuf;

/// Where the raw tree text comes from. Exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Text(String),
    File(PathBuf),
    Stdin,
}

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub source: InputSource,
    pub base_dir: PathBuf,
    pub dry_run: bool,
    pub force: bool,
    pub default_file_content: String,
}

/// A single parsed line of the diagram, relative to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub segments: Vec<String>,
    pub is_dir: bool,
}

impl Entry {
    /// Forward-slash joined path, independent of platform.
    pub fn rel_path(&self) -> String {
        self.segments.join("/")
    }
}

/// Output of the tree parser: the implicit root plus its entries in diagram order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTree {
    pub root: String,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Mkdir,
    Touch,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Mkdir => "mkdir",
            ActionKind::Touch => "touch",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so callers can use width specifiers like {:6}
        f.pad(self.as_str())
    }
}

/// A performed (or, in dry-run mode, planned) filesystem action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub path: PathBuf,
}
