use crate::app::extractor::TREE_CHARS;
use crate::app::models::{Entry, ParsedTree};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Root name used when the diagram has no usable first line.
pub const CURRENT_DIR: &str = ".";

/// Characters past the leading run still inspected when counting connectors.
const LOOKBACK_WINDOW: usize = 10;

const DEFAULT_INDENT_UNIT: usize = 4;
const TAB_WIDTH: usize = 4;

fn is_vertical(c: char) -> bool {
    c == '│'
}

fn is_branch(c: char) -> bool {
    c == '├' || c == '└'
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Length, in characters, of the leading run of whitespace and `│`.
pub fn leading_run(line: &str) -> usize {
    line.chars()
        .take_while(|&c| c.is_whitespace() || is_vertical(c))
        .count()
}

/// Strips connectors, branch markers and inline comments from a line.
fn extract_label(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_whitespace() || TREE_CHARS.contains(&c));
    let rest = ["├──", "└──", "──"]
        .iter()
        .find_map(|marker| rest.strip_prefix(*marker))
        .unwrap_or(rest);
    let rest = rest.trim();
    rest.split('#').next().unwrap_or_default().trim()
}

fn extract_root(line: &str) -> String {
    let stripped = line.trim_matches(|c: char| c.is_whitespace() || TREE_CHARS.contains(&c));
    let token = stripped.split_whitespace().last().unwrap_or_default();
    let name: String = token.chars().filter(|c| !TREE_CHARS.contains(c)).collect();
    let name = name.trim_end_matches(is_separator);

    if name.is_empty() {
        CURRENT_DIR.to_string()
    } else {
        name.to_string()
    }
}

/// True when the line right after `index` is indented deeper than it.
///
/// Only the first following line is decisive: deeper promotes, anything
/// else ends the scan.
pub fn has_nested_children(lines: &[String], index: usize) -> bool {
    let current = leading_run(&lines[index]);
    lines[index + 1..]
        .iter()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|next| leading_run(next) > current)
}

/// Display column of each char, expanding tabs.
fn columns(line: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    line.chars().scan(0usize, |col, c| {
        let at = *col;
        *col = if c == '\t' { (at / TAB_WIDTH + 1) * TAB_WIDTH } else { at + 1 };
        Some((at, c))
    })
}

/// Columns of the `│├└` connectors drawn in the line's leading prefix.
fn connector_columns(line: &str) -> Vec<usize> {
    columns(line)
        .take_while(|&(_, c)| c.is_whitespace() || is_vertical(c) || is_branch(c))
        .filter(|&(_, c)| is_vertical(c) || is_branch(c))
        .map(|(col, _)| col)
        .collect()
}

fn branch_column(line: &str) -> Option<usize> {
    columns(line)
        .take_while(|&(_, c)| c.is_whitespace() || is_vertical(c) || is_branch(c))
        .find(|&(_, c)| is_branch(c))
        .map(|(col, _)| col)
}

/// Column layout shared by the connector lines of one diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Grid {
    /// Leftmost column any connector line starts at.
    base: usize,
    /// Width of one nesting level.
    unit: usize,
}

impl Grid {
    /// The base is the smallest first-connector column. The unit is the most
    /// common jump in branch-marker column from one line to a deeper next
    /// line (a first child), narrower on ties.
    fn measure(lines: &[String]) -> Self {
        let base = lines
            .iter()
            .filter_map(|line| connector_columns(line).first().copied())
            .min()
            .unwrap_or(0);

        let mut steps: BTreeMap<usize, usize> = BTreeMap::new();
        let mut prev: Option<usize> = None;
        for col in lines.iter().filter_map(|line| branch_column(line)) {
            if let Some(p) = prev.filter(|&p| col > p) {
                *steps.entry(col - p).or_default() += 1;
            }
            prev = Some(col);
        }
        let unit = steps
            .into_iter()
            .max_by_key(|&(step, seen)| (seen, Reverse(step)))
            .map_or(DEFAULT_INDENT_UNIT, |(step, _)| step);

        Self { base, unit }
    }

    /// Tree depth of a connector-drawn line, or `None` for pure indentation.
    ///
    /// Counts `│├└` near the start of the line, plus whitespace-only levels
    /// left behind under last-child branches.
    fn depth(&self, line: &str) -> Option<usize> {
        let window = leading_run(line) + LOOKBACK_WINDOW;
        let count = line
            .chars()
            .take(window)
            .filter(|&c| is_vertical(c) || is_branch(c))
            .count();
        if count == 0 {
            return None;
        }

        let cols = connector_columns(line);
        let mut missing = cols
            .first()
            .map_or(0, |first| first.saturating_sub(self.base) / self.unit);
        for pair in cols.windows(2) {
            missing += ((pair[1] - pair[0]) / self.unit).saturating_sub(1);
        }

        Some(count + missing)
    }
}

#[derive(Debug)]
struct OpenDir {
    name: String,
    indent: usize,
}

/// Directory stack for a single parse pass.
#[derive(Debug)]
struct ParseState {
    stack: Vec<OpenDir>,
    grid: Grid,
}

impl ParseState {
    fn new(grid: Grid) -> Self {
        Self {
            stack: Vec::new(),
            grid,
        }
    }

    /// Pops until the stack holds exactly the ancestors of `line`.
    fn settle(&mut self, line: &str) {
        match self.grid.depth(line) {
            Some(depth) => {
                while !self.stack.is_empty() && self.stack.len() >= depth {
                    self.stack.pop();
                }
            }
            None => {
                let indent = leading_run(line);
                while self.stack.last().is_some_and(|dir| dir.indent >= indent) {
                    self.stack.pop();
                }
            }
        }
    }

    fn emit(&mut self, line: &str, name: &str, is_dir: bool) -> Entry {
        let mut segments: Vec<String> = self.stack.iter().map(|dir| dir.name.clone()).collect();
        segments.push(name.to_string());

        if is_dir {
            self.stack.push(OpenDir {
                name: name.to_string(),
                indent: leading_run(line),
            });
        }

        Entry { segments, is_dir }
    }
}

/// Turns filtered diagram lines into a root name and its entries.
///
/// Never fails: unrecognisable input yields an empty entry list.
pub fn parse_tree(lines: &[String]) -> ParsedTree {
    let Some(first) = lines.first() else {
        return ParsedTree {
            root: CURRENT_DIR.to_string(),
            entries: Vec::new(),
        };
    };

    let root = extract_root(first);
    log::info!("Tree root: {}", root);

    let mut state = ParseState::new(Grid::measure(&lines[1..]));
    let mut entries = Vec::new();

    for (index, line) in lines.iter().enumerate().skip(1) {
        let label = extract_label(line);
        if label.is_empty() {
            continue;
        }

        let has_slash = label.ends_with(is_separator);
        let name = label.trim_end_matches(is_separator).trim();
        if name.is_empty() {
            continue;
        }
        let is_dir = has_slash || has_nested_children(lines, index);

        state.settle(line);
        let entry = state.emit(line, name, is_dir);
        log::debug!(
            "{} {}",
            if entry.is_dir { "dir " } else { "file" },
            entry.rel_path()
        );
        entries.push(entry);
    }

    ParsedTree { root, entries }
}
