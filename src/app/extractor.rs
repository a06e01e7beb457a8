use regex::Regex;
use std::sync::LazyLock;

/// Box-drawing characters used to render tree branches.
pub const TREE_CHARS: [char; 4] = ['│', '├', '└', '─'];

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_-]*\r?\n(.*?)```").expect("fence pattern is valid")
});

fn has_tree_marker(text: &str) -> bool {
    text.contains(&TREE_CHARS[..]) || text.contains('/') || text.contains('\\')
}

/// Picks the part of the input most likely to be the tree diagram.
///
/// Fenced code blocks are ranked longest first, and the first one that looks
/// like a tree wins. Without any fence the whole input is used.
pub fn extract_tree_block(markdown: &str) -> String {
    let mut blocks: Vec<&str> = FENCE
        .captures_iter(markdown)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    if blocks.is_empty() {
        log::debug!("No fenced block found, using the whole input");
        return markdown.trim().to_string();
    }

    // Stable sort keeps document order among equal lengths
    blocks.sort_by(|a, b| b.len().cmp(&a.len()));
    log::debug!("Found {} fenced block(s)", blocks.len());

    let chosen = blocks
        .iter()
        .find(|block| has_tree_marker(block))
        .unwrap_or(&blocks[0]);

    chosen.trim().to_string()
}

/// Keeps only lines that carry structural signal, right-trimmed.
pub fn filter_tree_lines(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && has_tree_marker(line))
        .map(str::to_string)
        .collect()
}
