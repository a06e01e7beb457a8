use crate::app::models::InputSource;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;

/// Loads the raw tree text. `stdin` is only consumed for `InputSource::Stdin`.
pub fn load_source(source: &InputSource, mut stdin: impl Read) -> Result<String> {
    match source {
        InputSource::Text(text) => Ok(text.clone()),
        InputSource::File(path) => {
            fs::read_to_string(path).context(format!("Failed to read tree file {:?}", path))
        }
        InputSource::Stdin => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("Failed to read tree from stdin")?;
            Ok(buf)
        }
    }
}
