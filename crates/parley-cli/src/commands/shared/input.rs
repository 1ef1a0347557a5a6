use std::io::Read;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read a whole input, where `-` means stdin.
pub fn read_text(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
}

/// Read and parse a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| format!("{path} is not valid JSON"))
}
