use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::debug;

/// Read a JSON document from `input`, or from stdin when it is absent or `-`.
pub fn read_document(input: Option<&PathBuf>) -> Result<Value> {
    let content = match input.filter(|p| p.as_os_str() != "-") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    debug!(bytes = content.len(), "read input document");
    parse_document(&content)
}

pub fn parse_document(content: &str) -> Result<Value> {
    serde_json::from_str(content).context("Failed to parse input as JSON")
}

pub fn render(value: &Value, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Write `rendered` to `output`, or print it when no output file is given.
pub fn emit(rendered: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", rendered))
                .with_context(|| format!("Failed to write {:?}", path))?;
            debug!(?path, "wrote output document");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
