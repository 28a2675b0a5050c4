use crate::document::read_document;
use anyhow::Result;
use dotpath::v1::{Kind, Path, query};
use serde_json::Value;
use std::path::PathBuf;

pub fn run(input: Option<PathBuf>, kind: Option<Kind>, json: bool, pretty: bool) -> Result<()> {
    let doc = read_document(input.as_ref())?;
    let paths = list(&doc, kind);

    if json {
        let out = if pretty {
            serde_json::to_string_pretty(&paths)?
        } else {
            serde_json::to_string(&paths)?
        };
        println!("{}", out);
    } else {
        for path in &paths {
            println!("{}", path);
        }
    }
    Ok(())
}

fn list(doc: &Value, kind: Option<Kind>) -> Vec<Path> {
    match kind {
        Some(kind) => query::paths_of(doc, kind),
        None => query::paths(doc),
    }
}
