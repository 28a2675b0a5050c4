use crate::document::{emit, read_document, render};
use anyhow::{Context, Result, anyhow};
use dotpath::v1::{Path, query};
use serde_json::Value;
use std::path::PathBuf;

pub fn run(path: String, input: Option<PathBuf>, pretty: bool) -> Result<()> {
    let doc = read_document(input.as_ref())?;
    let value = lookup(&doc, &path)?;
    emit(&render(value, pretty)?, None)
}

pub(crate) fn parse_path(raw: &str) -> Result<Path> {
    raw.parse().with_context(|| format!("Invalid path {:?}", raw))
}

fn lookup<'a>(doc: &'a Value, raw: &str) -> Result<&'a Value> {
    let path = parse_path(raw)?;
    query::get(doc, &path).ok_or_else(|| anyhow!("No value at path {}", path))
}
