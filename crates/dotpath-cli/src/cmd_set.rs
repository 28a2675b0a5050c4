use crate::cmd_get::parse_path;
use crate::document::{emit, read_document, render};
use anyhow::{Context, Result, bail};
use dotpath::v1::query;
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

pub struct SetArgs {
    pub path: String,
    pub value: String,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub in_place: bool,
    pub string: bool,
}

pub fn run(args: SetArgs, pretty: bool) -> Result<()> {
    let output = if args.in_place {
        match &args.input {
            Some(p) if p.as_os_str() != "-" => Some(p.clone()),
            _ => bail!("--in-place requires an input file"),
        }
    } else {
        args.output
    };

    let mut doc = read_document(args.input.as_ref())?;
    let leaf = parse_value(&args.value, args.string)?;
    apply(&mut doc, &args.path, leaf)?;
    info!(path = %args.path, "value set");

    emit(&render(&doc, pretty)?, output.as_ref())
}

fn parse_value(raw: &str, as_string: bool) -> Result<Value> {
    if as_string {
        return Ok(Value::String(raw.to_string()));
    }
    serde_json::from_str(raw).with_context(|| {
        format!(
            "Value {:?} is not valid JSON (pass --string to store it as text)",
            raw
        )
    })
}

fn apply(doc: &mut Value, raw: &str, leaf: Value) -> Result<()> {
    let path = parse_path(raw)?;
    query::set(doc, &path, leaf).with_context(|| format!("Failed to set {}", path))?;
    Ok(())
}
