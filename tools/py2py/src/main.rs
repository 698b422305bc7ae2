// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

mod args;

use crate::args::Args;
use clap::Parser;
use eyre::WrapErr;
use py2py_common::UnparseOptions;
use py2py_common::tracing::init_tracing;
use py2py_unparse::{lower_module, unparse_module};
use serde::Deserialize;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

fn read_input(input: Option<&Path>) -> Result<String, eyre::Report> {
    match input {
        Some(path) => {
            std::fs::read_to_string(path).wrap_err_with(|| format!("Unable to read {path:?}"))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .wrap_err("Unable to read standard input")?;
            Ok(text)
        }
    }
}

/// Parse a JSON document however deeply it nests. Lowering enforces the configured limit.
fn parse_json(source: &str) -> Result<serde_json::Value, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(source);
    deserializer.disable_recursion_limit();
    let value =
        serde_json::Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Drop a JSON value without recursing, however deeply it nests.
fn dismantle(value: serde_json::Value) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            serde_json::Value::Array(items) => pending.extend(items),
            serde_json::Value::Object(fields) => pending.extend(fields.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}

/// Parse, lower and render one JSON tree.
fn render(source: &str, options: &UnparseOptions) -> Result<String, eyre::Report> {
    let raw = parse_json(source).wrap_err("Input is not a JSON document")?;
    let lowered = lower_module(&raw, options);
    dismantle(raw);
    let module = lowered?;
    let mut text = unparse_module(&module, options)?;
    if !text.is_empty() {
        text.push('\n');
    }
    Ok(text)
}

fn main() -> Result<(), eyre::Report> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    init_tracing(args.debug)?;

    let options = args.load_options()?;
    debug!(?options, "Loaded rendering options");

    let source = read_input(args.input.as_deref())?;
    let text = render(&source, &options)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &text).wrap_err_with(|| format!("Unable to write {path:?}"))?;
            info!(path = ?path, bytes = text.len(), "Wrote rendered source");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
