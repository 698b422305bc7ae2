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

use clap::builder::ValueHint;
use clap_derive::Parser;
use eyre::eyre;
use figment::Figment;
use figment::providers::{Format as ProviderFormat, Json, Serialized, Yaml};
use py2py_common::{AssignTargets, UnparseOptions};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[arg(
        value_name = "INPUT",
        help = "JSON syntax tree to render. Reads standard input if not given.",
        value_hint = ValueHint::FilePath
    )]
    pub input: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "output",
        help = "Write the rendered source here instead of standard output",
        value_hint = ValueHint::FilePath
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "config",
        help = "Path to a rendering configuration (YAML, or JSON by extension) file. \
                Configuration file values can be overridden by command line arguments.",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Spaces per indentation level. 0 indents with tabs."
    )]
    pub indent: Option<usize>,

    #[arg(
        long,
        help = "Refuse trees whose nodes nest deeper than this"
    )]
    pub max_depth: Option<usize>,

    #[arg(
        long,
        help = "Insert parentheses where operator precedence would otherwise regroup the expression"
    )]
    pub parenthesize: bool,

    #[arg(
        long,
        help = "Join multiple assignment targets as `a = b = value` instead of `a, b = value`"
    )]
    pub chain_assign: bool,

    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,
}

/// The subset of options given on the command line. Absent fields leave the lower layers alone.
#[derive(Serialize, Default)]
struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    indent: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parenthesize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assign_targets: Option<AssignTargets>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            indent: self.indent,
            max_depth: self.max_depth,
            parenthesize: self.parenthesize.then_some(true),
            assign_targets: self.chain_assign.then_some(AssignTargets::Chain),
        }
    }

    /// Defaults, then the configuration file if any, then command line flags.
    pub fn load_options(&self) -> Result<UnparseOptions, eyre::Report> {
        let mut figment = Figment::new().merge(Serialized::defaults(UnparseOptions::default()));
        if let Some(path) = &self.config {
            // Figment quietly skips missing files.
            if !path.is_file() {
                return Err(eyre!("Configuration file {:?} does not exist", path));
            }
            figment = match path.extension().and_then(|e| e.to_str()) {
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Yaml::file(path)),
            };
        }
        let options: UnparseOptions = figment
            .merge(Serialized::defaults(self.overrides()))
            .extract()
            .map_err(|e| eyre!("Failed to load configuration from {:?}: {}", self.config, e))?;
        if options.max_depth == 0 {
            return Err(eyre!("max_depth must be at least 1"));
        }
        Ok(options)
    }
}
