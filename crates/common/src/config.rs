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

//! Options controlling how a syntax tree is rendered back to source. Created by the host (CLI flags,
//! config file) and lent to the unparser for the duration of a single call.

use serde::{Deserialize, Serialize};

/// Default number of spaces per indentation level.
pub const DEFAULT_INDENT: usize = 2;

/// Default limit on how deeply nodes may nest before rendering gives up. Lowering and rendering
/// grow their stacks on demand, so this bounds work and output size, not stack use.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnparseOptions {
    /// Number of spaces per indentation level. Zero indents with a single tab instead.
    pub indent: usize,
    /// Maximum node nesting depth. Trees nested deeper than this fail with an error rather than
    /// exhausting the stack.
    pub max_depth: usize,
    /// Insert parentheses where the tree's grouping differs from what operator precedence would
    /// produce when the text is parsed back. Off by default: output then mirrors the tree shape
    /// exactly, and trees that did not record grouping may render ambiguously.
    pub parenthesize: bool,
    /// How multiple assignment targets are joined.
    pub assign_targets: AssignTargets,
}

impl Default for UnparseOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            max_depth: DEFAULT_MAX_DEPTH,
            parenthesize: false,
            assign_targets: AssignTargets::default(),
        }
    }
}

impl UnparseOptions {
    /// The text prepended to a line for each level of nesting.
    pub fn indent_unit(&self) -> String {
        if self.indent == 0 {
            String::from("\t")
        } else {
            " ".repeat(self.indent)
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignTargets {
    /// `a, b = value`
    #[default]
    Comma,
    /// `a = b = value`
    Chain,
}

impl AssignTargets {
    pub fn separator(self) -> &'static str {
        match self {
            Self::Comma => ", ",
            Self::Chain => " = ",
        }
    }
}
