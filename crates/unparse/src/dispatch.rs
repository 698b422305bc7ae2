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

//! Per-family rendering entry points. Each node family implements [`Render`] with its own
//! output shape; the implementations are exhaustive matches over the family's closed set of
//! kinds, so every kind is guaranteed a renderer at build time. Kind tags that arrive as
//! text are resolved against the same closed sets in [`crate::lower`].

use crate::ast::{Alias, Expr, Slice, Stmt};
use crate::errors::UnparseError;
use crate::op::{BinaryOp, BoolOp, CmpOp, UnaryOp};
use crate::unparse::Unparser;
use strum::Display;

/// The five closed groupings of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Family {
    Statement,
    Expression,
    Operator,
    Slice,
    Alias,
}

pub trait Render {
    type Output;
    const FAMILY: Family;

    /// The kind tag of this node, e.g. `"FunctionDef"` or `"FloorDiv"`.
    fn kind(&self) -> &'static str;

    fn render(&self, unparser: &Unparser) -> Result<Self::Output, UnparseError>;
}

impl Render for Stmt {
    type Output = Vec<String>;
    const FAMILY: Family = Family::Statement;

    fn kind(&self) -> &'static str {
        self.into()
    }

    fn render(&self, unparser: &Unparser) -> Result<Vec<String>, UnparseError> {
        unparser.unparse_stmt(self)
    }
}

impl Render for Expr {
    type Output = String;
    const FAMILY: Family = Family::Expression;

    fn kind(&self) -> &'static str {
        self.into()
    }

    fn render(&self, unparser: &Unparser) -> Result<String, UnparseError> {
        unparser.unparse_expr(self)
    }
}

impl Render for Slice {
    type Output = String;
    const FAMILY: Family = Family::Slice;

    fn kind(&self) -> &'static str {
        self.into()
    }

    fn render(&self, unparser: &Unparser) -> Result<String, UnparseError> {
        unparser.unparse_slice(self)
    }
}

impl Render for Alias {
    type Output = String;
    const FAMILY: Family = Family::Alias;

    fn kind(&self) -> &'static str {
        "alias"
    }

    fn render(&self, _unparser: &Unparser) -> Result<String, UnparseError> {
        Ok(match &self.asname {
            Some(asname) => format!("{} as {asname}", self.name),
            None => self.name.clone(),
        })
    }
}

macro_rules! render_operator {
    ($($op:ty),*) => {
        $(
            impl Render for $op {
                type Output = &'static str;
                const FAMILY: Family = Family::Operator;

                fn kind(&self) -> &'static str {
                    self.into()
                }

                fn render(&self, _unparser: &Unparser) -> Result<&'static str, UnparseError> {
                    Ok(self.token())
                }
            }
        )*
    };
}

render_operator!(BinaryOp, UnaryOp, BoolOp, CmpOp);
