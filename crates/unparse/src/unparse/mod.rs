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

//! Renders syntax trees back to source text. Statements become sequences of lines, everything
//! else a single line fragment. Nested bodies are rendered first and then indented as a block,
//! so indentation is a property of the output only.

use crate::ast::{Expr, Module, Stmt};
use crate::dispatch::Render;
use crate::errors::UnparseError;
use crate::precedence::{Precedence, get_precedence};
use itertools::Itertools;
use py2py_common::UnparseOptions;
use std::cell::Cell;
use tracing::{debug, trace};

mod expr;
mod stmt;

/// Below this much remaining stack, recursion continues on a fresh segment.
pub(crate) const STACK_RED_ZONE: usize = 64 * 1024;
/// Size of each fresh segment.
pub(crate) const STACK_GROWTH: usize = 1024 * 1024;

pub struct Unparser<'a> {
    options: &'a UnparseOptions,
    /// One level of indentation.
    indent: String,
    /// How many nodes deep the current render call is.
    depth: Cell<usize>,
}

/// Holds one level of the nesting budget for as long as it lives.
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<usize>, limit: usize) -> Result<Self, UnparseError> {
        let next = depth.get() + 1;
        if next > limit {
            return Err(UnparseError::NestingTooDeep { limit });
        }
        depth.set(next);
        Ok(Self { depth })
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

impl<'a> Unparser<'a> {
    pub fn new(options: &'a UnparseOptions) -> Self {
        Self {
            options,
            indent: options.indent_unit(),
            depth: Cell::new(0),
        }
    }

    /// Render any node. Every recursive step goes through here so that the nesting limit holds
    /// across families.
    /// The stack is grown on demand, so any limit is safe on a small thread stack.
    pub fn render<N: Render>(&self, node: &N) -> Result<N::Output, UnparseError> {
        let _guard = DepthGuard::enter(&self.depth, self.options.max_depth)?;
        trace!(family = %N::FAMILY, kind = node.kind(), depth = self.depth.get(), "render");
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || node.render(self))
    }

    /// Render a statement sequence, flattening the lines of each statement in order.
    pub fn unparse_stmts(&self, stmts: &[Stmt]) -> Result<Vec<String>, UnparseError> {
        let mut lines = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            lines.extend(self.render(stmt)?);
        }
        Ok(lines)
    }

    /// Render the body of a compound statement, one indentation level deeper than its header.
    /// A compound statement always needs at least one statement in its body.
    fn unparse_body(&self, kind: &'static str, body: &[Stmt]) -> Result<Vec<String>, UnparseError> {
        if body.is_empty() {
            return Err(UnparseError::malformed(kind, "empty body"));
        }
        let lines = self.unparse_stmts(body)?;
        Ok(lines
            .into_iter()
            .map(|line| format!("{}{line}", self.indent))
            .collect())
    }

    /// Render `expr`, parenthesized when parenthesization is on and `needs_parens` says its
    /// precedence is too loose for the position it is in.
    fn wrap_if(
        &self,
        expr: &Expr,
        needs_parens: impl Fn(Precedence) -> bool,
    ) -> Result<String, UnparseError> {
        let text = self.render(expr)?;
        if self.options.parenthesize && needs_parens(get_precedence(expr)) {
            Ok(format!("({text})"))
        } else {
            Ok(text)
        }
    }

    /// Render an expression in a comma separated position or a statement header, where only
    /// `yield` needs grouping.
    fn test(&self, expr: &Expr) -> Result<String, UnparseError> {
        self.wrap_if(expr, |p| p < Precedence::Lambda)
    }

    fn comma_list(&self, exprs: &[Expr]) -> Result<String, UnparseError> {
        itertools::process_results(exprs.iter().map(|e| self.test(e)), |mut parts| {
            parts.join(", ")
        })
    }
}

/// Render a whole module: the lines of each top-level statement, joined by newlines.
pub fn unparse_module(module: &Module, options: &UnparseOptions) -> Result<String, UnparseError> {
    debug!(statements = module.body.len(), "Unparsing module");
    let unparser = Unparser::new(options);
    let lines = unparser.unparse_stmts(&module.body)?;
    debug!(lines = lines.len(), "Module unparsed");
    Ok(lines.join("\n"))
}

pub fn unparse_stmt(stmt: &Stmt, options: &UnparseOptions) -> Result<Vec<String>, UnparseError> {
    Unparser::new(options).render(stmt)
}

pub fn unparse_expr(expr: &Expr, options: &UnparseOptions) -> Result<String, UnparseError> {
    Unparser::new(options).render(expr)
}
