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

//! Lowering of raw JSON trees, as dumped by the front end, into [`crate::ast`] nodes.
//!
//! Every node is an object whose `"_type"` member names its class, with one member per field.
//! The tag is resolved against the closed set of kinds of the family expected at that position;
//! anything else is reported as [`UnparseError::UnhandledNodeKind`] together with the dotted
//! path of the offending node, e.g. `Module.body[0].value.args[1]`.
//!
//! Statements, expressions and slices count against the same nesting limit the renderer
//! enforces, so an over-deep tree is refused before any of it is rendered.

use crate::ast::{
    Alias, Arguments, Comprehension, ExceptHandler, Expr, ExprKind, Keyword, Module, Number, Slice,
    SliceKind, Stmt, StmtKind, StrLiteral,
};
use crate::dispatch::Family;
use crate::errors::UnparseError;
use crate::unparse::{STACK_GROWTH, STACK_RED_ZONE};
use py2py_common::UnparseOptions;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::debug;

const TYPE_TAG: &str = "_type";

/// Where a raw node sits: its dotted path and how many nested nodes enclose it.
struct Site {
    path: String,
    depth: usize,
    limit: usize,
}

impl Site {
    /// Another position at the same depth.
    fn at(&self, path: String) -> Self {
        Self {
            path,
            depth: self.depth,
            limit: self.limit,
        }
    }

    fn nested(self) -> Result<Self, UnparseError> {
        let depth = self.depth + 1;
        if depth > self.limit {
            return Err(UnparseError::NestingTooDeep { limit: self.limit });
        }
        Ok(Self { depth, ..self })
    }
}

/// A JSON object being read as a node of a known kind.
struct Node<'v> {
    fields: &'v Map<String, Value>,
    kind: &'v str,
    site: Site,
}

impl<'v> Node<'v> {
    /// Open a node whose kind is given by its tag.
    fn open(value: &'v Value, family: Family, site: Site) -> Result<Self, UnparseError> {
        let Some(fields) = value.as_object() else {
            return Err(UnparseError::InvalidField {
                kind: family.to_string(),
                field: TYPE_TAG,
                path: site.path,
                expected: "a node object",
            });
        };
        match fields.get(TYPE_TAG) {
            Some(Value::String(kind)) => Ok(Self { fields, kind, site }),
            Some(_) => Err(UnparseError::InvalidField {
                kind: family.to_string(),
                field: TYPE_TAG,
                path: site.path,
                expected: "a string",
            }),
            None => Err(UnparseError::MissingField {
                kind: family.to_string(),
                field: TYPE_TAG,
                path: site.path,
            }),
        }
    }

    /// Open a node whose kind is implied by its position. A tag, if present, must agree.
    fn open_as(value: &'v Value, kind: &'static str, site: Site) -> Result<Self, UnparseError> {
        let Some(fields) = value.as_object() else {
            return Err(UnparseError::InvalidField {
                kind: kind.to_string(),
                field: TYPE_TAG,
                path: site.path,
                expected: "a node object",
            });
        };
        match fields.get(TYPE_TAG) {
            None | Some(Value::Null) => {}
            Some(Value::String(tag)) if tag == kind => {}
            Some(_) => {
                return Err(UnparseError::InvalidField {
                    kind: kind.to_string(),
                    field: TYPE_TAG,
                    path: site.path,
                    expected: kind,
                });
            }
        }
        Ok(Self { fields, kind, site })
    }

    /// Open a statement, expression or slice one level below `site` and lower it, continuing on a
    /// fresh stack segment when little remains.
    fn nested<T>(
        value: &'v Value,
        family: Family,
        site: Site,
        lower: impl FnOnce(Node<'v>) -> Result<T, UnparseError>,
    ) -> Result<T, UnparseError> {
        let node = Self::open(value, family, site.nested()?)?;
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || lower(node))
    }

    fn unhandled(&self, family: Family) -> UnparseError {
        UnparseError::UnhandledNodeKind {
            family,
            kind: self.kind.to_string(),
            path: self.site.path.clone(),
        }
    }

    fn missing(&self, field: &'static str) -> UnparseError {
        UnparseError::MissingField {
            kind: self.kind.to_string(),
            field,
            path: self.site.path.clone(),
        }
    }

    fn invalid(&self, field: &'static str, expected: &'static str) -> UnparseError {
        UnparseError::InvalidField {
            kind: self.kind.to_string(),
            field,
            path: self.site.path.clone(),
            expected,
        }
    }

    fn field_site(&self, field: &str) -> Site {
        self.site.at(format!("{}.{field}", self.site.path))
    }

    fn get(&self, field: &'static str) -> Result<&'v Value, UnparseError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Err(self.missing(field)),
            Some(value) => Ok(value),
        }
    }

    fn opt(&self, field: &str) -> Option<&'v Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    fn child<T>(
        &self,
        field: &'static str,
        lower: impl FnOnce(&'v Value, Site) -> Result<T, UnparseError>,
    ) -> Result<T, UnparseError> {
        lower(self.get(field)?, self.field_site(field))
    }

    fn seq<T>(
        &self,
        field: &'static str,
        lower: impl Fn(&'v Value, Site) -> Result<T, UnparseError>,
    ) -> Result<Vec<T>, UnparseError> {
        let Value::Array(items) = self.get(field)? else {
            return Err(self.invalid(field, "an array"));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| lower(item, self.site.at(format!("{}.{field}[{i}]", self.site.path))))
            .collect()
    }

    fn expr(&self, field: &'static str) -> Result<Expr, UnparseError> {
        self.child(field, lower_expr)
    }

    fn boxed(&self, field: &'static str) -> Result<Box<Expr>, UnparseError> {
        self.expr(field).map(Box::new)
    }

    fn opt_expr(&self, field: &'static str) -> Result<Option<Expr>, UnparseError> {
        self.opt(field)
            .map(|value| lower_expr(value, self.field_site(field)))
            .transpose()
    }

    fn opt_boxed(&self, field: &'static str) -> Result<Option<Box<Expr>>, UnparseError> {
        Ok(self.opt_expr(field)?.map(Box::new))
    }

    fn exprs(&self, field: &'static str) -> Result<Vec<Expr>, UnparseError> {
        self.seq(field, lower_expr)
    }

    fn stmts(&self, field: &'static str) -> Result<Vec<Stmt>, UnparseError> {
        self.seq(field, lower_stmt)
    }

    fn ident(&self, field: &'static str) -> Result<String, UnparseError> {
        self.get(field)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.invalid(field, "a string"))
    }

    fn opt_ident(&self, field: &'static str) -> Result<Option<String>, UnparseError> {
        self.opt(field)
            .map(|value| {
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid(field, "a string"))
            })
            .transpose()
    }

    fn idents(&self, field: &'static str) -> Result<Vec<String>, UnparseError> {
        self.seq(field, |value, _| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| self.invalid(field, "an array of strings"))
        })
    }

    fn flag(&self, field: &'static str) -> Result<bool, UnparseError> {
        self.get(field)?
            .as_bool()
            .ok_or_else(|| self.invalid(field, "a boolean"))
    }

    fn op<T: FromStr>(&self, field: &'static str) -> Result<T, UnparseError> {
        self.child(field, lower_op)
    }
}

/// Lower a raw module tree, refusing statements, expressions and slices nested deeper than
/// `options.max_depth`.
pub fn lower_module(value: &Value, options: &UnparseOptions) -> Result<Module, UnparseError> {
    let site = Site {
        path: "Module".to_string(),
        depth: 0,
        limit: options.max_depth,
    };
    let node = Node::open_as(value, "Module", site)?;
    let body = node.stmts("body")?;
    debug!(statements = body.len(), "Lowered module");
    Ok(Module { body })
}

fn lower_stmt(value: &Value, site: Site) -> Result<Stmt, UnparseError> {
    Node::nested(value, Family::Statement, site, stmt_from_node)
}

fn stmt_from_node(node: Node) -> Result<Stmt, UnparseError> {
    let kind = StmtKind::from_str(node.kind).map_err(|_| node.unhandled(Family::Statement))?;
    let stmt = match kind {
        StmtKind::FunctionDef => Stmt::FunctionDef {
            name: node.ident("name")?,
            args: node.child("args", lower_arguments)?,
            body: node.stmts("body")?,
            decorator_list: node.exprs("decorator_list")?,
        },
        StmtKind::ClassDef => Stmt::ClassDef {
            name: node.ident("name")?,
            bases: node.exprs("bases")?,
            body: node.stmts("body")?,
            decorator_list: node.exprs("decorator_list")?,
        },
        StmtKind::Return => Stmt::Return {
            value: node.opt_expr("value")?,
        },
        StmtKind::Delete => Stmt::Delete {
            targets: node.exprs("targets")?,
        },
        StmtKind::Assign => Stmt::Assign {
            targets: node.exprs("targets")?,
            value: node.expr("value")?,
        },
        StmtKind::AugAssign => Stmt::AugAssign {
            target: node.expr("target")?,
            op: node.op("op")?,
            value: node.expr("value")?,
        },
        StmtKind::Print => Stmt::Print {
            dest: node.opt_expr("dest")?,
            values: node.exprs("values")?,
            nl: node.flag("nl")?,
        },
        StmtKind::For => Stmt::For {
            target: node.expr("target")?,
            iter: node.expr("iter")?,
            body: node.stmts("body")?,
            orelse: node.stmts("orelse")?,
        },
        StmtKind::While => Stmt::While {
            test: node.expr("test")?,
            body: node.stmts("body")?,
            orelse: node.stmts("orelse")?,
        },
        StmtKind::If => Stmt::If {
            test: node.expr("test")?,
            body: node.stmts("body")?,
            orelse: node.stmts("orelse")?,
        },
        StmtKind::With => Stmt::With {
            context_expr: node.expr("context_expr")?,
            optional_vars: node.opt_expr("optional_vars")?,
            body: node.stmts("body")?,
        },
        StmtKind::Raise => Stmt::Raise {
            exc_type: node.opt_expr("type")?,
            inst: node.opt_expr("inst")?,
            tback: node.opt_expr("tback")?,
        },
        StmtKind::TryExcept => Stmt::TryExcept {
            body: node.stmts("body")?,
            handlers: node.seq("handlers", lower_handler)?,
            orelse: node.stmts("orelse")?,
        },
        StmtKind::TryFinally => Stmt::TryFinally {
            body: node.stmts("body")?,
            finalbody: node.stmts("finalbody")?,
        },
        StmtKind::Assert => Stmt::Assert {
            test: node.expr("test")?,
            msg: node.opt_expr("msg")?,
        },
        StmtKind::Import => Stmt::Import {
            names: node.seq("names", lower_alias)?,
        },
        StmtKind::ImportFrom => Stmt::ImportFrom {
            module: node.opt_ident("module")?,
            names: node.seq("names", lower_alias)?,
            level: match node.opt("level") {
                None => 0,
                Some(level) => level
                    .as_u64()
                    .and_then(|level| u32::try_from(level).ok())
                    .ok_or_else(|| node.invalid("level", "a non-negative integer"))?,
            },
        },
        StmtKind::Exec => Stmt::Exec {
            body: node.expr("body")?,
            globals: node.opt_expr("globals")?,
            locals: node.opt_expr("locals")?,
        },
        StmtKind::Global => Stmt::Global {
            names: node.idents("names")?,
        },
        StmtKind::Expr => Stmt::Expr {
            value: node.expr("value")?,
        },
        StmtKind::Pass => Stmt::Pass,
        StmtKind::Break => Stmt::Break,
        StmtKind::Continue => Stmt::Continue,
    };
    Ok(stmt)
}

fn lower_expr(value: &Value, site: Site) -> Result<Expr, UnparseError> {
    Node::nested(value, Family::Expression, site, expr_from_node)
}

fn expr_from_node(node: Node) -> Result<Expr, UnparseError> {
    let kind = ExprKind::from_str(node.kind).map_err(|_| node.unhandled(Family::Expression))?;
    let expr = match kind {
        ExprKind::BoolOp => Expr::BoolOp {
            op: node.op("op")?,
            values: node.exprs("values")?,
        },
        ExprKind::BinOp => Expr::BinOp {
            left: node.boxed("left")?,
            op: node.op("op")?,
            right: node.boxed("right")?,
        },
        ExprKind::UnaryOp => Expr::UnaryOp {
            op: node.op("op")?,
            operand: node.boxed("operand")?,
        },
        ExprKind::Lambda => Expr::Lambda {
            args: Box::new(node.child("args", lower_arguments)?),
            body: node.boxed("body")?,
        },
        ExprKind::IfExp => Expr::IfExp {
            test: node.boxed("test")?,
            body: node.boxed("body")?,
            orelse: node.boxed("orelse")?,
        },
        ExprKind::Dict => Expr::Dict {
            keys: node.exprs("keys")?,
            values: node.exprs("values")?,
        },
        ExprKind::Set => Expr::Set {
            elts: node.exprs("elts")?,
        },
        ExprKind::ListComp => Expr::ListComp {
            elt: node.boxed("elt")?,
            generators: node.seq("generators", lower_comprehension)?,
        },
        ExprKind::SetComp => Expr::SetComp {
            elt: node.boxed("elt")?,
            generators: node.seq("generators", lower_comprehension)?,
        },
        ExprKind::DictComp => Expr::DictComp {
            key: node.boxed("key")?,
            value: node.boxed("value")?,
            generators: node.seq("generators", lower_comprehension)?,
        },
        ExprKind::GeneratorExp => Expr::GeneratorExp {
            elt: node.boxed("elt")?,
            generators: node.seq("generators", lower_comprehension)?,
        },
        ExprKind::Yield => Expr::Yield {
            value: node.opt_boxed("value")?,
        },
        ExprKind::Compare => Expr::Compare {
            left: node.boxed("left")?,
            ops: node.seq("ops", lower_op)?,
            comparators: node.exprs("comparators")?,
        },
        ExprKind::Call => Expr::Call {
            func: node.boxed("func")?,
            args: node.exprs("args")?,
            keywords: node.seq("keywords", lower_keyword)?,
            starargs: node.opt_boxed("starargs")?,
            kwargs: node.opt_boxed("kwargs")?,
        },
        ExprKind::Repr => Expr::Repr {
            value: node.boxed("value")?,
        },
        ExprKind::Num => Expr::Num {
            n: lower_number(&node)?,
        },
        ExprKind::Str => Expr::Str {
            s: lower_str(&node)?,
        },
        ExprKind::Attribute => Expr::Attribute {
            value: node.boxed("value")?,
            attr: node.ident("attr")?,
        },
        ExprKind::Subscript => Expr::Subscript {
            value: node.boxed("value")?,
            slice: Box::new(node.child("slice", lower_slice)?),
        },
        ExprKind::Name => Expr::Name {
            id: node.ident("id")?,
        },
        ExprKind::List => Expr::List {
            elts: node.exprs("elts")?,
        },
        ExprKind::Tuple => Expr::Tuple {
            elts: node.exprs("elts")?,
        },
    };
    Ok(expr)
}

fn lower_slice(value: &Value, site: Site) -> Result<Slice, UnparseError> {
    Node::nested(value, Family::Slice, site, slice_from_node)
}

fn slice_from_node(node: Node) -> Result<Slice, UnparseError> {
    let kind = SliceKind::from_str(node.kind).map_err(|_| node.unhandled(Family::Slice))?;
    let slice = match kind {
        SliceKind::Ellipsis => Slice::Ellipsis,
        SliceKind::Slice => Slice::Slice {
            lower: node.opt_boxed("lower")?,
            upper: node.opt_boxed("upper")?,
            step: node.opt_boxed("step")?,
        },
        SliceKind::ExtSlice => Slice::ExtSlice {
            dims: node.seq("dims", lower_slice)?,
        },
        SliceKind::Index => Slice::Index {
            value: node.boxed("value")?,
        },
    };
    Ok(slice)
}

/// Operators arrive either as bare tags (`"Add"`) or as field-less nodes (`{"_type": "Add"}`).
fn lower_op<T: FromStr>(value: &Value, site: Site) -> Result<T, UnparseError> {
    let tag = match value {
        Value::String(tag) => tag.as_str(),
        Value::Object(fields) => match fields.get(TYPE_TAG) {
            Some(Value::String(tag)) => tag.as_str(),
            _ => {
                return Err(UnparseError::MissingField {
                    kind: Family::Operator.to_string(),
                    field: TYPE_TAG,
                    path: site.path,
                });
            }
        },
        _ => {
            return Err(UnparseError::InvalidField {
                kind: Family::Operator.to_string(),
                field: TYPE_TAG,
                path: site.path,
                expected: "an operator tag",
            });
        }
    };
    T::from_str(tag).map_err(|_| UnparseError::UnhandledNodeKind {
        family: Family::Operator,
        kind: tag.to_string(),
        path: site.path,
    })
}

fn lower_alias(value: &Value, site: Site) -> Result<Alias, UnparseError> {
    let fields = value.as_object();
    if let Some(Value::String(tag)) = fields.and_then(|f| f.get(TYPE_TAG))
        && tag != "alias"
    {
        return Err(UnparseError::UnhandledNodeKind {
            family: Family::Alias,
            kind: tag.clone(),
            path: site.path,
        });
    }
    let node = Node::open_as(value, "alias", site)?;
    Ok(Alias {
        name: node.ident("name")?,
        asname: node.opt_ident("asname")?,
    })
}

fn lower_arguments(value: &Value, site: Site) -> Result<Arguments, UnparseError> {
    let node = Node::open_as(value, "arguments", site)?;
    Ok(Arguments {
        args: node.exprs("args")?,
        vararg: node.opt_ident("vararg")?,
        kwarg: node.opt_ident("kwarg")?,
        defaults: node.exprs("defaults")?,
    })
}

fn lower_keyword(value: &Value, site: Site) -> Result<Keyword, UnparseError> {
    let node = Node::open_as(value, "keyword", site)?;
    Ok(Keyword {
        arg: node.ident("arg")?,
        value: node.expr("value")?,
    })
}

fn lower_comprehension(value: &Value, site: Site) -> Result<Comprehension, UnparseError> {
    let node = Node::open_as(value, "comprehension", site)?;
    Ok(Comprehension {
        target: node.expr("target")?,
        iter: node.expr("iter")?,
        ifs: node.exprs("ifs")?,
    })
}

fn lower_handler(value: &Value, site: Site) -> Result<ExceptHandler, UnparseError> {
    let node = Node::open_as(value, "ExceptHandler", site)?;
    Ok(ExceptHandler {
        exc_type: node.opt_expr("type")?,
        name: node.opt_expr("name")?,
        body: node.stmts("body")?,
    })
}

/// `n` holds a JSON number, `{"imag": f}` for an imaginary literal, or `{"long": "digits"}` for
/// an integer too wide for JSON.
fn lower_number(node: &Node) -> Result<Number, UnparseError> {
    match node.get("n")? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Number::Int(i))
            } else if n.is_u64() {
                Ok(Number::Long(n.to_string()))
            } else {
                n.as_f64()
                    .map(Number::Float)
                    .ok_or_else(|| node.invalid("n", "a number"))
            }
        }
        Value::Object(parts) => match (parts.get("imag"), parts.get("long")) {
            (Some(imag), None) => imag
                .as_f64()
                .map(Number::Complex)
                .ok_or_else(|| node.invalid("n", "a number")),
            (None, Some(Value::String(digits))) => Ok(Number::Long(digits.clone())),
            _ => Err(node.invalid("n", "a number")),
        },
        _ => Err(node.invalid("n", "a number")),
    }
}

/// `s` holds a string, or an array of byte values for byte strings that are not valid UTF-8.
/// `"kind": "u"` marks a unicode literal.
fn lower_str(node: &Node) -> Result<StrLiteral, UnparseError> {
    let unicode = matches!(node.opt("kind"), Some(Value::String(kind)) if kind == "u");
    match (node.get("s")?, unicode) {
        (Value::String(s), true) => Ok(StrLiteral::Unicode(s.clone())),
        (Value::String(s), false) => Ok(StrLiteral::Bytes(s.as_bytes().to_vec())),
        (Value::Array(items), false) => items
            .iter()
            .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<u8>>>()
            .map(StrLiteral::Bytes)
            .ok_or_else(|| node.invalid("s", "a string or an array of bytes")),
        _ => Err(node.invalid("s", "a string or an array of bytes")),
    }
}
