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

//! The syntax tree handed over by the front end parser, one variant per node class of the
//! Python 2.7 grammar. Trees are plain owned data: built once, lent to the unparser, dropped.

use crate::op::{BinaryOp, BoolOp, CmpOp, UnaryOp};
use strum::{EnumDiscriminants, IntoStaticStr};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, IntoStaticStr, EnumDiscriminants)]
#[strum_discriminants(name(StmtKind), derive(strum::EnumString, strum::IntoStaticStr, Hash))]
pub enum Stmt {
    FunctionDef {
        name: String,
        args: Arguments,
        body: Vec<Stmt>,
        decorator_list: Vec<Expr>,
    },
    ClassDef {
        name: String,
        bases: Vec<Expr>,
        body: Vec<Stmt>,
        decorator_list: Vec<Expr>,
    },
    Return {
        value: Option<Expr>,
    },
    Delete {
        targets: Vec<Expr>,
    },
    Assign {
        targets: Vec<Expr>,
        value: Expr,
    },
    AugAssign {
        target: Expr,
        op: BinaryOp,
        value: Expr,
    },
    /// `print >>dest, values`; `nl` is false when the statement ends in a comma.
    Print {
        dest: Option<Expr>,
        values: Vec<Expr>,
        nl: bool,
    },
    For {
        target: Expr,
        iter: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    With {
        context_expr: Expr,
        optional_vars: Option<Expr>,
        body: Vec<Stmt>,
    },
    Raise {
        exc_type: Option<Expr>,
        inst: Option<Expr>,
        tback: Option<Expr>,
    },
    TryExcept {
        body: Vec<Stmt>,
        handlers: Vec<ExceptHandler>,
        orelse: Vec<Stmt>,
    },
    TryFinally {
        body: Vec<Stmt>,
        finalbody: Vec<Stmt>,
    },
    Assert {
        test: Expr,
        msg: Option<Expr>,
    },
    Import {
        names: Vec<Alias>,
    },
    /// `level` counts the leading dots of a relative import.
    ImportFrom {
        module: Option<String>,
        names: Vec<Alias>,
        level: u32,
    },
    Exec {
        body: Expr,
        globals: Option<Expr>,
        locals: Option<Expr>,
    },
    Global {
        names: Vec<String>,
    },
    Expr {
        value: Expr,
    },
    Pass,
    Break,
    Continue,
}

#[derive(Debug, Clone, PartialEq, IntoStaticStr, EnumDiscriminants)]
#[strum_discriminants(name(ExprKind), derive(strum::EnumString, strum::IntoStaticStr, Hash))]
pub enum Expr {
    BoolOp {
        op: BoolOp,
        values: Vec<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Lambda {
        args: Box<Arguments>,
        body: Box<Expr>,
    },
    IfExp {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
    },
    Dict {
        keys: Vec<Expr>,
        values: Vec<Expr>,
    },
    Set {
        elts: Vec<Expr>,
    },
    ListComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    SetComp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    DictComp {
        key: Box<Expr>,
        value: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    GeneratorExp {
        elt: Box<Expr>,
        generators: Vec<Comprehension>,
    },
    Yield {
        value: Option<Box<Expr>>,
    },
    /// A comparison chain: `left ops[0] comparators[0] ops[1] comparators[1] ...`.
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<Keyword>,
        starargs: Option<Box<Expr>>,
        kwargs: Option<Box<Expr>>,
    },
    Repr {
        value: Box<Expr>,
    },
    Num {
        n: Number,
    },
    Str {
        s: StrLiteral,
    },
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    Subscript {
        value: Box<Expr>,
        slice: Box<Slice>,
    },
    Name {
        id: String,
    },
    List {
        elts: Vec<Expr>,
    },
    Tuple {
        elts: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, IntoStaticStr, EnumDiscriminants)]
#[strum_discriminants(name(SliceKind), derive(strum::EnumString, strum::IntoStaticStr, Hash))]
pub enum Slice {
    Ellipsis,
    Slice {
        lower: Option<Box<Expr>>,
        upper: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
    },
    ExtSlice {
        dims: Vec<Slice>,
    },
    Index {
        value: Box<Expr>,
    },
}

/// Numeric literal payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(i64),
    /// Arbitrary precision integer, kept as its decimal digits (optionally signed).
    Long(String),
    Float(f64),
    /// Imaginary literal; the value is the coefficient of `j`.
    Complex(f64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrLiteral {
    Bytes(Vec<u8>),
    Unicode(String),
}

/// A parameter list. `args` holds the positional parameters (names, or tuples for unpacking
/// parameters); `defaults` pairs with the trailing `defaults.len()` of them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments {
    pub args: Vec<Expr>,
    pub vararg: Option<String>,
    pub kwarg: Option<String>,
    pub defaults: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub arg: String,
    pub value: Expr,
}

/// One `for target in iter if ...` clause of a comprehension.
#[derive(Debug, Clone, PartialEq)]
pub struct Comprehension {
    pub target: Expr,
    pub iter: Expr,
    pub ifs: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExceptHandler {
    pub exc_type: Option<Expr>,
    pub name: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub asname: Option<String>,
}

impl Expr {
    pub fn name(id: &str) -> Self {
        Expr::Name { id: id.to_string() }
    }

    pub fn int(i: i64) -> Self {
        Expr::Num { n: Number::Int(i) }
    }

    pub fn float(f: f64) -> Self {
        Expr::Num {
            n: Number::Float(f),
        }
    }

    pub fn bytes(s: &str) -> Self {
        Expr::Str {
            s: StrLiteral::Bytes(s.as_bytes().to_vec()),
        }
    }

    pub fn unicode(s: &str) -> Self {
        Expr::Str {
            s: StrLiteral::Unicode(s.to_string()),
        }
    }

    pub fn binop(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
            keywords: vec![],
            starargs: None,
            kwargs: None,
        }
    }

    pub fn attr(value: Expr, attr: &str) -> Self {
        Expr::Attribute {
            value: Box::new(value),
            attr: attr.to_string(),
        }
    }

    pub fn index(value: Expr, index: Expr) -> Self {
        Expr::Subscript {
            value: Box::new(value),
            slice: Box::new(Slice::Index {
                value: Box::new(index),
            }),
        }
    }

    pub fn tuple(elts: Vec<Expr>) -> Self {
        Expr::Tuple { elts }
    }
}

impl Stmt {
    pub fn expr(value: Expr) -> Self {
        Stmt::Expr { value }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign {
            targets: vec![target],
            value,
        }
    }
}

impl Arguments {
    /// Plain positional parameters, no defaults or collectors.
    pub fn positional(names: &[&str]) -> Self {
        Self {
            args: names.iter().map(|n| Expr::name(n)).collect(),
            ..Default::default()
        }
    }
}

impl Alias {
    pub fn new(name: &str, asname: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            asname: asname.map(str::to_string),
        }
    }
}
