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

//! Proptest strategies for generating well-formed syntax trees.

use crate::ast::{
    Alias, Arguments, Comprehension, ExceptHandler, Expr, Keyword, Module, Number, Slice, Stmt,
    StrLiteral,
};
use crate::op::{BinaryOp, BoolOp, CmpOp, UnaryOp};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use strum::IntoEnumIterator;

// =============================================================================
// Leaf Generators
// =============================================================================

/// Generate an identifier that is not a keyword.
pub fn arb_identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,7}".prop_filter("keywords are not identifiers", |s| {
        !matches!(
            s.as_str(),
            "and" | "as" | "assert" | "break" | "class" | "continue" | "def" | "del" | "elif"
                | "else" | "except" | "exec" | "finally" | "for" | "from" | "global" | "if"
                | "import" | "in" | "is" | "lambda" | "not" | "or" | "pass" | "print" | "raise"
                | "return" | "try" | "while" | "with" | "yield"
        )
    })
}

pub fn arb_name() -> impl Strategy<Value = Expr> {
    arb_identifier().prop_map(|id| Expr::Name { id })
}

/// Generate a numeric literal. Special floats are left out: NaN has no literal form.
pub fn arb_number() -> impl Strategy<Value = Expr> {
    prop_oneof![
        4 => any::<i64>().prop_map(Number::Int),
        1 => "-?[1-9][0-9]{19,30}".prop_map(Number::Long),
        2 => (-1.0e6f64..1.0e6).prop_map(Number::Float),
        1 => (0.0f64..100.0).prop_map(Number::Complex),
    ]
    .prop_map(|n| Expr::Num { n })
}

pub fn arb_string() -> impl Strategy<Value = Expr> {
    prop_oneof![
        proptest::collection::vec(any::<u8>(), 0..12).prop_map(StrLiteral::Bytes),
        "\\PC{0,12}".prop_map(StrLiteral::Unicode),
    ]
    .prop_map(|s| Expr::Str { s })
}

pub fn arb_literal() -> impl Strategy<Value = Expr> {
    prop_oneof![3 => arb_number(), 2 => arb_string()]
}

pub fn arb_binary_op() -> impl Strategy<Value = BinaryOp> {
    proptest::sample::select(BinaryOp::iter().collect::<Vec<_>>())
}

pub fn arb_unary_op() -> impl Strategy<Value = UnaryOp> {
    proptest::sample::select(UnaryOp::iter().collect::<Vec<_>>())
}

pub fn arb_bool_op() -> impl Strategy<Value = BoolOp> {
    proptest::sample::select(BoolOp::iter().collect::<Vec<_>>())
}

pub fn arb_cmp_op() -> impl Strategy<Value = CmpOp> {
    proptest::sample::select(CmpOp::iter().collect::<Vec<_>>())
}

// =============================================================================
// Expression Generators
// =============================================================================

pub fn arb_slice(expr: BoxedStrategy<Expr>) -> impl Strategy<Value = Slice> {
    let bound = proptest::option::of(expr.clone().prop_map(Box::new));
    let simple = prop_oneof![
        Just(Slice::Ellipsis),
        expr.prop_map(|value| Slice::Index {
            value: Box::new(value)
        }),
        (bound.clone(), bound.clone(), bound)
            .prop_map(|(lower, upper, step)| Slice::Slice { lower, upper, step }),
    ]
    .boxed();
    prop_oneof![
        3 => simple.clone(),
        1 => proptest::collection::vec(simple, 1..3).prop_map(|dims| Slice::ExtSlice { dims }),
    ]
}

pub fn arb_comprehension(expr: BoxedStrategy<Expr>) -> impl Strategy<Value = Comprehension> {
    (
        arb_name(),
        expr.clone(),
        proptest::collection::vec(expr, 0..2),
    )
        .prop_map(|(target, iter, ifs)| Comprehension { target, iter, ifs })
}

pub fn arb_call(expr: BoxedStrategy<Expr>) -> impl Strategy<Value = Expr> {
    let keyword = (arb_identifier(), expr.clone()).prop_map(|(arg, value)| Keyword { arg, value });
    (
        arb_name(),
        proptest::collection::vec(expr.clone(), 0..3),
        proptest::collection::vec(keyword, 0..2),
        proptest::option::of(expr.clone().prop_map(Box::new)),
        proptest::option::of(expr.prop_map(Box::new)),
    )
        .prop_map(|(func, args, keywords, starargs, kwargs)| Expr::Call {
            func: Box::new(func),
            args,
            keywords,
            starargs,
            kwargs,
        })
}

/// Generate an expression nested at most `depth` levels.
pub fn arb_expr(depth: usize) -> BoxedStrategy<Expr> {
    if depth == 0 {
        return prop_oneof![3 => arb_literal(), 2 => arb_name()].boxed();
    }
    let sub = arb_expr(depth - 1);
    prop_oneof![
        3 => arb_literal(),
        3 => arb_name(),
        2 => (arb_binary_op(), sub.clone(), sub.clone())
            .prop_map(|(op, left, right)| Expr::binop(left, op, right)),
        1 => (arb_unary_op(), sub.clone()).prop_map(|(op, operand)| Expr::unary(op, operand)),
        1 => (arb_bool_op(), proptest::collection::vec(sub.clone(), 2..4))
            .prop_map(|(op, values)| Expr::BoolOp { op, values }),
        1 => (sub.clone(), proptest::collection::vec((arb_cmp_op(), sub.clone()), 1..3))
            .prop_map(|(left, rest)| {
                let (ops, comparators) = rest.into_iter().unzip();
                Expr::Compare {
                    left: Box::new(left),
                    ops,
                    comparators,
                }
            }),
        1 => (sub.clone(), sub.clone(), sub.clone()).prop_map(|(test, body, orelse)| {
            Expr::IfExp {
                test: Box::new(test),
                body: Box::new(body),
                orelse: Box::new(orelse),
            }
        }),
        1 => arb_call(sub.clone()),
        1 => (sub.clone(), arb_identifier()).prop_map(|(value, attr)| Expr::attr(value, &attr)),
        1 => (sub.clone(), arb_slice(sub.clone())).prop_map(|(value, slice)| Expr::Subscript {
            value: Box::new(value),
            slice: Box::new(slice),
        }),
        1 => proptest::collection::vec(sub.clone(), 0..4).prop_map(|elts| Expr::List { elts }),
        1 => proptest::collection::vec(sub.clone(), 0..4).prop_map(Expr::tuple),
        1 => proptest::collection::vec((sub.clone(), sub.clone()), 0..3).prop_map(|entries| {
            let (keys, values) = entries.into_iter().unzip();
            Expr::Dict { keys, values }
        }),
        1 => (
            sub.clone(),
            proptest::collection::vec(arb_comprehension(sub.clone()), 1..3)
        )
            .prop_map(|(elt, generators)| Expr::ListComp {
                elt: Box::new(elt),
                generators,
            }),
        1 => proptest::option::of(sub.prop_map(Box::new)).prop_map(|value| Expr::Yield { value }),
    ]
    .boxed()
}

// =============================================================================
// Statement Generators
// =============================================================================

pub fn arb_arguments() -> impl Strategy<Value = Arguments> {
    (
        proptest::collection::vec(arb_identifier(), 0..4),
        proptest::option::of(arb_identifier()),
        proptest::option::of(arb_identifier()),
    )
        .prop_flat_map(|(names, vararg, kwarg)| {
            let count = names.len();
            (
                Just(names),
                Just(vararg),
                Just(kwarg),
                proptest::collection::vec(arb_literal(), 0..=count),
            )
        })
        .prop_map(|(names, vararg, kwarg, defaults)| Arguments {
            args: names.into_iter().map(|id| Expr::Name { id }).collect(),
            vararg,
            kwarg,
            defaults,
        })
}

pub fn arb_alias() -> impl Strategy<Value = Alias> {
    (arb_identifier(), proptest::option::of(arb_identifier()))
        .prop_map(|(name, asname)| Alias { name, asname })
}

/// Single line statements.
pub fn arb_simple_stmt(expr: BoxedStrategy<Expr>) -> BoxedStrategy<Stmt> {
    prop_oneof![
        Just(Stmt::Pass),
        Just(Stmt::Break),
        Just(Stmt::Continue),
        expr.clone().prop_map(Stmt::expr),
        (proptest::collection::vec(arb_name(), 1..3), expr.clone())
            .prop_map(|(targets, value)| Stmt::Assign { targets, value }),
        (arb_name(), arb_binary_op(), expr.clone())
            .prop_map(|(target, op, value)| Stmt::AugAssign { target, op, value }),
        proptest::option::of(expr.clone()).prop_map(|value| Stmt::Return { value }),
        (
            proptest::option::of(expr.clone()),
            proptest::collection::vec(expr.clone(), 1..3),
            any::<bool>()
        )
            .prop_map(|(dest, values, nl)| Stmt::Print { dest, values, nl }),
        (expr.clone(), proptest::option::of(expr.clone()))
            .prop_map(|(test, msg)| Stmt::Assert { test, msg }),
        proptest::collection::vec(arb_identifier(), 1..3).prop_map(|names| Stmt::Global { names }),
        proptest::collection::vec(arb_alias(), 1..3).prop_map(|names| Stmt::Import { names }),
        (
            proptest::option::of(arb_identifier()),
            proptest::collection::vec(arb_alias(), 1..3),
            1u32..3
        )
            .prop_map(|(module, names, level)| Stmt::ImportFrom {
                module,
                names,
                level,
            }),
        (expr.clone(), proptest::option::of(expr.clone()), proptest::option::of(expr)).prop_map(
            |(body, globals, locals)| Stmt::Exec {
                body,
                locals: globals.as_ref().and(locals),
                globals,
            }
        ),
    ]
    .boxed()
}

/// Generate a statement with blocks nested at most `depth` levels.
pub fn arb_stmt(depth: usize) -> BoxedStrategy<Stmt> {
    let expr = arb_expr(2);
    if depth == 0 {
        return arb_simple_stmt(expr);
    }
    let inner = arb_stmt(depth - 1);
    let body = proptest::collection::vec(inner.clone(), 1..3);
    let orelse = proptest::collection::vec(inner, 0..2);
    let handler = (
        proptest::option::of(arb_name()),
        body.clone(),
    )
        .prop_map(|(exc_type, body)| ExceptHandler {
            exc_type,
            name: None,
            body,
        });
    prop_oneof![
        4 => arb_simple_stmt(expr.clone()),
        1 => (expr.clone(), body.clone(), orelse.clone())
            .prop_map(|(test, body, orelse)| Stmt::If { test, body, orelse }),
        1 => (expr.clone(), body.clone(), orelse.clone())
            .prop_map(|(test, body, orelse)| Stmt::While { test, body, orelse }),
        1 => (arb_name(), expr.clone(), body.clone(), orelse.clone()).prop_map(
            |(target, iter, body, orelse)| Stmt::For {
                target,
                iter,
                body,
                orelse,
            }
        ),
        1 => (expr.clone(), proptest::option::of(arb_name()), body.clone()).prop_map(
            |(context_expr, optional_vars, body)| Stmt::With {
                context_expr,
                optional_vars,
                body,
            }
        ),
        1 => (
            arb_identifier(),
            arb_arguments(),
            body.clone(),
            proptest::collection::vec(arb_name(), 0..2)
        )
            .prop_map(|(name, args, body, decorator_list)| Stmt::FunctionDef {
                name,
                args,
                body,
                decorator_list,
            }),
        1 => (arb_identifier(), proptest::collection::vec(arb_name(), 0..2), body.clone())
            .prop_map(|(name, bases, body)| Stmt::ClassDef {
                name,
                bases,
                body,
                decorator_list: vec![],
            }),
        1 => (body.clone(), proptest::collection::vec(handler, 1..3), orelse)
            .prop_map(|(body, handlers, orelse)| Stmt::TryExcept {
                body,
                handlers,
                orelse,
            }),
        1 => (body.clone(), body)
            .prop_map(|(body, finalbody)| Stmt::TryFinally { body, finalbody }),
    ]
    .boxed()
}

pub fn arb_module(depth: usize) -> impl Strategy<Value = Module> {
    proptest::collection::vec(arb_stmt(depth), 0..6).prop_map(|body| Module { body })
}
