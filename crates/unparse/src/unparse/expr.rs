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

use super::Unparser;
use crate::ast::{Arguments, Comprehension, Expr, Keyword, Number, Slice, StrLiteral};
use crate::errors::UnparseError;
use crate::op::{BinaryOp, BoolOp, CmpOp, UnaryOp};
use crate::precedence::Precedence;
use itertools::Itertools;
use py2py_common::util::{float_repr, imag_repr, quote_bytes, quote_str};

/// Smallest decimal literal that overflows a double, and so parses back as infinity.
const INFINITY_LITERAL: &str = "1e309";

// Each kind renders in its own function so that the frame on the recursive path stays small.
impl Unparser<'_> {
    pub(crate) fn unparse_expr(&self, current_expr: &Expr) -> Result<String, UnparseError> {
        match current_expr {
            Expr::BoolOp { op, values } => self.unparse_boolop(*op, values),
            Expr::BinOp { left, op, right } => self.unparse_binop(left, *op, right),
            Expr::UnaryOp { op, operand } => self.unparse_unaryop(*op, operand),
            Expr::Lambda { args, body } => self.unparse_lambda(args, body),
            Expr::IfExp { test, body, orelse } => self.unparse_ifexp(test, body, orelse),
            Expr::Dict { keys, values } => self.unparse_dict(keys, values),
            Expr::Set { elts } => self.unparse_set(elts),
            Expr::ListComp { elt, generators } => {
                self.unparse_comp("ListComp", ["[", "]"], elt, generators)
            }
            Expr::SetComp { elt, generators } => {
                self.unparse_comp("SetComp", ["{", "}"], elt, generators)
            }
            Expr::DictComp {
                key,
                value,
                generators,
            } => self.unparse_dictcomp(key, value, generators),
            Expr::GeneratorExp { elt, generators } => {
                self.unparse_comp("GeneratorExp", ["(", ")"], elt, generators)
            }
            Expr::Yield { value } => self.unparse_yield(value.as_deref()),
            Expr::Compare {
                left,
                ops,
                comparators,
            } => self.unparse_compare(left, ops, comparators),
            Expr::Call {
                func,
                args,
                keywords,
                starargs,
                kwargs,
            } => self.unparse_call(func, args, keywords, starargs.as_deref(), kwargs.as_deref()),
            Expr::Repr { value } => self.unparse_repr(value),
            Expr::Num { n } => unparse_number(n),
            Expr::Str { s } => Ok(unparse_str(s)),
            Expr::Attribute { value, attr } => self.unparse_attribute(value, attr),
            Expr::Subscript { value, slice } => self.unparse_subscript(value, slice),
            Expr::Name { id } => Ok(id.clone()),
            Expr::List { elts } => self.unparse_list(elts),
            Expr::Tuple { elts } => self.unparse_tuple(elts),
        }
    }

    pub(crate) fn unparse_slice(&self, slice: &Slice) -> Result<String, UnparseError> {
        match slice {
            Slice::Ellipsis => Ok("...".to_string()),
            Slice::Slice { lower, upper, step } => {
                self.unparse_bounds(lower.as_deref(), upper.as_deref(), step.as_deref())
            }
            Slice::ExtSlice { dims } => self.unparse_extslice(dims),
            Slice::Index { value } => self.test(value),
        }
    }

    fn unparse_boolop(&self, op: BoolOp, values: &[Expr]) -> Result<String, UnparseError> {
        if values.len() < 2 {
            return Err(UnparseError::malformed(
                "BoolOp",
                format!("{} operand(s), at least two required", values.len()),
            ));
        }
        let own = Precedence::of_bool(op);
        let separator = format!(" {op} ");
        itertools::process_results(
            values.iter().map(|v| self.wrap_if(v, |p| p <= own)),
            |mut parts| parts.join(&separator),
        )
    }

    fn unparse_binop(&self, left: &Expr, op: BinaryOp, right: &Expr) -> Result<String, UnparseError> {
        let own = Precedence::of_binary(op);
        // `**` groups to the right and binds looser than a unary operator on its right.
        let (left, right) = if op == BinaryOp::Pow {
            (
                self.wrap_if(left, |p| p <= own)?,
                self.wrap_if(right, |p| p < Precedence::Factor)?,
            )
        } else {
            (
                self.wrap_if(left, |p| p < own)?,
                self.wrap_if(right, |p| p <= own)?,
            )
        };
        Ok(format!("{left} {op} {right}"))
    }

    fn unparse_unaryop(&self, op: UnaryOp, operand: &Expr) -> Result<String, UnparseError> {
        let own = Precedence::of_unary(op);
        let operand = self.wrap_if(operand, |p| p < own)?;
        if op.is_word() {
            Ok(format!("{op} {operand}"))
        } else {
            Ok(format!("{op}{operand}"))
        }
    }

    fn unparse_lambda(&self, args: &Arguments, body: &Expr) -> Result<String, UnparseError> {
        let params = self.unparse_arguments(args)?;
        let body = self.test(body)?;
        if params.is_empty() {
            Ok(format!("lambda: {body}"))
        } else {
            Ok(format!("lambda {params}: {body}"))
        }
    }

    fn unparse_ifexp(&self, test: &Expr, body: &Expr, orelse: &Expr) -> Result<String, UnparseError> {
        let body = self.wrap_if(body, |p| p <= Precedence::Ternary)?;
        let test = self.wrap_if(test, |p| p <= Precedence::Ternary)?;
        let orelse = self.test(orelse)?;
        Ok(format!("{body} if {test} else {orelse}"))
    }

    fn unparse_dict(&self, keys: &[Expr], values: &[Expr]) -> Result<String, UnparseError> {
        if keys.len() != values.len() {
            return Err(UnparseError::malformed(
                "Dict",
                format!("{} keys but {} values", keys.len(), values.len()),
            ));
        }
        let entries = itertools::process_results(
            keys.iter().zip(values).map(|(k, v)| self.dict_entry(k, v)),
            |mut entries| entries.join(", "),
        )?;
        Ok(format!("{{{entries}}}"))
    }

    fn unparse_set(&self, elts: &[Expr]) -> Result<String, UnparseError> {
        // `{}` is an empty dict, and there is no literal for an empty set.
        if elts.is_empty() {
            return Err(UnparseError::malformed("Set", "no elements"));
        }
        Ok(format!("{{{}}}", self.comma_list(elts)?))
    }

    /// A list, set or generator comprehension, between the given brackets.
    fn unparse_comp(
        &self,
        kind: &'static str,
        [open, close]: [&str; 2],
        elt: &Expr,
        generators: &[Comprehension],
    ) -> Result<String, UnparseError> {
        let elt = self.test(elt)?;
        let clauses = self.unparse_generators(kind, generators)?;
        Ok(format!("{open}{elt} {clauses}{close}"))
    }

    fn unparse_dictcomp(
        &self,
        key: &Expr,
        value: &Expr,
        generators: &[Comprehension],
    ) -> Result<String, UnparseError> {
        let entry = self.dict_entry(key, value)?;
        let clauses = self.unparse_generators("DictComp", generators)?;
        Ok(format!("{{{entry} {clauses}}}"))
    }

    fn unparse_yield(&self, value: Option<&Expr>) -> Result<String, UnparseError> {
        match value {
            None => Ok("yield".to_string()),
            Some(value) => Ok(format!("yield {}", self.test(value)?)),
        }
    }

    fn unparse_compare(
        &self,
        left: &Expr,
        ops: &[CmpOp],
        comparators: &[Expr],
    ) -> Result<String, UnparseError> {
        if ops.is_empty() || ops.len() != comparators.len() {
            return Err(UnparseError::malformed(
                "Compare",
                format!(
                    "{} operator(s) for {} comparator(s)",
                    ops.len(),
                    comparators.len()
                ),
            ));
        }
        let mut text = self.wrap_if(left, |p| p <= Precedence::Comparison)?;
        for (op, comparator) in ops.iter().zip(comparators) {
            let comparator = self.wrap_if(comparator, |p| p <= Precedence::Comparison)?;
            text.push_str(&format!(" {op} {comparator}"));
        }
        Ok(text)
    }

    fn unparse_call(
        &self,
        func: &Expr,
        args: &[Expr],
        keywords: &[Keyword],
        starargs: Option<&Expr>,
        kwargs: Option<&Expr>,
    ) -> Result<String, UnparseError> {
        let func = self.wrap_if(func, |p| p < Precedence::Primary)?;
        let mut parts = Vec::with_capacity(args.len() + keywords.len() + 2);
        for arg in args {
            parts.push(self.test(arg)?);
        }
        for keyword in keywords {
            parts.push(format!("{}={}", keyword.arg, self.test(&keyword.value)?));
        }
        if let Some(starargs) = starargs {
            parts.push(format!("*{}", self.test(starargs)?));
        }
        if let Some(kwargs) = kwargs {
            parts.push(format!("**{}", self.test(kwargs)?));
        }
        Ok(format!("{func}({})", parts.join(", ")))
    }

    fn unparse_repr(&self, value: &Expr) -> Result<String, UnparseError> {
        Ok(format!("`{}`", self.test(value)?))
    }

    fn unparse_attribute(&self, value: &Expr, attr: &str) -> Result<String, UnparseError> {
        // `1.real` would lex as a float followed by a name.
        let base = match value {
            Expr::Num {
                n: Number::Int(_) | Number::Long(_),
            } => format!("({})", self.render(value)?),
            _ => self.wrap_if(value, |p| p < Precedence::Primary)?,
        };
        Ok(format!("{base}.{attr}"))
    }

    fn unparse_subscript(&self, value: &Expr, slice: &Slice) -> Result<String, UnparseError> {
        let value = self.wrap_if(value, |p| p < Precedence::Primary)?;
        Ok(format!("{value}[{}]", self.render(slice)?))
    }

    fn unparse_list(&self, elts: &[Expr]) -> Result<String, UnparseError> {
        Ok(format!("[{}]", self.comma_list(elts)?))
    }

    fn unparse_tuple(&self, elts: &[Expr]) -> Result<String, UnparseError> {
        match elts {
            [single] => Ok(format!("({},)", self.test(single)?)),
            _ => Ok(format!("({})", self.comma_list(elts)?)),
        }
    }

    fn unparse_bounds(
        &self,
        lower: Option<&Expr>,
        upper: Option<&Expr>,
        step: Option<&Expr>,
    ) -> Result<String, UnparseError> {
        let bound = |b: Option<&Expr>| b.map(|e| self.test(e)).transpose();
        let text = match (bound(lower)?, bound(upper)?, bound(step)?) {
            (Some(l), Some(u), Some(s)) => format!("{l}:{u}:{s}"),
            (Some(l), Some(u), None) => format!("{l}:{u}"),
            (Some(l), None, Some(s)) => format!("{l}::{s}"),
            (None, Some(u), Some(s)) => format!(":{u}:{s}"),
            (Some(l), None, None) => format!("{l}:"),
            (None, Some(u), None) => format!(":{u}"),
            (None, None, Some(s)) => format!("::{s}"),
            (None, None, None) => ":".to_string(),
        };
        Ok(text)
    }

    fn unparse_extslice(&self, dims: &[Slice]) -> Result<String, UnparseError> {
        let rendered = dims
            .iter()
            .map(|d| self.render(d))
            .collect::<Result<Vec<_>, _>>()?;
        match rendered.as_slice() {
            [] => Err(UnparseError::malformed("ExtSlice", "no dimensions")),
            // Without the comma a lone dimension would read as a plain slice.
            [single] => Ok(format!("{single},")),
            _ => Ok(rendered.join(", ")),
        }
    }

    fn dict_entry(&self, key: &Expr, value: &Expr) -> Result<String, UnparseError> {
        Ok(format!("{}: {}", self.test(key)?, self.test(value)?))
    }

    fn unparse_generators(
        &self,
        kind: &'static str,
        generators: &[Comprehension],
    ) -> Result<String, UnparseError> {
        if generators.is_empty() {
            return Err(UnparseError::malformed(kind, "no generator clauses"));
        }
        itertools::process_results(
            generators.iter().map(|g| self.unparse_comprehension(g)),
            |mut clauses| clauses.join(" "),
        )
    }

    fn unparse_comprehension(&self, generator: &Comprehension) -> Result<String, UnparseError> {
        let mut clause = format!(
            "for {} in {}",
            self.render(&generator.target)?,
            self.wrap_if(&generator.iter, |p| p < Precedence::Or)?
        );
        for condition in &generator.ifs {
            let condition = self.wrap_if(condition, |p| p < Precedence::Or)?;
            clause.push_str(&format!(" if {condition}"));
        }
        Ok(clause)
    }
}

fn unparse_str(s: &StrLiteral) -> String {
    match s {
        StrLiteral::Bytes(bytes) => quote_bytes(bytes),
        StrLiteral::Unicode(text) => format!("u{}", quote_str(text)),
    }
}

fn unparse_number(n: &Number) -> Result<String, UnparseError> {
    match n {
        Number::Int(i) => Ok(i.to_string()),
        Number::Long(digits) => {
            let unsigned = digits.strip_prefix('-').unwrap_or(digits);
            if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
                return Err(UnparseError::malformed(
                    "Num",
                    format!("{digits:?} is not a decimal integer"),
                ));
            }
            Ok(format!("{digits}L"))
        }
        Number::Float(f) => Ok(match finite_or_infinite(*f)? {
            Some(text) => text,
            None => float_repr(*f),
        }),
        Number::Complex(f) => Ok(match finite_or_infinite(*f)? {
            Some(text) => format!("{text}j"),
            None => format!("{}j", imag_repr(*f)),
        }),
    }
}

/// Literal text for an infinite value, `None` for a finite one. NaN has no literal form.
fn finite_or_infinite(f: f64) -> Result<Option<String>, UnparseError> {
    if f.is_nan() {
        return Err(UnparseError::malformed("Num", "NaN has no literal form"));
    }
    if f.is_infinite() {
        let sign = if f < 0.0 { "-" } else { "" };
        return Ok(Some(format!("{sign}{INFINITY_LITERAL}")));
    }
    Ok(None)
}
