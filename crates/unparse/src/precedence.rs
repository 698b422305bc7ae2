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

/// Python 2 operator precedence, consulted only when parenthesization is switched on.
/// Higher numbers = higher precedence (more tightly binding)
use crate::ast::{Expr, Number};
use crate::op::{BinaryOp, BoolOp, UnaryOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Precedence {
    Yield = 1,       // yield (lowest precedence)
    Lambda = 2,      // lambda
    Ternary = 3,     // x if c else y
    Or = 4,          // or
    And = 5,         // and
    Not = 6,         // not
    Comparison = 7,  // < > == >= <= != in not in is is not
    BitOr = 8,       // |
    BitXor = 9,      // ^
    BitAnd = 10,     // &
    Shift = 11,      // << >>
    Arith = 12,      // + -
    Term = 13,       // * / // %
    Factor = 14,     // +x -x ~x
    Power = 15,      // **
    Primary = 16,    // calls, subscripts, attribute references
    Atom = 17,       // names, literals, displays
}

impl Precedence {
    pub fn of_binary(op: BinaryOp) -> Self {
        match op {
            BinaryOp::BitOr => Precedence::BitOr,
            BinaryOp::BitXor => Precedence::BitXor,
            BinaryOp::BitAnd => Precedence::BitAnd,
            BinaryOp::LShift | BinaryOp::RShift => Precedence::Shift,
            BinaryOp::Add | BinaryOp::Sub => Precedence::Arith,
            BinaryOp::Mult | BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Mod => {
                Precedence::Term
            }
            BinaryOp::Pow => Precedence::Power,
        }
    }

    pub fn of_bool(op: BoolOp) -> Self {
        match op {
            BoolOp::Or => Precedence::Or,
            BoolOp::And => Precedence::And,
        }
    }

    pub fn of_unary(op: UnaryOp) -> Self {
        match op {
            UnaryOp::Not => Precedence::Not,
            UnaryOp::Invert | UnaryOp::UAdd | UnaryOp::USub => Precedence::Factor,
        }
    }
}

/// Get the precedence for an expression
pub fn get_precedence(expr: &Expr) -> Precedence {
    match expr {
        Expr::Yield { .. } => Precedence::Yield,
        Expr::Lambda { .. } => Precedence::Lambda,
        Expr::IfExp { .. } => Precedence::Ternary,
        Expr::BoolOp { op, .. } => Precedence::of_bool(*op),
        Expr::UnaryOp { op, .. } => Precedence::of_unary(*op),
        Expr::Compare { .. } => Precedence::Comparison,
        Expr::BinOp { op, .. } => Precedence::of_binary(*op),
        // A negative literal renders with a leading sign, so it groups like `-x`.
        Expr::Num { n } if is_negative(n) => Precedence::Factor,
        Expr::Call { .. } | Expr::Attribute { .. } | Expr::Subscript { .. } => {
            Precedence::Primary
        }
        Expr::Dict { .. }
        | Expr::Set { .. }
        | Expr::ListComp { .. }
        | Expr::SetComp { .. }
        | Expr::DictComp { .. }
        | Expr::GeneratorExp { .. }
        | Expr::Repr { .. }
        | Expr::Num { .. }
        | Expr::Str { .. }
        | Expr::Name { .. }
        | Expr::List { .. }
        | Expr::Tuple { .. } => Precedence::Atom,
    }
}

fn is_negative(n: &Number) -> bool {
    match n {
        Number::Int(i) => *i < 0,
        Number::Long(digits) => digits.starts_with('-'),
        Number::Float(f) | Number::Complex(f) => f.is_sign_negative(),
    }
}
