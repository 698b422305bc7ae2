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

pub mod ast;
mod dispatch;
mod errors;
mod lower;
pub mod op;
mod precedence;
mod unparse;

#[cfg(test)]
mod tests;

pub use crate::dispatch::{Family, Render};
pub use crate::errors::UnparseError;
pub use crate::lower::lower_module;
pub use crate::unparse::{Unparser, unparse_expr, unparse_module, unparse_stmt};
pub use py2py_common::{AssignTargets, UnparseOptions};
