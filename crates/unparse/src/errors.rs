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

use crate::dispatch::Family;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnparseError {
    #[error("no {family} renderer for node kind {kind:?} at {path}")]
    UnhandledNodeKind {
        family: Family,
        kind: String,
        path: String,
    },
    #[error("malformed {kind} node: {reason}")]
    MalformedNode { kind: &'static str, reason: String },
    #[error("{kind} node at {path} is missing required field {field:?}")]
    MissingField {
        kind: String,
        field: &'static str,
        path: String,
    },
    #[error("field {field:?} of {kind} node at {path} should be {expected}")]
    InvalidField {
        kind: String,
        field: &'static str,
        path: String,
        expected: &'static str,
    },
    #[error("nodes nested more than {limit} levels deep")]
    NestingTooDeep { limit: usize },
}

impl UnparseError {
    pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        UnparseError::MalformedNode {
            kind,
            reason: reason.into(),
        }
    }
}
