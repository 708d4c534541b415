// Copyright 2026 the Wasm Ops Codegen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors produced while loading a catalog or generating the header.

use std::io;
use std::path::PathBuf;

/// A fatal error for one generation run.
///
/// Nothing is written to the output path once any of these has been returned.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// The schema file could not be parsed as JSON, or its shape is wrong.
    #[error("invalid schema: {0}")]
    Parse(#[from] serde_json::Error),
    /// An opcode record is missing a field or has a field of the wrong type.
    #[error("invalid opcode '{name}': {source}")]
    Record {
        /// Schema name of the opcode.
        name: String,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },
    /// An opcode declares a category outside the closed category set.
    #[error("opcode '{name}' has unknown category '{category}'")]
    UnknownCategory {
        /// Schema name of the opcode.
        name: String,
        /// The category string found in the schema.
        category: String,
    },
    /// An opcode value does not fit in 8 bits.
    #[error("opcode '{name}' has value {value}, outside 0..=255")]
    ValueOutOfRange {
        /// Schema name of the opcode.
        name: String,
        /// The declared value.
        value: i64,
    },
    /// Two opcodes share a numeric value.
    #[error("duplicate opcode value 0x{value:02x}: '{first}' and '{second}'")]
    DuplicateValue {
        /// The shared value.
        value: u8,
        /// The opcode declared first.
        first: String,
        /// The opcode declared later.
        second: String,
    },
    /// Two opcode names map to the same C++ identifier.
    #[error("opcodes '{first}' and '{second}' both map to identifier '{ident}'")]
    DuplicateIdent {
        /// The shared identifier.
        ident: String,
        /// The opcode declared first.
        first: String,
        /// The opcode declared later.
        second: String,
    },
    /// An opcode name does not convert to a valid C++ identifier.
    #[error("opcode '{name}' does not map to a valid identifier (got '{ident}')")]
    InvalidIdent {
        /// Schema name of the opcode.
        name: String,
        /// The converted identifier.
        ident: String,
    },
    /// A record's operand or result count does not fit any table for its category.
    #[error("opcode '{name}' in category '{category}' has unsupported {what} count {count}")]
    BadArity {
        /// Schema name of the opcode.
        name: String,
        /// Category name.
        category: &'static str,
        /// `"operand"` or `"result"`.
        what: &'static str,
        /// The offending count.
        count: usize,
    },
    /// The catalog declares no opcodes, so there is no maximum value.
    #[error("opcode catalog is empty")]
    EmptyCatalog,
    /// Reading the schema or writing the artifact failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        /// What was being done (`"read"`, `"write"`, ...).
        action: &'static str,
        /// The path involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl GenError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
