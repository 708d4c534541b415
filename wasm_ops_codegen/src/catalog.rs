// Copyright 2026 the Wasm Ops Codegen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The opcode catalog: ordered, validated opcode records loaded from `wasm.json`.
//!
//! Loading is strict. Every record must carry a known category, a value that fits in a byte,
//! and an arity that places it in exactly one macro table. Values and generated identifiers
//! must be unique. The first violation aborts the load.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::classify;
use crate::error::GenError;
use crate::naming::{cpp_identifier, is_valid_identifier};

/// Opcode category as declared in the schema.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Structural opcodes (`end`, `drop`, constants, locals).
    Special,
    /// Calls.
    Call,
    /// Control flow (`block`, `br`, `return`, ...).
    Control,
    /// Loads and stores.
    Memory,
    /// Single-operand computation.
    Unary,
    /// Two-operand computation.
    Binary,
    /// Arithmetic; arity decides unary vs binary.
    Arithmetic,
    /// Comparisons; arity decides unary vs binary.
    Comparison,
    /// Conversions; arity decides unary vs binary.
    Conversion,
}

impl Category {
    /// Every category, in schema spelling order.
    pub const ALL: [Self; 9] = [
        Self::Special,
        Self::Call,
        Self::Control,
        Self::Memory,
        Self::Unary,
        Self::Binary,
        Self::Arithmetic,
        Self::Comparison,
        Self::Conversion,
    ];

    /// Parses the schema spelling of a category.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// The schema spelling of this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Special => "special",
            Self::Call => "call",
            Self::Control => "control",
            Self::Memory => "memory",
            Self::Unary => "unary",
            Self::Binary => "binary",
            Self::Arithmetic => "arithmetic",
            Self::Comparison => "comparison",
            Self::Conversion => "conversion",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instruction of the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpcodeRecord {
    /// Schema name, e.g. `i32.add`.
    pub name: String,
    /// Generated C++ identifier, e.g. `I32Add`.
    pub ident: String,
    /// Declared opcode value.
    pub value: u8,
    /// Declared category.
    pub category: Category,
    /// Number of operands (`parameter` entries).
    pub operand_count: usize,
    /// Number of results (`return` entries).
    pub result_count: usize,
    /// Backend lowering (`b3op`), present only for simple opcodes.
    pub backend_op: Option<String>,
}

impl OpcodeRecord {
    /// Creates a record with no operands, no results and no backend lowering.
    pub fn new(name: impl Into<String>, category: Category, value: u8) -> Self {
        let name = name.into();
        Self {
            ident: cpp_identifier(&name),
            name,
            value,
            category,
            operand_count: 0,
            result_count: 0,
            backend_op: None,
        }
    }

    /// Sets the operand count.
    #[must_use]
    pub fn operands(mut self, count: usize) -> Self {
        self.operand_count = count;
        self
    }

    /// Sets the result count.
    #[must_use]
    pub fn results(mut self, count: usize) -> Self {
        self.result_count = count;
        self
    }

    /// Marks the record simple, lowering one-to-one to `op`.
    #[must_use]
    pub fn backend_op(mut self, op: impl Into<String>) -> Self {
        self.backend_op = Some(op.into());
        self
    }
}

#[derive(Deserialize)]
struct RawSchema {
    #[serde(default)]
    license: Option<String>,
    opcode: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct RawOpcode {
    category: String,
    value: i64,
    parameter: Vec<serde_json::Value>,
    #[serde(rename = "return")]
    returns: Vec<serde_json::Value>,
    #[serde(default)]
    b3op: Option<String>,
}

/// An ordered, validated set of opcode records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    license: Option<String>,
    ops: Vec<OpcodeRecord>,
}

impl Catalog {
    /// Reads and validates a schema file.
    pub fn load(path: &Path) -> Result<Self, GenError> {
        let json = std::fs::read_to_string(path).map_err(|e| GenError::io("read", path, e))?;
        Self::from_json(&json)
    }

    /// Parses and validates schema text.
    pub fn from_json(json: &str) -> Result<Self, GenError> {
        let raw: RawSchema = serde_json::from_str(json)?;

        let mut ops = Vec::with_capacity(raw.opcode.len());
        for (name, value) in raw.opcode {
            let op: RawOpcode = match serde_json::from_value(value) {
                Ok(op) => op,
                Err(source) => return Err(GenError::Record { name, source }),
            };
            let Some(category) = Category::parse(&op.category) else {
                return Err(GenError::UnknownCategory {
                    name,
                    category: op.category,
                });
            };
            let Ok(byte) = u8::try_from(op.value) else {
                return Err(GenError::ValueOutOfRange {
                    name,
                    value: op.value,
                });
            };
            let mut record = OpcodeRecord::new(name, category, byte)
                .operands(op.parameter.len())
                .results(op.returns.len());
            record.backend_op = op.b3op;
            ops.push(record);
        }

        Self::from_records(raw.license, ops)
    }

    /// Validates already-built records, keeping their order.
    pub fn from_records(
        license: Option<String>,
        ops: Vec<OpcodeRecord>,
    ) -> Result<Self, GenError> {
        if ops.is_empty() {
            return Err(GenError::EmptyCatalog);
        }

        let mut by_value: [Option<&str>; 256] = [None; 256];
        let mut by_ident: HashMap<&str, &str> = HashMap::with_capacity(ops.len());
        for op in &ops {
            if !is_valid_identifier(&op.ident) {
                return Err(GenError::InvalidIdent {
                    name: op.name.clone(),
                    ident: op.ident.clone(),
                });
            }
            classify::check_shape(op)?;

            let slot = &mut by_value[usize::from(op.value)];
            if let Some(first) = slot {
                return Err(GenError::DuplicateValue {
                    value: op.value,
                    first: (*first).to_string(),
                    second: op.name.clone(),
                });
            }
            *slot = Some(op.name.as_str());

            if let Some(first) = by_ident.insert(&op.ident, &op.name) {
                return Err(GenError::DuplicateIdent {
                    ident: op.ident.clone(),
                    first: first.to_string(),
                    second: op.name.clone(),
                });
            }
        }

        Ok(Self { license, ops })
    }

    /// License text to pass through to the generated header.
    #[must_use]
    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    /// Records in declaration order.
    #[must_use]
    pub fn ops(&self) -> &[OpcodeRecord] {
        &self.ops
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Always `false`: an empty catalog is rejected at load time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[cfg(test)]
    fn max_value(&self) -> u8 {
        self.ops.iter().map(|op| op.value).max().unwrap_or_default()
    }
}
