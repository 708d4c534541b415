// Copyright 2026 the Wasm Ops Codegen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opcode classification.
//!
//! Every predicate here is a pure function of one [`OpcodeRecord`]. Table filters are named by
//! the closed [`Group`] enum rather than passed around as closures, so each macro table is built
//! from exactly one known predicate.

use crate::catalog::{Category, OpcodeRecord};
use crate::error::GenError;

/// `true` iff the opcode takes exactly one operand.
#[must_use]
pub fn is_unary(op: &OpcodeRecord) -> bool {
    op.operand_count == 1
}

/// `true` iff the opcode takes exactly two operands.
#[must_use]
pub fn is_binary(op: &OpcodeRecord) -> bool {
    op.operand_count == 2
}

/// `true` iff the opcode lowers one-to-one to a backend operation.
#[must_use]
pub fn is_simple(op: &OpcodeRecord) -> bool {
    op.backend_op.is_some()
}

/// `true` for `special` and `call` opcodes.
#[must_use]
pub fn is_special_or_call(op: &OpcodeRecord) -> bool {
    matches!(op.category, Category::Special | Category::Call)
}

/// `true` for `control` opcodes.
#[must_use]
pub fn is_control(op: &OpcodeRecord) -> bool {
    op.category == Category::Control
}

/// `true` for categories whose table is chosen by arity (unary or binary).
#[must_use]
pub fn is_computational(op: &OpcodeRecord) -> bool {
    matches!(
        op.category,
        Category::Unary
            | Category::Binary
            | Category::Arithmetic
            | Category::Comparison
            | Category::Conversion
    )
}

/// `true` for memory opcodes producing one result.
#[must_use]
pub fn is_memory_load(op: &OpcodeRecord) -> bool {
    op.category == Category::Memory && op.result_count == 1
}

/// `true` for memory opcodes producing no result.
#[must_use]
pub fn is_memory_store(op: &OpcodeRecord) -> bool {
    op.category == Category::Memory && op.result_count == 0
}

/// Rejects records whose arity would leave them out of every macro table.
pub fn check_shape(op: &OpcodeRecord) -> Result<(), GenError> {
    let bad = |what, count| GenError::BadArity {
        name: op.name.clone(),
        category: op.category.as_str(),
        what,
        count,
    };
    match op.category {
        Category::Memory if op.result_count > 1 => Err(bad("result", op.result_count)),
        Category::Unary if op.operand_count != 1 => Err(bad("operand", op.operand_count)),
        Category::Binary if op.operand_count != 2 => Err(bad("operand", op.operand_count)),
        _ if is_computational(op) && !(is_unary(op) || is_binary(op)) => {
            Err(bad("operand", op.operand_count))
        }
        _ => Ok(()),
    }
}

/// A named opcode filter. Each leaf macro table is built from exactly one group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    /// `special` or `call`.
    SpecialOrCall,
    /// `control`.
    ControlFlow,
    /// Unary with a backend lowering.
    SimpleUnary,
    /// Unary without a backend lowering.
    NonSimpleUnary,
    /// Binary with a backend lowering.
    SimpleBinary,
    /// Binary without a backend lowering.
    NonSimpleBinary,
    /// Memory with one result.
    MemoryLoad,
    /// Memory with no result.
    MemoryStore,
}

impl Group {
    /// Every group, in aggregate table order.
    pub const ALL: [Self; 8] = [
        Self::SpecialOrCall,
        Self::ControlFlow,
        Self::SimpleUnary,
        Self::NonSimpleUnary,
        Self::SimpleBinary,
        Self::NonSimpleBinary,
        Self::MemoryLoad,
        Self::MemoryStore,
    ];

    /// Returns `true` if `op` belongs to this group.
    #[must_use]
    pub fn matches(self, op: &OpcodeRecord) -> bool {
        let unary = is_computational(op) && is_unary(op);
        let binary = is_computational(op) && is_binary(op);
        match self {
            Self::SpecialOrCall => is_special_or_call(op),
            Self::ControlFlow => is_control(op),
            Self::SimpleUnary => unary && is_simple(op),
            Self::NonSimpleUnary => unary && !is_simple(op),
            Self::SimpleBinary => binary && is_simple(op),
            Self::NonSimpleBinary => binary && !is_simple(op),
            Self::MemoryLoad => is_memory_load(op),
            Self::MemoryStore => is_memory_store(op),
        }
    }
}
