// Copyright 2026 the Wasm Ops Codegen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `wasm_ops_codegen`: compiles a `wasm.json` opcode catalog into the `WasmOps.h` header.
//!
//! The header carries:
//! - `FOR_EACH_WASM_*_OP(macro)` tables, one per category/arity/simplicity group, plus the
//!   `FOR_EACH_WASM_OP` umbrella,
//! - an `OpType` enum and secondary enums whose discriminants are the declared values,
//! - `isValidOpType`, backed by a packed bitset of declared values,
//! - `isControlOp` and the two `isSimple` predicates.
//!
//! This is a std-only build tool crate. The pipeline is `Catalog` → [`MacroTables`] →
//! { [`OpcodeBitset`], [`emit`] } → [`generate`] → [`write_atomic`].
//!
//! ## Example
//!
//! ```
//! use wasm_ops_codegen::{Catalog, GenConfig, generate};
//!
//! let catalog = Catalog::from_json(
//!     r#"{ "opcode": {
//!         "nop": { "category": "control", "value": 1, "parameter": [], "return": [] },
//!         "i32.add": { "category": "arithmetic", "value": 106,
//!                      "parameter": ["i32", "i32"], "return": ["i32"], "b3op": "Add" }
//!     } }"#,
//! )?;
//! let artifact = generate(&catalog, &GenConfig::default())?;
//! assert!(artifact.text.contains("macro(I32Add, 0x6a, Add)"));
//! assert_eq!(artifact.summary.max_value, 106);
//! # Ok::<(), wasm_ops_codegen::GenError>(())
//! ```

pub mod assemble;
pub mod bitset;
pub mod catalog;
pub mod classify;
pub mod emit;
pub mod error;
pub mod naming;
pub mod tables;

pub use assemble::{
    Artifact, GenConfig, Summary, generate, generate_file, is_up_to_date, write_atomic,
};
pub use bitset::OpcodeBitset;
pub use catalog::{Catalog, Category, OpcodeRecord};
pub use error::GenError;
pub use tables::{MacroEntry, MacroTable, MacroTables, NON_SIMPLE_SENTINEL, TableId};
