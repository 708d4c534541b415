// Copyright 2026 the Wasm Ops Codegen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Macro tables (`FOR_EACH_WASM_*_OP`).
//!
//! Leaf tables are filtered from the catalog by one [`Group`] each, in declaration order.
//! The full unary and binary tables are composed: they include their simple sub-table and then
//! list their own non-simple entries. [`MacroTables::expand`] resolves that composition and is
//! the ordering every consumer sees.

use crate::catalog::Catalog;
use crate::classify::Group;

/// Backend operation emitted for opcodes without a one-to-one lowering.
pub const NON_SIMPLE_SENTINEL: &str = "Oops";

/// Name of the macro expanding to every opcode.
pub const AGGREGATE_MACRO: &str = "FOR_EACH_WASM_OP";

/// One `macro(name, value, backend)` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroEntry {
    /// C++ identifier of the opcode.
    pub ident: String,
    /// Declared opcode value.
    pub value: u8,
    /// Backend operation, or [`NON_SIMPLE_SENTINEL`].
    pub backend_op: String,
}

/// The macro tables, in emission order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TableId {
    /// Special and call opcodes.
    Special,
    /// Control-flow opcodes.
    ControlFlow,
    /// Unary opcodes with a backend lowering.
    SimpleUnary,
    /// All unary opcodes: simple first, then non-simple.
    Unary,
    /// Binary opcodes with a backend lowering.
    SimpleBinary,
    /// All binary opcodes: simple first, then non-simple.
    Binary,
    /// Memory loads.
    MemoryLoad,
    /// Memory stores.
    MemoryStore,
}

impl TableId {
    /// Every table, in emission order.
    pub const ALL: [Self; 8] = [
        Self::Special,
        Self::ControlFlow,
        Self::SimpleUnary,
        Self::Unary,
        Self::SimpleBinary,
        Self::Binary,
        Self::MemoryLoad,
        Self::MemoryStore,
    ];

    /// Tables referenced by [`AGGREGATE_MACRO`], in order.
    pub const AGGREGATE: [Self; 6] = [
        Self::Special,
        Self::ControlFlow,
        Self::Unary,
        Self::Binary,
        Self::MemoryLoad,
        Self::MemoryStore,
    ];

    /// The generated macro name.
    #[must_use]
    pub const fn macro_name(self) -> &'static str {
        match self {
            Self::Special => "FOR_EACH_WASM_SPECIAL_OP",
            Self::ControlFlow => "FOR_EACH_WASM_CONTROL_FLOW_OP",
            Self::SimpleUnary => "FOR_EACH_WASM_SIMPLE_UNARY_OP",
            Self::Unary => "FOR_EACH_WASM_UNARY_OP",
            Self::SimpleBinary => "FOR_EACH_WASM_SIMPLE_BINARY_OP",
            Self::Binary => "FOR_EACH_WASM_BINARY_OP",
            Self::MemoryLoad => "FOR_EACH_WASM_MEMORY_LOAD_OP",
            Self::MemoryStore => "FOR_EACH_WASM_MEMORY_STORE_OP",
        }
    }

    /// The group that selects this table's own entries.
    #[must_use]
    pub const fn group(self) -> Group {
        match self {
            Self::Special => Group::SpecialOrCall,
            Self::ControlFlow => Group::ControlFlow,
            Self::SimpleUnary => Group::SimpleUnary,
            Self::Unary => Group::NonSimpleUnary,
            Self::SimpleBinary => Group::SimpleBinary,
            Self::Binary => Group::NonSimpleBinary,
            Self::MemoryLoad => Group::MemoryLoad,
            Self::MemoryStore => Group::MemoryStore,
        }
    }

    /// The table whose expansion precedes this table's own entries.
    #[must_use]
    pub const fn base(self) -> Option<Self> {
        match self {
            Self::Unary => Some(Self::SimpleUnary),
            Self::Binary => Some(Self::SimpleBinary),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// One macro table: an optional included base table followed by its own entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroTable {
    /// Which table this is.
    pub id: TableId,
    /// Entries listed directly in this table, in catalog order.
    pub entries: Vec<MacroEntry>,
}

/// All macro tables for one catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroTables {
    tables: Vec<MacroTable>,
}

impl MacroTables {
    /// Filters `catalog` into every table.
    #[must_use]
    pub fn build(catalog: &Catalog) -> Self {
        let tables = TableId::ALL
            .into_iter()
            .map(|id| {
                let group = id.group();
                let entries: Vec<MacroEntry> = catalog
                    .ops()
                    .iter()
                    .filter(|op| group.matches(op))
                    .map(|op| MacroEntry {
                        ident: op.ident.clone(),
                        value: op.value,
                        backend_op: op
                            .backend_op
                            .clone()
                            .unwrap_or_else(|| NON_SIMPLE_SENTINEL.to_string()),
                    })
                    .collect();
                tracing::debug!(table = id.macro_name(), own = entries.len(), "built macro table");
                MacroTable { id, entries }
            })
            .collect();
        Self { tables }
    }

    /// Returns one table.
    #[must_use]
    pub fn table(&self, id: TableId) -> &MacroTable {
        &self.tables[id.index()]
    }

    /// Entries `id` expands to: the base table's expansion, then the table's own entries.
    #[must_use]
    pub fn expand(&self, id: TableId) -> Vec<&MacroEntry> {
        let mut out = match id.base() {
            Some(base) => self.expand(base),
            None => Vec::new(),
        };
        out.extend(self.table(id).entries.iter());
        out
    }

    /// Entries [`AGGREGATE_MACRO`] expands to.
    #[must_use]
    pub fn all(&self) -> Vec<&MacroEntry> {
        TableId::AGGREGATE
            .into_iter()
            .flat_map(|id| self.expand(id))
            .collect()
    }

    /// Renders every `#define FOR_EACH_WASM_*_OP(macro)` block, ending with a blank line.
    #[must_use]
    pub fn render_defines(&self) -> String {
        let mut out = String::new();
        for (i, table) in self.tables.iter().enumerate() {
            if i != 0 {
                out.push_str("\n\n");
            }
            out.push_str(&format!("#define {}(macro)", table.id.macro_name()));
            if let Some(base) = table.id.base() {
                out.push_str(&format!(" \\\n    {}(macro)", base.macro_name()));
            }
            for e in &table.entries {
                out.push_str(&format!(
                    " \\\n    macro({}, {:#x}, {})",
                    e.ident, e.value, e.backend_op
                ));
            }
        }
        out.push_str("\n\n");
        out
    }

    /// Renders the `FOR_EACH_WASM_OP` umbrella macro.
    #[must_use]
    pub fn render_aggregate(&self) -> String {
        let mut out = format!("#define {AGGREGATE_MACRO}(macro)");
        for id in TableId::AGGREGATE {
            out.push_str(&format!(" \\\n    {}(macro)", id.macro_name()));
        }
        out.push('\n');
        out
    }
}
