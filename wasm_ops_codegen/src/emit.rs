// Copyright 2026 the Wasm Ops Codegen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enumerations and classification predicates over the macro tables.
//!
//! Enumerators take their discriminant from the declared opcode value (`name = id`), never from
//! position. Predicates are a `switch` with one `case` per table entry and a single `default`
//! returning `false`, so they are total over the enum's underlying type.

use crate::tables::{AGGREGATE_MACRO, MacroEntry, MacroTables, TableId};

/// The set of entries a definition is generated from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Every opcode ([`AGGREGATE_MACRO`]).
    All,
    /// One macro table, fully expanded.
    Table(TableId),
}

impl Source {
    /// Macro the generated code expands.
    #[must_use]
    pub const fn macro_name(self) -> &'static str {
        match self {
            Self::All => AGGREGATE_MACRO,
            Self::Table(id) => id.macro_name(),
        }
    }

    /// Entries the macro expands to.
    #[must_use]
    pub fn entries(self, tables: &MacroTables) -> Vec<&MacroEntry> {
        match self {
            Self::All => tables.all(),
            Self::Table(id) => tables.expand(id),
        }
    }
}

/// An 8-bit enumeration over one source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EnumDef {
    /// C++ type name.
    pub name: &'static str,
    /// `enum class` when `true`, plain `enum` otherwise.
    pub scoped: bool,
    /// Entries to enumerate.
    pub source: Source,
}

/// The opcode enum; every declared opcode.
pub const OP_TYPE: EnumDef = EnumDef {
    name: "OpType",
    scoped: false,
    source: Source::All,
};

/// Secondary enums, in emission order.
pub const SECONDARY_ENUMS: [EnumDef; 4] = [
    EnumDef {
        name: "BinaryOpType",
        scoped: true,
        source: Source::Table(TableId::Binary),
    },
    EnumDef {
        name: "UnaryOpType",
        scoped: true,
        source: Source::Table(TableId::Unary),
    },
    EnumDef {
        name: "LoadOpType",
        scoped: true,
        source: Source::Table(TableId::MemoryLoad),
    },
    EnumDef {
        name: "StoreOpType",
        scoped: true,
        source: Source::Table(TableId::MemoryStore),
    },
];

impl EnumDef {
    /// `(enumerator, discriminant)` pairs in declaration order.
    #[must_use]
    pub fn members<'a>(&self, tables: &'a MacroTables) -> Vec<(&'a str, u8)> {
        self.source
            .entries(tables)
            .into_iter()
            .map(|e| (e.ident.as_str(), e.value))
            .collect()
    }

    /// Renders the enum definition. `CREATE_ENUM_VALUE` must be defined by the caller.
    #[must_use]
    pub fn render(&self) -> String {
        let kind = if self.scoped { "enum class" } else { "enum" };
        format!(
            "{kind} {} : uint8_t {{\n    {}(CREATE_ENUM_VALUE)\n}};\n",
            self.name,
            self.source.macro_name()
        )
    }
}

/// A boolean predicate over an enum, true for the members of one table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PredicateDef {
    /// Function name.
    pub name: &'static str,
    /// Parameter type.
    pub param: &'static str,
    /// Table whose members answer `true`.
    pub table: TableId,
}

/// Predicates, in emission order.
pub const PREDICATES: [PredicateDef; 3] = [
    PredicateDef {
        name: "isControlOp",
        param: "OpType",
        table: TableId::ControlFlow,
    },
    PredicateDef {
        name: "isSimple",
        param: "UnaryOpType",
        table: TableId::SimpleUnary,
    },
    PredicateDef {
        name: "isSimple",
        param: "BinaryOpType",
        table: TableId::SimpleBinary,
    },
];

impl PredicateDef {
    /// Evaluates the generated predicate for a raw value: a case per table entry, else `false`.
    #[cfg(test)]
    fn evaluate(&self, tables: &MacroTables, value: u8) -> bool {
        tables.expand(self.table).iter().any(|e| e.value == value)
    }

    /// Renders the predicate as an inline C++ function.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "inline bool {name}({param} op)\n\
             {{\n    \
             switch (op) {{\n\
             #define CREATE_CASE(name, id, b3op) case {param}::name:\n    \
             {table}(CREATE_CASE)\n        \
             return true;\n\
             #undef CREATE_CASE\n    \
             default:\n        \
             break;\n    \
             }}\n    \
             return false;\n\
             }}\n",
            name = self.name,
            param = self.param,
            table = self.table.macro_name(),
        )
    }
}

/// Renders `CREATE_ENUM_VALUE`, the opcode enum, the validity check and the secondary enums.
///
/// `valid_check` is placed right after the opcode enum.
#[must_use]
pub fn render_enums(valid_check: &str) -> String {
    let mut out = String::from("#define CREATE_ENUM_VALUE(name, id, b3op) name = id,\n\n");
    out.push_str(&OP_TYPE.render());
    out.push('\n');
    out.push_str(valid_check);
    for def in &SECONDARY_ENUMS {
        out.push('\n');
        out.push_str(&def.render());
    }
    out.push_str("\n#undef CREATE_ENUM_VALUE\n");
    out
}

/// Renders every predicate, separated by blank lines.
#[must_use]
pub fn render_predicates() -> String {
    PREDICATES
        .iter()
        .map(PredicateDef::render)
        .collect::<Vec<_>>()
        .join("\n")
}
