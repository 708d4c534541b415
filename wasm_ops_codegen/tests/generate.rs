// Copyright 2026 the Wasm Ops Codegen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(missing_docs, reason = "integration test crate")]

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use wasm_ops_codegen::{
    Catalog, GenConfig, GenError, MacroEntry, MacroTables, OpcodeBitset, TableId, generate,
    generate_file, is_up_to_date,
};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

fn idents(entries: &[&MacroEntry]) -> Vec<String> {
    entries.iter().map(|e| e.ident.clone()).collect()
}

#[test]
fn example_catalog_matches_golden_header() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("WasmOps.h");

    let summary = generate_file(&data("example.json"), &out).unwrap();

    let rendered = fs::read_to_string(&out).unwrap();
    let golden = fs::read_to_string(data("example_ops.h")).unwrap();
    assert_eq!(normalize_newlines(&rendered), normalize_newlines(&golden));
    assert_eq!(summary.total, 3);
    assert_eq!(summary.max_value, 0x10);
    assert_eq!(summary.bitset_bytes, 3);
    assert_eq!(
        summary.enums,
        [
            ("OpType", 3),
            ("BinaryOpType", 0),
            ("UnaryOpType", 1),
            ("LoadOpType", 1),
            ("StoreOpType", 0),
        ]
    );
}

#[test]
fn example_catalog_tables_and_bitset() {
    let catalog = Catalog::load(&data("example.json")).unwrap();
    let tables = MacroTables::build(&catalog);

    assert_eq!(idents(&tables.expand(TableId::ControlFlow)), ["A"]);
    let unary = tables.expand(TableId::Unary);
    assert_eq!(idents(&unary), ["B"]);
    assert_eq!(unary[0].backend_op, "Neg");
    assert_eq!(idents(&tables.expand(TableId::MemoryLoad)), ["C"]);
    assert!(tables.expand(TableId::MemoryStore).is_empty());

    let bitset = OpcodeBitset::encode(catalog.ops().iter().map(|op| op.value)).unwrap();
    let set: Vec<i64> = (0..=0x10).filter(|i| bitset.contains(*i)).collect();
    assert_eq!(set, [0x01, 0x02, 0x10]);
}

#[test]
fn fixture_tables_partition_the_catalog() {
    let catalog = Catalog::load(&data("wasm.json")).unwrap();
    let tables = MacroTables::build(&catalog);

    let top = [
        TableId::Special,
        TableId::ControlFlow,
        TableId::Unary,
        TableId::Binary,
        TableId::MemoryLoad,
        TableId::MemoryStore,
    ];
    for op in catalog.ops() {
        let hits = top
            .iter()
            .filter(|id| tables.expand(**id).iter().any(|e| e.ident == op.ident))
            .count();
        assert_eq!(hits, 1, "{} appears in {hits} tables", op.name);
    }

    for (full, simple) in [
        (TableId::Unary, TableId::SimpleUnary),
        (TableId::Binary, TableId::SimpleBinary),
    ] {
        let mut concat = tables.expand(simple);
        concat.extend(tables.table(full).entries.iter());
        assert_eq!(tables.expand(full), concat);

        let simple_set: HashSet<&str> = tables
            .expand(simple)
            .iter()
            .map(|e| e.ident.as_str())
            .collect();
        for e in &tables.table(full).entries {
            assert!(!simple_set.contains(e.ident.as_str()));
            assert_eq!(e.backend_op, "Oops");
        }
    }

    assert_eq!(
        idents(&tables.expand(TableId::Special)),
        ["I32Const", "I64Const", "GetLocal", "SetLocal", "Call"]
    );
    assert_eq!(
        idents(&tables.expand(TableId::Unary)),
        ["I32Clz", "F32Neg", "I32Ctz", "I32Eqz", "I32TruncSF32", "F64ConvertUI64"]
    );
    assert_eq!(
        idents(&tables.expand(TableId::Binary)),
        ["I32Add", "I32Sub", "I32Eq", "I32RemS", "F64Min"]
    );
    assert_eq!(
        idents(&tables.expand(TableId::MemoryStore)),
        ["I32Store8", "I32Store"]
    );

    let all = tables.all();
    assert_eq!(all.len(), catalog.len());
    let distinct: HashSet<u8> = all.iter().map(|e| e.value).collect();
    assert_eq!(distinct.len(), all.len());
}

#[test]
fn fixture_bitset_marks_exactly_declared_values() {
    let catalog = Catalog::load(&data("wasm.json")).unwrap();
    let declared: HashSet<i64> = catalog.ops().iter().map(|op| i64::from(op.value)).collect();
    let bitset = OpcodeBitset::encode(catalog.ops().iter().map(|op| op.value)).unwrap();

    assert_eq!(bitset.max(), 175);
    assert_eq!(bitset.bytes().len(), 22);
    for i in -16..=300 {
        assert_eq!(bitset.contains(i), declared.contains(&i), "value {i}");
    }
}

#[test]
fn fixture_header_layout() {
    let catalog = Catalog::load(&data("wasm.json")).unwrap();
    let text = generate(&catalog, &GenConfig::default()).unwrap().text;

    assert!(text.starts_with(
        "/*\n * Opcode catalog fixture.\n * SPDX-License-Identifier: Apache-2.0 OR MIT\n */\n\n\
         // DO NOT EDIT! - This file was generated by wasm_ops_codegen from wasm.json\n\n"
    ));
    assert!(text.contains("    macro(I32TruncSF32, 0x9d, Oops)"));
    assert!(text.contains("    macro(I32Add, 0x40, Add)"));
    assert!(text.contains("return 0 <= i && i <= 175 && "));

    let order = [
        "#define FOR_EACH_WASM_SPECIAL_OP(macro)",
        "#define FOR_EACH_WASM_CONTROL_FLOW_OP(macro)",
        "#define FOR_EACH_WASM_SIMPLE_UNARY_OP(macro)",
        "#define FOR_EACH_WASM_UNARY_OP(macro)",
        "#define FOR_EACH_WASM_SIMPLE_BINARY_OP(macro)",
        "#define FOR_EACH_WASM_BINARY_OP(macro)",
        "#define FOR_EACH_WASM_MEMORY_LOAD_OP(macro)",
        "#define FOR_EACH_WASM_MEMORY_STORE_OP(macro)",
        "#define FOR_EACH_WASM_OP(macro)",
        "enum OpType : uint8_t",
        "inline bool isValidOpType(Int i)",
        "enum class BinaryOpType : uint8_t",
        "enum class UnaryOpType : uint8_t",
        "enum class LoadOpType : uint8_t",
        "enum class StoreOpType : uint8_t",
        "#undef CREATE_ENUM_VALUE",
        "inline bool isControlOp(OpType op)",
        "inline bool isSimple(UnaryOpType op)",
        "inline bool isSimple(BinaryOpType op)",
        "} } // namespace JSC::Wasm",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn generation_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.h");
    let second = dir.path().join("second.h");
    generate_file(&data("wasm.json"), &first).unwrap();
    generate_file(&data("wasm.json"), &second).unwrap();
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

    // Regenerating over an existing artifact is also byte-identical.
    let before = fs::read(&first).unwrap();
    generate_file(&data("wasm.json"), &first).unwrap();
    assert_eq!(fs::read(&first).unwrap(), before);
}

#[test]
fn duplicate_value_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("dup.json");
    fs::write(
        &schema,
        r#"{ "opcode": {
            "nop": { "category": "control", "value": 1, "parameter": [], "return": [] },
            "end": { "category": "control", "value": 1, "parameter": [], "return": [] }
        } }"#,
    )
    .unwrap();

    let fresh = dir.path().join("fresh.h");
    let err = generate_file(&schema, &fresh).unwrap_err();
    assert!(matches!(err, GenError::DuplicateValue { value: 1, .. }));
    assert!(!fresh.exists());

    let existing = dir.path().join("existing.h");
    fs::write(&existing, "old contents").unwrap();
    generate_file(&schema, &existing).unwrap_err();
    assert_eq!(fs::read_to_string(&existing).unwrap(), "old contents");
}

#[test]
fn up_to_date_check() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("WasmOps.h");
    let schema = data("wasm.json");

    assert!(!is_up_to_date(&schema, &out).unwrap());
    generate_file(&schema, &out).unwrap();
    assert!(is_up_to_date(&schema, &out).unwrap());

    let crlf = fs::read_to_string(&out).unwrap().replace('\n', "\r\n");
    fs::write(&out, crlf).unwrap();
    assert!(is_up_to_date(&schema, &out).unwrap());

    fs::write(&out, "stale").unwrap();
    assert!(!is_up_to_date(&schema, &out).unwrap());
}

#[test]
fn cli_requires_exactly_two_paths() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("WasmOps.h");
    let exe = env!("CARGO_BIN_EXE_wasm_ops_codegen");

    let status = Command::new(exe).arg(data("wasm.json")).status().unwrap();
    assert!(!status.success());

    let status = Command::new(exe)
        .arg(data("wasm.json"))
        .arg(&out)
        .arg("extra")
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!out.exists());

    let status = Command::new(exe)
        .arg(data("wasm.json"))
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(is_up_to_date(&data("wasm.json"), &out).unwrap());
}

#[test]
fn cli_reports_schema_errors() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("bad.json");
    fs::write(
        &schema,
        r#"{ "opcode": { "x": { "category": "memory", "value": 300, "parameter": [], "return": [] } } }"#,
    )
    .unwrap();
    let out = dir.path().join("WasmOps.h");

    let output = Command::new(env!("CARGO_BIN_EXE_wasm_ops_codegen"))
        .arg(&schema)
        .arg(&out)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("outside 0..=255"));
    assert!(!out.exists());
}
