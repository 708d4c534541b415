// Copyright 2026 the Wasm Ops Codegen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line entry point: `wasm_ops_codegen <wasm.json> <WasmOps.h>`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Generates the WebAssembly opcode header from a JSON opcode catalog.
#[derive(Parser)]
#[command(name = "wasm_ops_codegen", version, about)]
struct Cli {
    /// Opcode catalog (`wasm.json`).
    schema: PathBuf,
    /// Header to write (`WasmOps.h`).
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wasm_ops_codegen=info")),
        )
        .init();

    let summary = wasm_ops_codegen::generate_file(&cli.schema, &cli.output).with_context(|| {
        format!(
            "generate {} from {}",
            cli.output.display(),
            cli.schema.display()
        )
    })?;
    for (table, count) in &summary.tables {
        tracing::debug!(table = table.macro_name(), count, "table size");
    }
    for (name, count) in &summary.enums {
        tracing::debug!(enum_name = name, count, "enum size");
    }
    tracing::debug!(bytes = summary.bitset_bytes, "validity bitset");
    Ok(())
}
