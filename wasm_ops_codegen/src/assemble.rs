// Copyright 2026 the Wasm Ops Codegen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assembles the header text and writes it.
//!
//! The artifact is rendered completely in memory. Writing goes through a temporary file in the
//! destination directory that is renamed over the target, so readers never observe a partial
//! header.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use crate::bitset::OpcodeBitset;
use crate::catalog::Catalog;
use crate::emit;
use crate::error::GenError;
use crate::tables::{MacroTables, TableId};

/// Generator settings that end up in the artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenConfig {
    /// Tool name written in the `DO NOT EDIT` line.
    pub generator: String,
    /// Schema name written in the `DO NOT EDIT` line.
    pub source_name: String,
}

impl GenConfig {
    /// Config naming this crate as the generator and the file name of `schema` as the source.
    ///
    /// Only the file name is used so the output does not depend on where the checkout lives.
    #[must_use]
    pub fn for_schema(schema: &Path) -> Self {
        let source_name = schema
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| schema.display().to_string());
        Self {
            source_name,
            ..Self::default()
        }
    }
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            generator: env!("CARGO_PKG_NAME").to_string(),
            source_name: "wasm.json".to_string(),
        }
    }
}

/// Sizes of one generated artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Expanded entry count per table, in emission order.
    pub tables: Vec<(TableId, usize)>,
    /// Enumerator count per generated enum, in emission order.
    pub enums: Vec<(&'static str, usize)>,
    /// Number of opcodes in `FOR_EACH_WASM_OP`.
    pub total: usize,
    /// Largest opcode value.
    pub max_value: u8,
    /// Bytes in the validity bitset.
    pub bitset_bytes: usize,
}

/// A rendered header plus its summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Complete header text.
    pub text: String,
    /// Sizes of what was generated.
    pub summary: Summary,
}

/// Renders the complete header for `catalog`.
pub fn generate(catalog: &Catalog, config: &GenConfig) -> Result<Artifact, GenError> {
    let tables = MacroTables::build(catalog);
    let bitset = OpcodeBitset::encode(catalog.ops().iter().map(|op| op.value))
        .ok_or(GenError::EmptyCatalog)?;

    let mut out = String::new();
    if let Some(license) = catalog.license() {
        out.push_str(license);
        if !license.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "// DO NOT EDIT! - This file was generated by {} from {}",
        config.generator, config.source_name
    ));
    out.push_str(
        "\n\n#pragma once\n\n\
         #if ENABLE(WEBASSEMBLY)\n\n\
         #include <cstdint>\n\n\
         namespace JSC { namespace Wasm {\n\n",
    );
    out.push_str(&tables.render_defines());
    out.push_str(&tables.render_aggregate());
    out.push('\n');
    out.push_str(&emit::render_enums(&bitset.render_check()));
    out.push('\n');
    out.push_str(&emit::render_predicates());
    out.push_str("\n} } // namespace JSC::Wasm\n\n#endif // ENABLE(WEBASSEMBLY)\n\n");

    let summary = Summary {
        tables: TableId::ALL
            .into_iter()
            .map(|id| (id, tables.expand(id).len()))
            .collect(),
        enums: std::iter::once(&emit::OP_TYPE)
            .chain(&emit::SECONDARY_ENUMS)
            .map(|def| (def.name, def.members(&tables).len()))
            .collect(),
        total: tables.all().len(),
        max_value: bitset.max(),
        bitset_bytes: bitset.bytes().len(),
    };
    Ok(Artifact { text: out, summary })
}

/// Writes `contents` to `path` through a temporary file that is renamed into place.
///
/// A symlinked `path` is written through: the link's target is replaced and the link is kept.
/// The target keeps its permissions; a new file gets `0o644` (subject to the umask) on Unix.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), GenError> {
    let target = resolve_link(path)?;
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| GenError::io("create", dir, e))?;

    let existing = match fs::metadata(&target) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(GenError::io("stat", &target, e)),
    };
    let mut builder = tempfile::Builder::new();
    if existing.is_none() {
        set_new_file_permissions(&mut builder);
    }
    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| GenError::io("create temp in", dir, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| GenError::io("write", tmp.path(), e))?;
    if let Some(permissions) = existing {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| GenError::io("set permissions on", tmp.path(), e))?;
    }
    tmp.persist(&target)
        .map_err(|e| GenError::io("persist", &target, e.error))?;
    Ok(())
}

fn resolve_link(path: &Path) -> Result<PathBuf, GenError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).map_err(|e| GenError::io("resolve", path, e))
        }
        _ => Ok(path.to_path_buf()),
    }
}

#[cfg(unix)]
fn set_new_file_permissions(builder: &mut tempfile::Builder<'_, '_>) {
    use std::os::unix::fs::PermissionsExt as _;
    builder.permissions(fs::Permissions::from_mode(0o644));
}

#[cfg(not(unix))]
fn set_new_file_permissions(_builder: &mut tempfile::Builder<'_, '_>) {}

/// Loads `schema`, renders the header and writes it to `out`.
///
/// Every check runs before the output is touched; on error `out` is left as it was.
pub fn generate_file(schema: &Path, out: &Path) -> Result<Summary, GenError> {
    let catalog = Catalog::load(schema)?;
    tracing::debug!(opcodes = catalog.len(), schema = %schema.display(), "loaded catalog");

    let artifact = generate(&catalog, &GenConfig::for_schema(schema))?;
    write_atomic(out, &artifact.text)?;
    tracing::info!(
        path = %out.display(),
        opcodes = artifact.summary.total,
        max = artifact.summary.max_value,
        "wrote opcode header"
    );
    Ok(artifact.summary)
}

/// Returns `true` if `artifact` matches what `schema` renders to, ignoring line endings.
///
/// A missing artifact is reported as stale rather than as an error.
pub fn is_up_to_date(schema: &Path, artifact: &Path) -> Result<bool, GenError> {
    let catalog = Catalog::load(schema)?;
    let rendered = generate(&catalog, &GenConfig::for_schema(schema))?;
    let existing = match fs::read_to_string(artifact) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(GenError::io("read", artifact, e)),
    };
    Ok(normalize_newlines(&rendered.text) == normalize_newlines(&existing))
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}
