// Copyright 2026 the Wasm Ops Codegen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Schema opcode names to C++ identifiers.

/// Converts a schema opcode name (`i32.trunc_s/f32`) to a CamelCase identifier (`I32TruncSF32`).
///
/// Any character outside `[a-z0-9]` is dropped together with the character after it, which is
/// emitted upper-cased. A separator in the last position has no follower and is kept as is.
#[must_use]
pub fn cpp_identifier(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let plain = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        if !plain && i + 1 < chars.len() {
            out.extend(chars[i + 1].to_uppercase());
            i += 2;
        } else {
            out.push(ch);
            i += 1;
        }
    }

    let mut rest = out.chars();
    match rest.next() {
        Some(first) => first.to_uppercase().chain(rest).collect(),
        None => out,
    }
}

/// Returns `true` if `ident` is usable as a C++ identifier (`[A-Za-z_][A-Za-z0-9_]*`).
#[must_use]
pub fn is_valid_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_ascii_alphabetic())
        && chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
}
