// Copyright 2026 the Wasm Ops Codegen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed validity bitset over opcode values.
//!
//! Byte `k` covers values `8k..8k + 8`; bit `j` of byte `k` is value `8k + j`. The set spans
//! `0..=max`, so it holds `(max + 1).div_ceil(8)` bytes.

/// Set of declared opcode values, packed one bit per value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpcodeBitset {
    bytes: Vec<u8>,
    max: u8,
}

impl OpcodeBitset {
    /// Encodes `values`. Returns `None` if there are no values.
    #[must_use]
    pub fn encode(values: impl IntoIterator<Item = u8>) -> Option<Self> {
        let values: Vec<u8> = values.into_iter().collect();
        let max = values.iter().copied().max()?;
        let mut bytes = vec![0_u8; (usize::from(max) + 1).div_ceil(8)];
        for v in values {
            let v = usize::from(v);
            bytes[v / 8] |= 1 << (v % 8);
        }
        Some(Self { bytes, max })
    }

    /// Largest value in the set.
    #[must_use]
    pub fn max(&self) -> u8 {
        self.max
    }

    /// Packed bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `true` iff `i` is a declared value. Out-of-range inputs, negative ones included, are
    /// never valid.
    #[must_use]
    pub fn contains(&self, i: i64) -> bool {
        if i < 0 || i > i64::from(self.max) {
            return false;
        }
        let i = i as usize;
        self.bytes[i / 8] & (1 << (i % 8)) != 0
    }

    /// Comma-separated hex byte list for a C array initializer (`0x1, 0x0, 0x80`).
    #[must_use]
    pub fn render_literal(&self) -> String {
        self.bytes
            .iter()
            .map(|b| format!("{b:#x}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Renders the `isValidOpType` template backed by this bitset.
    #[must_use]
    pub fn render_check(&self) -> String {
        format!(
            "template<typename Int>\n\
             inline bool isValidOpType(Int i)\n\
             {{\n    \
             // Bitset of valid ops.\n    \
             static const uint8_t valid[] = {{ {} }};\n    \
             return 0 <= i && i <= {} && (valid[i / 8] & (1 << (i % 8)));\n\
             }}\n",
            self.render_literal(),
            self.max
        )
    }
}
