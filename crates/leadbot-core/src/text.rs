// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text normalization shared by FAQ lookup and configuration validation.

/// Trims, lower-cases, and collapses internal whitespace runs to one space.
pub fn normalize_text(input: &str) -> String {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns true if `input` is already in [`normalize_text`] form.
pub fn is_normalized(input: &str) -> bool {
    normalize_text(input) == input
}
