// SPDX-FileCopyrightText: 2026 Leadbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static keyword-to-answer FAQ table with lenient matching.

use leadbot_config::model::FaqEntryConfig;
use leadbot_core::normalize_text;

/// One keyword and its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub keyword: String,
    pub answer: String,
}

/// Ordered FAQ table, read-only after construction.
///
/// Entry order is the tie-break when several keywords occur in a question.
#[derive(Debug, Clone, Default)]
pub struct FaqTable {
    entries: Vec<FaqEntry>,
}

impl FaqTable {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    pub fn from_config(entries: &[FaqEntryConfig]) -> Self {
        Self::new(
            entries
                .iter()
                .map(|e| FaqEntry {
                    keyword: e.keyword.clone(),
                    answer: e.answer.clone(),
                })
                .collect(),
        )
    }

    /// Finds the answer for a free-form question.
    ///
    /// The input is normalized, then the first entry whose keyword occurs in
    /// it wins; failing that, an entry whose keyword equals the whole input.
    /// Blank input never matches.
    pub fn lookup(&self, question: &str) -> Option<&str> {
        let key = normalize_text(question);
        if key.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|e| !e.keyword.is_empty() && key.contains(e.keyword.as_str()))
            .or_else(|| self.entries.iter().find(|e| e.keyword == key))
            .map(|e| e.answer.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
