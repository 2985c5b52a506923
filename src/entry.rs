// 📝 Vocabulary Entry - one recorded term
// Entries have no identity beyond their position in the store.

use serde::{Deserialize, Serialize};

// ============================================================================
// ENTRY
// ============================================================================

/// One vocabulary record
///
/// Two entries may be fully identical; the store addresses them by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Term or construct name (e.g., "for loop")
    pub content: String,

    /// Category label, always a member of the store's category set
    pub category: String,

    /// Free-text explanation
    #[serde(default)]
    pub explanation: String,

    /// Example, often multi-line code
    #[serde(default)]
    pub example: String,

    /// Optional pronunciation hint
    #[serde(default)]
    pub pronunciation: String,
}

impl Entry {
    pub fn new(
        content: impl Into<String>,
        category: impl Into<String>,
        explanation: impl Into<String>,
        example: impl Into<String>,
        pronunciation: impl Into<String>,
    ) -> Self {
        Entry {
            content: content.into(),
            category: category.into(),
            explanation: explanation.into(),
            example: example.into(),
            pronunciation: pronunciation.into(),
        }
    }

    /// Case-insensitive substring match against content or explanation
    ///
    /// `needle` must already be lowercased.
    pub fn matches_keyword(&self, needle: &str) -> bool {
        self.content.to_lowercase().contains(needle)
            || self.explanation.to_lowercase().contains(needle)
    }
}

// ============================================================================
// ENTRY UPDATE
// ============================================================================

/// Per-field replacement values for an edit
///
/// A field that is `None` or blank after trimming keeps the current value.
/// Blank is deliberately treated the same as "no change".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUpdate {
    pub content: Option<String>,
    pub category: Option<String>,
    pub explanation: Option<String>,
    pub example: Option<String>,
    pub pronunciation: Option<String>,
}

impl EntryUpdate {
    pub fn content(mut self, value: impl Into<String>) -> Self {
        self.content = Some(value.into());
        self
    }

    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    pub fn explanation(mut self, value: impl Into<String>) -> Self {
        self.explanation = Some(value.into());
        self
    }

    pub fn example(mut self, value: impl Into<String>) -> Self {
        self.example = Some(value.into());
        self
    }

    pub fn pronunciation(mut self, value: impl Into<String>) -> Self {
        self.pronunciation = Some(value.into());
        self
    }

    /// Trimmed, non-blank category replacement, if any
    pub fn new_category(&self) -> Option<&str> {
        non_blank(&self.category)
    }

    /// Apply every non-blank field to `entry`
    pub(crate) fn apply_to(&self, entry: &mut Entry) {
        if let Some(value) = non_blank(&self.content) {
            entry.content = value.to_string();
        }
        if let Some(value) = non_blank(&self.category) {
            entry.category = value.to_string();
        }
        if let Some(value) = non_blank(&self.explanation) {
            entry.explanation = value.to_string();
        }
        if let Some(value) = non_blank(&self.example) {
            entry.example = value.to_string();
        }
        if let Some(value) = non_blank(&self.pronunciation) {
            entry.pronunciation = value.to_string();
        }
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
