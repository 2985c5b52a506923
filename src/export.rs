// 📤 Export - render the whole store for sharing or printing

use crate::error::{Result, VocabError};
use crate::store::VocabStore;
use chrono::NaiveDate;
use clap::ValueEnum;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Snapshot JSON (re-importable)
    Json,
    /// Plain text
    Txt,
    /// Markdown
    Md,
    /// CSV, one row per entry
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Txt => "txt",
            ExportFormat::Md => "md",
            ExportFormat::Csv => "csv",
        }
    }
}

/// `code_vocab_<date>.<ext>`
pub fn default_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("code_vocab_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

pub fn render(store: &VocabStore, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => store.snapshot().to_json(),
        ExportFormat::Txt => Ok(render_text(store)),
        ExportFormat::Md => Ok(render_markdown(store)),
        ExportFormat::Csv => render_csv(store),
    }
}

fn render_text(store: &VocabStore) -> String {
    store
        .list_all()
        .iter()
        .map(|entry| {
            let mut block = format!(
                "{}\nCategory: {}\nExplanation: {}\n",
                entry.content, entry.category, entry.explanation
            );
            if !entry.example.is_empty() {
                let _ = writeln!(block, "Example:\n{}", entry.example);
            }
            if !entry.pronunciation.is_empty() {
                let _ = writeln!(block, "Pronunciation: {}", entry.pronunciation);
            }
            block.push_str(&"=".repeat(50));
            block.push('\n');
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_markdown(store: &VocabStore) -> String {
    let mut out = String::from("# Programming Vocabulary\n\n");
    for entry in store.list_all() {
        let _ = write!(
            out,
            "## {}\n\n**Category:** {}\n\n**Explanation:** {}\n\n",
            entry.content, entry.category, entry.explanation
        );
        if !entry.example.is_empty() {
            let _ = write!(out, "**Example:**\n```python\n{}\n```\n\n", entry.example);
        }
        if !entry.pronunciation.is_empty() {
            let _ = write!(out, "**Pronunciation:** {}\n\n", entry.pronunciation);
        }
        out.push_str("---\n\n");
    }
    out
}

fn render_csv(store: &VocabStore) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for entry in store.list_all() {
        writer
            .serialize(entry)
            .map_err(|e| VocabError::PersistenceFailed(format!("csv export failed: {}", e)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| VocabError::PersistenceFailed(format!("csv export failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| VocabError::PersistenceFailed(e.to_string()))
}
