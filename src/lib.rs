// Code Vocab - Core Library
// Exposes the vocabulary store and its collaborators for the CLI, TUI and tests

pub mod entry;
pub mod error;
pub mod store;       // Vocabulary store + category rules
pub mod persistence; // Snapshot load/save
pub mod library;     // Store bound to persistence
pub mod speech;      // Optional text-to-speech
pub mod export;      // JSON / text / Markdown / CSV export
pub mod sample;      // Sample vocabulary
pub mod config;      // CLI flags
pub mod menu;        // Text menu loop

// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use entry::{Entry, EntryUpdate};
pub use error::{Result, VocabError};
pub use store::{VocabStore, DEFAULT_CATEGORIES};
pub use persistence::{JsonFileStore, MemorySnapshotStore, Snapshot, SnapshotStore};
pub use library::{Library, Opened, Persisted};
pub use speech::{speech_text, SilentSpeaker, SpeakMode, Speaker, SpeechBackend, SystemSpeaker};
pub use export::{default_file_name, render as render_export, ExportFormat};
pub use sample::{sample_entries, sample_snapshot};
pub use config::{Cli, Command};
pub use menu::Menu;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
