// ⚠️ Error taxonomy for the vocabulary store and its collaborators
// Every variant is recoverable: the menu reports it and returns to the loop.

/// Errors raised by store operations, persistence, and speech
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VocabError {
    /// A required text field was blank after trimming
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// Index does not address an existing entry
    #[error("entry index {index} is out of range (store has {len} entries)")]
    OutOfRange { index: usize, len: usize },

    /// Category label is not in the category set
    #[error("category '{0}' does not exist")]
    UnknownCategory(String),

    /// Category label is already present
    #[error("category '{0}' already exists")]
    AlreadyExists(String),

    /// Category label to remove is not present
    #[error("category '{0}' not found")]
    NotFound(String),

    /// Category is still referenced by `count` entries
    #[error("category '{label}' still has {count} entries; delete or move them first")]
    InUse { label: String, count: usize },

    /// Snapshot could not be loaded or saved
    #[error("persistence failed: {0}")]
    PersistenceFailed(String),

    /// Imported data is not a vocabulary snapshot
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// No speech backend is available
    #[error("text-to-speech is not available")]
    SpeechUnavailable,

    /// Speech backend ran but failed
    #[error("text-to-speech failed: {0}")]
    SpeechFailed(String),
}

pub type Result<T> = std::result::Result<T, VocabError>;
