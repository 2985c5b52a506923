// 🔊 Speech - optional text-to-speech capability
//
// The store never depends on speech. Callers ask `available()` first and
// show a notice instead of speaking when it is false.

use crate::entry::Entry;
use crate::error::{Result, VocabError};
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Default speaking rate in words per minute
pub const DEFAULT_RATE: u32 = 150;

/// Voice language for synthesizers that take one; entries are mostly Chinese
pub const SPEECH_LANGUAGE: &str = "zh";

/// Capability-checked speech collaborator
pub trait Speaker {
    fn available(&self) -> bool;

    /// Speak `text`, blocking until done
    fn speak(&self, text: &str) -> Result<()>;
}

// ============================================================================
// WHAT TO SAY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakMode {
    /// Only the term itself
    ContentOnly,
    /// Term followed by its explanation
    Full,
}

pub fn speech_text(entry: &Entry, mode: SpeakMode) -> String {
    match mode {
        SpeakMode::ContentOnly => entry.content.clone(),
        SpeakMode::Full => format!("{}。{}", entry.content, entry.explanation),
    }
}

// ============================================================================
// SYSTEM SPEAKER
// ============================================================================

/// Known command-line synthesizers, in preference order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechBackend {
    /// macOS `say`
    Say,
    EspeakNg,
    Espeak,
    /// speech-dispatcher client
    SpdSay,
}

impl SpeechBackend {
    pub const ALL: [SpeechBackend; 4] = [
        SpeechBackend::Say,
        SpeechBackend::EspeakNg,
        SpeechBackend::Espeak,
        SpeechBackend::SpdSay,
    ];

    pub fn program(&self) -> &'static str {
        match self {
            SpeechBackend::Say => "say",
            SpeechBackend::EspeakNg => "espeak-ng",
            SpeechBackend::Espeak => "espeak",
            SpeechBackend::SpdSay => "spd-say",
        }
    }

    /// Arguments for speaking `text` at `rate` words per minute
    ///
    /// The text always follows `--` so terms like `-=` or `--verbose` are
    /// never read as options.
    pub fn args(&self, text: &str, rate: u32) -> Vec<String> {
        let mut args: Vec<String> = match self {
            // say picks its voice from the system locale
            SpeechBackend::Say => vec!["-r".to_string(), rate.to_string()],
            SpeechBackend::EspeakNg | SpeechBackend::Espeak => vec![
                "-v".to_string(),
                SPEECH_LANGUAGE.to_string(),
                "-r".to_string(),
                rate.to_string(),
            ],
            // spd-say takes a relative rate; wait so the call blocks like the others
            SpeechBackend::SpdSay => vec![
                "--wait".to_string(),
                "-l".to_string(),
                SPEECH_LANGUAGE.to_string(),
            ],
        };
        args.push("--".to_string());
        args.push(text.to_string());
        args
    }
}

/// Speaks through the first synthesizer found on `PATH`
#[derive(Debug, Clone)]
pub struct SystemSpeaker {
    backend: Option<(SpeechBackend, PathBuf)>,
    rate: u32,
}

impl SystemSpeaker {
    /// Probe `PATH` for a supported synthesizer
    pub fn detect(rate: u32) -> Self {
        let path_var = env::var_os("PATH").unwrap_or_default();
        let dirs: Vec<PathBuf> = env::split_paths(&path_var).collect();
        Self::detect_in(&dirs, rate)
    }

    /// Probe the given directories instead of `PATH`
    pub fn detect_in(dirs: &[PathBuf], rate: u32) -> Self {
        let backend = SpeechBackend::ALL.iter().find_map(|backend| {
            dirs.iter()
                .map(|dir| dir.join(backend.program()))
                .find(|candidate| is_executable(candidate))
                .map(|path| (*backend, path))
        });

        match &backend {
            Some((b, path)) => info!("Speech backend {:?} at {:?}", b, path),
            None => debug!("No speech backend found"),
        }

        SystemSpeaker { backend, rate }
    }

    pub fn backend(&self) -> Option<SpeechBackend> {
        self.backend.as_ref().map(|(b, _)| *b)
    }
}

impl Speaker for SystemSpeaker {
    fn available(&self) -> bool {
        self.backend.is_some()
    }

    fn speak(&self, text: &str) -> Result<()> {
        let (backend, program) = self.backend.as_ref().ok_or(VocabError::SpeechUnavailable)?;

        debug!("Speaking {} chars via {:?}", text.chars().count(), backend);
        let status = Command::new(program)
            .args(backend.args(text, self.rate))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| VocabError::SpeechFailed(format!("failed to spawn {}: {}", backend.program(), e)))?;

        if status.success() {
            Ok(())
        } else {
            let code = status
                .code()
                .map(|value| value.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            Err(VocabError::SpeechFailed(format!(
                "{} exited with code {}",
                backend.program(),
                code
            )))
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

// ============================================================================
// SILENT SPEAKER
// ============================================================================

/// Never available; used with `--no-speech` and in tests
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn available(&self) -> bool {
        false
    }

    fn speak(&self, _text: &str) -> Result<()> {
        Err(VocabError::SpeechUnavailable)
    }
}
