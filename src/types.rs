/*!
 * Core types and data structures for filebundle
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Why a candidate file was left out of the bundle
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum SkipReason {
    /// Extension is on the known-binary/media denylist
    #[strum(serialize = "ignored extension")]
    #[serde(rename = "ignored extension")]
    IgnoredExtension,
    /// Metadata or content could not be read
    #[strum(serialize = "read failed")]
    #[serde(rename = "read failed")]
    ReadFailed,
    /// Entry exists but is not a regular file
    #[strum(serialize = "not a file")]
    #[serde(rename = "not a file")]
    NotAFile,
    /// File exceeds the size ceiling
    #[strum(serialize = "too large")]
    #[serde(rename = "too large")]
    TooLarge,
    /// Content sniffing classified the file as binary
    #[strum(serialize = "binary")]
    #[serde(rename = "binary")]
    Binary,
}

impl SkipReason {
    /// The wire string for this reason
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// The result of classifying one candidate path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// File content made it into the bundle
    Included {
        /// Display label
        label: String,
        /// Text content as read from disk
        content: String,
    },
    /// File was excluded
    Skipped {
        /// Display label
        label: String,
        /// Why it was excluded
        reason: SkipReason,
    },
}

impl Outcome {
    /// Label of the file this outcome belongs to
    pub fn label(&self) -> &str {
        match self {
            Outcome::Included { label, .. } | Outcome::Skipped { label, .. } => label,
        }
    }

    pub fn is_included(&self) -> bool {
        matches!(self, Outcome::Included { .. })
    }
}

/// Summary counts of a bundling request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleStats {
    pub included: usize,
    pub skipped: usize,
    pub total: usize,
}

/// A skipped entry as reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    /// Label of the skipped file
    pub path: String,
    pub reason: SkipReason,
}

/// Per-file outcome lists, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleFileLists {
    pub included: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

/// The complete output of one bundling request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleResult {
    /// Assembled document
    pub output: String,
    /// Summary counts
    pub stats: BundleStats,
    /// Included labels and skipped entries
    pub files: BundleFileLists,
}

impl BundleResult {
    /// One-line status summary, e.g. `Included: 2 | Skipped: 1 | Total: 3`
    pub fn status_line(&self) -> String {
        format!(
            "Included: {} | Skipped: {} | Total: {}",
            self.stats.included, self.stats.skipped, self.stats.total
        )
    }
}

/// What a path points at on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    File,
    Directory,
    /// Missing, unreadable, or some other kind of entry
    Neither,
}

/// Shared cancellation flag checked between files
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
}

impl Cancellation {
    /// Create a token that has not been cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; every clone observes it
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
