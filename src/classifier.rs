/*!
 * Content classification: decide whether a candidate file is bundled
 *
 * Every candidate runs through [`PIPELINE`], an ordered list of checks
 * from cheapest to most expensive. The first check that fires decides the
 * skip reason and nothing after it runs. A file that passes every check is
 * read as UTF-8 text with CRLF line endings turned into LF.
 */

use std::fs::{self, File, Metadata};
use std::io::{self, Read};
use std::path::Path;

use once_cell::unsync::OnceCell;

use crate::assembler::normalize_line_endings;
use crate::types::{Outcome, SkipReason};
use crate::utils::{
    dotted_extension, BINARY_RATIO, BINARY_SNIFF_BYTES, IGNORED_EXTENSIONS, MAX_FILE_BYTES,
};

/// A path under classification, with its metadata looked up at most once
pub struct Candidate<'a> {
    path: &'a Path,
    metadata: OnceCell<Option<Metadata>>,
}

impl<'a> Candidate<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self {
            path,
            metadata: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.path
    }

    /// Metadata of the file, following symlinks; `None` when stat fails
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata
            .get_or_init(|| fs::metadata(self.path).ok())
            .as_ref()
    }
}

/// A check that skips the candidate with `reason` when `fires` returns true
pub type Check = (SkipReason, fn(&Candidate) -> bool);

/// Checks in evaluation order; the first one that fires wins
pub const PIPELINE: [Check; 5] = [
    (SkipReason::IgnoredExtension, has_ignored_extension),
    (SkipReason::ReadFailed, stat_fails),
    (SkipReason::NotAFile, is_not_regular_file),
    (SkipReason::TooLarge, exceeds_size_limit),
    (SkipReason::Binary, looks_binary),
];

/// First check in [`PIPELINE`] that rejects `candidate`
pub fn first_rejection(candidate: &Candidate) -> Option<SkipReason> {
    PIPELINE
        .iter()
        .find(|(_, fires)| fires(candidate))
        .map(|(reason, _)| *reason)
}

/// Classify one path and attach `label` to the outcome
pub fn classify(path: &Path, label: String) -> Outcome {
    let candidate = Candidate::new(path);

    if let Some(reason) = first_rejection(&candidate) {
        return Outcome::Skipped { label, reason };
    }

    match fs::read_to_string(path) {
        Ok(content) => Outcome::Included {
            label,
            content: normalize_line_endings(&content),
        },
        Err(e) => {
            log::debug!("Failed to read {}: {}", path.display(), e);
            Outcome::Skipped {
                label,
                reason: SkipReason::ReadFailed,
            }
        }
    }
}

/// Extension is on the denylist; needs no filesystem access
pub fn has_ignored_extension(candidate: &Candidate) -> bool {
    dotted_extension(candidate.path()).map_or(false, |ext| IGNORED_EXTENSIONS.contains(ext.as_str()))
}

fn stat_fails(candidate: &Candidate) -> bool {
    candidate.metadata().is_none()
}

fn is_not_regular_file(candidate: &Candidate) -> bool {
    candidate.metadata().map_or(true, |m| !m.is_file())
}

fn exceeds_size_limit(candidate: &Candidate) -> bool {
    candidate.metadata().map_or(false, |m| m.len() > MAX_FILE_BYTES)
}

fn looks_binary(candidate: &Candidate) -> bool {
    sniff_binary(candidate.path())
}

/// Read the head of a file and decide whether it is binary
///
/// Any failure to open or read counts as binary.
pub fn sniff_binary(path: &Path) -> bool {
    match read_head(path) {
        Ok(sample) => is_binary_sample(&sample),
        Err(e) => {
            log::debug!("Sniff failed for {}: {}", path.display(), e);
            true
        }
    }
}

fn read_head(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut sample = Vec::with_capacity(BINARY_SNIFF_BYTES as usize);
    file.take(BINARY_SNIFF_BYTES).read_to_end(&mut sample)?;
    Ok(sample)
}

/// Binary heuristic over a sample of leading bytes
///
/// A NUL byte anywhere is binary. Otherwise the sample is binary when more
/// than [`BINARY_RATIO`] of it are control bytes other than TAB, LF, VT, FF
/// and CR. An empty sample is text.
pub fn is_binary_sample(sample: &[u8]) -> bool {
    if sample.contains(&0) {
        return true;
    }
    if sample.is_empty() {
        return false;
    }

    let weird = sample
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32))
        .count();
    weird as f64 / sample.len() as f64 > BINARY_RATIO
}
