/*!
 * Utility functions and fixed tables for filebundle
 */

use std::collections::HashSet;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;

use crate::types::PathKind;

/// Largest file, in bytes, whose content may be bundled
pub const MAX_FILE_BYTES: u64 = 500_000;

/// Number of leading bytes inspected by the binary sniff
pub const BINARY_SNIFF_BYTES: u64 = 8_000;

/// Share of control bytes above which a sample counts as binary
pub const BINARY_RATIO: f64 = 0.2;

/// Separator placed between two file blocks
pub const SEPARATOR: &str = "\n\n--\n\n";

/// Directory names pruned from folder scans unless overridden
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    // Version Control
    ".git",
    // Dependencies
    "node_modules",
    // Build & Dist
    "dist",
    "build",
    "out",
    ".next",
    // Caches
    ".cache",
    "coverage",
];

/// Extensions (lowercase, with the leading dot) never read from disk
pub static IGNORED_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Images
        ".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg",
        // Documents
        ".pdf",
        // Archives
        ".zip", ".rar", ".7z", ".tar", ".gz",
        // Audio & Video
        ".mp3", ".wav", ".mp4", ".mov",
        // Fonts
        ".woff", ".woff2", ".ttf", ".otf",
        // Executables
        ".exe", ".dll", ".dmg", ".app",
    ]
    .into_iter()
    .collect()
});

/// Lowercased extension of `path` including the leading dot, if any
///
/// A leading dot alone does not make an extension, so `.bashrc` has none.
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Query what kind of entry `path` is, following symlinks
pub fn stat_path(path: &Path) -> PathKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => PathKind::File,
        Ok(meta) if meta.is_dir() => PathKind::Directory,
        _ => PathKind::Neither,
    }
}

/// Make `path` absolute against the current directory without touching symlinks
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

/// Sort by the raw bytes of each path so the order never depends on locale
/// or on how `Path` compares components
pub fn sort_paths(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.as_os_str().as_encoded_bytes().cmp(b.as_os_str().as_encoded_bytes()));
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
