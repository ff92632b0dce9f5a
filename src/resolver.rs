/*!
 * Logical root resolution and display labels
 */

use std::env;
use std::path::{Component, Path, PathBuf};

/// Deepest directory shared by every path in `paths`
///
/// Only the parent directory of each path takes part, so a single path
/// resolves to its own parent. An empty list resolves to the current
/// working directory.
pub fn common_ancestor<P: AsRef<Path>>(paths: &[P]) -> PathBuf {
    let mut parents = paths
        .iter()
        .map(|p| p.as_ref().parent().unwrap_or_else(|| p.as_ref()));

    let first = match parents.next() {
        Some(first) => first,
        None => return current_dir(),
    };

    let mut shared: Vec<Component> = first.components().collect();
    for parent in parents {
        let matching = shared
            .iter()
            .zip(parent.components())
            .take_while(|(a, b)| *a == b)
            .count();
        shared.truncate(matching);
        if shared.is_empty() {
            break;
        }
    }

    if shared.is_empty() {
        current_dir()
    } else {
        shared.iter().collect()
    }
}

/// Root used to compute labels: the scanned directory itself, or the
/// common ancestor of an explicit file list
pub fn resolve_root<P: AsRef<Path>>(folder: Option<&Path>, paths: &[P]) -> PathBuf {
    match folder {
        Some(folder) => folder.to_path_buf(),
        None => common_ancestor(paths),
    }
}

fn current_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Computes display labels for candidate paths
#[derive(Debug, Clone)]
pub struct Labeler {
    root: PathBuf,
    use_basename_only: bool,
}

impl Labeler {
    pub fn new(root: PathBuf, use_basename_only: bool) -> Self {
        Self {
            root,
            use_basename_only,
        }
    }

    /// Label for `path`: its file name, or its root-relative path with `/` separators
    pub fn label(&self, path: &Path) -> String {
        if self.use_basename_only {
            return match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => join_components(path),
            };
        }

        match path.strip_prefix(&self.root) {
            Ok(rel) if !rel.as_os_str().is_empty() => join_components(rel),
            _ => join_components(path),
        }
    }
}

/// Join path components with `/` whatever the platform separator is
fn join_components(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}
