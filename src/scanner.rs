/*!
 * Directory scanning: enumerate every candidate file below a root
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use glob_match::glob_match;
use walkdir::{DirEntry, WalkDir};

use crate::config::BundleOptions;
use crate::error::{BundleError, Result};
use crate::types::Cancellation;
use crate::utils::sort_paths;

/// Identity of an underlying file, used to avoid emitting it twice
#[cfg(unix)]
type FileId = (u64, u64);
#[cfg(not(unix))]
type FileId = PathBuf;

/// Recursive collector of candidate files
pub struct Scanner<'a> {
    /// Engine options
    options: &'a BundleOptions,
    /// Checked once per walked entry
    cancellation: Cancellation,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner
    pub fn new(options: &'a BundleOptions, cancellation: Cancellation) -> Self {
        Self {
            options,
            cancellation,
        }
    }

    /// Collect every regular file below `root`
    ///
    /// Directories named in the ignore set are pruned without descending.
    /// When following symlinks, a broken link is still returned so it can be
    /// reported, and a file reached through several paths is kept once under
    /// its bytewise-smallest path. The order of the returned paths is
    /// unspecified; callers sort them.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let follow = self.options.follow_symlinks;
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(follow)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_ignored_dir(e));

        for entry in walker {
            if self.cancellation.is_cancelled() {
                return Err(BundleError::Cancelled);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.loop_ancestor().is_some() => {
                    log::warn!("Skipping symlink loop at {}", e.path().unwrap_or(root).display());
                    continue;
                }
                Err(e) => match dangling_link(&e) {
                    Some(path) => {
                        log::warn!("Broken symlink {}", path.display());
                        files.push(path);
                        continue;
                    }
                    None => return Err(BundleError::Walk(e)),
                },
            };

            // Without follow_links a symlink reports its own type and is dropped here
            if !entry.file_type().is_file() {
                continue;
            }

            log::trace!("Collected {}", entry.path().display());
            files.push(entry.into_path());
        }

        if follow {
            dedup_by_file_id(&mut files);
        }

        log::debug!("Collected {} files under {}", files.len(), root.display());
        Ok(files)
    }

    /// Check if a walked entry is a directory that must not be descended
    pub fn is_ignored_dir(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        self.options.ignore_dirs.iter().any(|pattern| {
            if pattern.contains(['*', '?']) {
                glob_match(pattern, &name)
            } else {
                pattern == name.as_ref()
            }
        })
    }
}

/// Path of a followed symlink below the root whose target is missing
fn dangling_link(err: &walkdir::Error) -> Option<PathBuf> {
    let path = err.path()?;
    if err.depth() == 0 {
        return None;
    }

    let is_link = fs::symlink_metadata(path).map_or(false, |m| m.file_type().is_symlink());
    (is_link && fs::metadata(path).is_err()).then(|| path.to_path_buf())
}

/// Keep the first path, in byte order, for every underlying file
fn dedup_by_file_id(files: &mut Vec<PathBuf>) {
    let mut seen: HashSet<FileId> = HashSet::new();
    sort_paths(files);
    files.retain(|path| match file_id(path) {
        Some(id) if !seen.insert(id) => {
            log::debug!("Already collected {}, skipping", path.display());
            false
        }
        _ => true,
    });
}

#[cfg(unix)]
fn file_id(path: &Path) -> Option<FileId> {
    use std::os::unix::fs::MetadataExt;

    fs::metadata(path).ok().map(|m| (m.dev(), m.ino()))
}

#[cfg(not(unix))]
fn file_id(path: &Path) -> Option<FileId> {
    fs::canonicalize(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut file = File::create(path).unwrap();
        writeln!(file, "content").unwrap();
    }

    fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<String> {
        let mut names: Vec<String> = files
            .into_iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_collect_prunes_ignored_dirs() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("a.txt"));
        touch(&root.join("src/lib.rs"));
        touch(&root.join(".git/config"));
        touch(&root.join("node_modules/pkg/index.js"));
        touch(&root.join("src/build/generated.rs"));
        touch(&root.join("logo.png"));

        let options = BundleOptions::default();
        let files = Scanner::new(&options, Cancellation::new()).collect(root).unwrap();

        assert_eq!(relative(root, files), vec!["a.txt", "logo.png", "src/lib.rs"]);
    }

    #[test]
    fn test_ignored_name_only_prunes_directories() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("build"));
        touch(&root.join("out/x.txt"));

        let options = BundleOptions::default();
        let files = Scanner::new(&options, Cancellation::new()).collect(root).unwrap();

        assert_eq!(relative(root, files), vec!["build"]);
    }

    #[test]
    fn test_root_named_like_ignored_dir_is_scanned() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().join("build");
        touch(&root.join("main.c"));

        let options = BundleOptions::default();
        let files = Scanner::new(&options, Cancellation::new()).collect(&root).unwrap();

        assert_eq!(relative(&root, files), vec!["main.c"]);
    }

    #[test]
    fn test_glob_ignore_dirs() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("pkg.egg-info/PKG-INFO"));
        touch(&root.join("keep/file.txt"));

        let options = BundleOptions {
            ignore_dirs: vec!["*.egg-info".to_string()],
            ..BundleOptions::default()
        };
        let files = Scanner::new(&options, Cancellation::new()).collect(root).unwrap();

        assert_eq!(relative(root, files), vec!["keep/file.txt"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let options = BundleOptions::default();
        let result = Scanner::new(&options, Cancellation::new()).collect(&temp_dir.path().join("nope"));

        assert!(matches!(result, Err(BundleError::Walk(_))));
    }

    #[test]
    fn test_cancelled_scan() {
        let temp_dir = tempdir().unwrap();
        touch(&temp_dir.path().join("a.txt"));

        let options = BundleOptions::default();
        let cancellation = Cancellation::new();
        cancellation.cancel();
        let result = Scanner::new(&options, cancellation).collect(temp_dir.path());

        assert!(matches!(result, Err(BundleError::Cancelled)));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_not_followed_by_default() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("real/file.txt"));
        std::os::unix::fs::symlink(root.join("real"), root.join("linked_dir")).unwrap();
        std::os::unix::fs::symlink(root.join("real/file.txt"), root.join("linked.txt")).unwrap();

        let options = BundleOptions::default();
        let files = Scanner::new(&options, Cancellation::new()).collect(root).unwrap();

        assert_eq!(relative(root, files), vec!["real/file.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_followed_symlinks_survive_cycles_and_dedup() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("real/file.txt"));
        // real/loop -> root creates a directory cycle
        std::os::unix::fs::symlink(root, root.join("real/loop")).unwrap();
        std::os::unix::fs::symlink(root.join("real/file.txt"), root.join("alias.txt")).unwrap();

        let options = BundleOptions {
            follow_symlinks: true,
            ..BundleOptions::default()
        };
        let files = Scanner::new(&options, Cancellation::new()).collect(root).unwrap();

        // Same inode reached three ways is emitted once
        assert_eq!(files.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_followed_dangling_symlink_is_collected() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("a.txt"));
        std::os::unix::fs::symlink(root.join("gone.txt"), root.join("dangling.txt")).unwrap();

        let options = BundleOptions {
            follow_symlinks: true,
            ..BundleOptions::default()
        };
        let files = Scanner::new(&options, Cancellation::new()).collect(root).unwrap();

        assert_eq!(relative(root, files), vec!["a.txt", "dangling.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dedup_keeps_smallest_alias() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("zz/real.txt"));
        for i in (0..20).rev() {
            std::os::unix::fs::symlink(
                root.join("zz/real.txt"),
                root.join(format!("alias{:02}.txt", i)),
            )
            .unwrap();
        }

        let options = BundleOptions {
            follow_symlinks: true,
            ..BundleOptions::default()
        };
        let files = Scanner::new(&options, Cancellation::new()).collect(root).unwrap();

        assert_eq!(relative(root, files), vec!["alias00.txt"]);
    }
}
