/*!
 * Bundling requests: collect, resolve the root, classify, assemble
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::assembler::assemble;
use crate::classifier::classify;
use crate::config::BundleOptions;
use crate::error::{BundleError, Result};
use crate::resolver::{resolve_root, Labeler};
use crate::scanner::Scanner;
use crate::types::{BundleResult, Cancellation, Outcome};
use crate::utils::{absolutize, sort_paths};

/// Runs bundling requests with one set of options
///
/// A `Bundler` holds no per-request state, so the same instance can serve
/// any number of requests, including concurrent ones.
pub struct Bundler {
    /// Engine options
    options: BundleOptions,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
    /// Cancellation flag checked between files
    cancellation: Cancellation,
}

impl Bundler {
    /// Create a new bundler with a hidden progress bar
    pub fn new(options: BundleOptions) -> Self {
        Self {
            options,
            progress: Arc::new(ProgressBar::hidden()),
            cancellation: Cancellation::new(),
        }
    }

    /// Report per-file progress on `progress`
    pub fn with_progress(mut self, progress: Arc<ProgressBar>) -> Self {
        self.progress = progress;
        self
    }

    /// Abort requests once `cancellation` is triggered
    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Bundle every file below `root`
    ///
    /// Labels are relative to `root`. Fails if `root` is missing, is not a
    /// directory, or any directory below it cannot be listed.
    pub fn bundle_folder(&self, root: &Path) -> Result<BundleResult> {
        let root = absolutize(root)?;
        if !fs::metadata(&root)?.is_dir() {
            return Err(BundleError::NotADirectory(root.display().to_string()));
        }

        self.progress
            .set_message(format!("Scanning directory: {}", root.display()));
        let files = Scanner::new(&self.options, self.cancellation.clone()).collect(&root)?;

        let root = resolve_root(Some(root.as_path()), &files);
        self.bundle(files, root)
    }

    /// Bundle an explicit list of files
    ///
    /// Labels are relative to the deepest directory shared by all paths.
    /// Duplicates are processed once per occurrence.
    pub fn bundle_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<BundleResult> {
        let files = paths
            .iter()
            .map(|p| absolutize(p.as_ref()))
            .collect::<std::io::Result<Vec<PathBuf>>>()?;

        let root = resolve_root(None, &files);
        self.bundle(files, root)
    }

    fn bundle(&self, mut files: Vec<PathBuf>, root: PathBuf) -> Result<BundleResult> {
        if self.cancellation.is_cancelled() {
            return Err(BundleError::Cancelled);
        }
        sort_paths(&mut files);

        log::info!(
            "Bundling {} candidates relative to {}",
            files.len(),
            root.display()
        );
        self.progress.set_length(files.len() as u64);

        let labeler = Labeler::new(root, self.options.use_basename_only);
        let outcomes = if self.options.threads > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.options.threads)
                .build()?;
            pool.install(|| {
                files
                    .par_iter()
                    .map(|path| self.process_file(path, &labeler))
                    .collect::<Result<Vec<Outcome>>>()
            })?
        } else {
            files
                .iter()
                .map(|path| self.process_file(path, &labeler))
                .collect::<Result<Vec<Outcome>>>()?
        };

        let result = assemble(outcomes);
        log::info!("{}", result.status_line());
        Ok(result)
    }

    /// Classify a single path, honouring cancellation
    fn process_file(&self, path: &Path, labeler: &Labeler) -> Result<Outcome> {
        if self.cancellation.is_cancelled() {
            return Err(BundleError::Cancelled);
        }

        let label = labeler.label(path);
        self.progress.set_message(format!("Current file: {}", label));

        let outcome = classify(path, label);
        match &outcome {
            Outcome::Skipped { reason, .. } => log::debug!("Skipped {} ({})", outcome.label(), reason),
            Outcome::Included { .. } => log::trace!("Included {}", outcome.label()),
        }

        self.progress.inc(1);
        Ok(outcome)
    }
}
