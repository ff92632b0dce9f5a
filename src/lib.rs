/*!
 * filebundle - Bundle the text contents of files into one document
 *
 * This library concatenates the text files under a directory, or an
 * explicit list of files, into a single labeled document for use as
 * context for Large Language Models. Binary, oversized and media files are
 * skipped, and every skip is reported with its reason.
 *
 * ```no_run
 * use filebundle::{bundle_folder, BundleOptions};
 *
 * let result = bundle_folder("/path/to/project", &BundleOptions::default())?;
 * println!("{}", result.output);
 * eprintln!("{}", result.status_line());
 * # Ok::<(), filebundle::BundleError>(())
 * ```
 */

use std::path::Path;

pub mod assembler;
pub mod bundler;
pub mod classifier;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod report;
pub mod resolver;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use bundler::Bundler;
pub use config::{BundleOptions, Config};
pub use error::{BundleError, Result};
pub use report::{BundleReport, ReportFormat, Reporter};
pub use types::{
    BundleFileLists, BundleResult, BundleStats, Cancellation, Outcome, PathKind, SkipReason,
    SkippedFile,
};
pub use utils::stat_path;
pub use writer::{BundleWriter, OutputFormat};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bundle every text file below the directory `root`
pub fn bundle_folder(root: impl AsRef<Path>, options: &BundleOptions) -> Result<BundleResult> {
    Bundler::new(options.clone()).bundle_folder(root.as_ref())
}

/// Bundle an explicit list of files, labeled relative to their common ancestor
pub fn bundle_files<P: AsRef<Path>>(paths: &[P], options: &BundleOptions) -> Result<BundleResult> {
    Bundler::new(options.clone()).bundle_files(paths)
}
