/*!
 * Configuration handling for filebundle
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::ensure;
use crate::error::Result;
use crate::utils::DEFAULT_IGNORE_DIRS;

/// Command-line arguments for filebundle
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "filebundle",
    version = env!("CARGO_PKG_VERSION"),
    about = "Bundle the text contents of a directory or a list of files into one document",
    long_about = "Concatenates the text files under a directory (or an explicit list of files) into a single labeled document, skipping binaries, oversized files and known media extensions. Useful for pasting a project into an LLM."
)]
pub struct Args {
    /// A single directory to scan recursively, or one or more files
    #[clap(default_value = ".")]
    pub paths: Vec<String>,

    /// Write the bundle to this file instead of stdout
    #[clap(short, long)]
    pub output: Option<String>,

    /// Label each block with the bare file name instead of its relative path
    #[clap(short, long)]
    pub basename_only: bool,

    /// Comma-separated list of extra directory names to skip while scanning
    #[clap(long, value_delimiter = ',')]
    pub ignore_dirs: Vec<String>,

    /// Do not skip the built-in directory names (.git, node_modules, ...)
    #[clap(long)]
    pub no_default_ignores: bool,

    /// Follow symbolic links while scanning a directory
    #[clap(long)]
    pub follow_symlinks: bool,

    /// Number of threads used to classify files
    #[clap(long, default_value = "1")]
    pub threads: usize,

    /// Print the full result (output, stats and file lists) as JSON
    #[clap(long)]
    pub json: bool,

    /// Copy output to clipboard
    #[clap(long, help = "Copy the bundle text to the system clipboard")]
    pub clip: bool,

    /// Do not print the summary report
    #[clap(long)]
    pub no_report: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence logging and the progress bar
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Options that shape a single bundling request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundleOptions {
    /// Label blocks with bare file names rather than root-relative paths
    pub use_basename_only: bool,
    /// Directory names (or `*`/`?` globs) pruned during folder scans
    pub ignore_dirs: Vec<String>,
    /// Follow symbolic links during folder scans
    pub follow_symlinks: bool,
    /// Classification threads; 1 keeps processing strictly sequential
    pub threads: usize,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            use_basename_only: false,
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|d| d.to_string()).collect(),
            follow_symlinks: false,
            threads: 1,
        }
    }
}

impl BundleOptions {
    /// Default options with basename labels switched on or off
    pub fn with_basename_only(use_basename_only: bool) -> Self {
        Self {
            use_basename_only,
            ..Self::default()
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Paths given on the command line
    pub paths: Vec<PathBuf>,

    /// Output file path (stdout when absent)
    pub output_file: Option<PathBuf>,

    /// Engine options
    pub options: BundleOptions,

    /// Emit JSON instead of the bundle text
    pub json: bool,

    /// Copy output to clipboard
    pub clip: bool,

    /// Print the summary report
    pub report: bool,

    /// Log verbosity
    pub verbose: u8,

    /// Suppress logging and progress
    pub quiet: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let mut ignore_dirs: Vec<String> = if args.no_default_ignores {
            Vec::new()
        } else {
            DEFAULT_IGNORE_DIRS.iter().map(|d| d.to_string()).collect()
        };
        for dir in args.ignore_dirs {
            let dir = dir.trim().to_string();
            if !dir.is_empty() && !ignore_dirs.contains(&dir) {
                ignore_dirs.push(dir);
            }
        }

        Self {
            paths: args.paths.into_iter().map(PathBuf::from).collect(),
            output_file: args.output.map(PathBuf::from),
            options: BundleOptions {
                use_basename_only: args.basename_only,
                ignore_dirs,
                follow_symlinks: args.follow_symlinks,
                threads: args.threads,
            },
            json: args.json,
            clip: args.clip,
            report: !args.no_report,
            verbose: args.verbose,
            quiet: args.quiet,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.paths.is_empty(), InvalidArgument, "no paths given");
        ensure!(
            self.options.threads >= 1,
            InvalidArgument,
            "--threads must be at least 1, got {}",
            self.options.threads
        );

        // Check if output file directory exists
        if let Some(parent) = self.output_file.as_ref().and_then(|p| p.parent()) {
            ensure!(
                parent.as_os_str().is_empty() || parent.exists(),
                PathNotFound,
                "output directory {}",
                parent.display()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Config {
        Config::from_args(Args::parse_from(argv.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["filebundle"]);
        assert_eq!(config.paths, vec![PathBuf::from(".")]);
        assert_eq!(config.options, BundleOptions::default());
        assert!(config.output_file.is_none());
        assert!(config.report);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ignore_dir_flags() {
        let config = parse(&["filebundle", "--ignore-dirs", "target, vendor,.git"]);
        assert!(config.options.ignore_dirs.contains(&"target".to_string()));
        assert!(config.options.ignore_dirs.contains(&"vendor".to_string()));
        assert_eq!(
            config.options.ignore_dirs.iter().filter(|d| *d == ".git").count(),
            1
        );

        let config = parse(&["filebundle", "--no-default-ignores", "--ignore-dirs", "target"]);
        assert_eq!(config.options.ignore_dirs, vec!["target".to_string()]);
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        let config = parse(&["filebundle", "--threads", "0"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_output_dir() {
        let config = parse(&["filebundle", "-o", "/definitely/not/here/out.txt"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: BundleOptions = serde_json::from_str(r#"{"useBasenameOnly": true}"#).unwrap();
        assert!(options.use_basename_only);
        assert_eq!(options.threads, 1);
        assert!(options.ignore_dirs.contains(&"node_modules".to_string()));
    }
}
