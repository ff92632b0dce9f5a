/*!
 * Command-line interface for filebundle
 */

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use filebundle::clipboard::copy_to_clipboard;
use filebundle::config::{Args, Config};
use filebundle::{
    stat_path, BundleReport, BundleWriter, Bundler, Cancellation, OutputFormat, PathKind,
    ReportFormat, Reporter,
};

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "filebundle", &mut io::stdout());
        return Ok(());
    }

    // Create and validate configuration
    let config = Config::from_args(args);
    init_logging(&config);
    config.validate()?;

    // Ctrl+C stops the run between two files
    let cancellation = Cancellation::new();
    let handler_token = cancellation.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        log::warn!("Failed to install Ctrl+C handler: {}", e);
    }

    let progress = if config.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) ⏱️  {elapsed_precise}")
    {
        progress.set_style(style);
    }
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📦 Bundling");

    let bundler = Bundler::new(config.options.clone())
        .with_progress(Arc::new(progress.clone()))
        .with_cancellation(cancellation);

    let start_time = Instant::now();

    // One directory means a folder scan; anything else is an explicit file list
    let result = match config.paths.as_slice() {
        [single] if stat_path(single) == PathKind::Directory => bundler.bundle_folder(single),
        paths => bundler.bundle_files(paths),
    };

    let duration = start_time.elapsed();
    progress.finish_and_clear();
    let result = result?;

    let format = if config.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let writer = BundleWriter::new(config.output_file.clone(), format);
    writer.write(&result)?;

    if config.clip {
        match copy_to_clipboard(&result.output) {
            Ok(()) => log::info!("Copied bundle to clipboard"),
            Err(e) => eprintln!("Warning: Failed to copy to clipboard: {}", e),
        }
    }

    if config.report && !config.quiet {
        let destination = config
            .output_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".to_string());
        let report = BundleReport {
            destination,
            duration,
            result: &result,
        };
        Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let level = if config.quiet {
        log::LevelFilter::Off
    } else {
        match config.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", level);
}
