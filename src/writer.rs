/*!
 * Output writer for bundle results
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::Result;
use crate::types::BundleResult;

/// What part of a result gets written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The assembled document only
    Text,
    /// The whole result (output, stats, file lists) as pretty JSON
    Json,
}

/// Writes a bundle result to a file or to stdout
pub struct BundleWriter {
    /// Destination file; stdout when `None`
    output_file: Option<PathBuf>,
    format: OutputFormat,
}

impl BundleWriter {
    /// Create a new writer
    pub fn new(output_file: Option<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_file,
            format,
        }
    }

    /// Write `result` to the configured destination
    pub fn write(&self, result: &BundleResult) -> Result<()> {
        match &self.output_file {
            Some(path) => {
                let file = File::create(path)?;
                let mut writer = BufWriter::new(file);
                self.write_to(result, &mut writer)?;
                writer.flush()?;
            }
            None => {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                self.write_to(result, &mut writer)?;
                // Keep the shell prompt off the last line of the bundle
                writeln!(writer)?;
                writer.flush()?;
            }
        }

        Ok(())
    }

    /// Write `result` to any writer
    pub fn write_to<W: Write>(&self, result: &BundleResult, writer: &mut W) -> Result<()> {
        match self.format {
            OutputFormat::Text => writer.write_all(result.output.as_bytes())?,
            OutputFormat::Json => serde_json::to_writer_pretty(&mut *writer, result)?,
        }
        Ok(())
    }
}
