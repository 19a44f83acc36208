//! Output Sinks
//!
//! Serialise a built catalog. The catalog builder never touches the
//! filesystem; the caller hands a catalog to exactly one sink at a time.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Catalog    │──┬──▶ TableSink             (.csv)
//! │              │  ├──▶ JsonSink              (.json)
//! │  per series  │  ├──▶ KicadSymbolSink       (.kicad_sym)
//! │  + unified   │  └──▶ FootprintManifestSink (.footprints.json)
//! └──────────────┘
//! ```
//!
//! Sinks only serialise fields the assembler already resolved.

pub mod footprints;
pub mod json;
pub mod sexp;
pub mod symbol;
pub mod table;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::assemble::PartRecord;
use crate::catalog::Catalog;

pub use footprints::{FootprintEntry, FootprintManifestSink};
pub use json::JsonSink;
pub use symbol::KicadSymbolSink;
pub use table::TableSink;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}

/// A writer for one output file format
pub trait CatalogSink: Send + Sync {
    /// File extension without the leading dot
    fn extension(&self) -> &'static str;

    /// Serialise `records` in order.
    fn write(&self, records: &[&PartRecord], out: &mut dyn Write) -> Result<(), SinkError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    KicadSym,
    Footprints,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Csv,
        OutputFormat::Json,
        OutputFormat::KicadSym,
        OutputFormat::Footprints,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::KicadSym => "kicad-sym",
            OutputFormat::Footprints => "footprints",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = SinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SinkError::UnknownFormat(s.to_string()))
    }
}

pub fn sink_for(format: OutputFormat) -> Box<dyn CatalogSink> {
    match format {
        OutputFormat::Csv => Box::new(TableSink),
        OutputFormat::Json => Box::new(JsonSink),
        OutputFormat::KicadSym => Box::new(KicadSymbolSink),
        OutputFormat::Footprints => Box::new(FootprintManifestSink),
    }
}

/// File-system safe form of a series or library name.
pub fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn write_file(
    sink: &dyn CatalogSink,
    path: &Path,
    records: &[&PartRecord],
) -> Result<(), SinkError> {
    let mut out = BufWriter::new(File::create(path)?);
    sink.write(records, &mut out)?;
    out.flush()?;
    tracing::debug!("Wrote {} records to {:?}", records.len(), path);
    Ok(())
}

/// Write one file per series into `out_dir` and, when `unified` is given,
/// one merged file per family group named `<unified>_<group>`. Series with
/// no records get no file. Returns the written paths in order.
pub fn write_catalog(
    catalog: &Catalog,
    sink: &dyn CatalogSink,
    out_dir: &Path,
    unified: Option<&str>,
) -> Result<Vec<PathBuf>, SinkError> {
    let mut written = Vec::new();

    for section in catalog.sections() {
        if section.records.is_empty() {
            continue;
        }
        let path = out_dir.join(format!("{}.{}", file_stem(&section.series), sink.extension()));
        let records: Vec<&PartRecord> = section.records.iter().collect();
        write_file(sink, &path, &records)?;
        written.push(path);
    }

    if let Some(name) = unified {
        for group in catalog.groups() {
            let records = catalog.unified(group);
            if records.is_empty() {
                continue;
            }
            let path = out_dir.join(format!("{}_{}.{}", file_stem(name), group, sink.extension()));
            write_file(sink, &path, &records)?;
            written.push(path);
        }
    }

    tracing::info!("Wrote {} {} files to {:?}", written.len(), sink.extension(), out_dir);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("kicad-sym".parse::<OutputFormat>().unwrap(), OutputFormat::KicadSym);
        assert!(matches!(
            "xlsx".parse::<OutputFormat>(),
            Err(SinkError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("CHV2010-JW-"), "CHV2010-JW-");
        assert_eq!(file_stem("a/b c"), "a_b_c");
    }

    #[test]
    fn test_extensions_are_distinct() {
        let mut exts: Vec<_> =
            OutputFormat::ALL.iter().map(|f| sink_for(*f).extension()).collect();
        exts.sort();
        exts.dedup();
        assert_eq!(exts.len(), OutputFormat::ALL.len());
    }
}
