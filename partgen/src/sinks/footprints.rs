//! Footprint-name manifest.
//!
//! Lists each distinct resolved footprint with the case codes and symbols
//! that use it, in first-seen order. A geometry-owning footprint writer keys
//! its output files on these names.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use super::{CatalogSink, SinkError};
use crate::assemble::PartRecord;
use crate::family::ComponentFamily;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintEntry {
    /// Full reference as written into symbols (`library:name`)
    pub footprint: String,
    pub library: String,
    pub name: String,
    pub family: ComponentFamily,
    pub case_code_in: String,
    pub case_code_mm: String,
    pub symbols: Vec<String>,
}

/// Group records by resolved footprint. Records without a footprint are
/// skipped.
pub fn manifest(records: &[&PartRecord]) -> Vec<FootprintEntry> {
    let mut entries: Vec<FootprintEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let footprint = record.attributes.footprint.as_str();
        if footprint.is_empty() {
            continue;
        }
        let position = *index.entry(footprint).or_insert_with(|| {
            let (library, name) = footprint.split_once(':').unwrap_or(("", footprint));
            entries.push(FootprintEntry {
                footprint: footprint.to_string(),
                library: library.to_string(),
                name: name.to_string(),
                family: record.family,
                case_code_in: record.attributes.case_code_in.clone(),
                case_code_mm: record.attributes.case_code_mm.clone(),
                symbols: Vec::new(),
            });
            entries.len() - 1
        });
        entries[position].symbols.push(record.symbol_name.clone());
    }
    entries
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FootprintManifestSink;

impl CatalogSink for FootprintManifestSink {
    fn extension(&self) -> &'static str {
        "footprints.json"
    }

    fn write(&self, records: &[&PartRecord], out: &mut dyn Write) -> Result<(), SinkError> {
        serde_json::to_writer_pretty(&mut *out, &manifest(records))?;
        out.write_all(b"\n")?;
        Ok(())
    }
}
