//! JSON output: one array of records per file.

use std::io::Write;

use super::{CatalogSink, SinkError};
use crate::assemble::PartRecord;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSink;

impl CatalogSink for JsonSink {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, records: &[&PartRecord], out: &mut dyn Write) -> Result<(), SinkError> {
        serde_json::to_writer_pretty(&mut *out, records)?;
        out.write_all(b"\n")?;
        Ok(())
    }
}
