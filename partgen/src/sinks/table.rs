//! Tabular (CSV) output.
//!
//! Each family group has a fixed header set; every header maps to an
//! accessor over [`PartRecord`]. Missing optional fields are written as
//! empty strings.

use std::io::Write;

use super::{CatalogSink, SinkError};
use crate::assemble::PartRecord;
use crate::family::ComponentFamily;
use crate::values::format_number;

pub type Accessor = fn(&PartRecord) -> String;

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn amps(record: &PartRecord) -> String {
    record
        .attributes
        .current_rating
        .map(|a| format_number(a, 6))
        .unwrap_or_default()
}

fn milliohms(record: &PartRecord) -> String {
    record
        .attributes
        .dc_resistance
        .map(|r| format_number(r * 1000.0, 6))
        .unwrap_or_default()
}

const SYMBOL_NAME: (&str, Accessor) = ("Symbol Name", |r| r.symbol_name.clone());
const REFERENCE: (&str, Accessor) = ("Reference", |r| r.reference.clone());
const VALUE: (&str, Accessor) = ("Value", |r| r.formatted_value.clone());
const FOOTPRINT: (&str, Accessor) = ("Footprint", |r| r.attributes.footprint.clone());
const DATASHEET: (&str, Accessor) = ("Datasheet", |r| r.datasheet.clone());
const DESCRIPTION: (&str, Accessor) = ("Description", |r| r.description.clone());
const MANUFACTURER: (&str, Accessor) = ("Manufacturer", |r| r.manufacturer.clone());
const MPN: (&str, Accessor) = ("MPN", |r| r.identifier.clone());
const TOLERANCE: (&str, Accessor) = ("Tolerance", |r| r.tolerance.clone());
const VOLTAGE: (&str, Accessor) = ("Voltage Rating", |r| r.attributes.voltage_rating.clone());
const CASE_IN: (&str, Accessor) = ("Case Code - in", |r| r.attributes.case_code_in.clone());
const CASE_MM: (&str, Accessor) = ("Case Code - mm", |r| r.attributes.case_code_mm.clone());
const SERIES: (&str, Accessor) = ("Series", |r| r.series.clone());
const SEARCH: (&str, Accessor) = ("Trustedparts Search", |r| r.search_url.clone());
const MODEL: (&str, Accessor) = ("3dviewer Link", |r| opt(&r.attributes.model));
const TYPE: (&str, Accessor) = ("Component Type", |r| r.family.label().to_string());

const RESISTOR_COLUMNS: &[(&str, Accessor)] = &[
    SYMBOL_NAME,
    REFERENCE,
    VALUE,
    FOOTPRINT,
    DATASHEET,
    DESCRIPTION,
    MANUFACTURER,
    MPN,
    TOLERANCE,
    ("Temperature Coefficient", |r| opt(&r.temperature_coefficient)),
    ("Power Rating", |r| opt(&r.power_rating)),
    VOLTAGE,
    CASE_IN,
    CASE_MM,
    SERIES,
    SEARCH,
    MODEL,
    TYPE,
];

const CAPACITOR_COLUMNS: &[(&str, Accessor)] = &[
    SYMBOL_NAME,
    REFERENCE,
    VALUE,
    FOOTPRINT,
    DATASHEET,
    DESCRIPTION,
    MANUFACTURER,
    MPN,
    ("Dielectric", |r| r.subtype.clone()),
    TOLERANCE,
    VOLTAGE,
    CASE_IN,
    CASE_MM,
    SERIES,
    SEARCH,
    MODEL,
    TYPE,
];

const INDUCTOR_COLUMNS: &[(&str, Accessor)] = &[
    SYMBOL_NAME,
    REFERENCE,
    VALUE,
    FOOTPRINT,
    DATASHEET,
    DESCRIPTION,
    MANUFACTURER,
    MPN,
    TOLERANCE,
    SERIES,
    SEARCH,
    ("Maximum DC Current (A)", amps),
    ("Maximum DC Resistance (mΩ)", milliohms),
    MODEL,
    TYPE,
];

const CRYSTAL_COLUMNS: &[(&str, Accessor)] = &[
    SYMBOL_NAME,
    REFERENCE,
    VALUE,
    FOOTPRINT,
    DATASHEET,
    DESCRIPTION,
    MANUFACTURER,
    MPN,
    TOLERANCE,
    CASE_MM,
    SERIES,
    SEARCH,
    MODEL,
    TYPE,
];

/// Header to accessor mapping for a family's table.
pub fn columns(family: ComponentFamily) -> &'static [(&'static str, Accessor)] {
    use ComponentFamily::*;
    match family {
        Resistor | Thermistor => RESISTOR_COLUMNS,
        Capacitor | Supercapacitor => CAPACITOR_COLUMNS,
        Inductor | FerriteBead | CoupledInductor => INDUCTOR_COLUMNS,
        Crystal => CRYSTAL_COLUMNS,
    }
}

/// CSV writer
#[derive(Debug, Clone, Copy, Default)]
pub struct TableSink;

impl CatalogSink for TableSink {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write(&self, records: &[&PartRecord], out: &mut dyn Write) -> Result<(), SinkError> {
        let Some(first) = records.first() else {
            return Ok(());
        };
        let columns = columns(first.family);

        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(columns.iter().map(|(header, _)| *header))?;
        for record in records {
            writer.write_record(columns.iter().map(|(_, get)| get(record)))?;
        }
        writer.flush()?;
        Ok(())
    }
}
