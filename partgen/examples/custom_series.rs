//! Example: describe a series in JSON and build it without the registry.
//! Run with: cargo run --example custom_series

use partgen::catalog::build_series;
use partgen::sinks::{KicadSymbolSink, TableSink};
use partgen::{parse_series, CatalogSink, PartRecord};

const SERIES: &str = r#"{
    "id": "RC0402JR-07",
    "family": "resistor",
    "manufacturer": "Yageo",
    "prefix": "RC0402JR-07",
    "domain": {"kind": "standard", "series": "E24", "min": "10", "max": "100"},
    "subtypes": [{"name": "E24", "tolerances": [{"text": "5%"}]}],
    "packaging": {"suffix": "L"},
    "defaults": {
        "footprint": "resistor_footprints:R_0402_1005Metric",
        "case_code_in": "0402",
        "case_code_mm": "1005",
        "voltage_rating": "50V",
        "power_rating": "0.063W"
    },
    "datasheet": {"kind": "identifier", "base": "https://www.yageo.com/en/ProductSearch/PartNumberSearch?part_number="}
}"#;

fn main() -> Result<(), partgen::PartgenError> {
    let specs = parse_series(SERIES)?;

    for spec in &specs {
        let section = build_series(spec)?;
        println!("{} ({} parts)", section.series, section.records.len());
        for record in &section.records {
            println!("  {:<20} {}", record.identifier, record.formatted_value);
        }

        let records: Vec<&PartRecord> = section.records.iter().collect();
        let mut csv = Vec::new();
        TableSink.write(&records, &mut csv)?;
        println!("\n{}", String::from_utf8_lossy(&csv));

        let mut symbols = Vec::new();
        KicadSymbolSink.write(&records, &mut symbols)?;
        println!("symbol library: {} bytes", symbols.len());
    }
    Ok(())
}
