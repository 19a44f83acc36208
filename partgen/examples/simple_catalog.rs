//! Simple catalog example: build a few built-in series and write CSV files.
//! Run with: cargo run --example simple_catalog [out_dir] [SERIES...]

use partgen::prelude::*;
use std::path::PathBuf;

fn main() -> Result<(), PartgenError> {
    let mut args = std::env::args().skip(1);
    let out = PathBuf::from(args.next().unwrap_or_else(|| "catalog".to_string()));
    let mut ids: Vec<String> = args.collect();
    if ids.is_empty() {
        ids = vec!["ERJ-2RKF".to_string(), "GCM155R71H".to_string(), "XAL4020".to_string()];
    }

    let registry = SeriesRegistry::with_builtin();
    let outcome = PartgenCore::generate_catalog(&registry, &ids, GenerationOptions::default())?;

    for section in outcome.catalog.sections() {
        println!("{:<14} {:>5} parts", section.series, section.records.len());
        if let Some(first) = section.records.first() {
            println!("    first: {} ({})", first.identifier, first.formatted_value);
        }
    }

    if !outcome.failures.is_empty() {
        println!("\nFailed series:");
        for failure in &outcome.failures {
            println!("  - {}", failure);
        }
    }

    let written = PartgenCore::write(&outcome.catalog, OutputFormat::Csv, &out, Some("all"))?;
    println!("\nWrote {} files to {}", written.len(), out.display());

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
