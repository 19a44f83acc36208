//! Catalog tests over the built-in series data

use partgen::prelude::*;
use std::collections::HashSet;

fn builtin_outcome() -> CatalogOutcome {
    let registry = SeriesRegistry::with_builtin();
    let ids: [&str; 0] = [];
    PartgenCore::generate_catalog(&registry, &ids, GenerationOptions::default()).unwrap()
}

#[test]
fn test_builtin_catalog_builds_without_failures() {
    let outcome = builtin_outcome();
    for failure in &outcome.failures {
        eprintln!("{}", failure);
    }
    assert!(outcome.is_success());
    assert_eq!(
        outcome.catalog.sections().len(),
        SeriesRegistry::with_builtin().len()
    );
}

#[test]
fn test_known_part_numbers() {
    let outcome = builtin_outcome();
    let has = |id: &str| outcome.catalog.records().any(|r| r.identifier == id);

    for id in [
        "ERJ-3EKF1002V",
        "RC0402FR-074K7L",
        "XAL4020-222ME",
        "XAL4020-221ME",
        "ABM8-12.000MHZ-B2-T",
        "ABS07-32.768KHZ-T",
        "GCM155R71H221KA37D",
    ] {
        assert!(has(id), "missing {}", id);
    }
}

#[test]
fn test_sections_sorted_and_unique() {
    let outcome = builtin_outcome();
    for section in outcome.catalog.sections() {
        let records = &section.records;
        assert!(
            records.windows(2).all(|w| w[0].value <= w[1].value),
            "{} is not sorted by value",
            section.series
        );

        let mut ids: Vec<_> = records.iter().map(|r| r.identifier.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), records.len(), "{} has duplicate identifiers", section.series);
    }
}

#[test]
fn test_records_carry_series_metadata() {
    let outcome = builtin_outcome();
    let section = outcome.catalog.section("XAL4020").unwrap();

    let record = section.records.last().unwrap();
    assert_eq!(record.series, "XAL4020");
    assert_eq!(record.manufacturer, "Coilcraft");
    assert_eq!(record.family, ComponentFamily::Inductor);
    assert_eq!(record.reference, "L");
    assert_eq!(record.symbol_name, "L_XAL4020-222ME");
    assert_eq!(record.formatted_value, "2.2 µH");
    assert!(record.datasheet.ends_with("xal4000.pdf"));
}

#[test]
fn test_unified_group_is_sorted_by_value() {
    let outcome = builtin_outcome();
    let crystals = outcome.catalog.unified("crystals");

    assert_eq!(crystals.len(), 13);
    assert_eq!(crystals[0].identifier, "ABS07-32.768KHZ-T");
    assert!(crystals.windows(2).all(|w| w[0].value <= w[1].value));
}

fn assert_distinct<'a>(ids: impl Iterator<Item = &'a str>, context: &str) {
    let mut seen = HashSet::new();
    for id in ids {
        assert!(seen.insert(id), "{} repeats {}", context, id);
    }
}

#[test]
fn test_identifiers_unique_across_catalog() {
    let outcome = builtin_outcome();
    assert_distinct(outcome.catalog.records().map(|r| r.identifier.as_str()), "catalog");
    for group in outcome.catalog.groups() {
        assert_distinct(
            outcome.catalog.unified(group).into_iter().map(|r| r.identifier.as_str()),
            group,
        );
    }
}

#[test]
fn test_overlapping_selection_stays_unique() {
    let registry = SeriesRegistry::with_builtin();
    let mut ids = vec!["ABM8".to_string(), "erj-2rkf".to_string(), "abm8".to_string()];
    ids.extend(registry.select("resistors").unwrap().iter().map(|s| s.id.clone()));
    ids.extend(registry.select("crystal").unwrap().iter().map(|s| s.id.clone()));

    let outcome =
        PartgenCore::generate_catalog(&registry, &ids, GenerationOptions::default()).unwrap();
    assert!(outcome.is_success());

    let order: Vec<_> = outcome.catalog.sections().iter().map(|s| s.series.as_str()).collect();
    assert_eq!(&order[..2], &["ABM8", "ERJ-2RKF"]);
    assert_eq!(order.len(), registry.by_group("resistors").len() + 2);

    assert_distinct(outcome.catalog.records().map(|r| r.identifier.as_str()), "catalog");
    for group in ["resistors", "crystals"] {
        assert_distinct(
            outcome.catalog.unified(group).into_iter().map(|r| r.identifier.as_str()),
            group,
        );
    }
}
