//! Catalog Builder
//!
//! Turns series specifications into part records:
//!
//! ```text
//!   validate ─▶ enumerate (per sub-type) ─▶ tolerance × packaging fan-out
//!                                               │
//!                                               ▼
//!   sort by value ◀─ dedupe by identifier ◀─ encode ─▶ assemble
//! ```
//!
//! Each series is built in isolation. A data error fails that series only;
//! the remaining series are still built and the failure is reported with
//! the series, the stage and the offending value. Series are concatenated in
//! caller order whether or not they were built in parallel.

use std::collections::HashMap;
use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::assemble::{assemble, PartRecord, Variant};
use crate::encoding::{EncodeContext, EncodingScheme};
use crate::family::ComponentFamily;
use crate::resolve::packaging_for;
use crate::series::{validate_spec, SeriesSpec, SubType, ValueDomain};
use crate::values::{enumerate, enumerate_explicit, ValueRange};

/// Pipeline stage a series failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Validate,
    Enumerate,
    Encode,
    Assemble,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Validate => "validate",
            Stage::Enumerate => "enumerate",
            Stage::Encode => "encode",
            Stage::Assemble => "assemble",
        })
    }
}

/// Why one series produced no records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesFailure {
    pub series: String,
    pub stage: Stage,
    pub value: Option<f64>,
    pub message: String,
}

impl fmt::Display for SeriesFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "series '{}' failed at {}", self.series, self.stage)?;
        if let Some(value) = self.value {
            write!(f, " (value {})", value)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for SeriesFailure {}

/// Records of one series, sorted by value
#[derive(Debug, Clone, Serialize)]
pub struct SeriesCatalog {
    pub series: String,
    pub family: ComponentFamily,
    pub records: Vec<PartRecord>,
}

/// Generated records, grouped by series in caller order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    sections: Vec<SeriesCatalog>,
}

impl Catalog {
    pub fn sections(&self) -> &[SeriesCatalog] {
        &self.sections
    }

    pub fn section(&self, series: &str) -> Option<&SeriesCatalog> {
        self.sections
            .iter()
            .find(|s| s.series.eq_ignore_ascii_case(series))
    }

    /// Every record, series by series
    pub fn records(&self) -> impl Iterator<Item = &PartRecord> {
        self.sections.iter().flat_map(|s| s.records.iter())
    }

    /// Records of every series in a family group ("resistors", ...) merged
    /// into one list, sorted by value. Equal values keep series order.
    pub fn unified(&self, group: &str) -> Vec<&PartRecord> {
        let mut records: Vec<&PartRecord> = self
            .sections
            .iter()
            .filter(|s| s.family.group() == group)
            .flat_map(|s| s.records.iter())
            .collect();
        records.sort_by(|a, b| a.value.total_cmp(&b.value));
        records
    }

    /// Family groups present, in first-seen order
    pub fn groups(&self) -> Vec<&'static str> {
        let mut groups = Vec::new();
        for section in &self.sections {
            let group = section.family.group();
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Catalog plus the series that could not be built
#[derive(Debug, Clone, Default)]
pub struct CatalogOutcome {
    pub catalog: Catalog,
    pub failures: Vec<SeriesFailure>,
}

impl CatalogOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds catalogs from series specifications
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogBuilder {
    /// Build independent series on the rayon thread pool
    pub parallel: bool,
    /// Stop at the first failing series (in caller order)
    pub fail_fast: bool,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Build `specs` in the given order.
    pub fn build(&self, specs: &[&SeriesSpec]) -> CatalogOutcome {
        let results: Vec<Result<SeriesCatalog, SeriesFailure>> = if self.parallel {
            specs.par_iter().map(|spec| build_series(spec)).collect()
        } else if self.fail_fast {
            let mut results = Vec::with_capacity(specs.len());
            for spec in specs {
                let result = build_series(spec);
                let failed = result.is_err();
                results.push(result);
                if failed {
                    break;
                }
            }
            results
        } else {
            specs.iter().map(|spec| build_series(spec)).collect()
        };

        let mut outcome = CatalogOutcome::default();
        for result in results {
            match result {
                Ok(section) => outcome.catalog.sections.push(section),
                Err(failure) => {
                    tracing::warn!("{}", failure);
                    outcome.failures.push(failure);
                    if self.fail_fast {
                        break;
                    }
                }
            }
        }

        tracing::info!(
            "Built {} records from {} series ({} failed)",
            outcome.catalog.len(),
            outcome.catalog.sections.len(),
            outcome.failures.len()
        );
        outcome
    }
}

/// Build the records of a single series.
pub fn build_series(spec: &SeriesSpec) -> Result<SeriesCatalog, SeriesFailure> {
    let fail = |stage: Stage, value: Option<f64>, message: String| SeriesFailure {
        series: spec.id.clone(),
        stage,
        value,
        message,
    };

    validate_spec(spec).map_err(|e| fail(Stage::Validate, e.offending_value(), e.to_string()))?;
    let scheme = spec
        .scheme()
        .map_err(|e| fail(Stage::Validate, None, e.to_string()))?;

    let mut records: Vec<PartRecord> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for subtype in spec.effective_subtypes() {
        let values = subtype_values(spec, &subtype)
            .map_err(|e| fail(Stage::Enumerate, None, e.to_string()))?;
        if values.is_empty() {
            tracing::debug!("Series {} sub-type '{}' has no values", spec.id, subtype.name);
            continue;
        }

        for value in values {
            let characteristic = spec.characteristic_for(value);
            let suffixes = packaging_for(value, spec);
            for tolerance in &subtype.tolerances {
                for packaging in &suffixes {
                    let ctx = EncodeContext {
                        prefix: &spec.prefix,
                        separator: &spec.separator,
                        tolerance_code: &tolerance.code,
                        characteristic,
                        packaging,
                        declared_values: spec.declared_values(),
                    };
                    let identifier = encode(&scheme, value, &ctx)
                        .map_err(|message| fail(Stage::Encode, Some(value), message))?;
                    if identifier.is_empty() {
                        return Err(fail(
                            Stage::Assemble,
                            Some(value),
                            "empty identifier".to_string(),
                        ));
                    }

                    let record = assemble(
                        spec,
                        value,
                        identifier,
                        Variant {
                            subtype: &subtype.name,
                            tolerance,
                            packaging,
                        },
                    );
                    // Identical identifiers describe the same part; the later one wins.
                    match positions.get(&record.identifier) {
                        Some(&index) => records[index] = record,
                        None => {
                            positions.insert(record.identifier.clone(), records.len());
                            records.push(record);
                        }
                    }
                }
            }
        }
    }

    records.sort_by(|a, b| a.value.total_cmp(&b.value));
    tracing::debug!("Series {}: {} records", spec.id, records.len());

    Ok(SeriesCatalog {
        series: spec.id.clone(),
        family: spec.family,
        records,
    })
}

fn encode(scheme: &EncodingScheme, value: f64, ctx: &EncodeContext<'_>) -> Result<String, String> {
    scheme.encode(value, ctx).map_err(|e| e.to_string())
}

/// Candidate values of one sub-type: its own series and range when it
/// declares them, the domain's otherwise.
fn subtype_values(
    spec: &SeriesSpec,
    subtype: &SubType,
) -> Result<Vec<f64>, crate::values::EnumerationError> {
    match &spec.domain {
        ValueDomain::Standard { series, min, max } => enumerate(
            subtype.range.unwrap_or_else(|| ValueRange::new(*min, *max)),
            subtype.series.unwrap_or(*series),
            &spec.filters,
        ),
        ValueDomain::Explicit { values } => {
            enumerate_explicit(values, subtype.range, &spec.filters)
        }
    }
}
