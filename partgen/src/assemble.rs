//! Part record assembly.
//!
//! A [`PartRecord`] is the finished, immutable description of one orderable
//! part. Every field a sink writes is computed here; sinks never derive
//! anything themselves.

use serde::Serialize;

use crate::family::ComponentFamily;
use crate::resolve::{resolve, ResolvedAttributes};
use crate::series::{SeriesSpec, ToleranceOption};
use crate::values::format_value;

/// One generated part
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartRecord {
    /// Reference prefix and identifier joined by `_`
    pub symbol_name: String,
    pub reference: String,
    /// Manufacturer part number
    pub identifier: String,
    /// Value in SI base units
    pub value: f64,
    pub formatted_value: String,
    pub family: ComponentFamily,
    /// Series code (the part number prefix)
    pub series: String,
    pub manufacturer: String,
    /// Dielectric or grade; empty for series without sub-types
    pub subtype: String,
    pub tolerance: String,
    pub packaging: String,
    #[serde(flatten)]
    pub attributes: ResolvedAttributes,
    pub temperature_coefficient: Option<String>,
    pub power_rating: Option<String>,
    pub description: String,
    pub datasheet: String,
    pub search_url: String,
}

/// The sub-type, tolerance and packaging a record is generated for
#[derive(Debug, Clone, Copy)]
pub struct Variant<'a> {
    pub subtype: &'a str,
    pub tolerance: &'a ToleranceOption,
    pub packaging: &'a str,
}

/// Build the record for an already encoded identifier.
pub fn assemble(
    spec: &SeriesSpec,
    value: f64,
    identifier: String,
    variant: Variant<'_>,
) -> PartRecord {
    let attributes = resolve(value, spec);
    let formatted_value = format_value(value, spec.family.unit());
    let description = describe(spec, &formatted_value, variant, &attributes);
    let datasheet = spec.datasheet.resolve(&identifier);
    let search_url = format!("{}/{}", spec.search_url.trim_end_matches('/'), identifier);
    let reference = spec.reference().to_string();

    PartRecord {
        symbol_name: format!("{}_{}", reference, identifier),
        reference,
        value,
        formatted_value,
        family: spec.family,
        series: spec.prefix.clone(),
        manufacturer: spec.manufacturer.clone(),
        subtype: variant.subtype.to_string(),
        tolerance: variant.tolerance.text.clone(),
        packaging: variant.packaging.to_string(),
        temperature_coefficient: spec.defaults.temperature_coefficient.clone(),
        power_rating: spec.defaults.power_rating.clone(),
        description,
        datasheet,
        search_url,
        attributes,
        identifier,
    }
}

/// Description text: family class, formatted value and the ratings that
/// family's descriptions carry. Empty parts are skipped.
fn describe(
    spec: &SeriesSpec,
    formatted_value: &str,
    variant: Variant<'_>,
    attributes: &ResolvedAttributes,
) -> String {
    use ComponentFamily::*;

    let tolerance = variant.tolerance.text.as_str();
    let case_in = attributes.case_code_in.as_str();
    let voltage = attributes.voltage_rating.as_str();
    let bead_value;

    let parts: Vec<&str> = match spec.family {
        Resistor | Thermistor => vec![formatted_value, tolerance, case_in, voltage],
        Capacitor => vec![formatted_value, variant.subtype, tolerance, case_in, voltage],
        Supercapacitor => vec![formatted_value, tolerance, voltage],
        FerriteBead => {
            bead_value = format!("{} @ 100 MHz", formatted_value);
            vec![bead_value.as_str(), tolerance]
        }
        Inductor | CoupledInductor | Crystal => vec![formatted_value, tolerance],
    };

    std::iter::once(spec.description_class())
        .chain(parts)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> SeriesSpec {
        serde_json::from_str(json).unwrap()
    }

    fn tolerance(code: &str, text: &str) -> ToleranceOption {
        ToleranceOption {
            code: code.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_capacitor_record() {
        let spec = spec(
            r#"{
                "id": "GCM155R71H",
                "family": "capacitor",
                "manufacturer": "Murata Electronics",
                "prefix": "GCM155R71H",
                "domain": {"kind": "standard", "series": "E12", "min": "220 pF", "max": "100 nF"},
                "defaults": {
                    "footprint": "capacitor_footprints:C_0402_1005Metric",
                    "case_code_in": "0402",
                    "case_code_mm": "1005",
                    "voltage_rating": "50V"
                },
                "datasheet": {"kind": "truncated_identifier", "base": "https://example.com/", "trim": 1, "suffix": "-01.pdf"}
            }"#,
        );
        let tol = tolerance("K", "10%");
        let record = assemble(
            &spec,
            220e-12,
            "GCM155R71H221KA37D".to_string(),
            Variant {
                subtype: "X7R",
                tolerance: &tol,
                packaging: "D",
            },
        );

        assert_eq!(record.symbol_name, "C_GCM155R71H221KA37D");
        assert_eq!(record.formatted_value, "220 pF");
        assert_eq!(record.description, "CAP SMD 220 pF X7R 10% 0402 50V");
        assert_eq!(record.datasheet, "https://example.com/GCM155R71H221KA37-01.pdf");
        assert_eq!(
            record.search_url,
            "https://www.trustedparts.com/en/search/GCM155R71H221KA37D"
        );
        assert_eq!(record.attributes.case_code_mm, "1005");
    }

    #[test]
    fn test_description_skips_empty_parts() {
        let spec = spec(
            r#"{
                "id": "742792731",
                "family": "ferrite_bead",
                "manufacturer": "Würth Elektronik",
                "prefix": "742792731",
                "domain": {"kind": "explicit", "values": ["100 Ω"]},
                "datasheet": {"kind": "static", "url": "https://example.com/742792731.pdf"}
            }"#,
        );
        let tol = tolerance("", "±25%");
        let record = assemble(
            &spec,
            100.0,
            "742792731".to_string(),
            Variant {
                subtype: "",
                tolerance: &tol,
                packaging: "",
            },
        );
        assert_eq!(record.reference, "FB");
        assert_eq!(record.description, "Ferrite Bead 100 Ω @ 100 MHz ±25%");
        assert_eq!(record.datasheet, "https://example.com/742792731.pdf");
    }

    #[test]
    fn test_reference_override() {
        let spec = spec(
            r#"{
                "id": "NCP15XH",
                "family": "thermistor",
                "manufacturer": "Murata",
                "prefix": "NCP15XH",
                "reference": "TH",
                "domain": {"kind": "explicit", "values": ["10 kΩ"]},
                "defaults": {"case_code_in": "0402"},
                "datasheet": {"kind": "static", "url": ""}
            }"#,
        );
        let tol = tolerance("", "1%");
        let record = assemble(
            &spec,
            10_000.0,
            "NCP15XH103F03RC".to_string(),
            Variant {
                subtype: "",
                tolerance: &tol,
                packaging: "F03RC",
            },
        );
        assert_eq!(record.symbol_name, "TH_NCP15XH103F03RC");
        assert_eq!(record.description, "THERMISTOR NTC SMD 10 kΩ 1% 0402");
    }

    #[test]
    fn test_series_code_is_prefix() {
        let spec = spec(
            r#"{
                "id": "WURTH-WE-LQS",
                "family": "inductor",
                "manufacturer": "Würth Elektronik",
                "prefix": "744031",
                "domain": {"kind": "explicit", "values": ["1 µH"]},
                "datasheet": {"kind": "static", "url": ""}
            }"#,
        );
        let tol = tolerance("", "±30%");
        let record = assemble(
            &spec,
            1e-6,
            "744031001".to_string(),
            Variant {
                subtype: "",
                tolerance: &tol,
                packaging: "",
            },
        );
        assert_eq!(record.series, "744031");
    }
}
