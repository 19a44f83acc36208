//! KiCad symbol library (`.kicad_sym`) output.
//!
//! One symbol per record. Properties come from the family's table columns
//! and are written in a fixed order: Reference, Value, Footprint, Datasheet,
//! then every remaining property alphabetically. The body drawing is picked
//! from a small per-family template table; nothing is derived here.

use std::io::Write;

use super::sexp::SExp;
use super::table::columns;
use super::{CatalogSink, SinkError};
use crate::assemble::PartRecord;
use crate::family::ComponentFamily;

pub const PRIORITY_PROPERTIES: [&str; 4] = ["Reference", "Value", "Footprint", "Datasheet"];

const KICAD_VERSION: &str = "20231120";
const FONT_SIZE: f64 = 1.27;
const GRID: f64 = 2.54;

enum Shape {
    Polyline { pts: &'static [(f64, f64)], width: f64 },
    Arc { start: (f64, f64), mid: (f64, f64), end: (f64, f64) },
    /// One inductor turn from `start` to `end` on the line `y`
    Coil { start: f64, end: f64, y: f64 },
    Rectangle { start: (f64, f64), end: (f64, f64) },
}

struct Pin {
    at: (f64, f64),
    angle: u16,
    number: &'static str,
    length: f64,
}

struct Body {
    shapes: &'static [Shape],
    pins: &'static [Pin],
    /// Grid rows between the body and the Reference/Value texts
    text_offset: f64,
}

const fn pin(x: f64, y: f64, angle: u16, number: &'static str, length: f64) -> Pin {
    Pin {
        at: (x, y),
        angle,
        number,
        length,
    }
}

const fn coil_arc(start: f64, end: f64, y: f64) -> Shape {
    Shape::Coil { start, end, y }
}

const RESISTOR_ZIGZAG: [Shape; 5] = [
    Shape::Polyline { pts: &[(2.286, 0.0), (2.54, 0.0)], width: 0.0 },
    Shape::Polyline { pts: &[(-2.286, 0.0), (-2.54, 0.0)], width: 0.0 },
    Shape::Polyline {
        pts: &[(0.762, 0.0), (1.143, 1.016), (1.524, 0.0), (1.905, -1.016), (2.286, 0.0)],
        width: 0.0,
    },
    Shape::Polyline {
        pts: &[(-0.762, 0.0), (-0.381, 1.016), (0.0, 0.0), (0.381, -1.016), (0.762, 0.0)],
        width: 0.0,
    },
    Shape::Polyline {
        pts: &[(-2.286, 0.0), (-1.905, 1.016), (-1.524, 0.0), (-1.143, -1.016), (-0.762, 0.0)],
        width: 0.0,
    },
];

const RESISTOR: Body = Body {
    shapes: &RESISTOR_ZIGZAG,
    pins: &[pin(-5.08, 0.0, 0, "1", 2.54), pin(5.08, 0.0, 180, "2", 2.54)],
    text_offset: 2.0,
};

const THERMISTOR: Body = Body {
    shapes: &[
        Shape::Rectangle { start: (-2.54, 1.016), end: (2.54, -1.016) },
        Shape::Polyline { pts: &[(-2.54, -2.032), (-1.524, -2.032), (2.032, 2.032)], width: 0.0 },
    ],
    pins: &[pin(-5.08, 0.0, 0, "1", 2.54), pin(5.08, 0.0, 180, "2", 2.54)],
    text_offset: 3.0,
};

const CAPACITOR: Body = Body {
    shapes: &[
        Shape::Polyline { pts: &[(-0.762, -2.032), (-0.762, 2.032)], width: 0.508 },
        Shape::Polyline { pts: &[(0.762, -2.032), (0.762, 2.032)], width: 0.508 },
    ],
    pins: &[pin(-3.81, 0.0, 0, "1", 2.8), pin(3.81, 0.0, 180, "2", 2.8)],
    text_offset: 3.0,
};

const POLARISED_CAPACITOR: Body = Body {
    shapes: &[
        Shape::Polyline { pts: &[(-0.762, -2.032), (-0.762, 2.032)], width: 0.508 },
        Shape::Polyline { pts: &[(-2.54, -1.016), (-2.54, -2.032)], width: 0.508 },
        Shape::Polyline { pts: &[(-2.032, -1.524), (-3.048, -1.524)], width: 0.508 },
        Shape::Arc { start: (1.524, 2.032), mid: (0.9088, 0.0), end: (1.524, -2.032) },
    ],
    pins: &[pin(-3.81, 0.0, 0, "1", 2.8), pin(3.81, 0.0, 180, "2", 2.8)],
    text_offset: 3.0,
};

const INDUCTOR: Body = Body {
    shapes: &[
        coil_arc(-2.54, -5.08, 0.0),
        coil_arc(0.0, -2.54, 0.0),
        coil_arc(2.54, 0.0, 0.0),
        coil_arc(5.08, 2.54, 0.0),
    ],
    pins: &[pin(-7.62, 0.0, 0, "1", 2.54), pin(7.62, 0.0, 180, "2", 2.54)],
    text_offset: 2.0,
};

const FERRITE_BEAD: Body = Body {
    shapes: &[
        Shape::Polyline { pts: &[(-1.27, 0.0), (-2.54, 0.0)], width: 0.0 },
        Shape::Polyline { pts: &[(1.27, 0.0), (2.54, 0.0)], width: 0.0 },
        Shape::Polyline {
            pts: &[(0.0, 2.54), (2.54, 2.54), (0.0, -2.54), (-2.54, -2.54), (0.0, 2.54)],
            width: 0.2032,
        },
    ],
    pins: &[pin(-5.08, 0.0, 0, "1", 2.54), pin(5.08, 0.0, 180, "2", 2.54)],
    text_offset: 3.0,
};

const COUPLED_INDUCTOR: Body = Body {
    shapes: &[
        coil_arc(-2.54, -5.08, 1.27),
        coil_arc(0.0, -2.54, 1.27),
        coil_arc(2.54, 0.0, 1.27),
        coil_arc(5.08, 2.54, 1.27),
        coil_arc(-2.54, -5.08, -2.54),
        coil_arc(0.0, -2.54, -2.54),
        coil_arc(2.54, 0.0, -2.54),
        coil_arc(5.08, 2.54, -2.54),
        Shape::Polyline { pts: &[(-5.08, 0.0), (5.08, 0.0)], width: 0.2032 },
        Shape::Polyline { pts: &[(-5.08, -0.508), (5.08, -0.508)], width: 0.2032 },
    ],
    pins: &[
        pin(-7.62, 1.27, 0, "1", 2.54),
        pin(7.62, 1.27, 180, "2", 2.54),
        pin(-7.62, -2.54, 0, "3", 2.54),
        pin(7.62, -2.54, 180, "4", 2.54),
    ],
    text_offset: 4.0,
};

const CRYSTAL: Body = Body {
    shapes: &[
        Shape::Rectangle { start: (-1.143, 2.54), end: (1.143, -2.54) },
        Shape::Polyline { pts: &[(-2.54, 1.778), (-2.54, -1.778)], width: 0.508 },
        Shape::Polyline { pts: &[(2.54, 1.778), (2.54, -1.778)], width: 0.508 },
    ],
    pins: &[pin(-5.08, 0.0, 0, "1", 2.54), pin(5.08, 0.0, 180, "2", 2.54)],
    text_offset: 3.0,
};

fn body_for(family: ComponentFamily) -> &'static Body {
    use ComponentFamily::*;
    match family {
        Resistor => &RESISTOR,
        Thermistor => &THERMISTOR,
        Capacitor => &CAPACITOR,
        Supercapacitor => &POLARISED_CAPACITOR,
        Inductor => &INDUCTOR,
        FerriteBead => &FERRITE_BEAD,
        CoupledInductor => &COUPLED_INDUCTOR,
        Crystal => &CRYSTAL,
    }
}

/// Property names and values of a record in output order.
pub fn properties(record: &PartRecord) -> Vec<(&'static str, String)> {
    let mut props: Vec<(&'static str, String)> = columns(record.family)
        .iter()
        .filter(|(name, _)| *name != "Symbol Name")
        .map(|(name, get)| (*name, get(record)))
        .collect();

    props.sort_by(|(a, _), (b, _)| {
        let rank = |name: &str| PRIORITY_PROPERTIES.iter().position(|p| *p == name);
        match (rank(a), rank(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    });
    props
}

fn xy((x, y): (f64, f64)) -> SExp {
    SExp::node("xy", [SExp::num(x), SExp::num(y)])
}

fn point(key: &str, (x, y): (f64, f64)) -> SExp {
    SExp::node(key, [SExp::num(x), SExp::num(y)])
}

fn stroke(width: f64) -> SExp {
    SExp::node(
        "stroke",
        [
            SExp::node("width", [SExp::num(width)]),
            SExp::node("type", [SExp::atom("default")]),
        ],
    )
}

fn no_fill() -> SExp {
    SExp::node("fill", [SExp::node("type", [SExp::atom("none")])])
}

fn font() -> SExp {
    SExp::node(
        "font",
        [SExp::node("size", [SExp::num(FONT_SIZE), SExp::num(FONT_SIZE)])],
    )
}

fn shape(item: &Shape) -> SExp {
    match item {
        Shape::Polyline { pts, width } => SExp::node(
            "polyline",
            [
                SExp::node("pts", pts.iter().copied().map(xy)),
                stroke(*width),
                no_fill(),
            ],
        ),
        Shape::Arc { start, mid, end } => SExp::node(
            "arc",
            [
                point("start", *start),
                point("mid", *mid),
                point("end", *end),
                stroke(0.2032),
                no_fill(),
            ],
        ),
        Shape::Coil { start, end, y } => shape(&Shape::Arc {
            start: (*start, y + 0.0056),
            mid: ((start + end) / 2.0, y + 1.27),
            end: (*end, y + 0.0056),
        }),
        Shape::Rectangle { start, end } => SExp::node(
            "rectangle",
            [point("start", *start), point("end", *end), stroke(0.2032), no_fill()],
        ),
    }
}

fn pin_node(pin: &Pin) -> SExp {
    SExp::node(
        "pin",
        [
            SExp::atom("passive"),
            SExp::atom("line"),
            SExp::node(
                "at",
                [SExp::num(pin.at.0), SExp::num(pin.at.1), SExp::atom(pin.angle.to_string())],
            ),
            SExp::node("length", [SExp::num(pin.length)]),
            SExp::node("name", [SExp::str(""), SExp::node("effects", [font()])]),
            SExp::node("number", [SExp::str(pin.number), SExp::node("effects", [font()])]),
        ],
    )
}

fn property_node(name: &str, value: String, at: (f64, f64), hidden: bool) -> SExp {
    let mut effects = vec![font(), SExp::node("justify", [SExp::atom("left")])];
    if hidden {
        effects.push(SExp::node("hide", [SExp::atom("yes")]));
    }
    SExp::node(
        "property",
        [
            SExp::str(name),
            SExp::str(value),
            SExp::node("at", [SExp::num(at.0), SExp::num(at.1), SExp::atom("0")]),
            SExp::node("effects", effects),
        ],
    )
}

/// The `(symbol ...)` node of one record.
pub fn symbol_node(record: &PartRecord) -> SExp {
    let body = body_for(record.family);
    let offset = body.text_offset;
    let mut items = vec![
        SExp::str(record.symbol_name.as_str()),
        SExp::node("pin_names", [SExp::node("offset", [SExp::num(0.254)])]),
        SExp::node("exclude_from_sim", [SExp::atom("no")]),
        SExp::node("in_bom", [SExp::atom("yes")]),
        SExp::node("on_board", [SExp::atom("yes")]),
    ];

    let mut hidden_row = offset;
    for (name, value) in properties(record) {
        let node = match name {
            "Reference" => property_node(name, value, (0.0, GRID * offset), false),
            "Value" => property_node(name, value, (0.0, -GRID * offset), false),
            _ => {
                hidden_row += 1.0;
                property_node(name, value, (0.0, -GRID * hidden_row), true)
            }
        };
        items.push(node);
    }

    items.push(SExp::node(
        "symbol",
        std::iter::once(SExp::str(format!("{}_0_1", record.symbol_name)))
            .chain(body.shapes.iter().map(shape)),
    ));
    items.push(SExp::node(
        "symbol",
        std::iter::once(SExp::str(format!("{}_1_1", record.symbol_name)))
            .chain(body.pins.iter().map(pin_node)),
    ));

    SExp::node("symbol", items)
}

/// The whole library as one tree.
pub fn library(records: &[&PartRecord]) -> SExp {
    let header = [
        SExp::node("version", [SExp::atom(KICAD_VERSION)]),
        SExp::node("generator", [SExp::str("partgen")]),
        SExp::node("generator_version", [SExp::str(env!("CARGO_PKG_VERSION"))]),
    ];
    SExp::node(
        "kicad_symbol_lib",
        header.into_iter().chain(records.iter().map(|r| symbol_node(r))),
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KicadSymbolSink;

impl CatalogSink for KicadSymbolSink {
    fn extension(&self) -> &'static str {
        "kicad_sym"
    }

    fn write(&self, records: &[&PartRecord], out: &mut dyn Write) -> Result<(), SinkError> {
        out.write_all(library(records).to_pretty().as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_series;
    use crate::series::SeriesRegistry;
    use crate::sinks::sexp::SExpParser;

    fn records_of(id: &str) -> Vec<PartRecord> {
        let registry = SeriesRegistry::with_builtin();
        build_series(registry.get(id).unwrap()).unwrap().records
    }

    fn property_names(symbol: &SExp) -> Vec<String> {
        symbol
            .get_all("property")
            .iter()
            .filter_map(|p| p.as_list()?.get(1)?.as_text().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_property_order() {
        let records = records_of("GCM155R71H");
        let names: Vec<_> = properties(&records[0]).into_iter().map(|(n, _)| n).collect();
        assert_eq!(&names[..4], &PRIORITY_PROPERTIES);
        let rest = &names[4..];
        let mut sorted = rest.to_vec();
        sorted.sort();
        assert_eq!(rest, &sorted[..]);
        assert!(!names.contains(&"Symbol Name"));
    }

    #[test]
    fn test_library_reads_back() {
        let records = records_of("ERJ-2GEJ");
        let refs: Vec<_> = records.iter().collect();
        let mut out = Vec::new();
        KicadSymbolSink.write(&refs, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let tree = SExpParser::new(&text).parse().unwrap();
        assert_eq!(tree.key(), Some("kicad_symbol_lib"));
        let symbols = tree.get_all("symbol");
        assert_eq!(symbols.len(), records.len());

        let first = symbols[0];
        let name = first.as_list().unwrap()[1].as_text().unwrap();
        assert_eq!(name, records[0].symbol_name);
        assert_eq!(&property_names(first)[..4], &["Reference", "Value", "Footprint", "Datasheet"]);
        // drawing and pin units
        assert_eq!(first.get_all("symbol").len(), 2);
    }

    #[test]
    fn test_inductor_coil_renders_arcs() {
        let records = records_of("XAL4020");
        let symbol = symbol_node(&records[0]);
        let units = symbol.get_all("symbol");
        let arcs = units[0].get_all("arc");
        assert_eq!(arcs.len(), 4);

        let mid = arcs[0].get("mid").and_then(SExp::as_list).unwrap();
        let x: f64 = mid[1].as_text().unwrap().parse().unwrap();
        assert!((x + 3.81).abs() < 1e-9);
        assert_eq!(mid[2].as_text(), Some("1.27"));
    }

    #[test]
    fn test_coupled_inductor_has_four_pins() {
        let records = records_of("MSD7342");
        let symbol = symbol_node(&records[0]);
        let units = symbol.get_all("symbol");
        assert_eq!(units[1].get_all("pin").len(), 4);
    }
}
