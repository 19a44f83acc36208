//! Component families and the per-family constants the engine needs.

use serde::{Deserialize, Serialize};

use crate::values::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentFamily {
    Resistor,
    Thermistor,
    Capacitor,
    Supercapacitor,
    Inductor,
    FerriteBead,
    CoupledInductor,
    Crystal,
}

impl ComponentFamily {
    pub const ALL: [ComponentFamily; 8] = [
        ComponentFamily::Resistor,
        ComponentFamily::Thermistor,
        ComponentFamily::Capacitor,
        ComponentFamily::Supercapacitor,
        ComponentFamily::Inductor,
        ComponentFamily::FerriteBead,
        ComponentFamily::CoupledInductor,
        ComponentFamily::Crystal,
    ];

    /// Unit of the numeric value. Ferrite beads are rated by impedance.
    pub fn unit(self) -> Unit {
        match self {
            ComponentFamily::Resistor
            | ComponentFamily::Thermistor
            | ComponentFamily::FerriteBead => Unit::Ohm,
            ComponentFamily::Capacitor | ComponentFamily::Supercapacitor => Unit::Farad,
            ComponentFamily::Inductor | ComponentFamily::CoupledInductor => Unit::Henry,
            ComponentFamily::Crystal => Unit::Hertz,
        }
    }

    /// Default reference designator prefix.
    pub fn reference(self) -> &'static str {
        match self {
            ComponentFamily::Resistor => "R",
            ComponentFamily::Thermistor => "RT",
            ComponentFamily::Capacitor | ComponentFamily::Supercapacitor => "C",
            ComponentFamily::Inductor | ComponentFamily::CoupledInductor => "L",
            ComponentFamily::FerriteBead => "FB",
            ComponentFamily::Crystal => "Y",
        }
    }

    /// Leading words of the part description.
    pub fn description_class(self) -> &'static str {
        match self {
            ComponentFamily::Resistor => "RES SMD",
            ComponentFamily::Thermistor => "THERMISTOR NTC SMD",
            ComponentFamily::Capacitor => "CAP SMD",
            ComponentFamily::Supercapacitor => "SUPERCAP",
            ComponentFamily::Inductor => "INDUCTOR SMD",
            ComponentFamily::FerriteBead => "Ferrite Bead",
            ComponentFamily::CoupledInductor => "COUPLED INDUCTOR SMD",
            ComponentFamily::Crystal => "CRYSTAL SMD",
        }
    }

    /// Human label used in tables ("Component Type" column).
    pub fn label(self) -> &'static str {
        match self {
            ComponentFamily::Resistor => "Resistor",
            ComponentFamily::Thermistor => "Thermistor",
            ComponentFamily::Capacitor => "Capacitor",
            ComponentFamily::Supercapacitor => "Supercapacitor",
            ComponentFamily::Inductor => "Inductor",
            ComponentFamily::FerriteBead => "Ferrite Bead",
            ComponentFamily::CoupledInductor => "Coupled Inductor",
            ComponentFamily::Crystal => "Crystal",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentFamily::Resistor => "resistor",
            ComponentFamily::Thermistor => "thermistor",
            ComponentFamily::Capacitor => "capacitor",
            ComponentFamily::Supercapacitor => "supercapacitor",
            ComponentFamily::Inductor => "inductor",
            ComponentFamily::FerriteBead => "ferrite_bead",
            ComponentFamily::CoupledInductor => "coupled_inductor",
            ComponentFamily::Crystal => "crystal",
        }
    }

    /// Families sharing an output file when catalogs are unified.
    pub fn group(self) -> &'static str {
        match self {
            ComponentFamily::Resistor | ComponentFamily::Thermistor => "resistors",
            ComponentFamily::Capacitor | ComponentFamily::Supercapacitor => "capacitors",
            ComponentFamily::Inductor | ComponentFamily::FerriteBead => "inductors",
            ComponentFamily::CoupledInductor => "coupled_inductors",
            ComponentFamily::Crystal => "crystals",
        }
    }
}

impl std::fmt::Display for ComponentFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComponentFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        ComponentFamily::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == wanted || f.group() == wanted)
            .ok_or_else(|| format!("unknown component family '{}'", s))
    }
}
