//! Dimension parsing and unit conversion
//!
//! The pivot unit is the dxa (twentieth of a point), the native small
//! unit of WordprocessingML. DrawingML geometry uses EMU instead;
//! 635 EMU = 1 dxa.

use crate::error::{UnitError, UnitResult};
use regex_lite::Regex;
use std::sync::OnceLock;

/// Dxa per point
pub const DXA_PER_PT: f64 = 20.0;
/// Dxa per CSS pixel (0.75 pt per px)
pub const DXA_PER_PX: f64 = 15.0;
/// Dxa per inch
pub const DXA_PER_IN: f64 = 1440.0;
/// Dxa per centimeter
pub const DXA_PER_CM: f64 = 1440.0 / 2.54;
/// EMU per dxa
pub const EMU_PER_DXA: f64 = 635.0;

/// A length unit recognized in dimension strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Twentieth of a point (native small unit); also the bare-number unit
    Dxa,
    /// Point
    Pt,
    /// CSS pixel
    Px,
    /// Inch
    In,
    /// Centimeter
    Cm,
    /// English Metric Unit (native large unit)
    Emu,
}

impl Unit {
    /// Conversion factor from this unit to dxa
    pub fn dxa_factor(self) -> f64 {
        match self {
            Unit::Dxa => 1.0,
            Unit::Pt => DXA_PER_PT,
            Unit::Px => DXA_PER_PX,
            Unit::In => DXA_PER_IN,
            Unit::Cm => DXA_PER_CM,
            Unit::Emu => 1.0 / EMU_PER_DXA,
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" | "dxa" => Some(Unit::Dxa),
            "pt" => Some(Unit::Pt),
            "px" => Some(Unit::Px),
            "in" => Some(Unit::In),
            "cm" => Some(Unit::Cm),
            "emu" => Some(Unit::Emu),
            _ => None,
        }
    }
}

/// A parsed `(value, unit)` pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension {
    pub value: f64,
    pub unit: Unit,
}

impl Dimension {
    /// Parse a dimension string such as "12pt", "3.5cm", or "1000"
    /// (bare numbers are dxa)
    pub fn parse(raw: &str) -> UnitResult<Self> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"^\s*([0-9]+(?:\.[0-9]+)?)\s*([a-z]*)\s*$").unwrap()
        });

        let caps = re
            .captures(raw)
            .ok_or_else(|| UnitError::InvalidDimension(raw.to_string()))?;
        let value: f64 = caps[1]
            .parse()
            .map_err(|_| UnitError::InvalidDimension(raw.to_string()))?;
        let unit = Unit::from_suffix(&caps[2])
            .ok_or_else(|| UnitError::InvalidDimension(raw.to_string()))?;

        Ok(Self { value, unit })
    }

    /// The dimension expressed in dxa
    pub fn to_dxa(self) -> f64 {
        self.value * self.unit.dxa_factor()
    }

    /// The dimension expressed in EMU
    pub fn to_emu(self) -> f64 {
        self.to_dxa() * EMU_PER_DXA
    }
}

/// Parse a dimension string straight to dxa
pub fn parse_dimension(raw: &str) -> UnitResult<f64> {
    Dimension::parse(raw).map(Dimension::to_dxa)
}
