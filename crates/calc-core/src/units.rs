//! Temperature and area conversion
//!
//! Every conversion goes through a canonical unit: Celsius for temperature,
//! square meters for area.

use crate::error::{ensure_finite, CalcError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Absolute zero in Celsius
pub const ABSOLUTE_ZERO_C: f64 = -273.15;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
    Rankine,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 4] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
        TemperatureUnit::Rankine,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Rankine => "°R",
        }
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => value + ABSOLUTE_ZERO_C,
            TemperatureUnit::Rankine => value * 5.0 / 9.0 + ABSOLUTE_ZERO_C,
        }
    }

    fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => celsius - ABSOLUTE_ZERO_C,
            TemperatureUnit::Rankine => (celsius - ABSOLUTE_ZERO_C) * 9.0 / 5.0,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TemperatureUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('°').to_lowercase();
        match normalized.as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
            "r" | "ra" | "rankine" => Ok(TemperatureUnit::Rankine),
            _ => Err(CalcError::UnknownUnit(s.to_string())),
        }
    }
}

/// Convert a temperature between units
pub fn convert_temperature(
    value: f64,
    from: TemperatureUnit,
    to: TemperatureUnit,
) -> Result<f64, CalcError> {
    let celsius = from.to_celsius(ensure_finite(value)?);
    // Allow for rounding noise right at absolute zero
    if celsius < ABSOLUTE_ZERO_C - 1e-9 {
        return Err(CalcError::BelowAbsoluteZero(format!("{}{}", value, from)));
    }
    Ok(to.from_celsius(celsius))
}

/// One value expressed in every temperature unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemperatureTable {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub kelvin: f64,
    pub rankine: f64,
}

pub fn convert_temperature_all(
    value: f64,
    from: TemperatureUnit,
) -> Result<TemperatureTable, CalcError> {
    Ok(TemperatureTable {
        celsius: convert_temperature(value, from, TemperatureUnit::Celsius)?,
        fahrenheit: convert_temperature(value, from, TemperatureUnit::Fahrenheit)?,
        kelvin: convert_temperature(value, from, TemperatureUnit::Kelvin)?,
        rankine: convert_temperature(value, from, TemperatureUnit::Rankine)?,
    })
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    SquareMillimeter,
    SquareCentimeter,
    SquareMeter,
    Hectare,
    SquareKilometer,
    SquareInch,
    SquareFoot,
    SquareYard,
    Acre,
    SquareMile,
}

impl AreaUnit {
    pub const ALL: [AreaUnit; 10] = [
        AreaUnit::SquareMillimeter,
        AreaUnit::SquareCentimeter,
        AreaUnit::SquareMeter,
        AreaUnit::Hectare,
        AreaUnit::SquareKilometer,
        AreaUnit::SquareInch,
        AreaUnit::SquareFoot,
        AreaUnit::SquareYard,
        AreaUnit::Acre,
        AreaUnit::SquareMile,
    ];

    /// Square meters in one unit
    pub fn square_meters(&self) -> f64 {
        match self {
            AreaUnit::SquareMillimeter => 1e-6,
            AreaUnit::SquareCentimeter => 1e-4,
            AreaUnit::SquareMeter => 1.0,
            AreaUnit::Hectare => 10_000.0,
            AreaUnit::SquareKilometer => 1_000_000.0,
            AreaUnit::SquareInch => 0.000_645_16,
            AreaUnit::SquareFoot => 0.092_903_04,
            AreaUnit::SquareYard => 0.836_127_36,
            AreaUnit::Acre => 4_046.856_422_4,
            AreaUnit::SquareMile => 2_589_988.110_336,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareMillimeter => "mm²",
            AreaUnit::SquareCentimeter => "cm²",
            AreaUnit::SquareMeter => "m²",
            AreaUnit::Hectare => "ha",
            AreaUnit::SquareKilometer => "km²",
            AreaUnit::SquareInch => "in²",
            AreaUnit::SquareFoot => "ft²",
            AreaUnit::SquareYard => "yd²",
            AreaUnit::Acre => "ac",
            AreaUnit::SquareMile => "mi²",
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for AreaUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .replace('²', "2")
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect();

        match normalized.as_str() {
            "mm2" | "sqmm" | "squaremillimeter" | "squaremillimeters" => {
                Ok(AreaUnit::SquareMillimeter)
            }
            "cm2" | "sqcm" | "squarecentimeter" | "squarecentimeters" => {
                Ok(AreaUnit::SquareCentimeter)
            }
            "m2" | "sqm" | "squaremeter" | "squaremeters" => Ok(AreaUnit::SquareMeter),
            "ha" | "hectare" | "hectares" => Ok(AreaUnit::Hectare),
            "km2" | "sqkm" | "squarekilometer" | "squarekilometers" => {
                Ok(AreaUnit::SquareKilometer)
            }
            "in2" | "sqin" | "squareinch" | "squareinches" => Ok(AreaUnit::SquareInch),
            "ft2" | "sqft" | "squarefoot" | "squarefeet" => Ok(AreaUnit::SquareFoot),
            "yd2" | "sqyd" | "squareyard" | "squareyards" => Ok(AreaUnit::SquareYard),
            "ac" | "acre" | "acres" => Ok(AreaUnit::Acre),
            "mi2" | "sqmi" | "squaremile" | "squaremiles" => Ok(AreaUnit::SquareMile),
            _ => Err(CalcError::UnknownUnit(s.to_string())),
        }
    }
}

/// Convert an area between units
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> Result<f64, CalcError> {
    let value = ensure_finite(value)?;
    if value < 0.0 {
        return Err(CalcError::NegativeArea(value));
    }
    if from == to {
        return Ok(value);
    }
    Ok(value * from.square_meters() / to.square_meters())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9 * b.abs().max(1.0), "{} != {}", a, b);
    }

    #[test]
    fn test_fixed_points() {
        use TemperatureUnit::*;
        assert_close(convert_temperature(100.0, Celsius, Fahrenheit).unwrap(), 212.0);
        assert_close(convert_temperature(32.0, Fahrenheit, Celsius).unwrap(), 0.0);
        assert_close(convert_temperature(0.0, Celsius, Kelvin).unwrap(), 273.15);
        assert_close(convert_temperature(0.0, Kelvin, Rankine).unwrap(), 0.0);
        assert_close(convert_temperature(-40.0, Celsius, Fahrenheit).unwrap(), -40.0);
        assert_close(convert_temperature(491.67, Rankine, Fahrenheit).unwrap(), 32.0);
    }

    #[test]
    fn test_below_absolute_zero_rejected() {
        let result = convert_temperature(-1.0, TemperatureUnit::Kelvin, TemperatureUnit::Celsius);
        assert!(matches!(result, Err(CalcError::BelowAbsoluteZero(_))));
    }

    #[test]
    fn test_temperature_table() {
        let table = convert_temperature_all(25.0, TemperatureUnit::Celsius).unwrap();
        assert_close(table.fahrenheit, 77.0);
        assert_close(table.kelvin, 298.15);
    }

    #[test]
    fn test_parse_temperature_units() {
        assert_eq!("°F".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Fahrenheit);
        assert_eq!("Kelvin".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Kelvin);
        assert!("x".parse::<TemperatureUnit>().is_err());
    }

    #[test]
    fn test_area_conversions() {
        use AreaUnit::*;
        assert_close(convert_area(1.0, Hectare, SquareMeter).unwrap(), 10_000.0);
        assert_close(convert_area(1.0, Acre, SquareFoot).unwrap(), 43_560.0);
        assert_close(convert_area(1.0, SquareMile, Acre).unwrap(), 640.0);
        assert_close(convert_area(1.0, SquareYard, SquareFoot).unwrap(), 9.0);
    }

    #[test]
    fn test_negative_area_rejected() {
        assert!(convert_area(-1.0, AreaUnit::SquareMeter, AreaUnit::Acre).is_err());
    }

    #[test]
    fn test_parse_area_units() {
        assert_eq!("sq ft".parse::<AreaUnit>().unwrap(), AreaUnit::SquareFoot);
        assert_eq!("m²".parse::<AreaUnit>().unwrap(), AreaUnit::SquareMeter);
        assert_eq!("square_miles".parse::<AreaUnit>().unwrap(), AreaUnit::SquareMile);
    }
}
