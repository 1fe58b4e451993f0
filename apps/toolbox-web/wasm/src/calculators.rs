//! Calculator bindings
//!
//! Each function returns a plain object for the result panel. Errors come
//! back as strings the page shows in an alert.

use crate::to_js;
use calc_core::{
    scientific, AreaUnit, CalcError, PercentageChange, PrimeAnalysis, PrimeFactor,
    TemperatureTable, TemperatureUnit, WorkdaysSummary, Workweek,
};
use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Default digits after the decimal point for notation output
const DEFAULT_PRECISION: usize = 4;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PrimeResult {
    pub number: u64,
    pub is_prime: bool,
    pub factors: Vec<u64>,
    pub prime_factors: Vec<PrimeFactor>,
    pub square_root: f64,
    /// e.g. `2^2 × 3`
    pub factorization: String,
}

impl From<PrimeAnalysis> for PrimeResult {
    fn from(analysis: PrimeAnalysis) -> Self {
        let factorization = calc_core::prime::format_factorization(&analysis.prime_factors);
        Self {
            number: analysis.number,
            is_prime: analysis.is_prime,
            factors: analysis.factors,
            prime_factors: analysis.prime_factors,
            square_root: analysis.square_root,
            factorization,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemperatureConversion {
    pub value: f64,
    pub from: TemperatureUnit,
    pub to: TemperatureUnit,
    pub result: f64,
    pub all: TemperatureTable,
}

/// Result of moving a date forward by working days
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkdayShift {
    pub start: NaiveDate,
    pub workdays: u32,
    pub end: NaiveDate,
    /// Calendar days between `start` and `end`
    pub calendar_days: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AreaConversion {
    pub value: f64,
    pub from: AreaUnit,
    pub to: AreaUnit,
    pub result: f64,
    pub from_symbol: &'static str,
    pub to_symbol: &'static str,
}

fn js_err(e: String) -> JsValue {
    JsValue::from_str(&e)
}

/// JS numbers are doubles; only whole non-negative values can be checked
fn whole_number(value: f64) -> Result<u64, String> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(format!("{} is not a whole number", value));
    }
    if value < 1.0 {
        return Err(CalcError::NotPositive(0).to_string());
    }
    Ok(value as u64)
}

fn check_prime_internal(value: f64) -> Result<PrimeResult, String> {
    let n = whole_number(value)?;
    let analysis = calc_core::analyze(n).map_err(|e| e.to_string())?;
    Ok(PrimeResult::from(analysis))
}

fn percentage_change_internal(original: f64, new: f64) -> Result<PercentageChange, String> {
    calc_core::percentage_change(original, new).map_err(|e| e.to_string())
}

fn percent_ratio_internal(part: f64, whole: f64) -> Result<f64, String> {
    calc_core::percentage::percent_ratio(part, whole).map_err(|e| e.to_string())
}

fn apply_percentage_internal(value: f64, percent: f64) -> Result<f64, String> {
    calc_core::percentage::apply_percentage(value, percent).map_err(|e| e.to_string())
}

fn scientific_internal(
    input: &str,
    precision: Option<usize>,
) -> Result<scientific::NotationResult, String> {
    let value = calc_core::parse_notation(input).map_err(|e| e.to_string())?;
    scientific::convert(value, precision.unwrap_or(DEFAULT_PRECISION)).map_err(|e| e.to_string())
}

fn temperature_internal(value: f64, from: &str, to: &str) -> Result<TemperatureConversion, String> {
    let from: TemperatureUnit = from.parse().map_err(|e: CalcError| e.to_string())?;
    let to: TemperatureUnit = to.parse().map_err(|e: CalcError| e.to_string())?;
    let result = calc_core::convert_temperature(value, from, to).map_err(|e| e.to_string())?;
    let all = calc_core::convert_temperature_all(value, from).map_err(|e| e.to_string())?;
    Ok(TemperatureConversion {
        value,
        from,
        to,
        result,
        all,
    })
}

fn area_internal(value: f64, from: &str, to: &str) -> Result<AreaConversion, String> {
    let from: AreaUnit = from.parse().map_err(|e: CalcError| e.to_string())?;
    let to: AreaUnit = to.parse().map_err(|e: CalcError| e.to_string())?;
    let result = calc_core::convert_area(value, from, to).map_err(|e| e.to_string())?;
    Ok(AreaConversion {
        value,
        from,
        to,
        result,
        from_symbol: from.symbol(),
        to_symbol: to.symbol(),
    })
}

/// Comma-separated weekday names, e.g. `"fri,sat"`
fn parse_weekend(weekend: &str) -> Result<Workweek, String> {
    let days = weekend
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            d.parse::<Weekday>()
                .map_err(|_| format!("Unknown weekday: {}", d))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Workweek { weekend: days })
}

fn workdays_internal(
    start: &str,
    end: &str,
    weekend: Option<&str>,
) -> Result<WorkdaysSummary, String> {
    let start = calc_core::parse_date(start).map_err(|e| e.to_string())?;
    let end = calc_core::parse_date(end).map_err(|e| e.to_string())?;
    let week = match weekend {
        Some(days) => parse_weekend(days)?,
        None => Workweek::default(),
    };
    calc_core::count_workdays_with(start, end, &week).map_err(|e| e.to_string())
}

fn days_between_internal(start: &str, end: &str) -> Result<i64, String> {
    let start = calc_core::parse_date(start).map_err(|e| e.to_string())?;
    let end = calc_core::parse_date(end).map_err(|e| e.to_string())?;
    Ok(calc_core::workdays::days_between(start, end))
}

fn add_workdays_internal(
    start: &str,
    workdays: u32,
    weekend: Option<&str>,
) -> Result<WorkdayShift, String> {
    let start = calc_core::parse_date(start).map_err(|e| e.to_string())?;
    let week = match weekend {
        Some(days) => parse_weekend(days)?,
        None => Workweek::default(),
    };
    let end = calc_core::workdays::add_workdays(start, workdays, &week).map_err(|e| e.to_string())?;
    Ok(WorkdayShift {
        start,
        workdays,
        end,
        calendar_days: calc_core::workdays::days_between(start, end),
    })
}

#[wasm_bindgen]
pub fn check_prime(value: f64) -> Result<JsValue, JsValue> {
    to_js(&check_prime_internal(value).map_err(js_err)?)
}

#[wasm_bindgen]
pub fn calculate_percentage_change(original: f64, new: f64) -> Result<JsValue, JsValue> {
    to_js(&percentage_change_internal(original, new).map_err(js_err)?)
}

/// `p`% of `value`
#[wasm_bindgen]
pub fn calculate_percent_of(percent: f64, value: f64) -> Result<f64, JsValue> {
    calc_core::percentage::percent_of(percent, value).map_err(|e| js_err(e.to_string()))
}

/// `part` as a percentage of `whole`
#[wasm_bindgen]
pub fn calculate_percent_ratio(part: f64, whole: f64) -> Result<f64, JsValue> {
    percent_ratio_internal(part, whole).map_err(js_err)
}

/// `value` increased (or decreased, for negative `percent`) by `percent`%
#[wasm_bindgen]
pub fn apply_percentage(value: f64, percent: f64) -> Result<f64, JsValue> {
    apply_percentage_internal(value, percent).map_err(js_err)
}

/// Accepts `12345`, `1.2345e4` or `1.2345 × 10^4`
#[wasm_bindgen]
pub fn to_scientific_notation(input: &str, precision: Option<usize>) -> Result<JsValue, JsValue> {
    to_js(&scientific_internal(input, precision).map_err(js_err)?)
}

/// Units: `C`, `F`, `K`, `R` or their names
#[wasm_bindgen]
pub fn convert_temperature(value: f64, from: &str, to: &str) -> Result<JsValue, JsValue> {
    to_js(&temperature_internal(value, from, to).map_err(js_err)?)
}

/// Units: `m2`, `km²`, `acre`, `square_foot`, ...
#[wasm_bindgen]
pub fn convert_area(value: f64, from: &str, to: &str) -> Result<JsValue, JsValue> {
    to_js(&area_internal(value, from, to).map_err(js_err)?)
}

/// Dates as `YYYY-MM-DD`, both included. Weekend defaults to Saturday and Sunday.
#[wasm_bindgen]
pub fn count_workdays(start: &str, end: &str, weekend: Option<String>) -> Result<JsValue, JsValue> {
    to_js(&workdays_internal(start, end, weekend.as_deref()).map_err(js_err)?)
}

/// Signed calendar days from `start` to `end` (`YYYY-MM-DD`)
#[wasm_bindgen]
pub fn days_between_dates(start: &str, end: &str) -> Result<i64, JsValue> {
    days_between_internal(start, end).map_err(js_err)
}

/// Date `workdays` working days after `start`, skipping the weekend days
#[wasm_bindgen]
pub fn add_workdays(start: &str, workdays: u32, weekend: Option<String>) -> Result<JsValue, JsValue> {
    to_js(&add_workdays_internal(start, workdays, weekend.as_deref()).map_err(js_err)?)
}
