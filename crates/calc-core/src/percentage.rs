//! Percentage calculators
//!
//! Percentage change between two values plus the usual "X% of Y" helpers.

use crate::error::{ensure_finite, CalcError};
use serde::{Deserialize, Serialize};

/// Direction of a change between two values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Increase,
    Decrease,
    NoChange,
}

/// Result of comparing an original and a new value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PercentageChange {
    pub original: f64,
    pub new: f64,
    /// Magnitude of the change in percent. `None` when the original is zero
    /// and the new value is not (growth from nothing is undefined).
    pub percentage_change: Option<f64>,
    /// `(new - original) / original * 100`, same `None` rule as above
    pub signed_percentage: Option<f64>,
    pub absolute_change: f64,
    pub change_type: ChangeType,
}

impl PercentageChange {
    /// True when the percentage could not be computed
    pub fn is_undefined(&self) -> bool {
        self.percentage_change.is_none()
    }
}

/// Compute the percentage change from `original` to `new`
pub fn percentage_change(original: f64, new: f64) -> Result<PercentageChange, CalcError> {
    ensure_finite(original)?;
    ensure_finite(new)?;

    let delta = new - original;
    let change_type = if new > original {
        ChangeType::Increase
    } else if new < original {
        ChangeType::Decrease
    } else {
        ChangeType::NoChange
    };

    let signed_percentage = if original == 0.0 {
        if new == 0.0 {
            Some(0.0)
        } else {
            tracing::warn!(new, "percentage change from zero is undefined");
            None
        }
    } else {
        Some(delta / original * 100.0)
    };

    Ok(PercentageChange {
        original,
        new,
        percentage_change: signed_percentage.map(f64::abs),
        signed_percentage,
        absolute_change: delta.abs(),
        change_type,
    })
}

/// What is `percent`% of `value`
pub fn percent_of(percent: f64, value: f64) -> Result<f64, CalcError> {
    Ok(ensure_finite(percent)? * ensure_finite(value)? / 100.0)
}

/// `part` is what percent of `whole`
pub fn percent_ratio(part: f64, whole: f64) -> Result<f64, CalcError> {
    ensure_finite(part)?;
    ensure_finite(whole)?;
    if whole == 0.0 {
        return Err(CalcError::DivisionByZero(
            "whole value must not be zero".to_string(),
        ));
    }
    Ok(part * 100.0 / whole)
}

/// Increase (positive percent) or decrease (negative percent) a value
pub fn apply_percentage(value: f64, percent: f64) -> Result<f64, CalcError> {
    let value = ensure_finite(value)?;
    Ok(value + value * ensure_finite(percent)? / 100.0)
}
