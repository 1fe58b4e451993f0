//! Calculator kernels for the toolbox pages
//!
//! Each module backs one calculator page and is independent of the others:
//! - `prime`: primality check, divisors and factorization
//! - `percentage`: percentage change and "X% of Y" helpers
//! - `scientific`: scientific and engineering notation
//! - `units`: temperature and area conversion
//! - `workdays`: working days between dates

pub mod error;
pub mod percentage;
pub mod prime;
pub mod scientific;
pub mod units;
pub mod workdays;

pub use error::CalcError;
pub use percentage::{percentage_change, ChangeType, PercentageChange};
pub use prime::{analyze, factors, is_prime, prime_factorization, PrimeAnalysis, PrimeFactor};
pub use scientific::{parse_notation, NotationResult, ScientificNotation};
pub use units::{
    convert_area, convert_temperature, convert_temperature_all, AreaUnit, TemperatureTable,
    TemperatureUnit,
};
pub use workdays::{count_workdays, count_workdays_with, parse_date, Workweek, WorkdaysSummary};
