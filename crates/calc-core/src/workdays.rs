//! Working day calculator
//!
//! Counts working days and weekend days between two dates by walking the
//! calendar one day at a time.

use crate::error::CalcError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Which weekdays count as the weekend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workweek {
    pub weekend: Vec<Weekday>,
}

impl Default for Workweek {
    fn default() -> Self {
        Self {
            weekend: vec![Weekday::Sat, Weekday::Sun],
        }
    }
}

impl Workweek {
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend.contains(&date.weekday())
    }

    pub fn has_working_days(&self) -> bool {
        let mut day = Weekday::Mon;
        for _ in 0..7 {
            if !self.weekend.contains(&day) {
                return true;
            }
            day = day.succ();
        }
        false
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkdaysSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Calendar days in the range, both ends included
    pub total_days: u32,
    pub workdays: u32,
    pub weekends: u32,
    /// Share of working days, rounded to two decimals
    pub percentage: f64,
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate, CalcError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| CalcError::InvalidDate(format!("{}: {}", input, e)))
}

/// Count working days with a Saturday/Sunday weekend
pub fn count_workdays(start: NaiveDate, end: NaiveDate) -> Result<WorkdaysSummary, CalcError> {
    count_workdays_with(start, end, &Workweek::default())
}

/// Count working days between two dates, inclusive
pub fn count_workdays_with(
    start: NaiveDate,
    end: NaiveDate,
    week: &Workweek,
) -> Result<WorkdaysSummary, CalcError> {
    if start > end {
        return Err(CalcError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let mut workdays = 0u32;
    let mut weekends = 0u32;

    for date in start.iter_days().take_while(|d| *d <= end) {
        if week.is_weekend(date) {
            weekends += 1;
        } else {
            workdays += 1;
        }
    }

    let total_days = workdays + weekends;
    let percentage = round2(workdays as f64 / total_days as f64 * 100.0);

    tracing::debug!(%start, %end, total_days, workdays, "counted workdays");

    Ok(WorkdaysSummary {
        start,
        end,
        total_days,
        workdays,
        weekends,
        percentage,
    })
}

/// Signed number of calendar days from `start` to `end`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Date reached after `days` working days, not counting `start` itself
pub fn add_workdays(start: NaiveDate, days: u32, week: &Workweek) -> Result<NaiveDate, CalcError> {
    if !week.has_working_days() {
        return Err(CalcError::InvalidDate(
            "workweek has no working days".to_string(),
        ));
    }

    let mut current = start;
    let mut remaining = days;

    while remaining > 0 {
        current = current
            .succ_opt()
            .ok_or_else(|| CalcError::InvalidDate("date overflow".to_string()))?;
        if !week.is_weekend(current) {
            remaining -= 1;
        }
    }

    Ok(current)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_week() {
        // 2024-01-01 is a Monday
        let summary = count_workdays(date(2024, 1, 1), date(2024, 1, 7)).unwrap();
        assert_eq!(summary.total_days, 7);
        assert_eq!(summary.workdays, 5);
        assert_eq!(summary.weekends, 2);
        assert_eq!(summary.percentage, 71.43);
    }

    #[test]
    fn test_single_day() {
        let summary = count_workdays(date(2024, 1, 6), date(2024, 1, 6)).unwrap();
        assert_eq!(summary.total_days, 1);
        assert_eq!(summary.workdays, 0);
        assert_eq!(summary.percentage, 0.0);
    }

    #[test]
    fn test_leap_february() {
        let summary = count_workdays(date(2024, 2, 1), date(2024, 2, 29)).unwrap();
        assert_eq!(summary.total_days, 29);
        assert_eq!(summary.workdays, 21);
    }

    #[test]
    fn test_reversed_range_fails() {
        let result = count_workdays(date(2024, 1, 7), date(2024, 1, 1));
        assert!(matches!(result, Err(CalcError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_custom_weekend() {
        let week = Workweek {
            weekend: vec![Weekday::Fri, Weekday::Sat],
        };
        let summary = count_workdays_with(date(2024, 1, 1), date(2024, 1, 7), &week).unwrap();
        assert_eq!(summary.weekends, 2);
        assert_eq!(summary.workdays, 5);
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 12, 31)), 365);
        assert_eq!(days_between(date(2024, 1, 10), date(2024, 1, 1)), -9);
    }

    #[test]
    fn test_add_workdays_skips_weekend() {
        // Friday + 1 working day = Monday
        let result = add_workdays(date(2024, 1, 5), 1, &Workweek::default()).unwrap();
        assert_eq!(result, date(2024, 1, 8));
    }

    #[test]
    fn test_add_workdays_rejects_all_weekend() {
        let week = Workweek {
            weekend: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
        };
        assert!(add_workdays(date(2024, 1, 1), 3, &week).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-15").unwrap(), date(2024, 3, 15));
        assert!(parse_date("15/03/2024").is_err());
    }
}
