// Relative date rule: `<+|-><amount> <DAY|WEEK|MONTH|YEAR>`
//
// Parsed once per run from the `date_filter` option and discarded afterwards.
// The offset is applied to "today" as a first-class chrono expression, never
// as embedded SQL.

use crate::domain::error::{DomainError, Result};
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Offset direction (`+` or `-` prefix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Add,
    Subtract,
}

/// Calendar unit of the offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateUnit {
    Day,
    Week,
    Month,
    Year,
}

impl FromStr for DateUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DAY" => Ok(DateUnit::Day),
            "WEEK" => Ok(DateUnit::Week),
            "MONTH" => Ok(DateUnit::Month),
            "YEAR" => Ok(DateUnit::Year),
            other => Err(DomainError::InvalidRule(format!(
                "only WEEK/DAY/MONTH/YEAR is allowed as interval, got '{}'",
                other
            ))),
        }
    }
}

/// A parsed relative-date comparison rule
///
/// Invariant: `amount > 0`. Immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRule {
    pub direction: Direction,
    pub amount: u32,
    pub unit: DateUnit,
}

impl FromStr for DateRule {
    type Err = DomainError;

    /// Parse a raw rule string, e.g. `+1 DAY` or `-2 week`
    ///
    /// Input is trimmed and case-normalized first.
    fn from_str(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_uppercase();

        let (direction, rest) = match normalized.strip_prefix('+') {
            Some(rest) => (Direction::Add, rest),
            None => match normalized.strip_prefix('-') {
                Some(rest) => (Direction::Subtract, rest),
                None => {
                    return Err(DomainError::InvalidRule(
                        "only + or - is allowed as prefix".to_string(),
                    ))
                }
            },
        };

        // Exactly one space between amount and unit
        let tokens: Vec<&str> = rest.split(' ').collect();
        if tokens.len() != 2 || tokens[0].is_empty() || tokens[1].is_empty() {
            return Err(DomainError::InvalidRule(format!(
                "expected '<amount> <unit>' after the sign, got '{}'",
                rest.trim()
            )));
        }

        let amount: u32 = tokens[0].parse().map_err(|_| {
            DomainError::InvalidRule(format!(
                "only a numeric amount is allowed, got '{}'",
                tokens[0]
            ))
        })?;
        if amount == 0 {
            return Err(DomainError::InvalidRule(
                "amount must be a positive integer".to_string(),
            ));
        }

        let unit: DateUnit = tokens[1].parse()?;

        Ok(DateRule {
            direction,
            amount,
            unit,
        })
    }
}

impl DateRule {
    /// Apply the offset to `today`, yielding the calendar day the birthday
    /// must fall on. `+1 DAY` selects contacts whose birthday is tomorrow.
    pub fn target_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        let months_overflow =
            || DomainError::DateOutOfRange(format!("{} YEAR exceeds the calendar range", self.amount));

        let year_months = || self.amount.checked_mul(12).ok_or_else(months_overflow);

        let shifted = match (self.direction, self.unit) {
            (Direction::Add, DateUnit::Day) => today.checked_add_days(Days::new(self.amount as u64)),
            (Direction::Add, DateUnit::Week) => {
                today.checked_add_days(Days::new(self.amount as u64 * 7))
            }
            (Direction::Add, DateUnit::Month) => today.checked_add_months(Months::new(self.amount)),
            (Direction::Add, DateUnit::Year) => {
                today.checked_add_months(Months::new(year_months()?))
            }
            (Direction::Subtract, DateUnit::Day) => {
                today.checked_sub_days(Days::new(self.amount as u64))
            }
            (Direction::Subtract, DateUnit::Week) => {
                today.checked_sub_days(Days::new(self.amount as u64 * 7))
            }
            (Direction::Subtract, DateUnit::Month) => {
                today.checked_sub_months(Months::new(self.amount))
            }
            (Direction::Subtract, DateUnit::Year) => {
                today.checked_sub_months(Months::new(year_months()?))
            }
        };

        shifted.ok_or_else(|| {
            DomainError::DateOutOfRange(format!("{:?} {} {:?} from {}", self.direction, self.amount, self.unit, today))
        })
    }
}
