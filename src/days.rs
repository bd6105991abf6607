//! Duration input parsing and sampling.
//!
//! User-entered durations are either a single day count (`"10"`) or an
//! inclusive range (`"1-100"`). Each buried card independently draws a
//! uniform number of days from the range.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{NburyError, Result};

/// Inclusive range of bury durations, in whole days.
///
/// Invariant: `1 <= low <= high`. A reversed range such as `30-3` is
/// rejected at parse time, never swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaysSpec {
    low: u32,
    high: u32,
}

impl DaysSpec {
    pub fn new(low: u32, high: u32) -> Result<Self> {
        if low < 1 {
            return Err(NburyError::InvalidDays(format!(
                "days must be at least 1, got {low}"
            )));
        }
        if low > high {
            return Err(NburyError::InvalidDays(format!(
                "range start {low} exceeds end {high}"
            )));
        }
        Ok(Self { low, high })
    }

    pub fn fixed(days: u32) -> Result<Self> {
        Self::new(days, days)
    }

    #[must_use]
    pub fn low(&self) -> u32 {
        self.low
    }

    #[must_use]
    pub fn high(&self) -> u32 {
        self.high
    }

    /// Whether the range degenerates to a single value.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.low == self.high
    }

    /// Draw a duration uniformly, inclusive of both endpoints.
    pub fn sample(&self, rng: &mut impl Rng) -> u32 {
        if self.low == self.high {
            return self.low;
        }
        rng.random_range(self.low..=self.high)
    }
}

impl FromStr for DaysSpec {
    type Err = NburyError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();

        let invalid = || {
            NburyError::InvalidDays(format!(
                "'{text}' is not a number or range like '1-100'"
            ))
        };

        if let Some((low, high)) = text.split_once('-') {
            let low: u32 = low.parse().map_err(|_| invalid())?;
            let high: u32 = high.parse().map_err(|_| invalid())?;
            Self::new(low, high)
        } else {
            let days: u32 = text.parse().map_err(|_| invalid())?;
            Self::fixed(days)
        }
    }
}

impl fmt::Display for DaysSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fixed() {
            write!(f, "{}", self.low)
        } else {
            write!(f, "{}-{}", self.low, self.high)
        }
    }
}
