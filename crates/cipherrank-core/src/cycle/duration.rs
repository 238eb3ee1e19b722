use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
pub const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Remaining time in a cycle, broken into calendar units.
///
/// Always normalized: `seconds` and `minutes` stay below 60 and `hours`
/// below 24. `days` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CycleDuration {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl CycleDuration {
    pub const ZERO: CycleDuration = CycleDuration {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Build a duration from explicit units.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::FieldOutOfRange`] if any field exceeds its
    /// modulus.
    pub fn new(days: u64, hours: u8, minutes: u8, seconds: u8) -> Result<Self, ValidationError> {
        check("hours", hours, 24)?;
        check("minutes", minutes, 60)?;
        check("seconds", seconds, 60)?;
        Ok(Self {
            days,
            hours,
            minutes,
            seconds,
        })
    }

    /// Normalize a flat second count.
    pub fn from_secs(total: u64) -> Self {
        Self {
            days: total / SECS_PER_DAY,
            hours: ((total % SECS_PER_DAY) / SECS_PER_HOUR) as u8,
            minutes: ((total % SECS_PER_HOUR) / SECS_PER_MINUTE) as u8,
            seconds: (total % SECS_PER_MINUTE) as u8,
        }
    }

    /// Total seconds until zero.
    ///
    /// Saturates instead of overflowing on absurd day counts.
    pub fn total_secs(&self) -> u64 {
        self.days
            .saturating_mul(SECS_PER_DAY)
            .saturating_add(self.hours as u64 * SECS_PER_HOUR)
            .saturating_add(self.minutes as u64 * SECS_PER_MINUTE)
            .saturating_add(self.seconds as u64)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Step one second towards zero, borrowing from the next larger unit.
    ///
    /// Returns `false` (leaving the value untouched) when already at zero.
    pub fn decrement(&mut self) -> bool {
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        } else if self.hours > 0 {
            self.hours -= 1;
            self.minutes = 59;
            self.seconds = 59;
        } else if self.days > 0 {
            self.days -= 1;
            self.hours = 23;
            self.minutes = 59;
            self.seconds = 59;
        } else {
            return false;
        }
        true
    }

    pub fn is_normalized(&self) -> bool {
        self.hours < 24 && self.minutes < 60 && self.seconds < 60
    }
}

fn check(field: &'static str, value: u8, limit: u64) -> Result<(), ValidationError> {
    if value as u64 >= limit {
        return Err(ValidationError::FieldOutOfRange {
            field,
            value: value as u64,
            limit,
        });
    }
    Ok(())
}

impl fmt::Display for CycleDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
