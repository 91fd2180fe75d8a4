// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::{Error, Result};

/// Number of civil minutes in one day.
pub(crate) const MINUTES_PER_DAY: i32 = 24 * 60;

/// A civil hour/minute pair with no associated date.
///
/// A `WallClockTime` represents "this clock face reading" independent of which
/// calendar day it falls on in any given zone. Hours are in `0..=23` and minutes
/// in `0..=59`; values outside these ranges are rejected with
/// [`Error::InvalidTime`] at construction, so a `WallClockTime` is valid by
/// construction everywhere else in the engine.
///
/// # Examples
///
/// ## Construction and display
///
/// ```
/// use meridian::WallClockTime;
///
/// let time = WallClockTime::new(9, 5)?;
/// assert_eq!(time.to_string(), "09:05");
///
/// # Ok::<(), meridian::Error>(())
/// ```
///
/// ## Parsing
///
/// ```
/// use meridian::WallClockTime;
///
/// let time: WallClockTime = "14:30".parse()?;
/// assert_eq!((time.hour(), time.minute()), (14, 30));
///
/// assert!("24:00".parse::<WallClockTime>().is_err());
///
/// # Ok::<(), meridian::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallClockTime {
    hour: u8,
    minute: u8,
}

impl WallClockTime {
    /// The start of the civil day, `00:00`.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Creates a wall-clock time from an hour and minute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] when the hour is not in `0..=23` or the
    /// minute is not in `0..=59`.
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(Error::invalid_time(format!("{hour:02}:{minute:02}")));
        }

        Ok(Self { hour, minute })
    }

    /// Creates a wall-clock time from minutes since midnight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] when the value is not in `0..1440`.
    ///
    /// # Examples
    ///
    /// ```
    /// use meridian::WallClockTime;
    ///
    /// let time = WallClockTime::from_minutes_since_midnight(870)?;
    /// assert_eq!(time.to_string(), "14:30");
    ///
    /// # Ok::<(), meridian::Error>(())
    /// ```
    pub fn from_minutes_since_midnight(minutes: i32) -> Result<Self> {
        if !(0..MINUTES_PER_DAY).contains(&minutes) {
            return Err(Error::invalid_time(format!("{minutes} minutes since midnight")));
        }

        Ok(Self {
            hour: (minutes / 60).unsigned_abs() as u8,
            minute: (minutes % 60).unsigned_abs() as u8,
        })
    }

    /// The hour of the day, in `0..=23`.
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// The minute of the hour, in `0..=59`.
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// This time expressed as minutes since midnight, in `0..1440`.
    #[must_use]
    pub const fn minutes_since_midnight(&self) -> i32 {
        self.hour as i32 * 60 + self.minute as i32
    }

    /// Adds a signed minute delta, normalizing into `[0, 1440)` with a true modulo.
    ///
    /// The returned [`DayRollover`] reports whether the un-normalized sum fell
    /// before midnight ([`DayRollover::Previous`]), within the same civil day
    /// ([`DayRollover::Same`]), or at or past the next midnight
    /// ([`DayRollover::Next`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use meridian::{DayRollover, WallClockTime};
    ///
    /// let nine = WallClockTime::new(9, 0)?;
    ///
    /// // Five hours ahead stays within the same day.
    /// assert_eq!(nine.with_minutes_added(300), (WallClockTime::new(14, 0)?, DayRollover::Same));
    ///
    /// // Twenty hours ahead rolls over into the next day: 29:00 becomes 05:00.
    /// assert_eq!(nine.with_minutes_added(1200), (WallClockTime::new(5, 0)?, DayRollover::Next));
    ///
    /// # Ok::<(), meridian::Error>(())
    /// ```
    #[must_use]
    pub fn with_minutes_added(&self, delta: i32) -> (Self, DayRollover) {
        let sum = self.minutes_since_midnight() + delta;

        let rollover = if sum < 0 {
            DayRollover::Previous
        } else if sum >= MINUTES_PER_DAY {
            DayRollover::Next
        } else {
            DayRollover::Same
        };

        let normalized = sum.rem_euclid(MINUTES_PER_DAY);

        let time = Self {
            hour: (normalized / 60).unsigned_abs() as u8,
            minute: (normalized % 60).unsigned_abs() as u8,
        };

        (time, rollover)
    }
}

impl Display for WallClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for WallClockTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (hour, minute) = s.split_once(':').ok_or_else(|| Error::invalid_time(s))?;

        let hour = hour.parse::<u8>().map_err(|_| Error::invalid_time(s))?;
        let minute = minute.parse::<u8>().map_err(|_| Error::invalid_time(s))?;

        Self::new(hour, minute).map_err(|_| Error::invalid_time(s))
    }
}

/// How a converted wall time relates to the source event's civil day.
///
/// Conversion adds a signed minute offset to the event time; when the sum leaves
/// the `[0, 1440)` range, the displayed time belongs to the previous or next
/// civil day relative to the source date. The engine surfaces this so a caller
/// can show "previous day" / "next day" without recomputing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayRollover {
    /// The converted time falls on the day before the source date.
    Previous,
    /// The converted time falls on the source date.
    Same,
    /// The converted time falls on the day after the source date.
    Next,
}

impl DayRollover {
    /// The rollover as a signed day count: `-1`, `0`, or `1`.
    #[must_use]
    pub const fn days(&self) -> i8 {
        match self {
            Self::Previous => -1,
            Self::Same => 0,
            Self::Next => 1,
        }
    }
}
