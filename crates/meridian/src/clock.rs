// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

use std::time::SystemTime;

/// Provides the engine's single source of "now".
///
/// Working with time is notoriously difficult to test. Every conversion
/// operation in this crate takes its reference instant as an explicit parameter,
/// which keeps the conversion logic deterministic; the clock exists solely so
/// the one place that genuinely needs wall-clock "now" — driving the live-clock
/// registry — can be controlled in tests.
///
/// In production, [`Clock::new`] creates a clock backed by the operating
/// system. When the `test-util` feature is enabled,
/// [`ClockControl`][crate::ClockControl] creates clocks whose time is frozen
/// and advanced manually.
///
/// Cloning a clock is inexpensive and every clone shares the same underlying
/// time source, including controlled time adjustments.
///
/// # Examples
///
/// ```
/// use std::time::SystemTime;
///
/// use meridian::Clock;
///
/// let clock = Clock::new();
///
/// let time1: SystemTime = clock.system_time();
/// let time2: SystemTime = clock.system_time();
///
/// // Time moves forward, though the operating system may adjust
/// // the clock between calls.
/// assert!(time2 >= time1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Clock(ClockRepr);

#[derive(Debug, Clone, Default)]
enum ClockRepr {
    #[default]
    System,
    #[cfg(any(feature = "test-util", test))]
    Control(crate::ClockControl),
}

impl Clock {
    /// Creates a clock backed by the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self(ClockRepr::System)
    }

    /// Creates a frozen clock at the Unix epoch.
    ///
    /// This is a convenience method equivalent to `ClockControl::new().to_clock()`.
    /// The returned clock does not advance on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::SystemTime;
    ///
    /// use meridian::Clock;
    ///
    /// let clock = Clock::new_frozen();
    ///
    /// assert_eq!(clock.system_time(), SystemTime::UNIX_EPOCH);
    /// ```
    #[cfg(any(feature = "test-util", test))]
    #[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
    #[must_use]
    pub fn new_frozen() -> Self {
        crate::ClockControl::new().to_clock()
    }

    /// Creates a frozen clock at the specified time.
    ///
    /// This is a convenience method equivalent to `ClockControl::new_at(time).to_clock()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::{Duration, SystemTime};
    ///
    /// use meridian::Clock;
    ///
    /// let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
    /// let clock = Clock::new_frozen_at(at);
    ///
    /// assert_eq!(clock.system_time(), at);
    /// ```
    #[cfg(any(feature = "test-util", test))]
    #[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
    #[must_use]
    pub fn new_frozen_at(time: SystemTime) -> Self {
        crate::ClockControl::new_at(time).to_clock()
    }

    /// Retrieves the current time as a [`SystemTime`].
    ///
    /// > **Note**: The system time is not monotonic and can be affected by
    /// > operating-system clock changes. The live-clock registry only requires
    /// > successive tick instants to be non-decreasing in practice, and a
    /// > displayed time is accurate as of the moment it was computed.
    #[must_use]
    pub fn system_time(&self) -> SystemTime {
        match &self.0 {
            ClockRepr::System => SystemTime::now(),
            #[cfg(any(feature = "test-util", test))]
            ClockRepr::Control(control) => control.system_time(),
        }
    }

    #[cfg(any(feature = "test-util", test))]
    pub(crate) fn with_control(control: &crate::ClockControl) -> Self {
        Self(ClockRepr::Control(control.clone()))
    }
}

impl AsRef<Self> for Clock {
    fn as_ref(&self) -> &Self {
        self
    }
}
