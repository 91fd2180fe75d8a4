// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use crate::Clock;

/// Controls the flow of time in tests.
///
/// `ClockControl` creates [`Clock`] instances whose time is frozen and only
/// moves when advanced explicitly. This makes time-sensitive code — most
/// notably the live-clock registry's once-per-second tick — fast and
/// deterministic to test, without waiting for real time to pass.
///
/// `ClockControl` is available when the `test-util` feature is enabled.
///
/// # Examples
///
/// ## Advancing time manually
///
/// ```
/// use std::time::{Duration, SystemTime};
///
/// use meridian::ClockControl;
///
/// let control = ClockControl::new();
/// let clock = control.to_clock();
///
/// let now = clock.system_time();
///
/// control.advance(Duration::from_secs(1));
///
/// assert_eq!(clock.system_time(), now + Duration::from_secs(1));
/// ```
///
/// # Production code and `ClockControl`
///
/// Never enable the `test-util` feature for production code; only use it in
/// your `dev-dependencies`:
///
/// ```toml
/// meridian = { version = "*", features = ["test-util"] }
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
pub struct ClockControl {
    /// Controlling the flow of time must be consistent across clones on
    /// different threads, hence the mutex.
    state: Arc<Mutex<State>>,
}

#[derive(Debug)]
struct State {
    now: SystemTime,
}

impl Default for State {
    fn default() -> Self {
        Self {
            now: SystemTime::UNIX_EPOCH,
        }
    }
}

impl ClockControl {
    /// Creates a new `ClockControl` frozen at the Unix epoch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ClockControl` frozen at the specified time.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::{Duration, SystemTime};
    ///
    /// use meridian::ClockControl;
    ///
    /// let at = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
    /// let control = ClockControl::new_at(at);
    ///
    /// assert_eq!(control.system_time(), at);
    /// ```
    #[must_use]
    pub fn new_at(time: SystemTime) -> Self {
        let this = Self::new();
        this.advance_to(time);
        this
    }

    /// Creates a new `ClockControl` frozen at the current system time.
    #[must_use]
    pub fn now() -> Self {
        Self::new_at(SystemTime::now())
    }

    /// Creates a [`Clock`] that reads this controlled time.
    ///
    /// All clocks created from the same `ClockControl` observe the same time
    /// adjustments.
    #[must_use]
    pub fn to_clock(&self) -> Clock {
        Clock::with_control(self)
    }

    /// Advances the controlled time by the given duration.
    pub fn advance(&self, duration: Duration) {
        self.with_state(|state| {
            state.now = state.now.checked_add(duration).unwrap_or(state.now);
        });
    }

    /// Moves the controlled time to the given point.
    ///
    /// Moving time backwards is allowed; the registry contract only expects
    /// non-decreasing instants from a production driver, and tests may need to
    /// exercise behavior around arbitrary instants.
    pub fn advance_to(&self, time: SystemTime) {
        self.with_state(|state| {
            state.now = time;
        });
    }

    /// The current controlled time.
    #[must_use]
    pub fn system_time(&self) -> SystemTime {
        self.with_state(|state| state.now)
    }

    fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut State) -> R,
    {
        let mut state = self.state.lock().expect("clock control lock poisoned");
        f(&mut state)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use super::*;

    static_assertions::assert_impl_all!(ClockControl: Debug, Send, Sync, Clone, Default);

    #[test]
    fn new_starts_at_epoch() {
        let control = ClockControl::new();

        assert_eq!(control.system_time(), SystemTime::UNIX_EPOCH);
    }

    #[test]
    fn now_is_close_to_system_time() {
        let before = SystemTime::now();

        let control = ClockControl::now();

        assert!(control.system_time() >= before);
    }

    #[test]
    fn advance_accumulates() {
        let control = ClockControl::new();

        control.advance(Duration::from_secs(1));
        control.advance(Duration::from_secs(2));

        assert_eq!(control.system_time(), SystemTime::UNIX_EPOCH + Duration::from_secs(3));
    }

    #[test]
    fn advance_to_can_move_backwards() {
        let control = ClockControl::new_at(SystemTime::UNIX_EPOCH + Duration::from_secs(100));

        control.advance_to(SystemTime::UNIX_EPOCH + Duration::from_secs(50));

        assert_eq!(control.system_time(), SystemTime::UNIX_EPOCH + Duration::from_secs(50));
    }

    #[test]
    fn clones_share_state() {
        let control = ClockControl::new();
        let clone = control.clone();

        control.advance(Duration::from_secs(5));

        assert_eq!(clone.system_time(), SystemTime::UNIX_EPOCH + Duration::from_secs(5));
    }
}
