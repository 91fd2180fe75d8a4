// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};
use std::time::SystemTime;

use crate::{Result, ZoneId};

/// The signed civil-time offset between two zones at a specific instant,
/// expressed in minutes.
///
/// The offset is the target zone's civil minutes since midnight minus the source
/// zone's civil minutes since midnight, both projected at the same instant. It is
/// deliberately **not** wrapped into a canonical `±12h` range: two zones whose
/// civil days differ at the reference instant produce a raw difference in
/// `(-1440, 1440)`, and callers that need a canonical range must wrap
/// explicitly. Event conversion normalizes the resulting wall time instead (see
/// [`convert`][crate::convert]).
///
/// Because zone offsets change across daylight-saving transitions, an
/// `OffsetMinutes` is only meaningful for the instant it was computed at. The
/// resolver performs no caching: correctness over a transition boundary matters
/// more than the cost of a fresh lookup.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, SystemTime};
///
/// use meridian::{OffsetMinutes, ZoneId};
///
/// // 2024-01-15T12:00:00Z, deep in the northern winter.
/// let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_705_320_000);
///
/// let new_york = ZoneId::new("America/New_York")?;
/// let tokyo = ZoneId::new("Asia/Tokyo")?;
///
/// // Tokyo is 14 hours ahead of New York in January.
/// let offset = OffsetMinutes::between(&new_york, &tokyo, at)?;
/// assert_eq!(offset.minutes(), 14 * 60);
/// assert_eq!(offset.to_string(), "+14:00");
///
/// # Ok::<(), meridian::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetMinutes(i32);

impl OffsetMinutes {
    /// A zero offset; what any zone resolves to against itself.
    pub const ZERO: Self = Self(0);

    /// Resolves the civil-time offset from `source` to `target` at the instant `at`.
    ///
    /// Both zones are projected into their civil-time representation
    /// independently; the result is the difference of their minutes since
    /// midnight. Resolving a zone against itself returns exactly
    /// [`OffsetMinutes::ZERO`] for any instant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authority`][crate::Error::Authority] when the instant
    /// lies outside the range representable by the civil-time authority.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::SystemTime;
    ///
    /// use meridian::{OffsetMinutes, ZoneId};
    ///
    /// let zone = ZoneId::new("Europe/Paris")?;
    ///
    /// let offset = OffsetMinutes::between(&zone, &zone, SystemTime::now())?;
    /// assert_eq!(offset, OffsetMinutes::ZERO);
    ///
    /// # Ok::<(), meridian::Error>(())
    /// ```
    pub fn between(source: &ZoneId, target: &ZoneId, at: SystemTime) -> Result<Self> {
        let source_minutes = source.wall_clock_at(at)?.minutes_since_midnight();
        let target_minutes = target.wall_clock_at(at)?.minutes_since_midnight();

        Ok(Self(target_minutes - source_minutes))
    }

    /// The raw signed minute count.
    #[must_use]
    pub const fn minutes(&self) -> i32 {
        self.0
    }
}

impl Display for OffsetMinutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let magnitude = self.0.unsigned_abs();

        write!(f, "{sign}{:02}:{:02}", magnitude / 60, magnitude % 60)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use jiff::civil;
    use jiff::tz::TimeZone;

    use super::*;

    static_assertions::assert_impl_all!(OffsetMinutes: Debug, Send, Sync, Copy);

    /// Builds a deterministic reference instant from a UTC civil date-time.
    fn instant_utc(year: i16, month: i8, day: i8, hour: i8, minute: i8) -> SystemTime {
        let zoned = civil::date(year, month, day)
            .at(hour, minute, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap();

        SystemTime::from(zoned.timestamp())
    }

    fn zone(name: &str) -> ZoneId {
        ZoneId::new(name).unwrap()
    }

    #[test]
    fn self_offset_is_zero() {
        let at = instant_utc(2024, 6, 1, 12, 0);

        for name in ["UTC", "America/New_York", "Asia/Kolkata", "Pacific/Kiritimati"] {
            let z = zone(name);
            assert_eq!(OffsetMinutes::between(&z, &z, at).unwrap(), OffsetMinutes::ZERO);
        }
    }

    #[test]
    fn antisymmetry() {
        let at = instant_utc(2024, 1, 15, 12, 0);

        let new_york = zone("America/New_York");
        let tokyo = zone("Asia/Tokyo");

        let forward = OffsetMinutes::between(&new_york, &tokyo, at).unwrap();
        let backward = OffsetMinutes::between(&tokyo, &new_york, at).unwrap();

        assert_eq!(forward.minutes(), -backward.minutes());
    }

    #[test]
    fn known_winter_offsets() {
        // At 12:00 UTC on a January day every zone below shares the UTC civil date.
        let at = instant_utc(2024, 1, 15, 12, 0);

        let utc = zone("UTC");

        assert_eq!(OffsetMinutes::between(&utc, &zone("America/New_York"), at).unwrap().minutes(), -5 * 60);
        assert_eq!(OffsetMinutes::between(&utc, &zone("Asia/Tokyo"), at).unwrap().minutes(), 9 * 60);
        assert_eq!(OffsetMinutes::between(&utc, &zone("Asia/Kolkata"), at).unwrap().minutes(), 5 * 60 + 30);
    }

    #[test]
    fn not_wrapped_across_civil_dates() {
        // At 23:30 UTC, Tokyo's clocks already read 08:30 on the next civil day.
        // The raw difference is 510 - 1410 = -900, not the wrapped +540.
        let at = instant_utc(2024, 1, 15, 23, 30);

        let offset = OffsetMinutes::between(&zone("UTC"), &zone("Asia/Tokyo"), at).unwrap();

        assert_eq!(offset.minutes(), -900);
    }

    #[test]
    fn dst_transition_changes_offset() {
        // America/New_York springs forward at 2024-03-10T07:00:00Z.
        let before = instant_utc(2024, 3, 10, 6, 0);
        let after = instant_utc(2024, 3, 10, 8, 0);

        let utc = zone("UTC");
        let new_york = zone("America/New_York");

        let offset_before = OffsetMinutes::between(&new_york, &utc, before).unwrap();
        let offset_after = OffsetMinutes::between(&new_york, &utc, after).unwrap();

        assert_eq!(offset_before.minutes(), 5 * 60);
        assert_eq!(offset_after.minutes(), 4 * 60);
    }

    #[test]
    fn no_caching_across_instants() {
        // Two lookups for the same pair at different instants are independent:
        // the half-hour in between shifts both civil times identically here, so
        // the offset stays equal, but each call re-projects from scratch.
        let first = instant_utc(2024, 1, 15, 12, 0);
        let second = instant_utc(2024, 1, 15, 12, 30);

        let utc = zone("UTC");
        let tokyo = zone("Asia/Tokyo");

        assert_eq!(
            OffsetMinutes::between(&utc, &tokyo, first).unwrap(),
            OffsetMinutes::between(&utc, &tokyo, second).unwrap()
        );
    }

    #[test]
    fn display_formats_sign_and_magnitude() {
        assert_eq!(OffsetMinutes::ZERO.to_string(), "+00:00");
        assert_eq!(OffsetMinutes(330).to_string(), "+05:30");
        assert_eq!(OffsetMinutes(-300).to_string(), "-05:00");
        assert_eq!(OffsetMinutes(840).to_string(), "+14:00");
    }
}
