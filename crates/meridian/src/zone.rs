// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::time::SystemTime;

use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::{Error, Result, WallClockTime};

/// A validated IANA time-zone identifier, such as `America/New_York`.
///
/// A `ZoneId` names a geographic civil-time region with its own daylight-saving
/// rules. Construction goes through the civil-time authority: identifiers that the
/// time-zone database does not recognize are rejected with
/// [`Error::UnknownZone`] and are never silently mapped to a default zone.
///
/// The identifier is canonicalized on construction, so lookups are
/// case-insensitive while equality, ordering, and hashing all use the canonical
/// spelling.
///
/// Cloning a `ZoneId` is inexpensive; the underlying time-zone data is shared.
///
/// # Examples
///
/// ## Construction and canonicalization
///
/// ```
/// use meridian::ZoneId;
///
/// let zone = ZoneId::new("america/NEW_YORK")?;
/// assert_eq!(zone.name(), "America/New_York");
///
/// # Ok::<(), meridian::Error>(())
/// ```
///
/// ## Unrecognized identifiers are rejected
///
/// ```
/// use meridian::ZoneId;
///
/// assert!(ZoneId::new("Atlantis/Underwater").is_err());
/// ```
///
/// ## Parsing
///
/// ```
/// use meridian::ZoneId;
///
/// let zone: ZoneId = "Europe/Paris".parse()?;
/// assert_eq!(zone.city_label(), "Paris");
///
/// # Ok::<(), meridian::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ZoneId {
    tz: TimeZone,
    name: Box<str>,
}

impl ZoneId {
    /// Resolves an IANA identifier against the time-zone database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownZone`] when the identifier is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use meridian::ZoneId;
    ///
    /// let zone = ZoneId::new("Asia/Tokyo")?;
    /// assert_eq!(zone.name(), "Asia/Tokyo");
    ///
    /// # Ok::<(), meridian::Error>(())
    /// ```
    pub fn new(name: &str) -> Result<Self> {
        let tz = TimeZone::get(name).map_err(|err| Error::unknown_zone(name, err))?;

        // Prefer the canonical spelling from the database; fixed-offset zones
        // have no IANA name, so fall back to the caller's input.
        let canonical = tz.iana_name().unwrap_or(name).into();

        Ok(Self { tz, name: canonical })
    }

    /// The canonical IANA identifier of this zone.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A human-readable city label derived from the identifier.
    ///
    /// The label is the segment after the last `/` with underscores replaced by
    /// spaces, which matches how the supported-city catalog is displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use meridian::ZoneId;
    ///
    /// let zone = ZoneId::new("Asia/Kuala_Lumpur")?;
    /// assert_eq!(zone.city_label(), "Kuala Lumpur");
    ///
    /// # Ok::<(), meridian::Error>(())
    /// ```
    #[must_use]
    pub fn city_label(&self) -> String {
        let city = self.name.rsplit('/').next().unwrap_or(&self.name);
        city.replace('_', " ")
    }

    /// The wall-clock time this zone's clocks display at the given instant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authority`] when the instant lies outside the range
    /// representable by the civil-time authority.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::{Duration, SystemTime};
    ///
    /// use meridian::ZoneId;
    ///
    /// // 2000-02-29T01:30:00Z
    /// let at = SystemTime::UNIX_EPOCH + Duration::from_secs(951_787_800);
    ///
    /// let tokyo = ZoneId::new("Asia/Tokyo")?;
    /// assert_eq!(tokyo.wall_clock_at(at)?.to_string(), "10:30");
    ///
    /// # Ok::<(), meridian::Error>(())
    /// ```
    pub fn wall_clock_at(&self, at: SystemTime) -> Result<WallClockTime> {
        let zoned = self.zoned(at)?;

        // The authority guarantees hours in 0..=23 and minutes in 0..=59,
        // both non-negative.
        WallClockTime::new(zoned.hour().unsigned_abs(), zoned.minute().unsigned_abs())
    }

    /// The civil date this zone's clocks display at the given instant.
    pub(crate) fn civil_date_at(&self, at: SystemTime) -> Result<jiff::civil::Date> {
        Ok(self.zoned(at)?.date())
    }

    /// Projects an absolute instant into this zone's civil time.
    pub(crate) fn zoned(&self, at: SystemTime) -> Result<Zoned> {
        let timestamp = jiff::Timestamp::try_from(at).map_err(Error::authority)?;
        Ok(timestamp.to_zoned(self.tz.clone()))
    }
}

impl FromStr for ZoneId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for ZoneId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl PartialEq for ZoneId {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ZoneId {}

impl Hash for ZoneId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for ZoneId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZoneId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn assert_types() {
        static_assertions::assert_impl_all!(ZoneId: Send, Sync, Clone);
    }

    #[test]
    fn new_ok() {
        let zone = ZoneId::new("America/New_York").unwrap();

        assert_eq!(zone.name(), "America/New_York");
    }

    #[test]
    fn new_canonicalizes_case() {
        let zone = ZoneId::new("europe/LONDON").unwrap();

        assert_eq!(zone.name(), "Europe/London");
    }

    #[test]
    fn new_unknown_zone() {
        let error = ZoneId::new("Atlantis/Underwater").unwrap_err();

        assert!(matches!(error, Error::UnknownZone { ref name, .. } if name == "Atlantis/Underwater"));
    }

    #[test]
    fn new_never_defaults() {
        // An empty identifier must be rejected, not mapped to UTC or local time.
        ZoneId::new("").unwrap_err();
    }

    #[test]
    fn from_str_ok() {
        let zone: ZoneId = "Australia/Sydney".parse().unwrap();

        assert_eq!(zone.name(), "Australia/Sydney");
    }

    #[test]
    fn city_label_replaces_underscores() {
        assert_eq!(ZoneId::new("America/Los_Angeles").unwrap().city_label(), "Los Angeles");
        assert_eq!(ZoneId::new("Asia/Kuala_Lumpur").unwrap().city_label(), "Kuala Lumpur");
        assert_eq!(ZoneId::new("Europe/Paris").unwrap().city_label(), "Paris");
    }

    #[test]
    fn eq_and_hash_by_canonical_name() {
        let lower = ZoneId::new("asia/tokyo").unwrap();
        let canonical = ZoneId::new("Asia/Tokyo").unwrap();

        assert_eq!(lower, canonical);

        let mut set = std::collections::HashSet::new();
        assert!(set.insert(lower));
        assert!(!set.insert(canonical));
    }

    #[test]
    fn ordering_by_name() {
        let london = ZoneId::new("Europe/London").unwrap();
        let tokyo = ZoneId::new("Asia/Tokyo").unwrap();

        assert!(tokyo < london);
    }

    #[test]
    fn display_is_canonical_name() {
        let zone = ZoneId::new("Africa/Cairo").unwrap();

        assert_eq!(zone.to_string(), "Africa/Cairo");
    }

    #[test]
    fn wall_clock_at_fixed_instant() {
        // 2000-02-29T01:30:00Z
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(951_787_800);

        let utc = ZoneId::new("UTC").unwrap();
        let tokyo = ZoneId::new("Asia/Tokyo").unwrap();

        assert_eq!(utc.wall_clock_at(at).unwrap().to_string(), "01:30");
        assert_eq!(tokyo.wall_clock_at(at).unwrap().to_string(), "10:30");
    }
}
