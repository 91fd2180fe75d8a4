// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

#[cfg(test)]
use crate::ZoneId;

/// The catalog of supported city zones, in display order.
///
/// These are the identifiers a zone picker offers; every entry is a valid IANA
/// identifier resolvable with [`ZoneId::new`]. The engine itself accepts any
/// identifier the time-zone database recognizes — the catalog only curates
/// what a typical picker shows.
///
/// # Examples
///
/// ```
/// use meridian::{CITY_ZONES, ZoneId};
///
/// let zones: Vec<ZoneId> = CITY_ZONES
///     .iter()
///     .map(|name| ZoneId::new(name))
///     .collect::<Result<_, _>>()?;
///
/// assert_eq!(zones.len(), CITY_ZONES.len());
///
/// # Ok::<(), meridian::Error>(())
/// ```
pub const CITY_ZONES: &[&str] = &[
    // Americas
    "America/Los_Angeles",
    "America/Chicago",
    "America/New_York",
    "America/Denver",
    "America/Toronto",
    "America/Vancouver",
    "America/Mexico_City",
    "America/Sao_Paulo",
    "America/Bogota",
    // Europe
    "Europe/London",
    "Europe/Paris",
    "Europe/Berlin",
    "Europe/Amsterdam",
    "Europe/Rome",
    "Europe/Madrid",
    "Europe/Zurich",
    "Europe/Athens",
    "Europe/Stockholm",
    "Europe/Oslo",
    // Africa
    "Africa/Cairo",
    "Africa/Nairobi",
    "Africa/Johannesburg",
    "Africa/Accra",
    // Asia
    "Asia/Dubai",
    "Asia/Beirut",
    "Asia/Tokyo",
    "Asia/Hong_Kong",
    "Asia/Seoul",
    "Asia/Singapore",
    "Asia/Kuala_Lumpur",
    "Asia/Bangkok",
    "Asia/Kolkata",
    "Asia/Jakarta",
    // Oceania
    "Australia/Sydney",
    "Australia/Melbourne",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_resolves() {
        for name in CITY_ZONES {
            let zone = ZoneId::new(name).unwrap();

            // Catalog entries are already canonical.
            assert_eq!(zone.name(), *name);
        }
    }

    #[test]
    fn no_duplicates() {
        let mut names: Vec<&str> = CITY_ZONES.to_vec();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), CITY_ZONES.len());
    }

    #[test]
    fn labels_are_presentable() {
        for name in CITY_ZONES {
            let label = ZoneId::new(name).unwrap().city_label();

            assert!(!label.is_empty());
            assert!(!label.contains('_'));
            assert!(!label.contains('/'));
        }
    }
}
