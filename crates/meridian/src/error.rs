// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

/// The result type for fallible operations in this crate that use the [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur when working with the clock engine.
///
/// Every variant represents a local, recoverable condition that is reported to the
/// immediate caller; none of them should ever crash the process. The engine has no
/// fatal error class of its own — an unrecoverable failure of the underlying
/// civil-time authority is carried opaquely by [`Error::Authority`] rather than
/// being swallowed.
///
/// # Examples
///
/// ```
/// use meridian::{Error, ZoneId};
///
/// let error = ZoneId::new("Atlantis/Underwater").unwrap_err();
/// assert!(matches!(error, Error::UnknownZone { .. }));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A zone identifier was not recognized by the civil-time authority.
    ///
    /// Unrecognized identifiers are always rejected, never silently mapped to a
    /// default zone.
    #[error("time zone identifier `{name}` is not recognized")]
    UnknownZone {
        /// The identifier as supplied by the caller.
        name: String,
        /// The underlying lookup failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A wall-clock time was malformed.
    ///
    /// Hours must be in `0..=23` and minutes in `0..=59`. The input is rejected
    /// before any partial computation takes place.
    #[error("invalid wall-clock time `{value}`")]
    InvalidTime {
        /// A rendition of the rejected input.
        value: String,
    },

    /// A clock subscription already exists for the zone.
    ///
    /// This condition is non-fatal by design: the registry refuses silent duplicate
    /// registration so that the active set stays a true set. Callers that want
    /// idempotent behavior can treat this error as a no-op signal.
    #[error("zone `{zone}` already has an active clock")]
    DuplicateZone {
        /// The canonical identifier of the zone that is already subscribed.
        zone: String,
    },

    /// The civil-time authority itself failed.
    ///
    /// This is an opaque propagation of an unrecoverable failure, such as an
    /// instant that lies outside the range representable by the authority.
    #[error("civil-time authority failure")]
    Authority(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    pub(crate) fn unknown_zone(
        name: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::UnknownZone {
            name: name.into(),
            source: Box::new(source),
        }
    }

    pub(crate) fn invalid_time(value: impl Into<String>) -> Self {
        Self::InvalidTime { value: value.into() }
    }

    pub(crate) fn duplicate_zone(zone: impl Into<String>) -> Self {
        Self::DuplicateZone { zone: zone.into() }
    }

    pub(crate) fn authority(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Authority(Box::new(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assert_types() {
        static_assertions::assert_impl_all!(Error: Send, Sync, std::error::Error);
    }

    #[test]
    fn unknown_zone_display() {
        let error = Error::unknown_zone("Atlantis/Underwater", std::io::Error::other("lookup failed"));

        assert_eq!(error.to_string(), "time zone identifier `Atlantis/Underwater` is not recognized");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn invalid_time_display() {
        let error = Error::invalid_time("25:00");

        assert_eq!(error.to_string(), "invalid wall-clock time `25:00`");
    }

    #[test]
    fn duplicate_zone_display() {
        let error = Error::duplicate_zone("Asia/Tokyo");

        assert_eq!(error.to_string(), "zone `Asia/Tokyo` already has an active clock");
    }

    #[test]
    fn authority_preserves_source() {
        let error = Error::authority(std::io::Error::other("out of range"));

        assert_eq!(error.to_string(), "civil-time authority failure");
        assert_eq!(std::error::Error::source(&error).unwrap().to_string(), "out of range");
    }
}
