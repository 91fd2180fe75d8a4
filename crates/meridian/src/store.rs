// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

use crate::ZoneId;

/// The persistence port consumed by [`ClockRegistry`][crate::ClockRegistry].
///
/// The engine treats persistence as an external key-value collaborator: it
/// hands over an opaque payload on every successful subscribe or unsubscribe
/// and may ask for the previously stored payload on startup. The mechanics of
/// where and how the payload is kept belong entirely to the implementor.
///
/// The payload produced by the engine is a JSON array of zone identifier
/// strings in subscription order (see [`encode_zones`]). Stored data is
/// decoded leniently: corrupt or unparsable payloads are treated as an empty
/// list, never as a fatal startup error (see [`decode_zones`]).
pub trait ZoneStore {
    /// Returns the previously stored payload, or `None` when nothing was stored.
    fn load(&mut self) -> Option<String>;

    /// Stores the payload, replacing any previous one.
    fn save(&mut self, payload: &str);
}

/// Encodes an ordered zone list into the persisted payload format.
///
/// # Examples
///
/// ```
/// use meridian::{ZoneId, encode_zones};
///
/// let zones = vec![ZoneId::new("Europe/London")?, ZoneId::new("Asia/Tokyo")?];
///
/// assert_eq!(encode_zones(&zones), r#"["Europe/London","Asia/Tokyo"]"#);
///
/// # Ok::<(), meridian::Error>(())
/// ```
#[must_use]
pub fn encode_zones(zones: &[ZoneId]) -> String {
    let names: Vec<&str> = zones.iter().map(ZoneId::name).collect();

    // Serializing a list of strings cannot fail.
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_owned())
}

/// Decodes a persisted payload back into an ordered zone list.
///
/// Decoding never fails: a corrupt or unparsable payload yields an empty list,
/// and identifiers that the time-zone database no longer recognizes are skipped
/// with a warning. Order is preserved for the entries that survive.
///
/// # Examples
///
/// ```
/// use meridian::decode_zones;
///
/// let zones = decode_zones(r#"["Europe/London","Asia/Tokyo"]"#);
/// assert_eq!(zones.len(), 2);
///
/// // Corrupt payloads decode to an empty list rather than erroring.
/// assert!(decode_zones("{not json").is_empty());
/// ```
#[must_use]
pub fn decode_zones(payload: &str) -> Vec<ZoneId> {
    let names: Vec<String> = match serde_json::from_str(payload) {
        Ok(names) => names,
        Err(error) => {
            tracing::warn!(%error, "discarding corrupt persisted zone list");
            return Vec::new();
        }
    };

    names
        .iter()
        .filter_map(|name| match ZoneId::new(name) {
            Ok(zone) => Some(zone),
            Err(error) => {
                tracing::warn!(%name, %error, "skipping unrecognized persisted zone");
                None
            }
        })
        .collect()
}
