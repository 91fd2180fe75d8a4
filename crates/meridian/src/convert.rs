// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

use std::time::SystemTime;

use crate::{DayRollover, Error, OffsetMinutes, Result, WallClockTime, ZoneId};

/// The wall time an event falls on in one target zone.
///
/// Produced fresh by [`convert`] for every conversion request; results are not
/// retained by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// The target zone this result applies to.
    pub zone: ZoneId,
    /// The event's wall-clock time in the target zone.
    pub wall_time: WallClockTime,
    /// Whether the wall time falls on the previous, same, or next civil day
    /// relative to the source date.
    pub rollover: DayRollover,
    /// The civil date of the event in the target zone, as an ISO `YYYY-MM-DD`
    /// label ready for display.
    pub date_label: String,
}

/// Converts an event's wall time in a source zone into the equivalent wall time
/// in each target zone.
///
/// For every target zone the civil-time offset from `source` is resolved at the
/// anchor instant `at` (see [`OffsetMinutes::between`]), added to the event time,
/// and normalized into `[0, 1440)` with a true modulo. When the un-normalized sum
/// leaves that range, the result's [`rollover`][ConversionResult::rollover]
/// reports the ±1 day shift and the [`date_label`][ConversionResult::date_label]
/// moves accordingly relative to the source zone's civil date at `at`.
///
/// Target zones are deduplicated by identity; the output order is the first
/// occurrence order of the input. A source zone that appears among the targets
/// converts to the event time unchanged with a rollover of
/// [`DayRollover::Same`].
///
/// The anchor instant is an explicit parameter: which calendar day an event is
/// anchored to is the caller's policy, and supplying `at` directly keeps the
/// conversion deterministic and reproducible.
///
/// This function is pure; it has no side effects and retains nothing between
/// calls.
///
/// # Errors
///
/// Returns [`Error::Authority`] when the anchor instant cannot be projected by
/// the civil-time authority. No partial output is produced on failure.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, SystemTime};
///
/// use meridian::{DayRollover, WallClockTime, ZoneId, convert};
///
/// // 2024-01-15T12:00:00Z
/// let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_705_320_000);
///
/// let london = ZoneId::new("Europe/London")?;
/// let targets = vec![ZoneId::new("Asia/Karachi")?];
///
/// // London 09:00 is Karachi 14:00 on the same day in January.
/// let results = convert(&london, "09:00".parse()?, &targets, at)?;
///
/// assert_eq!(results[0].wall_time.to_string(), "14:00");
/// assert_eq!(results[0].rollover, DayRollover::Same);
/// assert_eq!(results[0].date_label, "2024-01-15");
///
/// # Ok::<(), meridian::Error>(())
/// ```
pub fn convert(
    source: &ZoneId,
    event_time: WallClockTime,
    targets: &[ZoneId],
    at: SystemTime,
) -> Result<Vec<ConversionResult>> {
    let source_date = source.civil_date_at(at)?;

    let mut results: Vec<ConversionResult> = Vec::with_capacity(targets.len());

    for target in targets {
        if results.iter().any(|r| &r.zone == target) {
            continue;
        }

        let offset = OffsetMinutes::between(source, target, at)?;
        let (wall_time, rollover) = event_time.with_minutes_added(offset.minutes());

        let date = match rollover {
            DayRollover::Previous => source_date.yesterday().map_err(Error::authority)?,
            DayRollover::Same => source_date,
            DayRollover::Next => source_date.tomorrow().map_err(Error::authority)?,
        };

        results.push(ConversionResult {
            zone: target.clone(),
            wall_time,
            rollover,
            date_label: date.to_string(),
        });
    }

    Ok(results)
}
