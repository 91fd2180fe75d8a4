// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures_core::Stream;
use tokio::time::{Interval, MissedTickBehavior};

/// The fixed cadence at which live clocks repaint.
///
/// One second matches the finest granularity a wall-clock display changes at.
/// Ticks need not align with wall-clock second boundaries; the displayed time
/// is accurate as of the moment each tick's computation runs.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A stream that yields once per second, driving [`ClockRegistry::tick`][crate::ClockRegistry::tick].
///
/// The first tick completes immediately, so a consumer repaints as soon as it
/// starts listening. When a tick is delayed — say a render sink was slow — the
/// following tick is scheduled a full period later rather than bursting to
/// catch up; there is exactly one logical actor advancing the clocks, and
/// stale intermediate repaints have no value.
///
/// `Ticker` never completes. Use stream combinators such as `StreamExt::take`
/// to limit the number of ticks.
///
/// Available with the `tokio` feature; the tokio runtime drives the
/// underlying timer.
///
/// # Examples
///
/// ```no_run
/// use futures::StreamExt;
/// use meridian::{Clock, ClockRegistry, Ticker};
///
/// # async fn drive(registry: &mut ClockRegistry, clock: &Clock) {
/// let mut ticker = Ticker::new();
///
/// while let Some(()) = ticker.next().await {
///     registry.tick(clock.system_time());
/// }
/// # }
/// ```
#[derive(Debug)]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    /// Creates a ticker with the fixed [`TICK_PERIOD`] cadence.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime context.
    #[must_use]
    pub fn new() -> Self {
        let mut interval = tokio::time::interval(TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { interval }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for Ticker {
    type Item = ();

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().interval.poll_tick(cx).map(|_| Some(()))
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use futures::StreamExt;

    use super::*;

    static_assertions::assert_impl_all!(Ticker: Debug, Send, Unpin);

    #[tokio::test(start_paused = true)]
    async fn first_tick_is_immediate() {
        let start = tokio::time::Instant::now();
        let mut ticker = Ticker::new();

        assert_eq!(ticker.next().await, Some(()));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second() {
        let start = tokio::time::Instant::now();
        let mut ticker = Ticker::new();

        // First tick fires immediately, then one every second.
        for _ in 0..4 {
            assert_eq!(ticker.next().await, Some(()));
        }

        assert_eq!(start.elapsed(), 3 * TICK_PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn never_completes() {
        let mut ticker = Ticker::new();

        for _ in 0..10 {
            assert_eq!(ticker.next().await, Some(()));
        }
    }
}
