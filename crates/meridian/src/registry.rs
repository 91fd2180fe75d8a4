// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

use std::fmt::{self, Debug, Formatter};
use std::panic::AssertUnwindSafe;
use std::time::SystemTime;

use crate::store::{ZoneStore, encode_zones};
use crate::{Clock, Error, Result, WallClockTime, ZoneId};

/// The render port consumed by [`ClockRegistry`].
///
/// The registry invokes the sink with a freshly computed wall time and civil
/// date label whenever the subscription's clock face should repaint: once
/// immediately on subscribe, and once per tick afterwards. The engine treats
/// the call as fire-and-forget — a sink must not block.
///
/// A blanket implementation is provided for closures, which is the common way
/// to hook a UI up to the registry:
///
/// ```
/// use meridian::{Clock, ClockRegistry, ZoneId};
///
/// let mut registry = ClockRegistry::new(&Clock::new());
///
/// registry.subscribe(
///     ZoneId::new("Asia/Tokyo")?,
///     |zone: &ZoneId, wall_time: meridian::WallClockTime, _date_label: &str| {
///         println!("{}: {wall_time}", zone.city_label());
///     },
/// )?;
///
/// # Ok::<(), meridian::Error>(())
/// ```
pub trait RenderSink {
    /// Repaints one clock face with the given wall time and date label.
    fn render(&mut self, zone: &ZoneId, wall_time: WallClockTime, date_label: &str);
}

impl<F> RenderSink for F
where
    F: FnMut(&ZoneId, WallClockTime, &str),
{
    fn render(&mut self, zone: &ZoneId, wall_time: WallClockTime, date_label: &str) {
        self(zone, wall_time, date_label);
    }
}

impl RenderSink for Box<dyn RenderSink> {
    fn render(&mut self, zone: &ZoneId, wall_time: WallClockTime, date_label: &str) {
        self.as_mut().render(zone, wall_time, date_label);
    }
}

/// Identifies one active subscription in a [`ClockRegistry`].
///
/// Handles are cheap copyable keys. A handle stays valid until passed to
/// [`ClockRegistry::unsubscribe`]; using it afterwards is harmless — lookups
/// simply find nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    /// Discriminator that stays unique across the registry's lifetime, so a
    /// stale handle can never address a newer subscription.
    serial: u64,
}

/// One active ticking clock.
struct Subscription {
    serial: u64,
    zone: ZoneId,
    last_rendered: Option<WallClockTime>,
    sink: Box<dyn RenderSink>,
}

/// Owns the live set of zone subscriptions and drives their once-per-second
/// repaint.
///
/// The registry is the single source of truth for which zones are currently
/// tracked. Each zone can be subscribed at most once; a second subscribe for
/// the same zone fails with [`Error::DuplicateZone`] so the active set stays a
/// true set. Subscribing emits the current wall time immediately — a new clock
/// card never waits for the next tick to show a reading.
///
/// # Ticking
///
/// [`tick`][Self::tick] recomputes the wall time of every active subscription
/// for an explicit instant and invokes its [`RenderSink`]. The registry's
/// [`Clock`] is the only place "now" is read from the system; with the `tokio`
/// feature, [`run`][Self::run] couples a 1 Hz [`Ticker`][crate::Ticker] to the
/// clock. Ticks are not guaranteed to align with wall-clock second boundaries;
/// the displayed time is accurate as of the moment each tick was computed.
///
/// Subscriptions are processed sequentially within a tick by a single logical
/// actor, so no locking is involved. All mutations take `&mut self` and are
/// therefore sequenced strictly before or after any tick pass — a subscription
/// can never be torn down mid-iteration. A sink that panics is isolated: the
/// failure is logged for that subscription and the remaining sinks in the same
/// tick still run.
///
/// # Persistence
///
/// When configured via [`with_store`][Self::with_store], the registry saves the
/// ordered active zone list on every successful subscribe and unsubscribe, and
/// [`restore`][Self::restore] replays the stored list on startup. Corrupt
/// stored data restores to an empty set rather than failing.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, SystemTime};
///
/// use meridian::{Clock, ClockRegistry, ZoneId};
///
/// let clock = Clock::new();
/// let mut registry = ClockRegistry::new(&clock);
///
/// let handle = registry.subscribe(
///     ZoneId::new("Europe/London")?,
///     |zone: &ZoneId, wall_time: meridian::WallClockTime, date_label: &str| {
///         println!("{zone}: {wall_time} ({date_label})");
///     },
/// )?;
///
/// registry.tick(clock.system_time());
///
/// registry.unsubscribe(handle);
/// assert!(registry.is_empty());
///
/// # Ok::<(), meridian::Error>(())
/// ```
pub struct ClockRegistry {
    clock: Clock,
    subscriptions: Vec<Subscription>,
    store: Option<Box<dyn ZoneStore>>,
    next_serial: u64,
}

impl ClockRegistry {
    /// Creates an empty registry reading "now" from the given clock.
    #[must_use]
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock: clock.clone(),
            subscriptions: Vec::new(),
            store: None,
            next_serial: 0,
        }
    }

    /// Attaches a persistence collaborator.
    ///
    /// After every successful subscribe or unsubscribe the registry encodes the
    /// ordered active zone list and hands it to the store.
    #[must_use]
    pub fn with_store(mut self, store: impl ZoneStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Subscribes a zone and immediately emits its current wall time.
    ///
    /// The zone is enrolled in every subsequent tick until the returned handle
    /// is passed to [`unsubscribe`][Self::unsubscribe].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateZone`] when the zone is already active. The
    /// active set is unchanged in that case; callers wanting idempotent
    /// behavior can treat the error as a no-op signal.
    pub fn subscribe(&mut self, zone: ZoneId, sink: impl RenderSink + 'static) -> Result<SubscriptionHandle> {
        if self.contains(&zone) {
            return Err(Error::duplicate_zone(zone.name()));
        }

        let serial = self.next_serial;
        self.next_serial += 1;

        let mut subscription = Subscription {
            serial,
            zone,
            last_rendered: None,
            sink: Box::new(sink),
        };

        // Emit the current reading right away; a fresh clock card must not
        // stay blank until the next tick.
        render_subscription(&mut subscription, self.clock.system_time());

        tracing::debug!(zone = %subscription.zone, serial, "zone subscribed");
        self.subscriptions.push(subscription);
        self.persist();

        Ok(SubscriptionHandle { serial })
    }

    /// Removes a subscription.
    ///
    /// Idempotent: unsubscribing a handle that was already removed is a silent
    /// no-op. The render sink is dropped before this returns, and no further
    /// renders are delivered for the subscription afterwards.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.serial != handle.serial);

        if self.subscriptions.len() < before {
            tracing::debug!(serial = handle.serial, "zone unsubscribed");
            self.persist();
        }
    }

    /// Recomputes and renders the wall time of every active subscription at the
    /// given instant.
    ///
    /// Sinks run sequentially. A sink that panics is reported for its own
    /// subscription via `tracing` and does not prevent the remaining sinks from
    /// rendering.
    pub fn tick(&mut self, now: SystemTime) {
        for subscription in &mut self.subscriptions {
            render_subscription(subscription, now);
        }
    }

    /// Replays a persisted zone list, subscribing each stored zone with a sink
    /// produced by `make_sink`.
    ///
    /// Entries that are corrupt, unrecognized, or already subscribed are
    /// skipped; restoring never fails. Returns the handles of the
    /// subscriptions that were created, in stored order.
    pub fn restore<F>(&mut self, mut make_sink: F) -> Vec<SubscriptionHandle>
    where
        F: FnMut(&ZoneId) -> Box<dyn RenderSink>,
    {
        let Some(store) = self.store.as_mut() else {
            return Vec::new();
        };
        let Some(payload) = store.load() else {
            return Vec::new();
        };

        let mut handles = Vec::new();

        for zone in crate::store::decode_zones(&payload) {
            let sink = make_sink(&zone);

            match self.subscribe(zone, sink) {
                Ok(handle) => handles.push(handle),
                // A duplicate in stored data collapses onto the existing
                // subscription.
                Err(Error::DuplicateZone { zone }) => {
                    tracing::debug!(%zone, "skipping duplicate persisted zone");
                }
                Err(error) => {
                    tracing::warn!(%error, "failed to restore persisted zone");
                }
            }
        }

        handles
    }

    /// The active zones, in subscription order.
    pub fn zones(&self) -> impl Iterator<Item = &ZoneId> {
        self.subscriptions.iter().map(|s| &s.zone)
    }

    /// Whether the zone currently has an active subscription.
    #[must_use]
    pub fn contains(&self, zone: &ZoneId) -> bool {
        self.subscriptions.iter().any(|s| &s.zone == zone)
    }

    /// The number of active subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether no subscriptions are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// The wall time most recently rendered for a subscription, or `None` when
    /// the handle is gone or nothing has rendered successfully yet.
    #[must_use]
    pub fn last_rendered(&self, handle: SubscriptionHandle) -> Option<WallClockTime> {
        self.subscriptions
            .iter()
            .find(|s| s.serial == handle.serial)
            .and_then(|s| s.last_rendered)
    }

    /// Drives the registry from its clock at a fixed 1-second cadence.
    ///
    /// This couples a [`Ticker`][crate::Ticker] to [`tick`][Self::tick] and
    /// never returns; run it as its own task and drop or abort the task to
    /// stop ticking. The first repaint happens immediately.
    #[cfg(any(feature = "tokio", test))]
    #[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
    pub async fn run(&mut self) {
        use std::pin::Pin;

        let mut ticker = crate::Ticker::new();

        loop {
            () = std::future::poll_fn(|cx| {
                futures_core::Stream::poll_next(Pin::new(&mut ticker), cx).map(|_| ())
            })
            .await;

            let now = self.clock.system_time();
            self.tick(now);
        }
    }

    fn persist(&mut self) {
        if let Some(store) = self.store.as_mut() {
            let zones: Vec<ZoneId> = self.subscriptions.iter().map(|s| s.zone.clone()).collect();
            store.save(&encode_zones(&zones));
        }
    }
}

/// Renders one subscription at the given instant, isolating sink failures.
fn render_subscription(subscription: &mut Subscription, now: SystemTime) {
    let wall_time = match subscription.zone.wall_clock_at(now) {
        Ok(wall_time) => wall_time,
        Err(error) => {
            tracing::error!(zone = %subscription.zone, %error, "cannot project instant for subscription");
            return;
        }
    };

    let date_label = match subscription.zone.civil_date_at(now) {
        Ok(date) => date.to_string(),
        Err(error) => {
            tracing::error!(zone = %subscription.zone, %error, "cannot project instant for subscription");
            return;
        }
    };

    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
        subscription.sink.render(&subscription.zone, wall_time, &date_label);
    }));

    match outcome {
        Ok(()) => subscription.last_rendered = Some(wall_time),
        Err(_) => {
            tracing::error!(zone = %subscription.zone, "render sink panicked; other subscriptions are unaffected");
        }
    }
}

impl Debug for ClockRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockRegistry")
            .field("zones", &self.zones().map(ZoneId::name).collect::<Vec<_>>())
            .field("store", &self.store.is_some())
            .finish_non_exhaustive()
    }
}
