// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

#![cfg_attr(docsrs, feature(doc_cfg))]

//! Time-zone-aware wall-clock conversion and a live-clock engine.
//!
//! # Quick Start
//!
//! ```
//! use meridian::{Clock, ClockRegistry, WallClockTime, ZoneId, convert};
//!
//! fn main() -> meridian::Result<()> {
//!     let clock = Clock::new();
//!     let now = clock.system_time();
//!
//!     // What time is a 09:00 London event in Tokyo and New York?
//!     let london = ZoneId::new("Europe/London")?;
//!     let targets = vec![ZoneId::new("Asia/Tokyo")?, ZoneId::new("America/New_York")?];
//!
//!     for result in convert(&london, "09:00".parse()?, &targets, now)? {
//!         println!("{}: {} on {}", result.zone.city_label(), result.wall_time, result.date_label);
//!     }
//!
//!     // Track a live ticking clock for Tokyo.
//!     let mut registry = ClockRegistry::new(&clock);
//!     let handle = registry.subscribe(
//!         ZoneId::new("Asia/Tokyo")?,
//!         |zone: &ZoneId, wall_time: WallClockTime, _date_label: &str| {
//!             println!("{}: {wall_time}", zone.city_label());
//!         },
//!     )?;
//!
//!     registry.tick(clock.system_time());
//!     registry.unsubscribe(handle);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Overview
//!
//! The engine is three small components composed bottom-up:
//!
//! - [`OffsetMinutes`] - Resolves the signed civil-time offset between two
//!   zones at a specific instant, correctly crossing daylight-saving
//!   transitions.
//! - [`convert`] - Converts one event's wall time in a source zone into the
//!   equivalent wall time in every target zone, surfacing day rollovers.
//! - [`ClockRegistry`] - Owns the live set of zone subscriptions and drives a
//!   once-per-second repaint through the [`RenderSink`] port.
//!
//! Supporting types: [`ZoneId`] (validated IANA identifiers), [`WallClockTime`]
//! (a civil hour/minute pair), [`DayRollover`], [`ConversionResult`], and
//! [`Clock`] (the engine's single source of "now").
//!
//! # Determinism
//!
//! Offset resolution and event conversion are pure functions of their explicit
//! reference instant; nothing in them reads the system clock or retains state
//! between calls. Only the live-clock registry needs "now", and it reads it
//! through [`Clock`], which tests replace with manually controlled time via
//! [`ClockControl`] (`test-util` feature). This keeps daylight-saving boundary
//! behavior reproducible in tests.
//!
//! # Features
//!
//! - **`tokio`** - Integration with the [Tokio](https://tokio.rs/) runtime.
//!   Enables [`Ticker`] and [`ClockRegistry::run`] for driving clocks at a
//!   1-second cadence.
//! - **`test-util`** - Enables [`ClockControl`] for controlling the passage of
//!   time in tests. **Only enable this in `dev-dependencies`.**

mod catalog;
mod clock;
#[cfg(any(feature = "test-util", test))]
mod clock_control;
mod convert;
mod error;
mod offset;
mod registry;
mod store;
#[cfg(any(feature = "tokio", test))]
mod ticker;
mod wall_clock;
mod zone;

pub use catalog::CITY_ZONES;
pub use clock::Clock;
#[cfg(any(feature = "test-util", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
pub use clock_control::ClockControl;
pub use convert::{ConversionResult, convert};
pub use error::{Error, Result};
pub use offset::OffsetMinutes;
pub use registry::{ClockRegistry, RenderSink, SubscriptionHandle};
pub use store::{ZoneStore, decode_zones, encode_zones};
#[cfg(any(feature = "tokio", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub use ticker::{TICK_PERIOD, Ticker};
pub use wall_clock::{DayRollover, WallClockTime};
pub use zone::ZoneId;
