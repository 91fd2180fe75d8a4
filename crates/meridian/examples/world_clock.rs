// Copyright (c) The Meridian Project Authors.
// Licensed under the MIT License.

//! This example tracks a handful of city clocks for a few seconds and then
//! converts a single event time into every tracked zone.
//!
//! Run with: `cargo run --example world_clock --features tokio`

use futures::StreamExt;
use meridian::{Clock, ClockRegistry, Ticker, WallClockTime, ZoneId, convert};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let clock = Clock::new();
    let mut registry = ClockRegistry::new(&clock);

    // Subscribe a few cities; each one paints its current time immediately.
    for name in ["America/Los_Angeles", "Europe/London", "Asia/Tokyo"] {
        registry.subscribe(
            ZoneId::new(name)?,
            |zone: &ZoneId, wall_time: WallClockTime, date_label: &str| {
                println!("{:<12} {wall_time}  ({date_label})", zone.city_label());
            },
        )?;
    }

    // Let the clocks tick for three seconds.
    let mut ticker = Ticker::new().take(3);
    while let Some(()) = ticker.next().await {
        registry.tick(clock.system_time());
        println!("---");
    }

    // Convert an event: 09:00 in London, shown in every tracked zone.
    let london = ZoneId::new("Europe/London")?;
    let targets: Vec<ZoneId> = registry.zones().cloned().collect();

    println!("09:00 in London is:");
    for result in convert(&london, "09:00".parse()?, &targets, clock.system_time())? {
        let day = match result.rollover.days() {
            0 => String::new(),
            days => format!(" ({days:+} day)"),
        };
        println!("  {:<12} {}{day}", result.zone.city_label(), result.wall_time);
    }

    Ok(())
}
