/*
 *  sources.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clock, battery and connection sources
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use chrono::Local;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::encoding::{ClockReading, HourMode};
use crate::status::BatteryStatus;

/// Wall clock plus the host's 12/24 hour preference
pub trait ClockSource {
    fn now(&self) -> ClockReading;

    /// Host display style flag
    fn is_24h_style(&self) -> bool;

    fn hour_mode(&self) -> HourMode {
        HourMode::from_24h_flag(self.is_24h_style())
    }
}

/// Battery state, peeked on demand
pub trait BatterySource {
    fn peek(&mut self) -> BatteryStatus;
}

/// Phone connection state, peeked on demand
pub trait ConnectionSource {
    fn peek(&mut self) -> bool;
}

/// Local time from the host clock
#[derive(Debug, Clone)]
pub struct SystemClock {
    mode: HourMode,
}

impl SystemClock {
    pub fn new(mode: HourMode) -> Self {
        Self { mode }
    }
}

impl ClockSource for SystemClock {
    fn now(&self) -> ClockReading {
        ClockReading::from_datetime(&Local::now())
    }

    fn is_24h_style(&self) -> bool {
        self.mode.is_24h()
    }
}

/// Frozen clock, set by hand
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    pub reading: ClockReading,
    pub mode: HourMode,
}

impl FixedClock {
    pub fn new(reading: ClockReading, mode: HourMode) -> Self {
        Self { reading, mode }
    }

    pub fn set(&mut self, reading: ClockReading) {
        self.reading = reading;
    }
}

impl ClockSource for FixedClock {
    fn now(&self) -> ClockReading {
        self.reading
    }

    fn is_24h_style(&self) -> bool {
        self.mode.is_24h()
    }
}

/// Linux power supply class, e.g. /sys/class/power_supply/BAT0
#[derive(Debug, Clone)]
pub struct SysfsBattery {
    path: PathBuf,
    last: BatteryStatus,
    warned: bool,
}

impl SysfsBattery {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            last: BatteryStatus::default(),
            warned: false,
        }
    }

    fn read(&self) -> std::io::Result<BatteryStatus> {
        let capacity = fs::read_to_string(self.path.join("capacity"))?;
        let status = fs::read_to_string(self.path.join("status"))?;
        Ok(parse_power_supply(&capacity, &status))
    }
}

impl BatterySource for SysfsBattery {
    fn peek(&mut self) -> BatteryStatus {
        match self.read() {
            Ok(status) => {
                self.last = status;
            }
            Err(e) => {
                // no battery on most desktops, say so once
                if !self.warned {
                    warn!("battery unavailable at {}: {}", self.path.display(), e);
                    self.warned = true;
                } else {
                    debug!("battery read failed: {}", e);
                }
            }
        }
        self.last
    }
}

/// Decode the `capacity` and `status` attributes of a power supply
pub fn parse_power_supply(capacity: &str, status: &str) -> BatteryStatus {
    let percent = capacity.trim().parse::<u16>().unwrap_or(0).min(100) as u8;
    let status = status.trim();
    let is_charging = status.eq_ignore_ascii_case("charging");
    let is_plugged = is_charging
        || status.eq_ignore_ascii_case("full")
        || status.eq_ignore_ascii_case("not charging");
    BatteryStatus::new(percent, is_charging, is_plugged)
}

/// Treats having a routable local address as "connected"
#[derive(Debug, Clone, Default)]
pub struct NetworkConnection;

impl ConnectionSource for NetworkConnection {
    fn peek(&mut self) -> bool {
        match local_ip_address::local_ip() {
            Ok(ip) => {
                debug!("local ip {}", ip);
                true
            }
            Err(e) => {
                debug!("no local ip: {}", e);
                false
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticBattery(pub BatteryStatus);

impl BatterySource for StaticBattery {
    fn peek(&mut self) -> BatteryStatus {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticConnection(pub bool);

impl ConnectionSource for StaticConnection {
    fn peek(&mut self) -> bool {
        self.0
    }
}

/// Turns polled values into change notifications
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector<T> {
    last: Option<T>,
}

impl<T: PartialEq + Copy> ChangeDetector<T> {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns the value when it differs from the previous one (always on first call)
    pub fn update(&mut self, value: T) -> Option<T> {
        if self.last == Some(value) {
            None
        } else {
            self.last = Some(value);
            Some(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_power_supply() {
        assert_eq!(parse_power_supply("87\n", "Discharging\n"), BatteryStatus::new(87, false, false));
        assert_eq!(parse_power_supply("40", "Charging"), BatteryStatus::new(40, true, true));
        assert_eq!(parse_power_supply("100", "Full"), BatteryStatus::new(100, false, true));
        assert_eq!(parse_power_supply("garbage", "Unknown"), BatteryStatus::default());
    }

    #[test]
    fn test_missing_battery_keeps_default() {
        let mut battery = SysfsBattery::new("/nonexistent/power_supply/BAT9");
        assert_eq!(battery.peek(), BatteryStatus::default());
        assert_eq!(battery.peek(), BatteryStatus::default());
    }

    #[test]
    fn test_change_detector() {
        let mut d = ChangeDetector::new();
        assert_eq!(d.update(false), Some(false));
        assert_eq!(d.update(false), None);
        assert_eq!(d.update(true), Some(true));
        assert_eq!(d.update(true), None);
    }

    #[test]
    fn test_fixed_clock() {
        let mut clock = FixedClock::default();
        assert!(clock.is_24h_style());
        assert_eq!(clock.hour_mode(), HourMode::TwentyFourHour);

        let twelve = FixedClock::new(ClockReading::default(), HourMode::TwelveHour);
        assert!(!twelve.is_24h_style());
        assert_eq!(twelve.hour_mode(), HourMode::TwelveHour);
        let r = ClockReading { sec: 1, min: 2, hour: 3, mday: 4, mon: 5, wday: 6 };
        clock.set(r);
        assert_eq!(clock.now(), r);
    }
}
