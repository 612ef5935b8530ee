/*
 *  status.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  Status encoder - battery and phone connection layers
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

use embedded_graphics::prelude::*;
use embedded_graphics::pixelcolor::BinaryColor;

use crate::constants::{CONNECTION_COLUMN, CONNECTION_ROW};
use crate::indicator::toggle_led;
use crate::layout::LedAddress;

pub const CONNECTION_LED: LedAddress = LedAddress::new(CONNECTION_COLUMN, CONNECTION_ROW);

/// Battery snapshot as delivered by the battery source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatteryStatus {
    /// Charge level (0-100)
    pub charge_percent: u8,
    pub is_charging: bool,
    pub is_plugged: bool,
}

impl BatteryStatus {
    pub fn new(charge_percent: u8, is_charging: bool, is_plugged: bool) -> Self {
        Self {
            charge_percent: charge_percent.min(100),
            is_charging,
            is_plugged,
        }
    }
}

/// Connection layer: a single LED, lit while the phone is connected
pub fn render_connection<D>(target: &mut D, connected: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    toggle_led(target, CONNECTION_LED, connected)
}

/// Battery layer. The snapshot is kept up to date but nothing is drawn for it yet.
pub fn render_battery<D>(_target: &mut D, _battery: &BatteryStatus) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::MockDriver;

    #[test]
    fn test_percent_clamped() {
        assert_eq!(BatteryStatus::new(180, false, true).charge_percent, 100);
        assert_eq!(BatteryStatus::default(), BatteryStatus::new(0, false, false));
    }

    #[test]
    fn test_connection_led() {
        let mut driver = MockDriver::new_with_size(144, 168).unwrap();
        let c = CONNECTION_LED.center();

        render_connection(&mut driver, true).unwrap();
        assert_eq!(driver.get_pixel(c.x as u32, c.y as u32), Some(BinaryColor::On));

        render_connection(&mut driver, false).unwrap();
        assert_eq!(driver.count_on_pixels(), 0);
    }

    #[test]
    fn test_battery_draws_nothing() {
        let mut driver = MockDriver::new_with_size(144, 168).unwrap();
        render_battery(&mut driver, &BatteryStatus::new(100, true, true)).unwrap();
        assert_eq!(driver.count_on_pixels(), 0);
    }
}
