/*
 *  indicator.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  LED renderer - one filled dot per bit
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
use embedded_graphics::primitives::{Circle, PrimitiveStyle};

use crate::constants::{DOT_RADIUS, LED_OFF_COLOR, LED_ON_COLOR};
use crate::layout::LedAddress;

/// Dot diameter; odd so the circle is centered on the mapped pixel
pub const DOT_DIAMETER: u32 = (DOT_RADIUS * 2 + 1) as u32;

#[inline]
pub fn led_color(on: bool) -> BinaryColor {
    if on { LED_ON_COLOR } else { LED_OFF_COLOR }
}

/// Paint the LED at `addr` on (foreground) or off (background).
///
/// Every call repaints the whole dot, so an off LED erases a previously lit one.
pub fn toggle_led<D>(target: &mut D, addr: LedAddress, on: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Circle::with_center(addr.center(), DOT_DIAMETER)
        .into_styled(PrimitiveStyle::with_fill(led_color(on)))
        .draw(target)
}
