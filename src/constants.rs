/*
 *  constants.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  Face geometry, column assignments and colors
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

use embedded_graphics::pixelcolor::BinaryColor;

// screen - 144x168 monochrome watch panel
pub const SCREEN_WIDTH: u32 = 144;
pub const SCREEN_HEIGHT: u32 = 168;

// LED geometry, in pixels
pub const DOT_RADIUS: i32 = 12;
pub const DOT_SPACING: i32 = 4;

// one column per calendar field, left to right
pub const MONTH_COLUMN: u8 = 0;
pub const DAY_OF_MONTH_COLUMN: u8 = 1;
pub const HOUR_COLUMN: u8 = 2;
pub const MINUTE_COLUMN: u8 = 3;
pub const SECOND_COLUMN: u8 = 4;

pub const COLUMN_COUNT: usize = 5;
pub const ROW_COUNT: usize = 6;

/// 6th line, carries the weekday bits
pub const WEEKDAY_ROW: u8 = 5;

/// Connection LED shares the month column; month never lights row 4 (1..=12 fits in 4 bits)
pub const CONNECTION_COLUMN: u8 = MONTH_COLUMN;
pub const CONNECTION_ROW: u8 = 4;

pub const LED_ON_COLOR: BinaryColor = BinaryColor::On;
pub const LED_OFF_COLOR: BinaryColor = BinaryColor::Off;
pub const BACKGROUND_COLOR: BinaryColor = BinaryColor::Off;
