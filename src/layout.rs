/*
 *  layout.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  LED addressing - maps a (column, row) pair to a pixel center
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
use crate::constants::{DOT_RADIUS, DOT_SPACING, ROW_COUNT};

/// Address of a single LED on the face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedAddress {
    pub col: u8,
    pub row: u8,
}

impl LedAddress {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Pixel center of this LED
    pub fn center(&self) -> Point {
        get_center(self.col as i32, self.row as i32)
    }

    /// All addresses in a column, bottom bit first
    pub fn column(col: u8) -> impl Iterator<Item = LedAddress> {
        (0..ROW_COUNT as u8).map(move |row| LedAddress::new(col, row))
    }
}

/// Center of the LED at (col, row).
///
/// Columns are packed edge to edge with `DOT_SPACING` between dots and a full
/// spacing margin on the left; rows get a half spacing margin at the top.
/// Rows past the nominal grid are still mapped (the weekday row is row 5).
#[inline]
pub fn get_center(col: i32, row: i32) -> Point {
    Point::new(
        DOT_RADIUS * (1 + 2 * col) + DOT_SPACING * col + DOT_SPACING,
        DOT_RADIUS * (1 + 2 * row) + DOT_SPACING * row + DOT_SPACING / 2,
    )
}

/// Smallest size that fits the whole grid, used to sanity check panel dimensions
pub fn grid_extent(columns: i32, rows: i32) -> Size {
    let last = get_center(columns - 1, rows - 1);
    Size::new((last.x + DOT_RADIUS + 1) as u32, (last.y + DOT_RADIUS + 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{COLUMN_COUNT, SCREEN_HEIGHT, SCREEN_WIDTH};

    #[test]
    fn test_origin_center() {
        assert_eq!(get_center(0, 0), Point::new(16, 14));
    }

    #[test]
    fn test_center_monotonic() {
        for row in 0..ROW_COUNT as i32 {
            for col in 1..COLUMN_COUNT as i32 {
                assert!(get_center(col, row).x > get_center(col - 1, row).x);
                assert_eq!(get_center(col, row).y, get_center(col - 1, row).y);
            }
        }
        for col in 0..COLUMN_COUNT as i32 {
            for row in 1..ROW_COUNT as i32 {
                assert!(get_center(col, row).y > get_center(col, row - 1).y);
                assert_eq!(get_center(col, row).x, get_center(col, row - 1).x);
            }
        }
    }

    #[test]
    fn test_pitch() {
        // 2 * radius + spacing between neighbours
        assert_eq!(get_center(1, 0).x - get_center(0, 0).x, 28);
        assert_eq!(get_center(0, 1).y - get_center(0, 0).y, 28);
        assert_eq!(get_center(4, 5), Point::new(128, 154));
    }

    #[test]
    fn test_grid_fits_screen() {
        let extent = grid_extent(COLUMN_COUNT as i32, ROW_COUNT as i32);
        assert!(extent.width <= SCREEN_WIDTH);
        assert!(extent.height <= SCREEN_HEIGHT);
    }

    #[test]
    fn test_address_center() {
        let addr = LedAddress::new(2, 3);
        assert_eq!(addr.center(), get_center(2, 3));
        assert_eq!(LedAddress::column(1).count(), ROW_COUNT);
    }
}
