/*
 *  display/traits.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display driver abstraction
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

use crate::constants::{COLUMN_COUNT, ROW_COUNT};
use crate::display::error::DisplayError;
use crate::layout::grid_extent;

/// Display capabilities and metadata
#[derive(Debug, Clone)]
pub struct DisplayCapabilities {
    /// Display width in pixels
    pub width: u32,

    /// Display height in pixels
    pub height: u32,
}

impl DisplayCapabilities {
    /// Whether the full LED grid fits on this panel
    pub fn fits_grid(&self) -> bool {
        let extent = grid_extent(COLUMN_COUNT as i32, ROW_COUNT as i32);
        extent.width <= self.width && extent.height <= self.height
    }
}

/// Minimal hardware abstraction - every surface the face paints on implements this.
///
/// Drawing itself goes through `embedded_graphics::DrawTarget`, which is not dyn
/// compatible, so drivers implement it directly next to this trait.
pub trait DisplayDriver {
    /// Returns the capabilities of this display
    fn capabilities(&self) -> &DisplayCapabilities;

    /// Returns the display dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Prepare the display for rendering
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Push the current framebuffer out
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Clear the display to blank/off state
    fn clear(&mut self) -> Result<(), DisplayError>;
}
