/*
 *  display/drivers/mock.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock display driver for testing without hardware
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
use embedded_graphics::primitives::Rectangle;

use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};
use crate::display::vframebuf::VarFrameBuf;
use crate::layout::LedAddress;

/// Mock display driver for testing
///
/// Keeps the framebuffer in memory and counts driver calls so tests can inspect
/// both the pixels and how the face drove the display.
#[derive(Debug, Clone)]
pub struct MockDriver {
    framebuffer: VarFrameBuf<BinaryColor>,
    capabilities: DisplayCapabilities,
    state: MockDriverState,
}

/// Call counters and failure switches
#[derive(Debug, Clone, Default)]
pub struct MockDriverState {
    pub init_count: usize,
    pub flush_count: usize,
    pub clear_count: usize,
    pub is_initialized: bool,

    /// Simulate failures (for error testing)
    pub simulate_flush_failure: bool,
    pub simulate_init_failure: bool,
}

impl MockDriver {
    /// Create a mock driver with specific dimensions
    pub fn new_with_size(width: u32, height: u32) -> Result<Self, DisplayError> {
        if width == 0 || height == 0 {
            return Err(DisplayError::InitializationFailed(format!(
                "invalid size {}x{}",
                width, height
            )));
        }

        Ok(Self {
            framebuffer: VarFrameBuf::new(width, height, BinaryColor::Off),
            capabilities: DisplayCapabilities { width, height },
            state: MockDriverState::default(),
        })
    }

    /// Get a snapshot of the framebuffer for testing
    pub fn get_framebuffer(&self) -> Vec<BinaryColor> {
        self.framebuffer.as_slice().to_vec()
    }

    /// Get pixel at position for testing
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        self.framebuffer.pixel(Point::new(x as i32, y as i32))
    }

    /// Whether the pixel at the LED's center is lit
    pub fn led_is_lit(&self, addr: LedAddress) -> bool {
        self.framebuffer.pixel(addr.center()) == Some(BinaryColor::On)
    }

    pub fn count_on_pixels(&self) -> usize {
        self.framebuffer
            .as_slice()
            .iter()
            .filter(|&&p| p == BinaryColor::On)
            .count()
    }

    /// Light every pixel, to check that a paint really clears
    pub fn fill_on(&mut self) {
        self.framebuffer.fill(BinaryColor::On);
    }

    pub fn state(&self) -> &MockDriverState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MockDriverState {
        &mut self.state
    }
}

impl DisplayDriver for MockDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        if self.state.simulate_init_failure {
            return Err(DisplayError::Other("Simulated init failure".to_string()));
        }
        self.state.init_count += 1;
        self.state.is_initialized = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if self.state.simulate_flush_failure {
            return Err(DisplayError::Other("Simulated flush failure".to_string()));
        }
        self.state.flush_count += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.state.clear_count += 1;
        self.framebuffer.fill(BinaryColor::Off);
        self.flush()
    }
}

impl DrawTarget for MockDriver {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer.draw_iter(pixels)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.framebuffer.clear(color)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.framebuffer.fill_solid(area, color)
    }
}

impl OriginDimensions for MockDriver {
    fn size(&self) -> Size {
        Size::new(self.capabilities.width, self.capabilities.height)
    }
}
