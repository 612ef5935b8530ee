/*
 *  display/drivers/terminal.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  Text console driver - shows the LED grid on a terminal
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
use log::debug;
use std::io::Write;

use crate::constants::{COLUMN_COUNT, ROW_COUNT};
use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};
use crate::display::vframebuf::VarFrameBuf;
use crate::layout::LedAddress;

const LIT: char = '●';
const UNLIT: char = '·';

// column headings: month, day, hour, minute, second
const HEADINGS: [char; COLUMN_COUNT] = ['M', 'D', 'h', 'm', 's'];

/// Paints into an in-memory framebuffer and, on flush, writes the LED grid as
/// text by sampling each LED's center pixel. Lines follow the panel top to bottom,
/// so row 0 (the LSBs) prints first and the weekday row last.
pub struct TerminalDriver<W: Write> {
    framebuffer: VarFrameBuf<BinaryColor>,
    capabilities: DisplayCapabilities,
    out: W,
    ansi: bool,
    frames: u64,
}

impl<W: Write> TerminalDriver<W> {
    pub fn new(width: u32, height: u32, out: W) -> Self {
        Self {
            framebuffer: VarFrameBuf::new(width, height, BinaryColor::Off),
            capabilities: DisplayCapabilities { width, height },
            out,
            ansi: false,
            frames: 0,
        }
    }

    /// Redraw in place using ANSI home/clear sequences
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Current grid as text, one line per LED row
    pub fn render_text(&self) -> String {
        let mut s = String::new();
        for h in HEADINGS {
            s.push(h);
            s.push(' ');
        }
        s.truncate(s.trim_end().len());
        s.push('\n');
        for row in 0..ROW_COUNT as u8 {
            let line: Vec<String> = (0..COLUMN_COUNT as u8)
                .map(|col| {
                    let lit = self.framebuffer.pixel(LedAddress::new(col, row).center())
                        == Some(BinaryColor::On);
                    (if lit { LIT } else { UNLIT }).to_string()
                })
                .collect();
            s.push_str(&line.join(" "));
            s.push('\n');
        }
        s
    }
}

impl<W: Write> DisplayDriver for TerminalDriver<W> {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        if !self.capabilities.fits_grid() {
            return Err(DisplayError::PanelTooSmall {
                width: self.capabilities.width,
                height: self.capabilities.height,
            });
        }
        debug!("terminal driver {}x{}", self.capabilities.width, self.capabilities.height);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let text = self.render_text();
        if self.ansi {
            write!(self.out, "\x1b[2J\x1b[H")?;
        }
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.framebuffer.fill(BinaryColor::Off);
        self.flush()
    }
}

impl<W: Write> DrawTarget for TerminalDriver<W> {
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

impl<W: Write> OriginDimensions for TerminalDriver<W> {
    fn size(&self) -> Size {
        Size::new(self.capabilities.width, self.capabilities.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::Point;
    use crate::indicator::toggle_led;

    #[test]
    fn test_blank_grid_text() {
        let mut driver = TerminalDriver::new(144, 168, Vec::new());
        driver.init().unwrap();
        driver.flush().unwrap();
        let out = String::from_utf8(driver.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1 + ROW_COUNT);
        assert_eq!(lines[0], "M D h m s");
        assert!(lines[1..].iter().all(|l| *l == "· · · · ·"));
    }

    #[test]
    fn test_lit_led_top_row_printed_first() {
        let mut driver = TerminalDriver::new(144, 168, Vec::new());
        toggle_led(&mut driver, LedAddress::new(4, 0), true).unwrap();
        toggle_led(&mut driver, LedAddress::new(0, 5), true).unwrap();
        let text = driver.render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "· · · · ●");
        assert_eq!(lines[6], "● · · · ·");
    }

    #[test]
    fn test_lines_follow_panel_rows() {
        for row in 0..ROW_COUNT as u8 {
            let mut driver = TerminalDriver::new(144, 168, Vec::new());
            toggle_led(&mut driver, LedAddress::new(0, row), true).unwrap();

            // topmost lit pixel on the panel
            let top_y = (0..168)
                .find(|&y| (0..144).any(|x| driver.framebuffer.pixel(Point::new(x, y)) == Some(BinaryColor::On)))
                .unwrap();
            assert_eq!(top_y, LedAddress::new(0, row).center().y - 12);

            let text = driver.render_text();
            let lit_line = text.lines().position(|l| l.starts_with('●')).unwrap();
            assert_eq!(lit_line, row as usize + 1, "row {row} printed out of place");
        }
    }

    #[test]
    fn test_too_small_panel() {
        let mut driver = TerminalDriver::new(128, 64, Vec::new());
        assert!(matches!(driver.init(), Err(DisplayError::PanelTooSmall { .. })));
    }

    #[test]
    fn test_flush_counts_frames() {
        let mut driver = TerminalDriver::new(144, 168, Vec::new()).with_ansi(true);
        driver.flush().unwrap();
        DisplayDriver::clear(&mut driver).unwrap();
        assert_eq!(driver.frames(), 2);
        let out = String::from_utf8(driver.into_inner()).unwrap();
        assert!(out.starts_with("\x1b[2J\x1b[H"));
    }
}
