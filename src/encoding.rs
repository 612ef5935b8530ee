/*
 *  encoding.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  Time encoder - calendar fields to LED states
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

//! Bit layout of the face.
//!
//! Each column carries one calendar field, least significant bit in row 0.
//! Row 5 (the weekday row) is borrowed by three columns to carry the ISO
//! weekday (Monday=1 .. Sunday=7) instead of dedicating a sixth column.
//!
//! | column | field        | rows 0-3   | row 4                    | row 5          |
//! |--------|--------------|------------|--------------------------|----------------|
//! | 0      | month 1-12   | bits 0-3   | not driven (status LED)  | weekday bit 2  |
//! | 1      | day 1-31     | bits 0-3   | bit 4                    | weekday bit 1  |
//! | 2      | hour         | bits 0-3   | bit 4 (24h) / PM (12h)   | weekday bit 0  |
//! | 3      | minute 0-59  | bits 0-3   | bit 4                    | bit 5          |
//! | 4      | second 0-59  | bits 0-3   | bit 4                    | bit 5          |

use chrono::{Datelike, Timelike};
use embedded_graphics::prelude::*;
use embedded_graphics::pixelcolor::BinaryColor;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::constants::*;
use crate::indicator::toggle_led;
use crate::layout::LedAddress;

/// Host display style for the hour column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HourMode {
    #[serde(rename = "12h")]
    TwelveHour,
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl HourMode {
    pub fn from_24h_flag(is_24h: bool) -> Self {
        if is_24h { HourMode::TwentyFourHour } else { HourMode::TwelveHour }
    }

    pub fn is_24h(&self) -> bool {
        matches!(self, HourMode::TwentyFourHour)
    }
}

/// Wall clock snapshot in broken-down form.
///
/// `mon` is zero based and `wday` counts from Sunday=0, as handed over by the clock source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockReading {
    pub sec: u8,
    pub min: u8,
    pub hour: u8,
    pub mday: u8,
    pub mon: u8,
    pub wday: u8,
}

impl ClockReading {
    pub fn from_datetime<T: Datelike + Timelike>(dt: &T) -> Self {
        Self {
            // leap second shows as 59
            sec: dt.second().min(59) as u8,
            min: dt.minute() as u8,
            hour: dt.hour() as u8,
            mday: dt.day() as u8,
            mon: dt.month0() as u8,
            wday: dt.weekday().num_days_from_sunday() as u8,
        }
    }
}

/// Hour as shown: 0-23 in 24h mode, 1-12 in 12h mode (midnight and noon show 12)
#[inline]
pub fn display_hour(hour: u8, mode: HourMode) -> u8 {
    match mode {
        HourMode::TwentyFourHour => hour,
        HourMode::TwelveHour => match hour % 12 {
            0 => 12,
            h => h,
        },
    }
}

#[inline]
pub fn is_pm(hour: u8) -> bool {
    hour >= 12
}

/// Sunday (0) moves to the end of the week so the value is always 1-7
#[inline]
pub fn weekday7(wday: u8) -> u8 {
    if wday == 0 { 7 } else { wday }
}

#[inline]
pub fn month1(mon: u8) -> u8 {
    mon + 1
}

/// Where each weekday bit lives: (column, weekday bit), all on `WEEKDAY_ROW`
pub const WEEKDAY_BITS: [(u8, u8); 3] = [
    (HOUR_COLUMN, 0),
    (DAY_OF_MONTH_COLUMN, 1),
    (MONTH_COLUMN, 2),
];

#[inline]
fn bit(value: u8, n: u8) -> bool {
    (value >> n) & 1 == 1
}

/// LED states for the time layer.
///
/// `None` marks a cell the time layer never paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndicatorGrid {
    cells: [[Option<bool>; ROW_COUNT]; COLUMN_COUNT],
}

impl IndicatorGrid {
    fn set(&mut self, col: u8, row: u8, on: bool) {
        self.cells[col as usize][row as usize] = Some(on);
    }

    /// Drive `rows` of `col` with the matching bits of `value`
    fn set_bits(&mut self, col: u8, rows: Range<u8>, value: u8) {
        for row in rows {
            self.set(col, row, bit(value, row));
        }
    }

    pub fn get(&self, addr: LedAddress) -> Option<bool> {
        self.cells
            .get(addr.col as usize)
            .and_then(|c| c.get(addr.row as usize))
            .copied()
            .flatten()
    }

    pub fn is_on(&self, addr: LedAddress) -> bool {
        self.get(addr).unwrap_or(false)
    }

    /// Driven cells in column-major order
    pub fn iter(&self) -> impl Iterator<Item = (LedAddress, bool)> + '_ {
        self.cells.iter().enumerate().flat_map(|(col, rows)| {
            rows.iter().enumerate().filter_map(move |(row, cell)| {
                cell.map(|on| (LedAddress::new(col as u8, row as u8), on))
            })
        })
    }

    /// Read `rows` of `col` back as a number, row 0 being the LSB
    pub fn column_value(&self, col: u8, rows: Range<u8>) -> u8 {
        rows.fold(0u8, |acc, row| {
            if self.is_on(LedAddress::new(col, row)) { acc | (1 << row) } else { acc }
        })
    }

    /// Weekday (1-7) reassembled from the weekday row
    pub fn weekday_value(&self) -> u8 {
        WEEKDAY_BITS.iter().fold(0u8, |acc, &(col, n)| {
            if self.is_on(LedAddress::new(col, WEEKDAY_ROW)) { acc | (1 << n) } else { acc }
        })
    }

}

/// Encode a clock reading into LED states
pub fn encode_time(t: &ClockReading, mode: HourMode) -> IndicatorGrid {
    let hour = display_hour(t.hour, mode);
    let month = month1(t.mon);
    let week_day = weekday7(t.wday);

    let mut grid = IndicatorGrid::default();

    grid.set_bits(SECOND_COLUMN, 0..6, t.sec);
    grid.set_bits(MINUTE_COLUMN, 0..6, t.min);

    grid.set_bits(HOUR_COLUMN, 0..4, hour);
    let top = if mode.is_24h() { bit(hour, 4) } else { is_pm(t.hour) };
    grid.set(HOUR_COLUMN, 4, top);

    grid.set_bits(DAY_OF_MONTH_COLUMN, 0..5, t.mday);
    grid.set_bits(MONTH_COLUMN, 0..4, month);

    for (col, n) in WEEKDAY_BITS {
        grid.set(col, WEEKDAY_ROW, bit(week_day, n));
    }

    grid
}

/// Paint every driven cell of `grid`
pub fn render_grid<D>(target: &mut D, grid: &IndicatorGrid) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    for (addr, on) in grid.iter() {
        toggle_led(target, addr, on)?;
    }
    Ok(())
}

/// Encode and paint the time layer
pub fn render_time<D>(target: &mut D, t: &ClockReading, mode: HourMode) -> Result<IndicatorGrid, D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let grid = encode_time(t, mode);
    render_grid(target, &grid)?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading(hour: u8, min: u8, sec: u8, mday: u8, mon: u8, wday: u8) -> ClockReading {
        ClockReading { sec, min, hour, mday, mon, wday }
    }

    fn column(grid: &IndicatorGrid, col: u8) -> Vec<bool> {
        (0..ROW_COUNT as u8).map(|row| grid.is_on(LedAddress::new(col, row))).collect()
    }

    #[test]
    fn test_display_hour() {
        for hour in 0..24u8 {
            assert_eq!(display_hour(hour, HourMode::TwentyFourHour), hour);
            let h12 = display_hour(hour, HourMode::TwelveHour);
            assert!((1..=12).contains(&h12), "hour {hour} -> {h12}");
            assert_eq!(is_pm(hour), hour >= 12);
        }
        assert_eq!(display_hour(0, HourMode::TwelveHour), 12);
        assert_eq!(display_hour(12, HourMode::TwelveHour), 12);
        assert_eq!(display_hour(13, HourMode::TwelveHour), 1);
    }

    #[test]
    fn test_hour_mode_flag() {
        assert_eq!(HourMode::from_24h_flag(true), HourMode::TwentyFourHour);
        assert_eq!(HourMode::from_24h_flag(false), HourMode::TwelveHour);
        assert!(HourMode::from_24h_flag(true).is_24h());
    }

    #[test]
    fn test_weekday7() {
        for wday in 0..7u8 {
            let w = weekday7(wday);
            assert!((1..=7).contains(&w));
            assert_eq!(w == 7, wday == 0);
            if wday != 0 {
                assert_eq!(w, wday);
            }
        }
    }

    #[test]
    fn test_new_years_eve_24h() {
        // 23:59:59, Dec 31, Saturday
        let grid = encode_time(&reading(23, 59, 59, 31, 11, 6), HourMode::TwentyFourHour);

        assert_eq!(column(&grid, SECOND_COLUMN), vec![true, true, false, true, true, true]);
        assert_eq!(column(&grid, MINUTE_COLUMN), vec![true, true, false, true, true, true]);
        assert_eq!(grid.column_value(SECOND_COLUMN, 0..6), 59);
        assert_eq!(grid.column_value(MINUTE_COLUMN, 0..6), 59);

        // 23 = 10111, weekday bit0 of 6 = 0
        assert_eq!(column(&grid, HOUR_COLUMN), vec![true, true, true, false, true, false]);
        // 31 = 11111, weekday bit1 of 6 = 1
        assert_eq!(column(&grid, DAY_OF_MONTH_COLUMN), vec![true, true, true, true, true, true]);
        // 12 = 1100, row 4 undriven, weekday bit2 of 6 = 1
        assert_eq!(column(&grid, MONTH_COLUMN), vec![false, false, true, true, false, true]);
        assert_eq!(grid.get(LedAddress::new(MONTH_COLUMN, 4)), None);
        assert_eq!(grid.weekday_value(), 6);
    }

    #[test]
    fn test_second_59_has_one_dark_led() {
        // 59 = 111011: row 2 is the only dark second LED
        let grid = encode_time(&reading(0, 0, 59, 1, 0, 1), HourMode::TwentyFourHour);
        assert!(!grid.is_on(LedAddress::new(SECOND_COLUMN, 2)));
    }

    #[test]
    fn test_twelve_hour_pm_flag() {
        let pm = encode_time(&reading(13, 0, 0, 1, 0, 1), HourMode::TwelveHour);
        assert_eq!(pm.column_value(HOUR_COLUMN, 0..4), 1);
        assert!(pm.is_on(LedAddress::new(HOUR_COLUMN, 4)));

        let am = encode_time(&reading(0, 0, 0, 1, 0, 1), HourMode::TwelveHour);
        assert_eq!(am.column_value(HOUR_COLUMN, 0..4), 12);
        assert!(!am.is_on(LedAddress::new(HOUR_COLUMN, 4)));

        // 16:xx in 24h mode lights bit 4 without any PM meaning
        let h24 = encode_time(&reading(16, 0, 0, 1, 0, 1), HourMode::TwentyFourHour);
        assert_eq!(h24.column_value(HOUR_COLUMN, 0..5), 16);
        let h24_noon = encode_time(&reading(12, 0, 0, 1, 0, 1), HourMode::TwentyFourHour);
        assert!(!h24_noon.is_on(LedAddress::new(HOUR_COLUMN, 4)));
    }

    #[test]
    fn test_fields_read_back() {
        for sec in 0..60u8 {
            let g = encode_time(&reading(0, sec, sec, 1, 0, 1), HourMode::TwentyFourHour);
            assert_eq!(g.column_value(SECOND_COLUMN, 0..6), sec);
            assert_eq!(g.column_value(MINUTE_COLUMN, 0..6), sec);
        }
        for hour in 0..24u8 {
            let g = encode_time(&reading(hour, 0, 0, 1, 0, 1), HourMode::TwentyFourHour);
            assert_eq!(g.column_value(HOUR_COLUMN, 0..5), hour);

            let g = encode_time(&reading(hour, 0, 0, 1, 0, 1), HourMode::TwelveHour);
            assert_eq!(g.column_value(HOUR_COLUMN, 0..4), display_hour(hour, HourMode::TwelveHour));
            assert_eq!(g.is_on(LedAddress::new(HOUR_COLUMN, 4)), is_pm(hour));
        }
        for mday in 1..=31u8 {
            let g = encode_time(&reading(0, 0, 0, mday, 0, 1), HourMode::TwentyFourHour);
            assert_eq!(g.column_value(DAY_OF_MONTH_COLUMN, 0..5), mday);
        }
        for mon in 0..12u8 {
            let g = encode_time(&reading(0, 0, 0, 1, mon, 1), HourMode::TwentyFourHour);
            assert_eq!(g.column_value(MONTH_COLUMN, 0..4), mon + 1);
        }
    }

    #[test]
    fn test_weekday_read_back() {
        for wday in 0..7u8 {
            let g = encode_time(&reading(0, 0, 0, 1, 0, wday), HourMode::TwentyFourHour);
            assert_eq!(g.weekday_value(), weekday7(wday));
        }
    }

    #[test]
    fn test_month_row4_never_driven() {
        for mon in 0..12u8 {
            for wday in 0..7u8 {
                let g = encode_time(&reading(23, 59, 59, 31, mon, wday), HourMode::TwelveHour);
                assert_eq!(g.get(LedAddress::new(CONNECTION_COLUMN, CONNECTION_ROW)), None);
            }
        }
        let g = encode_time(&ClockReading::default(), HourMode::TwentyFourHour);
        assert_eq!(g.iter().count(), COLUMN_COUNT * ROW_COUNT - 1);
    }

    #[test]
    fn test_reading_from_datetime() {
        let dt = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap();
        let r = ClockReading::from_datetime(&dt);
        // 2026-10-18 is a Sunday
        assert_eq!(r, reading(7, 8, 9, 18, 9, 0));
        assert_eq!(weekday7(r.wday), 7);
    }
}
