/*
 *  lib.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  Binary clock watch face - month, day, hour, minute, second and weekday as LEDs
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

pub mod constants;
pub mod layout;
pub mod indicator;
pub mod encoding;
pub mod status;
pub mod sources;
pub mod app;
pub mod display;
pub mod config;

pub use app::{AppState, DirtyLayers, FaceHandler, Layer, RenderReport, WatchFace};
pub use encoding::{encode_time, ClockReading, HourMode, IndicatorGrid};
pub use layout::{get_center, LedAddress};
pub use status::BatteryStatus;
