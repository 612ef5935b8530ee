/*
 *  display/mod.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - drivers the face paints on
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

pub mod traits;
pub mod error;
pub mod vframebuf;
pub mod drivers;

pub use traits::{DisplayDriver, DisplayCapabilities};
pub use error::DisplayError;
pub use vframebuf::VarFrameBuf;
pub use drivers::{MockDriver, TerminalDriver};
