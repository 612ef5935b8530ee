/*
 *  app.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  Redraw orchestration - event handlers, dirty layers and paint pass
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
use log::{debug, info};

use crate::constants::BACKGROUND_COLOR;
use crate::encoding::{render_time, HourMode, IndicatorGrid};
use crate::sources::{BatterySource, ClockSource, ConnectionSource};
use crate::status::{render_battery, render_connection, BatteryStatus};

/// Face layers, in paint order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Time,
    Battery,
    Connection,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Time, Layer::Battery, Layer::Connection];

    fn mask(self) -> u8 {
        match self {
            Layer::Time => 0b001,
            Layer::Battery => 0b010,
            Layer::Connection => 0b100,
        }
    }
}

/// Set of layers awaiting a repaint. Marking twice is the same as marking once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyLayers(u8);

impl DirtyLayers {
    pub fn all() -> Self {
        Layer::ALL.iter().fold(Self::default(), |mut d, &l| {
            d.mark(l);
            d
        })
    }

    pub fn mark(&mut self, layer: Layer) {
        self.0 |= layer.mask();
    }

    pub fn contains(&self, layer: Layer) -> bool {
        self.0 & layer.mask() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Hand back the pending set and clear it
    pub fn take(&mut self) -> DirtyLayers {
        std::mem::take(self)
    }

    /// Layers in paint order
    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        Layer::ALL.into_iter().filter(move |l| self.contains(*l))
    }
}

/// Last known status, written by the notification handlers and read by the paint pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppState {
    pub battery: BatteryStatus,
    pub connected: bool,
}

/// What a paint pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub layers: DirtyLayers,
    pub cleared: bool,
}

impl RenderReport {
    pub fn painted(&self) -> bool {
        self.cleared || !self.layers.is_empty()
    }
}

/// Events the host delivers to a face
pub trait FaceHandler {
    /// Once per second
    fn on_tick(&mut self);

    fn on_battery_change(&mut self, battery: BatteryStatus);

    fn on_connection_change(&mut self, connected: bool);

    /// Paint every dirty layer and clear the dirty set
    fn render<D>(&mut self, target: &mut D) -> Result<RenderReport, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>;
}

/// The binary clock face
pub struct WatchFace<C: ClockSource> {
    clock: C,
    state: AppState,
    dirty: DirtyLayers,
    background_painted: bool,
    last_grid: Option<IndicatorGrid>,
    last_mode: Option<HourMode>,
}

impl<C: ClockSource> WatchFace<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: AppState::default(),
            dirty: DirtyLayers::default(),
            background_painted: false,
            last_grid: None,
            last_mode: None,
        }
    }

    /// Start-up: show the time at once and pick up the current status
    pub fn init<B, N>(&mut self, battery: &mut B, connection: &mut N)
    where
        B: BatterySource,
        N: ConnectionSource,
    {
        self.on_tick();
        self.on_battery_change(battery.peek());
        self.on_connection_change(connection.peek());
        info!(
            "face ready: battery {}%, connected {}",
            self.state.battery.charge_percent, self.state.connected
        );
    }

    pub fn mark_dirty(&mut self, layer: Layer) {
        self.dirty.mark(layer);
    }

    pub fn dirty(&self) -> DirtyLayers {
        self.dirty
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Grid from the most recent time paint
    pub fn last_grid(&self) -> Option<&IndicatorGrid> {
        self.last_grid.as_ref()
    }
}

impl<C: ClockSource> FaceHandler for WatchFace<C> {
    fn on_tick(&mut self) {
        self.mark_dirty(Layer::Time);
    }

    fn on_battery_change(&mut self, battery: BatteryStatus) {
        if battery != self.state.battery {
            debug!(
                "battery {}% charging={} plugged={}",
                battery.charge_percent, battery.is_charging, battery.is_plugged
            );
        }
        self.state.battery = battery;
        self.mark_dirty(Layer::Battery);
    }

    fn on_connection_change(&mut self, connected: bool) {
        if connected != self.state.connected {
            info!("connection {}", if connected { "up" } else { "down" });
        }
        self.state.connected = connected;
        self.mark_dirty(Layer::Connection);
    }

    fn render<D>(&mut self, target: &mut D) -> Result<RenderReport, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let mut report = RenderReport::default();

        // black window behind the first paint, everything on top of it
        if !self.background_painted {
            target.clear(BACKGROUND_COLOR)?;
            self.background_painted = true;
            self.dirty = DirtyLayers::all();
            report.cleared = true;
        }

        let dirty = self.dirty.take();
        for layer in dirty.iter() {
            match layer {
                Layer::Time => {
                    let mode = self.clock.hour_mode();
                    if self.last_mode != Some(mode) {
                        debug!("hour mode {:?}", mode);
                        self.last_mode = Some(mode);
                    }
                    let reading = self.clock.now();
                    self.last_grid = Some(render_time(target, &reading, mode)?);
                }
                Layer::Battery => render_battery(target, &self.state.battery)?,
                Layer::Connection => render_connection(target, self.state.connected)?,
            }
        }
        report.layers = dirty;

        Ok(report)
    }
}
