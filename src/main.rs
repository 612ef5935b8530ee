/*
 *  main.rs
 *
 *  SmartBits - every second counts
 *  (c) 2020-26 Stuart Hunter
 *
 *  Host runner - drives the face from the system clock and paints it on the terminal
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

use anyhow::{Context, Result};
use env_logger::Env;
use log::{debug, info};
use std::io::Stdout;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use smartbits::config::{self, Config};
use smartbits::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use smartbits::display::{DisplayDriver, TerminalDriver};
use smartbits::sources::{
    BatterySource, ChangeDetector, ConnectionSource, NetworkConnection, SysfsBattery, SystemClock,
};
use smartbits::{FaceHandler, WatchFace};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

const TICK: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> Result<()> {
    let (cfg, cli) = config::load().context("loading configuration")?;

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    if cli.dump_config {
        println!("{}", config::dump(&cfg)?);
        return Ok(());
    }

    info!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);
    info!("hour mode {:?}, status poll every {}s", cfg.hour_mode(), cfg.poll_secs());

    let mut driver = TerminalDriver::new(SCREEN_WIDTH, SCREEN_HEIGHT, std::io::stdout())
        .with_ansi(cfg.ansi.unwrap_or(false));
    driver.init().context("initialising terminal display")?;

    run_until_shutdown(signal_handler(), run_face(&cfg, &mut driver)).await?;

    info!("{} frames painted", driver.frames());
    Ok(())
}

/// Drive `face` until it finishes or `shutdown` resolves; errors from either side propagate
async fn run_until_shutdown<S, F>(shutdown: S, face: F) -> Result<()>
where
    S: Future<Output = Result<()>>,
    F: Future<Output = Result<()>>,
{
    tokio::select! {
        res = shutdown => res.context("installing signal handlers"),
        res = face => res,
    }
}

/// Tick once a second, poll status sources, paint whatever went dirty
async fn run_face(cfg: &Config, driver: &mut TerminalDriver<Stdout>) -> Result<()> {
    let mut battery = SysfsBattery::new(cfg.battery_path());
    let mut connection = NetworkConnection;

    let mut face = WatchFace::new(SystemClock::new(cfg.hour_mode()));
    face.init(&mut battery, &mut connection);

    let mut battery_watch = ChangeDetector::new();
    let mut connection_watch = ChangeDetector::new();
    battery_watch.update(face.state().battery);
    connection_watch.update(face.state().connected);

    let mut ticker = interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let poll_every = cfg.poll_secs();
    let mut ticks: u64 = 0;

    loop {
        ticker.tick().await;
        face.on_tick();

        if ticks > 0 && ticks % poll_every == 0 {
            if let Some(status) = battery_watch.update(battery.peek()) {
                face.on_battery_change(status);
            }
            if let Some(connected) = connection_watch.update(connection.peek()) {
                face.on_connection_change(connected);
            }
        }

        let Ok(report) = face.render(driver);
        if report.painted() {
            driver.flush().context("flushing frame")?;
            debug!("painted {} layer(s)", report.layers.len());
        }

        ticks += 1;
        if cfg.frames.is_some_and(|limit| ticks >= limit) {
            info!("frame limit reached");
            return Ok(());
        }
    }
}

#[cfg(unix)]
async fn signal_handler() -> Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Initiating graceful shutdown.");
    Ok(())
}
