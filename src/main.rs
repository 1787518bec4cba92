//! Vortex Sim entry point
//!
//! Headless runner: drives the simulation from the wall clock at the step
//! rate and logs diagnostics once per simulated second.
//!
//! Usage: `vortex-sim [config.json] [seconds]`

use std::process::ExitCode;
use std::time::{Duration, Instant};

use vortex_sim::SimConfig;
use vortex_sim::sim::TickInput;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Vortex Sim (headless) starting...");

    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };

    let run_for = match args.next().map(|s| s.parse::<f64>()) {
        None => None,
        Some(Ok(secs)) if secs.is_finite() && secs >= 0.0 => Some(Duration::from_secs_f64(secs)),
        Some(_) => {
            log::error!("Run length must be a non-negative number of seconds");
            return ExitCode::FAILURE;
        }
    };

    let mut simulation = match config.build_simulation() {
        Ok(simulation) => simulation,
        Err(err) => {
            log::error!("Invalid config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let input = TickInput::new(config.viewport);
    let interval = match Duration::try_from_secs_f64(config.dt) {
        Ok(interval) => interval,
        Err(err) => {
            log::error!("Step size {}s cannot be slept: {err}", config.dt);
            return ExitCode::FAILURE;
        }
    };
    let ticks_per_report = (1.0 / config.dt).round().max(1.0) as u64;

    let started = Instant::now();
    let mut before = started;
    let mut next_report = ticks_per_report;

    log::info!("{}", simulation.diagnostics());

    loop {
        std::thread::sleep(interval);

        let now = Instant::now();
        let elapsed = now.duration_since(before).as_secs_f64();
        before = now;

        let snapshot = simulation.advance(elapsed, &input);
        if snapshot.ticks >= next_report {
            log::info!("t={} {}", snapshot.ticks, snapshot.diagnostics());
            next_report = snapshot.ticks + ticks_per_report;
        }

        if run_for.is_some_and(|limit| now.duration_since(started) >= limit) {
            break;
        }
    }

    log::info!("Stopped after {} ticks", simulation.ticks());
    ExitCode::SUCCESS
}
