//! Ignition Interlock Simulator for desktop platforms.
//!
//! Replays a scripted drive through the same `Controller` the firmware runs
//! and prints every notification and actuator change with its simulated time.
//!
//! Usage: `simulator [--fast]` (`--fast` skips the real-time pacing)

mod scenario;
mod timing;

use std::thread;
use std::time::Instant;

use ignition_interlock::{Config, Controller, IgnitionPhase, Outputs};

use crate::scenario::{DRIVE, total_ticks};
use crate::timing::{SimClock, format_elapsed, tick_duration};

/// Actuator levels shown in the trace.
#[derive(Clone, Copy, PartialEq, Eq)]
struct ActuatorView {
    phase: IgnitionPhase,
    ready: bool,
    running: bool,
    headlights: bool,
}

impl ActuatorView {
    fn from_outputs(outputs: &Outputs) -> Self {
        Self {
            phase: outputs.phase,
            ready: outputs.ready_led,
            running: outputs.running_led,
            headlights: outputs.headlight_relays,
        }
    }
}

const fn on_off(level: bool) -> &'static str {
    if level { "ON " } else { "off" }
}

fn main() {
    let fast = std::env::args().any(|arg| arg == "--fast");

    if let Err(e) = Config::DEFAULT.validate() {
        eprintln!("Invalid configuration: {e}");
        return;
    }

    let mut controller = Controller::new(Config::DEFAULT);
    let config = *controller.config();
    let mut last_view: Option<ActuatorView> = None;
    let mut last_mode = None;
    let mut clock = SimClock::new();
    let start = Instant::now();

    println!("System ready.");
    println!(
        "Replaying {} ticks ({} ms each){}",
        total_ticks(DRIVE),
        config.tick_ms,
        if fast { ", fast mode" } else { "" }
    );

    for phase in DRIVE {
        println!();
        println!("[{}] -- {} --", format_elapsed(clock.elapsed_ms()), phase.label);

        for n in 0..phase.ticks {
            let tick_start = Instant::now();
            let outputs = controller.step(&phase.inputs(n));
            let stamp = format_elapsed(clock.elapsed_ms());

            for notification in outputs.notifications.iter() {
                println!("[{stamp}] {}", notification.message());
            }

            let view = ActuatorView::from_outputs(&outputs);
            if last_view != Some(view) {
                println!(
                    "[{stamp}]   {:<7} | ready {} | running {} | headlights {}",
                    view.phase.as_str(),
                    on_off(view.ready),
                    on_off(view.running),
                    on_off(view.headlights)
                );
                last_view = Some(view);
            }

            if outputs.headlight_mode != last_mode {
                if let Some(mode) = outputs.headlight_mode {
                    println!(
                        "[{stamp}]   headlight mode {} (selector {} mV, light {} mV)",
                        mode.as_str(),
                        outputs.filtered.mode_selector_mv,
                        outputs.filtered.light_sensor_mv
                    );
                }
                last_mode = outputs.headlight_mode;
            }

            // Inhibited start holds the whole loop, as on the device
            let held = clock.finish_tick(&outputs, &config);
            if let Some(pulse) = held {
                println!("[{stamp}]   buzzer {} ms", pulse.as_millis());
                if !fast {
                    thread::sleep(pulse);
                }
            }

            // The tick delay starts after the pulse
            if !fast {
                let tick = tick_duration(&config);
                let spent = tick_start.elapsed().saturating_sub(held.unwrap_or_default());
                if spent < tick {
                    thread::sleep(tick - spent);
                }
            }
        }
    }

    println!();
    println!("Last notifications:");
    for line in controller.log().iter() {
        println!("  {line}");
    }
    println!(
        "Simulated {} ticks in {:.2}s wall time",
        controller.ticks(),
        start.elapsed().as_secs_f32()
    );
}
