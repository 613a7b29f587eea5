//! Timing helpers for the simulator.
//!
//! These use `std::time::Duration`, which is not available in the `no_std`
//! library, so they live here rather than in `config`.

use std::time::Duration;

use ignition_interlock::{Config, Outputs};

/// Wall-clock length of one control tick.
pub fn tick_duration(config: &Config) -> Duration { Duration::from_millis(u64::from(config.tick_ms)) }

/// Wall-clock length of the buzzer pulse (the loop is held for this long).
pub fn buzzer_duration(pulse_ms: u32) -> Duration { Duration::from_millis(u64::from(pulse_ms)) }

/// Format simulated time as seconds with millisecond precision.
pub fn format_elapsed(elapsed_ms: u64) -> String { format!("{:>4}.{:03}s", elapsed_ms / 1000, elapsed_ms % 1000) }

// =============================================================================
// Simulated Clock
// =============================================================================

/// Simulated time since power on, advanced the way the firmware loop spends it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimClock {
    elapsed_ms: u64,
}

impl SimClock {
    pub const fn new() -> Self { Self { elapsed_ms: 0 } }

    #[inline]
    pub const fn elapsed_ms(&self) -> u64 { self.elapsed_ms }

    /// Account for the time one tick's outputs hold the loop.
    ///
    /// A buzzer pulse blocks before the tick delay, so the next `step` sees
    /// both. Returns the pulse length when there is one, for real-time pacing.
    pub fn finish_tick(
        &mut self,
        outputs: &Outputs,
        config: &Config,
    ) -> Option<Duration> {
        let pulse = outputs.buzzer_pulse_ms.map(|pulse_ms| {
            self.elapsed_ms += u64::from(pulse_ms);
            buzzer_duration(pulse_ms)
        });
        self.elapsed_ms += u64::from(config.tick_ms);
        pulse
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
