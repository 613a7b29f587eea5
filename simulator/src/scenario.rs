//! Scripted drive used by the simulator.
//!
//! A scenario is a list of phases. Each phase holds its inputs constant for a
//! number of ticks; phases with `press` set hold the ignition button down for
//! the first tick and release it after.

use ignition_interlock::{AnalogInputs, Inputs, SafetyInputs};

/// Selector voltages for each band.
const SELECTOR_OFF_MV: u16 = 400;
const SELECTOR_AUTO_MV: u16 = 2000;
const SELECTOR_ON_MV: u16 = 3500;

/// Light sensor levels.
const DAYLIGHT_MV: u16 = 3000;
const DUSK_MV: u16 = 400;

const EMPTY: SafetyInputs = SafetyInputs {
    driver_seat: false,
    passenger_seat: false,
    driver_belt: false,
    passenger_belt: false,
    ignition_button: false,
};

const DRIVER_SEATED: SafetyInputs = SafetyInputs {
    driver_seat: true,
    ..EMPTY
};

const DRIVER_BELTED: SafetyInputs = SafetyInputs {
    driver_belt: true,
    ..DRIVER_SEATED
};

const PASSENGER_UNBELTED: SafetyInputs = SafetyInputs {
    passenger_belt: false,
    ..SafetyInputs::ALL_SAFE
};

/// One stretch of constant inputs.
pub struct Phase {
    pub label: &'static str,
    pub ticks: u32,
    pub safety: SafetyInputs,
    pub press: bool,
    pub selector_mv: u16,
    pub light_mv: u16,
}

impl Phase {
    /// Inputs for tick `n` (0-based) within this phase.
    pub fn inputs(
        &self,
        n: u32,
    ) -> Inputs {
        Inputs {
            safety: self.safety.with_button(self.press && n == 0),
            analog: AnalogInputs {
                mode_selector_mv: self.selector_mv,
                light_sensor_mv: self.light_mv,
            },
        }
    }
}

const fn phase(
    label: &'static str,
    ticks: u32,
    safety: SafetyInputs,
    press: bool,
    selector_mv: u16,
    light_mv: u16,
) -> Phase {
    Phase {
        label,
        ticks,
        safety,
        press,
        selector_mv,
        light_mv,
    }
}

/// Default drive: boarding, a refused start, a start, dusk, a belt coming
/// off mid-drive, daylight, manual ON and finally engine stop.
pub const DRIVE: &[Phase] = &[
    phase("Car empty", 10, EMPTY, false, SELECTOR_AUTO_MV, DAYLIGHT_MV),
    phase("Driver sits down", 10, DRIVER_SEATED, false, SELECTOR_AUTO_MV, DAYLIGHT_MV),
    phase("Driver buckles up", 5, DRIVER_BELTED, false, SELECTOR_AUTO_MV, DAYLIGHT_MV),
    phase("Start attempt, passenger missing", 5, DRIVER_BELTED, true, SELECTOR_AUTO_MV, DAYLIGHT_MV),
    phase("Passenger sits down", 5, PASSENGER_UNBELTED, false, SELECTOR_AUTO_MV, DAYLIGHT_MV),
    phase("Start attempt, passenger unbelted", 5, PASSENGER_UNBELTED, true, SELECTOR_AUTO_MV, DAYLIGHT_MV),
    phase("Passenger buckles up", 5, SafetyInputs::ALL_SAFE, false, SELECTOR_AUTO_MV, DAYLIGHT_MV),
    phase("Start engine", 10, SafetyInputs::ALL_SAFE, true, SELECTOR_AUTO_MV, DAYLIGHT_MV),
    phase("Driving in daylight (AUTO)", 30, SafetyInputs::ALL_SAFE, false, SELECTOR_AUTO_MV, DAYLIGHT_MV),
    phase("Dusk falls", 50, SafetyInputs::ALL_SAFE, false, SELECTOR_AUTO_MV, DUSK_MV),
    phase("Passenger unbuckles while driving", 20, PASSENGER_UNBELTED, false, SELECTOR_AUTO_MV, DUSK_MV),
    phase("Sun comes back out", 70, PASSENGER_UNBELTED, false, SELECTOR_AUTO_MV, DAYLIGHT_MV),
    phase("Selector to ON", 30, PASSENGER_UNBELTED, false, SELECTOR_ON_MV, DAYLIGHT_MV),
    phase("Selector to OFF", 30, PASSENGER_UNBELTED, false, SELECTOR_OFF_MV, DUSK_MV),
    phase("Stop engine", 10, PASSENGER_UNBELTED, true, SELECTOR_ON_MV, DUSK_MV),
    phase("Everyone leaves", 10, EMPTY, false, SELECTOR_ON_MV, DUSK_MV),
];

/// Total ticks in a scenario.
pub fn total_ticks(scenario: &[Phase]) -> u32 { scenario.iter().map(|p| p.ticks).sum() }

#[cfg(test)]
mod tests {
    use ignition_interlock::{Controller, Notification};

    use super::*;

    fn replay(scenario: &[Phase]) -> (Controller, Vec<Notification>) {
        let mut controller = Controller::default();
        let mut seen = Vec::new();
        for phase in scenario {
            for n in 0..phase.ticks {
                seen.extend(controller.step(&phase.inputs(n)).notifications.iter().copied());
            }
        }
        (controller, seen)
    }

    fn count(
        seen: &[Notification],
        kind: Notification,
    ) -> usize {
        seen.iter().filter(|n| **n == kind).count()
    }

    #[test]
    fn test_press_only_on_first_tick() {
        let start = &DRIVE[7];
        assert!(start.press);
        assert!(start.inputs(0).safety.ignition_button);
        assert!(!start.inputs(1).safety.ignition_button);
    }

    #[test]
    fn test_drive_story() {
        let (controller, seen) = replay(DRIVE);
        assert_eq!(count(&seen, Notification::Welcome), 1);
        assert_eq!(count(&seen, Notification::IgnitionInhibited), 2);
        assert_eq!(count(&seen, Notification::PassengerSeatEmpty), 1);
        assert_eq!(count(&seen, Notification::PassengerBeltOpen), 2);
        assert_eq!(count(&seen, Notification::EngineStarted), 1);
        assert_eq!(count(&seen, Notification::EngineStopped), 1);
        assert!(!controller.ignition().engine_running());
        assert!(!controller.headlights().headlights_on());
        assert_eq!(controller.ticks(), total_ticks(DRIVE));
    }

    #[test]
    fn test_dusk_phase_turns_headlights_on() {
        // Everything up to and including "Dusk falls"
        let (controller, _) = replay(&DRIVE[..10]);
        assert!(controller.ignition().engine_running());
        assert!(controller.headlights().headlights_on());
    }
}
