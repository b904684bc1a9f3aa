//! Headless spin simulation
//!
//! Runs the controller against a synthetic clock, the same way the window
//! timer would, and tallies the outcomes.

use std::fmt;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::app::controller::{SlotController, TickResult};

/// Hard cap on ticks per spin, well past anything a valid config produces
const MAX_TICKS_PER_SPIN: u64 = 1_000_000;

/// Aggregated results of a simulation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationReport {
    pub spins: u64,
    pub wins: u64,
    pub total_ticks: u64,
}

impl SimulationReport {
    pub fn losses(&self) -> u64 {
        self.spins - self.wins
    }

    pub fn win_rate(&self) -> f64 {
        if self.spins == 0 {
            return 0.0;
        }
        self.wins as f64 / self.spins as f64
    }

    pub fn average_ticks(&self) -> f64 {
        if self.spins == 0 {
            return 0.0;
        }
        self.total_ticks as f64 / self.spins as f64
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "spins:          {}", self.spins)?;
        writeln!(f, "wins:           {}", self.wins)?;
        writeln!(f, "losses:         {}", self.losses())?;
        writeln!(f, "win rate:       {:.4}", self.win_rate())?;
        write!(f, "ticks per spin: {:.1}", self.average_ticks())
    }
}

/// Pulls the lever `spins` times, ticking every `frame` until each spin stops
pub fn run<R: Rng>(controller: &mut SlotController<R>, spins: u64, frame: Duration) -> SimulationReport {
    let mut report = SimulationReport::default();
    if frame.is_zero() {
        tracing::warn!("zero frame duration, reels would never settle");
        return report;
    }
    let mut now = Instant::now();

    for _ in 0..spins {
        controller.pull(now);

        let mut ticks = 0u64;
        loop {
            now += frame;
            ticks += 1;
            match controller.tick(now) {
                TickResult::Stopped(outcome) => {
                    report.wins += u64::from(outcome.is_win());
                    break;
                }
                TickResult::Idle => break,
                TickResult::Rolling if ticks >= MAX_TICKS_PER_SPIN => {
                    tracing::warn!(ticks, "spin did not settle, abandoning simulation");
                    controller.abort();
                    return report;
                }
                TickResult::Rolling => {}
            }
        }

        report.spins += 1;
        report.total_ticks += ticks;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_run_reports_zero() {
        let report = SimulationReport::default();
        assert_eq!(report.win_rate(), 0.0);
        assert_eq!(report.average_ticks(), 0.0);
        assert_eq!(report.losses(), 0);
    }

    #[test]
    fn win_rate_matches_uniform_odds() {
        let config = MachineConfig {
            default_cycles: 1,
            ..MachineConfig::default()
        };
        let mut controller = SlotController::new(&config, StdRng::seed_from_u64(2024)).unwrap();

        let report = run(&mut controller, 8_000, Duration::from_millis(16));

        assert_eq!(report.spins, 8_000);
        assert_eq!(report.wins + report.losses(), 8_000);
        // four symbols: P(win) = 4 / 64 = 0.0625
        assert!((0.05..0.075).contains(&report.win_rate()), "win rate {}", report.win_rate());
        assert!(!controller.is_spinning());
    }

    #[test]
    fn ticks_scale_with_cycles() {
        let short = MachineConfig {
            default_cycles: 2,
            ..MachineConfig::default()
        };
        let long = MachineConfig {
            default_cycles: 40,
            ..MachineConfig::default()
        };

        let mut a = SlotController::new(&short, StdRng::seed_from_u64(1)).unwrap();
        let mut b = SlotController::new(&long, StdRng::seed_from_u64(1)).unwrap();

        let frame = Duration::from_millis(16);
        let short_report = run(&mut a, 20, frame);
        let long_report = run(&mut b, 20, frame);

        assert!(long_report.average_ticks() > short_report.average_ticks() * 5.0);
    }

    #[test]
    fn zero_frame_runs_no_spins() {
        let mut controller = SlotController::new(&MachineConfig::default(), StdRng::seed_from_u64(5)).unwrap();

        let report = run(&mut controller, 5, Duration::ZERO);

        assert_eq!(report, SimulationReport::default());
        assert!(!controller.is_spinning());
    }

    #[test]
    fn stuck_spin_is_aborted() {
        let mut controller = SlotController::new(&MachineConfig::default(), StdRng::seed_from_u64(6)).unwrap();

        // a nanosecond per tick cannot cover ten cycles within the tick cap
        let report = run(&mut controller, 3, Duration::from_nanos(1));

        assert_eq!(report.spins, 0);
        assert!(!controller.is_spinning());
    }

    #[test]
    fn report_formats_summary() {
        let report = SimulationReport {
            spins: 16,
            wins: 1,
            total_ticks: 160,
        };
        let text = report.to_string();
        assert!(text.contains("spins:          16"));
        assert!(text.contains("losses:         15"));
        assert!(text.contains("win rate:       0.0625"));
        assert!(text.contains("ticks per spin: 10.0"));
    }
}
