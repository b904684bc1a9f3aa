//! Machine state management
//!
//! Defines the idle/spinning state machine and its transitions. Transitions
//! are pure so the controller and the tests drive the same table.

use std::time::Instant;

/// Main machine state - either idle or spinning the reels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MachineState {
    /// Waiting for the lever to be pulled
    #[default]
    Idle,
    /// Reels are rolling
    Spinning(SpinningState),
}

impl MachineState {
    pub fn is_spinning(&self) -> bool {
        matches!(self, MachineState::Spinning(_))
    }
}

/// State carried for the duration of a spin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinningState {
    /// Cycle count the spin was started with
    pub cycles_requested: u32,
    /// When the lever was pulled
    pub started_at: Instant,
}

/// Possible state transition events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineEvent {
    /// Pull button pressed
    PullRequested { cycles: u32, at: Instant },
    /// Animation snapped to rest
    SpinSettled,
    /// Spin cancelled before the reels settled
    SpinAborted,
}

/// State machine for machine state transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes an event and returns the new state
    pub fn process_event(current_state: MachineState, event: MachineEvent) -> MachineState {
        match (current_state, event) {
            (MachineState::Idle, MachineEvent::PullRequested { cycles, at }) => {
                MachineState::Spinning(SpinningState {
                    cycles_requested: cycles,
                    started_at: at,
                })
            }

            (MachineState::Spinning(_), MachineEvent::SpinSettled | MachineEvent::SpinAborted) => {
                MachineState::Idle
            }

            // Pulling while spinning, or settling while idle, changes nothing
            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        assert_eq!(MachineState::default(), MachineState::Idle);
        assert!(!MachineState::default().is_spinning());
    }

    #[test]
    fn pull_starts_spinning() {
        let at = Instant::now();
        let state = StateMachine::process_event(
            MachineState::Idle,
            MachineEvent::PullRequested { cycles: 7, at },
        );

        match state {
            MachineState::Spinning(spinning) => {
                assert_eq!(spinning.cycles_requested, 7);
                assert_eq!(spinning.started_at, at);
            }
            MachineState::Idle => panic!("Expected spinning state"),
        }
    }

    #[test]
    fn pull_while_spinning_is_ignored() {
        let at = Instant::now();
        let spinning = StateMachine::process_event(
            MachineState::Idle,
            MachineEvent::PullRequested { cycles: 3, at },
        );

        let again = StateMachine::process_event(
            spinning,
            MachineEvent::PullRequested { cycles: 50, at },
        );

        assert_eq!(again, spinning);
    }

    #[test]
    fn settle_returns_to_idle() {
        let spinning = StateMachine::process_event(
            MachineState::Idle,
            MachineEvent::PullRequested { cycles: 3, at: Instant::now() },
        );
        let state = StateMachine::process_event(spinning, MachineEvent::SpinSettled);
        assert_eq!(state, MachineState::Idle);
    }

    #[test]
    fn abort_returns_to_idle() {
        let spinning = StateMachine::process_event(
            MachineState::Idle,
            MachineEvent::PullRequested { cycles: 3, at: Instant::now() },
        );
        let state = StateMachine::process_event(spinning, MachineEvent::SpinAborted);
        assert_eq!(state, MachineState::Idle);
    }

    #[test]
    fn settle_while_idle_is_ignored() {
        let state = StateMachine::process_event(MachineState::Idle, MachineEvent::SpinSettled);
        assert_eq!(state, MachineState::Idle);
    }
}
