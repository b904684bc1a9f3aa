//! Spin controller and tick handler
//!
//! The controller owns everything a spin touches: the reel indices, the
//! animation timing and the random source. The window shell feeds it button
//! presses and timer ticks and acts on what it returns; it never mutates
//! machine state directly.

use std::time::Instant;

use rand::Rng;

use crate::app::AppError;
use crate::app::state::{MachineEvent, MachineState, StateMachine};
use crate::config::MachineConfig;
use crate::domain::animation::{AnimationState, AnimationStep};
use crate::domain::outcome::{self, SpinOutcome};
use crate::domain::reels::{REEL_COUNT, ReelState};

/// What happened when the lever was pulled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullResult {
    /// A spin started; the caller should start the animation timer
    Started { cycles: u32 },
    /// A spin was already running
    Ignored,
}

/// What happened on a timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// No spin in progress
    Idle,
    /// Reels still moving
    Rolling,
    /// Reels came to rest on this tick
    Stopped(SpinOutcome),
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub symbols: [usize; REEL_COUNT],
    pub symbol_count: usize,
    pub remaining_cycles: u32,
    pub rotation_offset: f32,
}

/// Slot machine controller
pub struct SlotController<R: Rng> {
    state: MachineState,
    reels: ReelState,
    animation: AnimationState,
    rng: R,
    /// Current value of the cycles control
    cycles: u32,
    min_cycles: u32,
    max_cycles: u32,
}

impl<R: Rng> SlotController<R> {
    /// Creates an idle controller with randomly placed reels
    pub fn new(config: &MachineConfig, mut rng: R) -> Result<Self, AppError> {
        config.validate()?;
        let reels = ReelState::random(config.symbol_count(), &mut rng)?;

        Ok(Self {
            state: MachineState::default(),
            reels,
            animation: AnimationState::new(config.spin_speed),
            rng,
            cycles: config.initial_cycles(),
            min_cycles: config.min_cycles,
            max_cycles: config.max_cycles,
        })
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Handles a pull of the lever at `now`
    ///
    /// Ignored while spinning. Otherwise the final symbols are drawn up front
    /// and the animation is armed for the configured number of cycles.
    pub fn pull(&mut self, now: Instant) -> PullResult {
        if self.state.is_spinning() {
            tracing::debug!("pull ignored, reels already spinning");
            return PullResult::Ignored;
        }

        let cycles = self.cycles;
        self.state = StateMachine::process_event(
            self.state,
            MachineEvent::PullRequested { cycles, at: now },
        );
        self.reels.reroll(&mut self.rng);
        self.animation.start(cycles, now);

        tracing::debug!(cycles, symbols = ?self.reels.symbols(), "spin started");
        PullResult::Started { cycles }
    }

    /// Advances the animation to `now`
    pub fn tick(&mut self, now: Instant) -> TickResult {
        if !self.state.is_spinning() {
            return TickResult::Idle;
        }

        match self.animation.advance(now) {
            AnimationStep::Rolling => TickResult::Rolling,
            AnimationStep::Settled => {
                if let MachineState::Spinning(spin) = self.state {
                    let elapsed_ms = now.saturating_duration_since(spin.started_at).as_millis() as u64;
                    tracing::debug!(cycles = spin.cycles_requested, elapsed_ms, "reels at rest");
                }
                self.state = StateMachine::process_event(self.state, MachineEvent::SpinSettled);
                let outcome = outcome::evaluate(self.reels.symbols());
                tracing::debug!(?outcome, "spin settled");
                TickResult::Stopped(outcome)
            }
        }
    }

    /// Cancels a running spin, leaving the reels on their drawn symbols
    ///
    /// Returns false if no spin was in progress.
    pub fn abort(&mut self) -> bool {
        let MachineState::Spinning(spin) = self.state else {
            return false;
        };

        tracing::warn!(cycles = spin.cycles_requested, remaining = self.animation.remaining_cycles(), "spin aborted");
        self.animation.settle();
        self.state = StateMachine::process_event(self.state, MachineEvent::SpinAborted);
        true
    }
}

// Queries and controls driven by the window shell.
#[cfg_attr(not(windows), allow(dead_code))]
impl<R: Rng> SlotController<R> {
    /// Sets the cycle count used by the next pull, clamped into bounds
    pub fn set_cycles(&mut self, value: u32) -> u32 {
        self.cycles = value.clamp(self.min_cycles, self.max_cycles);
        self.cycles
    }

    /// Inclusive bounds of the cycles control
    pub fn cycle_bounds(&self) -> (u32, u32) {
        (self.min_cycles, self.max_cycles)
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning()
    }

    /// Captures the drawable state of the machine
    pub fn frame(&self) -> FrameSnapshot {
        FrameSnapshot {
            symbols: self.reels.symbols(),
            symbol_count: self.reels.symbol_count(),
            remaining_cycles: self.animation.remaining_cycles(),
            rotation_offset: self.animation.rotation_offset(),
        }
    }
}
