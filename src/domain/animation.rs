//! Spin animation timing
//!
//! The reels roll by advancing a fractional rotation offset proportional to
//! the real time elapsed between ticks. Every time the offset wraps past 1.0
//! one cycle is consumed. Once the cycles run out the offset is snapped back
//! to zero and the animation settles.

use std::time::Instant;

/// Result of advancing the animation by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    /// The reels are still moving; redraw and keep ticking
    Rolling,
    /// The offset snapped to zero on this tick; the spin is over
    Settled,
}

/// Timing state of the reel animation
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    remaining_cycles: u32,
    rotation_offset: f32,
    spin_speed: f32,
    /// Timestamp of the previous tick, `None` when settled
    last_update: Option<Instant>,
}

impl AnimationState {
    /// Creates a settled animation rolling at `spin_speed` symbols per second
    pub fn new(spin_speed: f32) -> Self {
        Self {
            remaining_cycles: 0,
            rotation_offset: 0.0,
            spin_speed,
            last_update: None,
        }
    }

    /// Starts a new spin of `cycles` symbol steps at time `now`
    pub fn start(&mut self, cycles: u32, now: Instant) {
        self.remaining_cycles = cycles;
        self.rotation_offset = 0.0;
        self.last_update = Some(now);
    }

    /// Advances the animation to `now`.
    ///
    /// Ticking a settled animation is a no-op that reports [`AnimationStep::Settled`].
    pub fn advance(&mut self, now: Instant) -> AnimationStep {
        let Some(last_update) = self.last_update else {
            return AnimationStep::Settled;
        };

        let elapsed = now.saturating_duration_since(last_update);
        self.last_update = Some(now);
        let delta = self.spin_speed * elapsed.as_secs_f32();

        if self.remaining_cycles > 0 {
            self.rotation_offset += delta;
            while self.rotation_offset >= 1.0 && self.remaining_cycles > 0 {
                self.rotation_offset -= 1.0;
                self.remaining_cycles -= 1;
            }
            // Only reachable after a long stall ate every remaining cycle.
            if self.rotation_offset >= 1.0 {
                self.rotation_offset = 0.0;
            }
            return AnimationStep::Rolling;
        }

        // Stop phase: snap once the next step would carry the offset past zero.
        if self.rotation_offset < delta {
            self.settle();
            return AnimationStep::Settled;
        }

        // A frozen offset never passes the test above once frames get shorter
        // than the leftover, so keep rolling and snap at 1.0 instead.
        self.rotation_offset += delta;
        if self.rotation_offset >= 1.0 {
            self.settle();
            return AnimationStep::Settled;
        }

        AnimationStep::Rolling
    }

    /// Cycles left before the stop phase begins
    pub fn remaining_cycles(&self) -> u32 {
        self.remaining_cycles
    }

    /// Fractional progress through the current symbol transition, in `[0, 1)`
    pub fn rotation_offset(&self) -> f32 {
        self.rotation_offset
    }

    /// Brings the reels to rest immediately
    pub fn settle(&mut self) {
        self.rotation_offset = 0.0;
        self.remaining_cycles = 0;
        self.last_update = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::time::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn new_animation_is_settled() {
        let mut anim = AnimationState::new(20.0);
        assert_eq!(anim.remaining_cycles(), 0);
        assert_eq!(anim.advance(Instant::now()), AnimationStep::Settled);
        assert_eq!(anim.rotation_offset(), 0.0);
    }

    #[test]
    fn offset_advances_with_elapsed_time() {
        let t0 = Instant::now();
        let mut anim = AnimationState::new(20.0);
        anim.start(5, t0);

        // 20 symbols/s for 25ms = half a symbol
        assert_eq!(anim.advance(t0 + ms(25)), AnimationStep::Rolling);
        assert!((anim.rotation_offset() - 0.5).abs() < 1e-4);
        assert_eq!(anim.remaining_cycles(), 5);
    }

    #[test]
    fn wrapping_consumes_a_cycle() {
        let t0 = Instant::now();
        let mut anim = AnimationState::new(20.0);
        anim.start(3, t0);

        // 60ms = 1.2 symbols
        anim.advance(t0 + ms(60));
        assert_eq!(anim.remaining_cycles(), 2);
        assert!((anim.rotation_offset() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn stall_cannot_push_offset_past_one() {
        let t0 = Instant::now();
        let mut anim = AnimationState::new(20.0);
        anim.start(2, t0);

        // 10 seconds = 200 symbols, far more than the two cycles left
        assert_eq!(anim.advance(t0 + Duration::from_secs(10)), AnimationStep::Rolling);
        assert_eq!(anim.remaining_cycles(), 0);
        assert!(anim.rotation_offset() >= 0.0 && anim.rotation_offset() < 1.0);

        assert_eq!(anim.advance(t0 + Duration::from_secs(10) + ms(16)), AnimationStep::Settled);
    }

    #[test]
    fn snaps_to_zero_after_last_cycle() {
        let t0 = Instant::now();
        let mut anim = AnimationState::new(20.0);
        anim.start(1, t0);

        // 1.1 symbols: last cycle consumed, 0.1 left over
        anim.advance(t0 + ms(55));
        assert_eq!(anim.remaining_cycles(), 0);

        // next delta (0.32) exceeds the leftover offset, so it snaps
        assert_eq!(anim.advance(t0 + ms(71)), AnimationStep::Settled);
        assert_eq!(anim.rotation_offset(), 0.0);
        // settled animations ignore further ticks
        assert_eq!(anim.advance(t0 + ms(500)), AnimationStep::Settled);
        assert_eq!(anim.rotation_offset(), 0.0);
    }

    #[test]
    fn slow_frames_still_terminate() {
        let t0 = Instant::now();
        let mut anim = AnimationState::new(20.0);
        anim.start(1, t0);

        // leave 0.9 on the offset after the last cycle
        anim.advance(t0 + ms(95));
        assert_eq!(anim.remaining_cycles(), 0);

        // tiny frames never satisfy offset < delta; rolling to 1.0 ends it
        let mut now = t0 + ms(95);
        let mut ticks = 0;
        loop {
            now += ms(1);
            ticks += 1;
            if anim.advance(now) == AnimationStep::Settled {
                break;
            }
            assert!(ticks < 100, "animation never settled");
        }
        assert_eq!(anim.rotation_offset(), 0.0);
    }

    #[test]
    fn zero_cycles_stop_on_first_tick() {
        let t0 = Instant::now();
        let mut anim = AnimationState::new(20.0);
        anim.start(0, t0);
        assert_eq!(anim.advance(t0 + ms(16)), AnimationStep::Settled);
    }

    #[test]
    fn zero_elapsed_does_not_settle_early() {
        let t0 = Instant::now();
        let mut anim = AnimationState::new(20.0);
        anim.start(0, t0);
        assert_eq!(anim.advance(t0), AnimationStep::Rolling);
        assert_eq!(anim.advance(t0 + ms(16)), AnimationStep::Settled);
    }

    #[test]
    fn invariants_hold_under_jittery_frames() {
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..200 {
            let t0 = Instant::now();
            let cycles = rng.random_range(0..40);
            let mut anim = AnimationState::new(20.0);
            anim.start(cycles, t0);

            let mut now = t0;
            let mut previous_cycles = anim.remaining_cycles();
            let mut settled = false;

            for _ in 0..10_000 {
                now += ms(rng.random_range(0..120));
                let step = anim.advance(now);

                let offset = anim.rotation_offset();
                assert!((0.0..1.0).contains(&offset), "offset {offset} out of range");
                assert!(anim.remaining_cycles() <= previous_cycles);
                previous_cycles = anim.remaining_cycles();

                if step == AnimationStep::Settled {
                    assert_eq!(anim.remaining_cycles(), 0);
                    settled = true;
                    break;
                }
            }

            assert!(settled, "spin of {cycles} cycles never settled");
        }
    }
}
