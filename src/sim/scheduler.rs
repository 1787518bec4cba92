//! Stochastic step scheduler
//!
//! Wall-clock time rarely divides evenly into fixed steps. Instead of carrying
//! the leftover fraction to the next frame, the fraction is used as the
//! probability of running one extra step now, so the expected step rate
//! matches real time.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A real step count split into sign, whole part and fraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitAmount {
    /// -1, 0 or 1
    pub sign: i64,
    /// `floor(|amount|)`
    pub integral: i64,
    /// `|amount| - integral`, in `[0, 1)`
    pub fractional: f64,
}

/// Split `amount` into whole steps plus a remainder
///
/// Non-finite amounts split to zero.
pub fn split_amount(amount: f64) -> SplitAmount {
    if !amount.is_finite() {
        return SplitAmount {
            sign: 0,
            integral: 0,
            fractional: 0.0,
        };
    }

    let magnitude = amount.abs();
    let integral = magnitude.trunc();
    let sign = if amount > 0.0 {
        1
    } else if amount < 0.0 {
        -1
    } else {
        0
    };

    SplitAmount {
        sign,
        integral: integral as i64,
        fractional: magnitude - integral,
    }
}

/// Turns fractional step counts into whole step batches
///
/// The random source is owned by the scheduler and injected at construction,
/// so runs are reproducible from a seed.
#[derive(Debug, Clone)]
pub struct StepScheduler<R = Pcg32> {
    rng: R,
}

impl StepScheduler<Pcg32> {
    /// Scheduler backed by a seeded PCG stream
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> StepScheduler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Run `amount` steps through `advance`
    ///
    /// `advance` is called once with the signed whole count (even when it is
    /// zero), then once more with the signed unit step with probability equal
    /// to the fractional part.
    pub fn run<S>(&mut self, amount: f64, state: S, mut advance: impl FnMut(i64, S) -> S) -> S {
        if !amount.is_finite() {
            log::warn!("Ignoring non-finite step amount {amount}");
            return state;
        }

        let split = split_amount(amount);

        let state = advance(split.integral * split.sign, state);

        let roll: f64 = self.rng.random();
        if roll < split.fractional {
            log::trace!("Extra step (roll {roll:.3} < {:.3})", split.fractional);
            advance(split.sign, state)
        } else {
            state
        }
    }
}
