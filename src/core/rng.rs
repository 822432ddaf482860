//! Dice sampling: the injected random capability.
//!
//! ## Key Features
//!
//! - **Deterministic**: same seed produces an identical roll sequence
//! - **Injectable**: commands consume the `DiceSource` trait, so tests can
//!   substitute scripted rolls
//! - **Cached**: one uniform distribution per die size, built lazily
//!
//! ## Usage
//!
//! ```
//! use turnwheel::core::{DiceRng, DiceSource};
//!
//! let mut dice = DiceRng::new(42);
//! let roll = dice.sample(2, 6);
//!
//! assert_eq!(roll.len(), 2);
//! assert!(roll.iter().all(|&d| (1..=6).contains(&d)));
//!
//! // Same seed, same stream.
//! let mut dice2 = DiceRng::new(42);
//! assert_eq!(dice2.sample(2, 6), roll);
//! ```

use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Capability consumed by dice-rolling commands: produce `count`
/// independent uniform draws in `[1, sides]`.
pub trait DiceSource {
    fn sample(&mut self, count: usize, sides: u8) -> Vec<u8>;
}

/// Deterministic dice source.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality
/// randomness. Distributions are cached per die size so repeated rolls of
/// the same die allocate nothing.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    dice_bag: FxHashMap<u8, Uniform<u8>>,
}

impl DiceRng {
    /// Create a new dice source with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            dice_bag: FxHashMap::default(),
        }
    }

    /// Create a dice source seeded from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
            dice_bag: FxHashMap::default(),
        }
    }
}

impl DiceSource for DiceRng {
    fn sample(&mut self, count: usize, sides: u8) -> Vec<u8> {
        assert!(sides >= 1, "Dice must have at least 1 side");

        let die = *self
            .dice_bag
            .entry(sides)
            .or_insert_with(|| Uniform::new_inclusive(1, sides));

        (0..count).map(|_| self.inner.sample(die)).collect()
    }
}

/// Scripted dice source for deterministic tests.
///
/// Returns the programmed values in order, ignoring `sides`.
///
/// ## Panics
///
/// Panics when sampled past the end of the script; this is a test fixture
/// and running dry means the test asked for more rolls than it programmed.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    rolls: VecDeque<u8>,
}

impl ScriptedDice {
    /// Create a scripted source yielding `rolls` in order.
    #[must_use]
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }
}

impl DiceSource for ScriptedDice {
    fn sample(&mut self, count: usize, _sides: u8) -> Vec<u8> {
        (0..count)
            .map(|_| {
                self.rolls
                    .pop_front()
                    .expect("ScriptedDice ran out of programmed rolls")
            })
            .collect()
    }
}
