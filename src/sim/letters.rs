//! Weighted letter source for asteroid labels
//!
//! Common letters score higher and so show up on more rocks.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

/// Letter weights: each letter appears `score` times in the pool
pub const LETTER_SCORES: &[(usize, &str)] = &[
    (7, "AEIOULNSTR"),
    (6, "DG"),
    (5, "BCMP"),
    (4, "FHVWY"),
    (3, "K"),
    (2, "JX"),
    (1, "QZ"),
];

/// Every letter repeated its score times, shuffled
pub fn build_frequency_list(rng: &mut impl Rng) -> Vec<char> {
    let mut letters: Vec<char> = LETTER_SCORES
        .iter()
        .flat_map(|&(score, group)| {
            group
                .chars()
                .flat_map(move |c| std::iter::repeat_n(c, score))
        })
        .collect();
    letters.shuffle(rng);
    letters
}

/// Shuffled weighted multiset, sampled with replacement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterPool {
    letters: Vec<char>,
}

impl LetterPool {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            letters: build_frequency_list(rng),
        }
    }

    /// Uniform draw over the multiset
    pub fn sample(&self, rng: &mut impl Rng) -> char {
        // The table is non-empty, so the pool always has letters
        *self.letters.choose(rng).unwrap_or(&'A')
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Copies of each letter in the pool
    pub fn letter_counts(&self) -> BTreeMap<char, usize> {
        let mut counts = BTreeMap::new();
        for &c in &self.letters {
            *counts.entry(c).or_insert(0) += 1;
        }
        counts
    }
}

/// Letters the asteroids on the field will carry
///
/// Every distinct letter of `target` is included so the word can always be
/// spelled; remaining slots are drawn from the pool, then the set is shuffled.
pub fn make_field_letters(
    pool: &LetterPool,
    target: &str,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<char> {
    let mut seen = BTreeSet::new();
    let mut letters: Vec<char> = target.chars().filter(|c| seen.insert(*c)).collect();
    while letters.len() < count {
        letters.push(pool.sample(rng));
    }
    letters.shuffle(rng);
    letters
}
