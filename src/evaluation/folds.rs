//! Stratified fold assignment.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::frame::Label;

/// Split example indices into at most `k` folds that keep label proportions.
///
/// Indices of each label are shuffled with a seeded RNG, then dealt
/// round-robin across the folds, continuing from where the previous label
/// stopped. `k` is clamped to `[2, n]`, so every fold leaves examples to
/// train on, and empty folds are dropped. A single example yields one fold.
pub fn stratified_folds(labels: &[Label], k: usize, seed: u64) -> Vec<Vec<usize>> {
    let n = labels.len();
    if n == 0 {
        return Vec::new();
    }
    let k = if n < 2 { 1 } else { k.clamp(2, n) };

    let mut by_label: BTreeMap<&Label, Vec<usize>> = BTreeMap::new();
    for (i, label) in labels.iter().enumerate() {
        by_label.entry(label).or_default().push(i);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut folds: Vec<Vec<usize>> = vec![Vec::new(); k];
    let mut next = 0;
    for indices in by_label.values_mut() {
        indices.shuffle(&mut rng);
        for &i in indices.iter() {
            folds[next % k].push(i);
            next += 1;
        }
    }

    folds.retain(|fold| !fold.is_empty());
    folds
}
