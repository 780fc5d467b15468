use hashbrown::HashMap;
use rand::Rng as _;
use rayon::prelude::*;

use crate::Random;

// Below this many amplitudes the rayon overhead isn't worth it.
const PARALLEL_THRESHOLD: usize = 1 << 14;

/// Real amplitudes of every basis state of the register.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    amps: Vec<f64>,
    qubits: usize,
}

impl StateVector {
    /// Uniform superposition, as after a Hadamard on every qubit.
    ///
    /// # Panics
    ///
    /// When `2^qubits` amplitudes don't fit into memory. [`super::Amplifier`] checks this.
    pub fn uniform(qubits: usize) -> Self {
        let len = 1usize << qubits;
        let amp = 1.0 / (len as f64).sqrt();
        Self {
            amps: vec![amp; len],
            qubits,
        }
    }

    pub fn qubits(&self) -> usize {
        self.qubits
    }

    pub fn len(&self) -> usize {
        self.amps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amps.is_empty()
    }

    pub fn amplitude(&self, state: u64) -> f64 {
        self.amps.get(state as usize).copied().unwrap_or(0.0)
    }

    pub fn probability(&self, state: u64) -> f64 {
        self.amplitude(state).powi(2)
    }

    /// Phase oracle, flips the sign of every marked state.
    pub fn apply_oracle(&mut self, marked: &[u64]) {
        for &state in marked {
            if let Some(amp) = self.amps.get_mut(state as usize) {
                *amp = -*amp;
            }
        }
    }

    /// Inversion about the mean, `2|s><s| - I`.
    pub fn apply_diffusion(&mut self) {
        self.diffuse(self.amps.len() >= PARALLEL_THRESHOLD);
    }

    fn diffuse(&mut self, parallel: bool) {
        let len = self.amps.len() as f64;

        if parallel {
            let mean = self.amps.par_iter().sum::<f64>() / len;
            self.amps.par_iter_mut().for_each(|a| *a = 2.0 * mean - *a);
        } else {
            let mean = self.amps.iter().sum::<f64>() / len;
            self.amps.iter_mut().for_each(|a| *a = 2.0 * mean - *a);
        }
    }

    pub fn probabilities(&self) -> Vec<f64> {
        if self.amps.len() >= PARALLEL_THRESHOLD {
            self.amps.par_iter().map(|a| a * a).collect()
        } else {
            self.amps.iter().map(|a| a * a).collect()
        }
    }

    pub fn total_probability(&self) -> f64 {
        self.amps.iter().map(|a| a * a).sum()
    }

    /// Basis state with the highest probability, ties go to the lower index.
    pub fn most_probable(&self) -> Option<(u64, f64)> {
        self.amps
            .iter()
            .enumerate()
            .map(|(i, a)| (i as u64, a * a))
            .fold(None, |best: Option<(u64, f64)>, (s, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((s, p)),
            })
    }

    /// Measures the whole register `shots` times.
    ///
    /// Returns how many times each outcome was seen.
    pub fn sample(&self, shots: usize, rng: &mut Random) -> HashMap<u64, usize> {
        let mut cumulative = Vec::with_capacity(self.amps.len());
        let mut total = 0.0;
        for a in &self.amps {
            total += a * a;
            cumulative.push(total);
        }

        let mut counts = HashMap::new();
        if cumulative.is_empty() || total <= 0.0 {
            return counts;
        }

        let last = cumulative.len() - 1;
        for _ in 0..shots {
            let x = rng.gen::<f64>() * total;
            let outcome = cumulative.partition_point(|&c| c <= x).min(last);
            *counts.entry(outcome as u64).or_insert(0) += 1;
        }

        counts
    }
}

/// Outcomes ordered from the most frequent, ties go to the lower state.
pub fn ranked_outcomes(counts: &HashMap<u64, usize>) -> Vec<(u64, usize)> {
    let mut ranked: Vec<_> = counts.iter().map(|(&s, &c)| (s, c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}
