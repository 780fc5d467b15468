//! Amplitude amplification over basis states of a small register.
//!
//! The register starts in uniform superposition, each round flips the sign of the marked states
//! and inverts every amplitude about the mean. Amplitudes stay real, so a plain `f64` vector is
//! enough.

mod state;

pub use state::{ranked_outcomes, StateVector};

use std::f64::consts::PI;

use hashbrown::HashSet;
use thiserror::Error;

/// Largest register simulated by default, `2^20` amplitudes.
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// Largest register ever simulated, whatever `max_qubits` says. `2^30` amplitudes take 8 GiB.
pub const HARD_MAX_QUBITS: usize = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmplifyError {
    #[error("Simulating {qubits} qubits is not allowed, the limit is {max}")]
    TooManyQubits { qubits: usize, max: usize },
    #[error("No states to amplify")]
    NoMarkedStates,
    #[error("State {state} does not fit into {qubits} qubits")]
    StateOutOfRange { state: u64, qubits: usize },
}

/// Number of rounds that brings the marked states closest to certainty.
///
/// `floor(pi/4 * sqrt(N / M))` for `N` basis states and `M` marked ones.
pub fn optimal_iterations(qubits: usize, marked: usize) -> usize {
    if marked == 0 {
        return 0;
    }

    let space = 2f64.powi(qubits as i32);
    (PI / 4.0 * (space / marked as f64).sqrt()).floor() as usize
}

/// Result of an amplification run.
#[derive(Debug, Clone)]
pub struct Amplification {
    pub state: StateVector,
    pub iterations: usize,
    pub marked: Vec<u64>,
}

impl Amplification {
    pub fn marked_probability(&self) -> f64 {
        self.marked
            .iter()
            .map(|&s| self.state.probability(s))
            .sum()
    }

    /// Marked state with the highest probability, ties go to the one marked first.
    pub fn most_probable_marked(&self) -> Option<(u64, f64)> {
        self.marked
            .iter()
            .map(|&s| (s, self.state.probability(s)))
            .fold(None, |best: Option<(u64, f64)>, (s, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((s, p)),
            })
    }
}

#[derive(Debug, Clone)]
pub struct Amplifier {
    qubits: usize,
    max_qubits: usize,
    iterations: Option<usize>,
}

impl Amplifier {
    pub fn new(qubits: usize) -> Self {
        Self {
            qubits,
            max_qubits: DEFAULT_MAX_QUBITS,
            iterations: None,
        }
    }

    pub fn max_qubits(mut self, value: usize) -> Self {
        self.max_qubits = value;
        self
    }

    /// Overrides the number of rounds, [`optimal_iterations`] is used otherwise.
    pub fn iterations(mut self, value: Option<usize>) -> Self {
        self.iterations = value;
        self
    }

    /// Effective register limit, `max_qubits` capped at [`HARD_MAX_QUBITS`].
    pub fn limit(&self) -> usize {
        self.max_qubits.min(HARD_MAX_QUBITS)
    }

    /// Fails when the register is too large to simulate.
    pub fn check(&self) -> Result<(), AmplifyError> {
        if self.qubits > self.limit() {
            return Err(AmplifyError::TooManyQubits {
                qubits: self.qubits,
                max: self.limit(),
            });
        }

        Ok(())
    }

    pub fn run(&self, marked: &[u64]) -> Result<Amplification, AmplifyError> {
        self.check()?;

        let mut seen = HashSet::new();
        let marked: Vec<u64> = marked.iter().copied().filter(|s| seen.insert(*s)).collect();
        if marked.is_empty() {
            return Err(AmplifyError::NoMarkedStates);
        }

        let fits = |s: u64| s.checked_shr(self.qubits as u32).unwrap_or(0) == 0;
        if let Some(&state) = marked.iter().find(|&&s| !fits(s)) {
            return Err(AmplifyError::StateOutOfRange {
                state,
                qubits: self.qubits,
            });
        }

        let iterations = self
            .iterations
            .unwrap_or_else(|| optimal_iterations(self.qubits, marked.len()));
        log::info!("Performing {} amplification iterations", iterations);

        let mut state = StateVector::uniform(self.qubits);
        for _ in 0..iterations {
            state.apply_oracle(&marked);
            state.apply_diffusion();
        }

        Ok(Amplification {
            state,
            iterations,
            marked,
        })
    }
}
