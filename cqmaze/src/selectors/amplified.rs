use hashbrown::HashMap;
use rand::{thread_rng, Rng as _, SeedableRng as _};

use crate::{
    amplify::{ranked_outcomes, Amplification, Amplifier, DEFAULT_MAX_QUBITS},
    board::Maze,
    encoding::PathEncoder,
    paths::Path,
    Random,
};

use super::{AmplifyReport, Candidates, Params, PathSelector, SelectError, Selection};

pub const DEFAULT_SHOTS: usize = 1000;

fn amplifier(qubits: usize, params: &Params) -> Amplifier {
    let max_qubits = params.parsed_or_warn("max_qubits", DEFAULT_MAX_QUBITS);
    let iterations = params.parsed_opt_warn("iterations");

    Amplifier::new(qubits)
        .max_qubits(max_qubits)
        .iterations(iterations)
}

/// Fails when the register for `maze` can't be encoded or simulated.
fn check_register(maze: &Maze, params: &Params) -> Result<(), SelectError> {
    let encoder = PathEncoder::new(maze.size())?;
    amplifier(encoder.bits(), params).check()?;
    Ok(())
}

/// Encoded candidates, with the first candidate index for every distinct state.
struct Encoded {
    encoder: PathEncoder,
    states: Vec<u64>,
    first_index: HashMap<u64, usize>,
}

impl Encoded {
    fn new(candidates: &Candidates) -> Result<Self, SelectError> {
        if candidates.paths.is_empty() {
            return Err(SelectError::NoCandidates);
        }

        let encoder = PathEncoder::new(candidates.maze.size())?;
        let states = candidates
            .paths
            .iter()
            .map(|path| encoder.encode(path))
            .collect::<Result<Vec<_>, _>>()?;

        let mut first_index = HashMap::new();
        for (i, &state) in states.iter().enumerate() {
            first_index.entry(state).or_insert(i);
        }

        Ok(Self {
            encoder,
            states,
            first_index,
        })
    }

    fn amplify(&self, params: &Params) -> Result<Amplification, SelectError> {
        Ok(amplifier(self.encoder.bits(), params).run(&self.states)?)
    }

    /// Turns a measured state back into a path.
    ///
    /// Candidates are preferred, since several paths can share one encoding. Decoded paths
    /// longer than the enumeration cutoff are rejected.
    fn resolve(&self, state: u64, candidates: &Candidates) -> Option<(Path, Option<usize>)> {
        if let Some(&i) = self.first_index.get(&state) {
            return Some((candidates.paths[i].clone(), Some(i)));
        }

        let maze = candidates.maze;
        self.encoder
            .decode_path(state, maze.start(), maze.goal(), candidates.graph)
            .filter(|path| candidates.within_cutoff(path))
            .map(|path| (path, None))
    }

    fn report(&self, amplification: &Amplification) -> AmplifyReport {
        AmplifyReport {
            qubits: self.encoder.bits(),
            iterations: amplification.iterations,
            marked: amplification.marked.len(),
            marked_probability: amplification.marked_probability(),
            shots: None,
            top_outcome: None,
            fell_back: false,
        }
    }

    fn best_marked(
        &self,
        amplification: &Amplification,
        mut report: AmplifyReport,
        candidates: &Candidates,
    ) -> Result<Selection, SelectError> {
        let (state, probability) = amplification
            .most_probable_marked()
            .ok_or(SelectError::NoCandidates)?;
        log::info!(
            "Most probable path state {} (p = {:.4})",
            self.encoder.to_bitstring(state),
            probability
        );

        let i = self.first_index[&state];
        report.fell_back = report.shots.is_some();
        Ok(Selection {
            path: candidates.paths[i].clone(),
            index: Some(i),
            report: Some(report),
        })
    }
}

/// Samples the amplified register and decodes the most frequent outcome.
///
/// Params:
/// - `shots`: number of measurements, 1000 by default
/// - `seed`: seed of the measurement rng, random when missing
/// - `max_qubits`: largest register to simulate
/// - `iterations`: overrides the number of amplification rounds
#[derive(Debug, Clone, Copy, Default)]
pub struct AmplifiedSelector;

impl PathSelector for AmplifiedSelector {
    fn check(&self, maze: &Maze, params: &Params) -> Result<(), SelectError> {
        check_register(maze, params)
    }

    fn select(&self, candidates: Candidates, params: &Params) -> Result<Selection, SelectError> {
        let encoded = Encoded::new(&candidates)?;
        let amplification = encoded.amplify(params)?;

        let shots = params.parsed_or_warn("shots", DEFAULT_SHOTS).max(1);
        let seed: u64 = params
            .parsed_opt_warn("seed")
            .unwrap_or_else(|| thread_rng().gen());
        let mut rng = Random::seed_from_u64(seed);

        let counts = amplification.state.sample(shots, &mut rng);
        let ranked = ranked_outcomes(&counts);

        let mut report = encoded.report(&amplification);
        report.shots = Some(shots);
        report.top_outcome = ranked
            .first()
            .map(|&(state, count)| (encoded.encoder.to_bitstring(state), count));

        if let Some((bits, count)) = &report.top_outcome {
            log::info!("Most frequent outcome {} ({}/{} shots)", bits, count, shots);
        }

        for (rank, &(state, _)) in ranked.iter().enumerate() {
            if let Some((path, index)) = encoded.resolve(state, &candidates) {
                if rank > 0 {
                    log::warn!(
                        "Most frequent outcome is not a path, using outcome #{}",
                        rank + 1
                    );
                    report.fell_back = true;
                }

                return Ok(Selection {
                    path,
                    index,
                    report: Some(report),
                });
            }
        }

        log::warn!("No sampled outcome decodes to a path, using the most probable one");
        encoded.best_marked(&amplification, report, &candidates)
    }
}

/// Takes the marked state with the highest final probability, without sampling.
///
/// Accepts the same params as [`AmplifiedSelector`], except `shots` and `seed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostProbableSelector;

impl PathSelector for MostProbableSelector {
    fn check(&self, maze: &Maze, params: &Params) -> Result<(), SelectError> {
        check_register(maze, params)
    }

    fn select(&self, candidates: Candidates, params: &Params) -> Result<Selection, SelectError> {
        let encoded = Encoded::new(&candidates)?;
        let amplification = encoded.amplify(params)?;
        let report = encoded.report(&amplification);

        encoded.best_marked(&amplification, report, &candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        amplify::AmplifyError, board::Maze, dims::Dims, graph::GridGraph,
        paths::all_simple_paths,
    };

    struct Fixture {
        maze: Maze,
        graph: GridGraph,
        paths: Vec<Path>,
        cutoff: Option<usize>,
    }

    impl Fixture {
        fn new(text: &str) -> Self {
            Self::with_cutoff(text, None)
        }

        fn with_cutoff(text: &str, cutoff: Option<usize>) -> Self {
            let maze: Maze = text.parse().unwrap();
            let graph = GridGraph::new(&maze);
            let paths = all_simple_paths(&graph, maze.start(), maze.goal(), cutoff, None);
            Self {
                maze,
                graph,
                paths,
                cutoff,
            }
        }

        fn candidates(&self) -> Candidates {
            Candidates {
                maze: &self.maze,
                graph: &self.graph,
                paths: &self.paths,
                cutoff: self.cutoff,
            }
        }
    }

    #[test]
    fn amplified_example_maze() {
        let fixture = Fixture::new("S01\n00G");
        let params = Params::new().with("seed", 42).with("shots", 1000);

        let selection = AmplifiedSelector
            .select(fixture.candidates(), &params)
            .unwrap();

        assert!(selection.path.is_valid_in(&fixture.graph));
        assert!(selection.index.is_some());
        assert_eq!(selection.path.first(), Some(Dims(0, 0)));
        assert_eq!(selection.path.last(), Some(Dims(1, 2)));

        let report = selection.report.unwrap();
        assert_eq!(report.qubits, 6);
        assert_eq!(report.marked, 2);
        assert_eq!(report.iterations, 4);
        assert_eq!(report.shots, Some(1000));
        assert!(!report.fell_back);
        assert!(report.marked_probability > 0.9);
    }

    #[test]
    fn amplified_is_deterministic_with_seed() {
        let fixture = Fixture::new("S00\n000\n00G");
        let params = Params::new().with("seed", 7).with("shots", 200);

        let a = AmplifiedSelector.select(fixture.candidates(), &params).unwrap();
        let b = AmplifiedSelector.select(fixture.candidates(), &params).unwrap();
        assert_eq!(a.path, b.path);
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn zero_iterations_still_yield_a_path() {
        // without amplification almost every sample is noise
        let fixture = Fixture::new("S01\n00G");
        let params = Params::new()
            .with("seed", 3)
            .with("shots", 5)
            .with("iterations", 0);

        let selection = AmplifiedSelector
            .select(fixture.candidates(), &params)
            .unwrap();
        assert!(selection.path.is_valid_in(&fixture.graph));
        assert_eq!(selection.report.unwrap().iterations, 0);
    }

    #[test]
    fn most_probable_is_a_candidate() {
        let fixture = Fixture::new("S00\n000\n00G");
        let selection = MostProbableSelector
            .select(fixture.candidates(), &Params::new())
            .unwrap();

        let index = selection.index.unwrap();
        assert_eq!(selection.path, fixture.paths[index]);
        let report = selection.report.unwrap();
        assert_eq!(report.shots, None);
        assert!(!report.fell_back);
    }

    #[test]
    fn register_limit_is_enforced() {
        let fixture = Fixture::new("S00\n000\n00G");
        let params = Params::new().with("max_qubits", 8);

        assert_eq!(
            MostProbableSelector.select(fixture.candidates(), &params),
            Err(SelectError::Amplify(AmplifyError::TooManyQubits {
                qubits: 9,
                max: 8
            }))
        );
    }

    #[test]
    fn decoded_paths_respect_cutoff() {
        // noise samples can decode to 6 or 8 edge detours, which the cutoff excludes
        let fixture = Fixture::with_cutoff("S00\n000\n00G", Some(4));
        assert_eq!(fixture.paths.len(), 6);

        for seed in 0..20 {
            let params = Params::new()
                .with("seed", seed)
                .with("shots", 64)
                .with("iterations", 0);
            let selection = AmplifiedSelector
                .select(fixture.candidates(), &params)
                .unwrap();

            assert!(selection.path.is_valid_in(&fixture.graph));
            assert_eq!(selection.path.edge_count(), 4, "seed {seed}");
        }
    }

    #[test]
    fn check_rejects_large_registers() {
        let small: Maze = "S01\n00G".parse().unwrap();
        let large: Maze = "S0000\n00000\n00000\n00000\n0000G".parse().unwrap();

        assert_eq!(AmplifiedSelector.check(&small, &Params::new()), Ok(()));
        assert_eq!(
            AmplifiedSelector.check(&large, &Params::new()),
            Err(SelectError::Amplify(AmplifyError::TooManyQubits {
                qubits: 25,
                max: 20
            }))
        );
        assert_eq!(
            MostProbableSelector.check(&large, &Params::new().with("max_qubits", 25)),
            Ok(())
        );
    }
}
