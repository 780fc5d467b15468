use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{board::Maze, graph::GridGraph, paths::Path};

/// Parameters for path selectors.
/// In the future, not only String will be allowed, but also other types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    map: HashMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.map.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn parsed<T: FromStr>(&self, key: &str) -> Option<Result<T, T::Err>> {
        self.get(key).map(|s| s.parse())
    }

    pub fn parsed_or<T: FromStr>(&self, key: &str, default: T) -> T {
        match self.parsed(key) {
            None | Some(Err(_)) => default,
            Some(Ok(v)) => v,
        }
    }

    pub fn parsed_or_warn<T: FromStr>(&self, key: &str, default: T) -> T {
        match self.parsed(key) {
            None => default,
            Some(Ok(v)) => v,
            Some(Err(_)) => {
                log::warn!("Invalid value for parameter '{}', using default value", key);
                default
            }
        }
    }

    /// Like [`Params::parsed_or_warn`], but without a default.
    pub fn parsed_opt_warn<T: FromStr>(&self, key: &str) -> Option<T> {
        match self.parsed(key) {
            None => None,
            Some(Ok(v)) => Some(v),
            Some(Err(_)) => {
                log::warn!("Invalid value for parameter '{}', ignoring it", key);
                None
            }
        }
    }
}

/// Everything a selector gets to choose from.
#[derive(Debug, Clone, Copy)]
pub struct Candidates<'a> {
    pub maze: &'a Maze,
    pub graph: &'a GridGraph,
    pub paths: &'a [Path],
    /// Longest path, in edges, the enumeration allowed.
    pub cutoff: Option<usize>,
}

impl Candidates<'_> {
    pub fn within_cutoff(&self, path: &Path) -> bool {
        self.cutoff.map_or(true, |cutoff| path.edge_count() <= cutoff)
    }
}

/// What the amplification step did, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplifyReport {
    pub qubits: usize,
    pub iterations: usize,
    pub marked: usize,
    /// Probability of measuring any marked state.
    pub marked_probability: f64,
    pub shots: Option<usize>,
    /// Most frequent outcome as a bit string, with its count.
    pub top_outcome: Option<(String, usize)>,
    /// Set when the sampled outcomes didn't decode and the exact distribution was used.
    pub fell_back: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub path: Path,
    /// Index of the chosen path among the candidates, if it is one of them.
    pub index: Option<usize>,
    pub report: Option<AmplifyReport>,
}

impl Selection {
    pub fn candidate(paths: &[Path], index: usize) -> Self {
        Self {
            path: paths[index].clone(),
            index: Some(index),
            report: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_parsing() {
        let params = Params::new().with("shots", 100).with("seed", "nope");

        assert_eq!(params.get("shots"), Some("100"));
        assert_eq!(params.parsed_or("shots", 1usize), 100);
        assert_eq!(params.parsed_or("seed", 5u64), 5);
        assert_eq!(params.parsed_or_warn("missing", 3u32), 3);
        assert_eq!(params.parsed_opt_warn::<u64>("seed"), None);
        assert_eq!(params.parsed_opt_warn::<usize>("shots"), Some(100));
    }
}
