use super::{Candidates, Params, PathSelector, SelectError, Selection};

/// First enumerated path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSelector;

impl PathSelector for FirstSelector {
    fn select(&self, candidates: Candidates, _: &Params) -> Result<Selection, SelectError> {
        if candidates.paths.is_empty() {
            return Err(SelectError::NoCandidates);
        }

        Ok(Selection::candidate(candidates.paths, 0))
    }
}

/// Path with the fewest cells, the earliest one on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestSelector;

impl PathSelector for ShortestSelector {
    fn select(&self, candidates: Candidates, _: &Params) -> Result<Selection, SelectError> {
        let index = candidates
            .paths
            .iter()
            .enumerate()
            .min_by_key(|(_, path)| path.len())
            .map(|(i, _)| i)
            .ok_or(SelectError::NoCandidates)?;

        Ok(Selection::candidate(candidates.paths, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::Maze,
        dims::Dims,
        graph::GridGraph,
        paths::{all_simple_paths, Path},
    };

    #[test]
    fn classical_picks() {
        let maze: Maze = "S000\n0110\n0G00".parse().unwrap();
        let graph = GridGraph::new(&maze);
        let paths = all_simple_paths(&graph, maze.start(), maze.goal(), None, None);
        assert_eq!(paths.len(), 2);

        let candidates = Candidates {
            maze: &maze,
            graph: &graph,
            paths: &paths,
            cutoff: None,
        };

        // depth-first goes right first, around the wall
        let first = FirstSelector.select(candidates, &Params::new()).unwrap();
        assert_eq!(first.index, Some(0));
        assert_eq!(first.path.len(), 8);

        let shortest = ShortestSelector.select(candidates, &Params::new()).unwrap();
        assert_eq!(shortest.index, Some(1));
        assert_eq!(
            shortest.path,
            Path::new(vec![Dims(0, 0), Dims(1, 0), Dims(2, 0), Dims(2, 1)])
        );
        assert!(shortest.report.is_none());
    }

    #[test]
    fn empty_candidates() {
        let maze: Maze = "S1\n1G".parse().unwrap();
        let graph = GridGraph::new(&maze);
        let candidates = Candidates {
            maze: &maze,
            graph: &graph,
            paths: &[],
            cutoff: None,
        };

        assert_eq!(
            FirstSelector.select(candidates, &Params::new()),
            Err(SelectError::NoCandidates)
        );
        assert_eq!(
            ShortestSelector.select(candidates, &Params::new()),
            Err(SelectError::NoCandidates)
        );
    }
}
