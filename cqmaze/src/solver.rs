use std::fmt;

use thiserror::Error;

use crate::{
    array::Array2D,
    board::{cell::PATH_MARKER, Cell, Maze},
    graph::GridGraph,
    paths::{shortest_path, Path, SimplePaths},
    selectors::{Candidates, Params, PathSelector, SelectError, Selection, SelectorRegistry},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error("Unknown path selector '{0}'")]
    UnknownSelector(String),
    #[error("No default path selector registered")]
    NoDefaultSelector,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    NoPath,
    Found {
        selection: Selection,
        /// Number of enumerated candidate paths.
        candidates: usize,
    },
}

impl Solution {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Solution::NoPath => None,
            Solution::Found { selection, .. } => Some(&selection.path),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Solution::Found { .. })
    }

    /// Maze with the path drawn over it. Start and goal keep their markers.
    pub fn overlay(&self, maze: &Maze) -> Array2D<Tile> {
        let mut tiles = maze.get_cells().clone().map(Tile::Cell);

        if let Some(path) = self.path() {
            for &pos in path.cells() {
                if let Some(tile @ Tile::Cell(Cell::Open | Cell::Wall)) = tiles.get_mut(pos) {
                    *tile = Tile::Path;
                }
            }
        }

        tiles
    }
}

/// Cell of a solved maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Cell(Cell),
    Path,
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Cell(cell) => cell.fmt(f),
            Tile::Path => write!(f, "{}", PATH_MARKER),
        }
    }
}

/// Enumerates candidate paths of a maze and lets a selector pick one.
#[derive(Debug, Clone)]
pub struct Solver {
    maze: Maze,
    graph: GridGraph,
    cutoff: Option<usize>,
    limit: Option<usize>,
}

impl Solver {
    pub fn new(maze: Maze) -> Self {
        log::info!("Start position: {}", maze.start());
        log::info!("Goal position: {}", maze.goal());

        let graph = GridGraph::new(&maze);
        Self {
            maze,
            graph,
            cutoff: None,
            limit: None,
        }
    }

    /// Skips candidates longer than `cutoff` edges.
    pub fn cutoff(mut self, cutoff: Option<usize>) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Stops enumerating after `limit` candidates.
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn graph(&self) -> &GridGraph {
        &self.graph
    }

    pub fn candidates(&self) -> Vec<Path> {
        let paths = SimplePaths::new(&self.graph, self.maze.start(), self.maze.goal())
            .with_cutoff(self.cutoff);
        let paths: Vec<_> = match self.limit {
            Some(limit) => paths.take(limit).collect(),
            None => paths.collect(),
        };

        if paths.is_empty() {
            log::info!("No valid paths found");
        } else {
            log::info!("Found {} possible paths", paths.len());
            if self.limit == Some(paths.len()) {
                log::warn!("Stopped enumerating at the limit of {} paths", paths.len());
            }
        }

        paths
    }

    pub fn solve(
        &self,
        selector: &dyn PathSelector,
        params: &Params,
    ) -> Result<Solution, SolveError> {
        log::debug!("Solving with {:?}", selector);

        if shortest_path(&self.graph, self.maze.start(), self.maze.goal()).is_none() {
            log::info!("No valid paths found");
            return Ok(Solution::NoPath);
        }
        selector.check(&self.maze, params)?;

        let paths = self.candidates();
        if paths.is_empty() {
            return Ok(Solution::NoPath);
        }

        let candidates = Candidates {
            maze: &self.maze,
            graph: &self.graph,
            paths: &paths,
            cutoff: self.cutoff,
        };
        let selection = selector.select(candidates, params)?;
        log::info!("Selected path: {}", selection.path);

        Ok(Solution::Found {
            selection,
            candidates: paths.len(),
        })
    }

    /// Solves with the selector registered as `name`, or with the default one.
    pub fn solve_with(
        &self,
        registry: &SelectorRegistry,
        name: Option<&str>,
        params: &Params,
    ) -> Result<Solution, SolveError> {
        let selector = match name {
            Some(name) => registry
                .get(name)
                .ok_or_else(|| SolveError::UnknownSelector(name.to_string()))?,
            None => registry
                .get_default()
                .ok_or(SolveError::NoDefaultSelector)?,
        };

        self.solve(selector.as_ref(), params)
    }
}
