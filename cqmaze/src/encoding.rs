use hashbrown::HashSet;
use thiserror::Error;

use crate::{dims::Dims, graph::GridGraph, paths::Path};

/// Maximum number of cells a basis state index can hold.
pub const MAX_ENCODED_CELLS: usize = u64::BITS as usize;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Maze has {cells} cells, at most {max} can be encoded")]
    TooManyCells { cells: usize, max: usize },
    #[error("Cell {0} is outside of the maze")]
    OutOfBounds(Dims),
}

/// Maps paths to basis states, one bit per grid cell.
///
/// Cell `(r, c)` is bit string position `r * cols + c`, position 0 being the most significant
/// bit. A set bit means the cell is visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathEncoder {
    size: Dims,
    bits: usize,
}

impl PathEncoder {
    pub fn new(size: Dims) -> Result<Self, EncodingError> {
        let bits = size.product().max(0) as usize;
        if bits > MAX_ENCODED_CELLS {
            return Err(EncodingError::TooManyCells {
                cells: bits,
                max: MAX_ENCODED_CELLS,
            });
        }

        Ok(Self { size, bits })
    }

    /// Number of bits (qubits) in an encoded state.
    pub fn bits(&self) -> usize {
        self.bits
    }

    fn mask_of(&self, pos: Dims) -> Result<u64, EncodingError> {
        if !pos.all_non_negative() || pos.0 >= self.size.0 || pos.1 >= self.size.1 {
            return Err(EncodingError::OutOfBounds(pos));
        }

        let position = pos.linear_index(self.size);
        Ok(1 << (self.bits - 1 - position))
    }

    pub fn encode(&self, path: &Path) -> Result<u64, EncodingError> {
        path.cells()
            .iter()
            .try_fold(0, |state, &pos| Ok(state | self.mask_of(pos)?))
    }

    /// Bit string of `state`, most significant bit first.
    pub fn to_bitstring(&self, state: u64) -> String {
        (0..self.bits)
            .map(|i| {
                if (state >> (self.bits - 1 - i)) & 1 == 1 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }

    /// Set cells of `state` in row-major order.
    pub fn decode_cells(&self, state: u64) -> Vec<Dims> {
        Dims::iter_fill(Dims::ZERO, self.size)
            .enumerate()
            .filter(|(i, _)| (state >> (self.bits - 1 - i)) & 1 == 1)
            .map(|(_, pos)| pos)
            .collect()
    }

    /// Orders the set cells of `state` into a path from `start` to `goal`.
    ///
    /// Every set cell must be used exactly once. Returns `None` when the cells don't form such
    /// a path in the graph.
    pub fn decode_path(
        &self,
        state: u64,
        start: Dims,
        goal: Dims,
        graph: &GridGraph,
    ) -> Option<Path> {
        let cells: HashSet<Dims> = self.decode_cells(state).into_iter().collect();
        if !cells.contains(&start) || !cells.contains(&goal) {
            return None;
        }

        let mut route = vec![start];
        let mut used = HashSet::from([start]);
        if walk(graph, &cells, start, goal, &mut route, &mut used) {
            Some(Path::new(route))
        } else {
            None
        }
    }
}

fn walk(
    graph: &GridGraph,
    cells: &HashSet<Dims>,
    current: Dims,
    goal: Dims,
    route: &mut Vec<Dims>,
    used: &mut HashSet<Dims>,
) -> bool {
    if current == goal {
        return route.len() == cells.len();
    }

    for &next in graph.neighbors(current) {
        if !cells.contains(&next) || used.contains(&next) {
            continue;
        }

        route.push(next);
        used.insert(next);
        if walk(graph, cells, next, goal, route, used) {
            return true;
        }
        used.remove(&next);
        route.pop();
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::Maze, paths::all_simple_paths};

    #[test]
    fn encode_example_path() {
        let encoder = PathEncoder::new(Dims(2, 3)).unwrap();
        let path = Path::new(vec![Dims(0, 0), Dims(0, 1), Dims(1, 1), Dims(1, 2)]);

        let state = encoder.encode(&path).unwrap();
        assert_eq!(encoder.to_bitstring(state), "110011");
        assert_eq!(state, 0b110011);
        assert_eq!(
            encoder.decode_cells(state),
            vec![Dims(0, 0), Dims(0, 1), Dims(1, 1), Dims(1, 2)]
        );
    }

    #[test]
    fn decode_orders_cells_along_the_path() {
        let maze: Maze = "S0\n00\nG0".parse().unwrap();
        let graph = GridGraph::new(&maze);
        let encoder = PathEncoder::new(maze.size()).unwrap();

        for path in all_simple_paths(&graph, maze.start(), maze.goal(), None, None) {
            let state = encoder.encode(&path).unwrap();
            let decoded = encoder
                .decode_path(state, maze.start(), maze.goal(), &graph)
                .unwrap();
            assert!(decoded.is_valid_in(&graph));
            assert_eq!(encoder.encode(&decoded).unwrap(), state);
        }
    }

    #[test]
    fn decode_rejects_broken_states() {
        let maze: Maze = "S01\n00G".parse().unwrap();
        let graph = GridGraph::new(&maze);
        let encoder = PathEncoder::new(maze.size()).unwrap();

        // start and goal only
        assert_eq!(encoder.decode_path(0b100001, maze.start(), maze.goal(), &graph), None);
        // no start
        assert_eq!(encoder.decode_path(0b010011, maze.start(), maze.goal(), &graph), None);
        // extra cell that isn't on the route
        assert_eq!(encoder.decode_path(0b110111, maze.start(), maze.goal(), &graph), None);
    }

    #[test]
    fn too_many_cells() {
        assert_eq!(
            PathEncoder::new(Dims(9, 8)),
            Err(EncodingError::TooManyCells { cells: 72, max: 64 })
        );
        assert!(PathEncoder::new(Dims(8, 8)).is_ok());
    }

    #[test]
    fn out_of_bounds_cell() {
        let encoder = PathEncoder::new(Dims(2, 2)).unwrap();
        assert_eq!(
            encoder.encode(&Path::new(vec![Dims(0, 0), Dims(0, 2)])),
            Err(EncodingError::OutOfBounds(Dims(0, 2)))
        );
    }
}
