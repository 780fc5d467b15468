use std::str::FromStr;

use thiserror::Error;

use crate::{
    array::Array2D,
    board::cell::{Cell, Way},
    dims::Dims,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("Could not find {0} in maze")]
    MissingMarker(char),
    #[error("Found {marker} more than once in maze, at {first} and {second}")]
    DuplicateMarker {
        marker: char,
        first: Dims,
        second: Dims,
    },
    #[error("Invalid cell marker '{marker}' at {pos}")]
    InvalidCell { marker: char, pos: Dims },
    #[error("Maze has no cells")]
    Empty,
    #[error("Row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Rectangular grid with exactly one start and one goal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub(crate) cells: Array2D<Cell>,
    pub(crate) start: Dims,
    pub(crate) goal: Dims,
}

impl Maze {
    pub fn new(cells: Array2D<Cell>) -> Result<Self, MazeError> {
        if cells.is_empty() {
            return Err(MazeError::Empty);
        }

        let start = Self::find_marker(&cells, Cell::Start)?;
        let goal = Self::find_marker(&cells, Cell::Goal)?;

        Ok(Maze { cells, start, goal })
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, MazeError> {
        let expected = rows.first().map(Vec::len).ok_or(MazeError::Empty)?;
        if expected == 0 {
            return Err(MazeError::Empty);
        }

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(MazeError::Ragged {
                row,
                expected,
                found,
            });
        }

        let height = rows.len();
        let buf = rows.into_iter().flatten().collect();
        let cells = Array2D::from_buf(buf, height, expected).ok_or(MazeError::Empty)?;

        Self::new(cells)
    }

    fn find_marker(cells: &Array2D<Cell>, marker: Cell) -> Result<Dims, MazeError> {
        let mut found = cells
            .iter_pos()
            .zip(cells.iter())
            .filter(|(_, cell)| **cell == marker)
            .map(|(pos, _)| pos);

        let first = found.next().ok_or(MazeError::MissingMarker(marker.marker()))?;
        if let Some(second) = found.next() {
            return Err(MazeError::DuplicateMarker {
                marker: marker.marker(),
                first,
                second,
            });
        }

        Ok(first)
    }

    /// Size as `(rows, columns)`.
    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn start(&self) -> Dims {
        self.start
    }

    pub fn goal(&self) -> Dims {
        self.goal
    }

    pub fn get(&self, pos: Dims) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.cells.dim_to_idx(pos).is_some()
    }

    pub fn is_walkable(&self, pos: Dims) -> bool {
        self.get(pos).is_some_and(Cell::is_walkable)
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        self.cells.iter_pos()
    }

    pub fn get_cells(&self) -> &Array2D<Cell> {
        &self.cells
    }

    /// Walkable neighbors of `pos`, in [`Way::get_in_order`] order.
    pub fn walkable_neighbors(&self, pos: Dims) -> impl Iterator<Item = Dims> + '_ {
        Way::get_in_order()
            .into_iter()
            .map(move |way| pos + way.offset())
            .filter(|&n| self.is_walkable(n))
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    /// Reads one row per line. Cells may be packed (`S01`) or separated by whitespace
    /// (`S 0 1`). Blank lines are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(r, line)| {
                line.split_whitespace()
                    .flat_map(str::chars)
                    .enumerate()
                    .map(|(c, marker)| {
                        Cell::from_marker(marker).ok_or(MazeError::InvalidCell {
                            marker,
                            pos: Dims::from((r, c)),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(rows)
    }
}
