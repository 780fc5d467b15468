use serde::{Deserialize, Serialize};

use crate::board::{Cell, Maze, MazeError};

/// Maze as stored in preset files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableMaze {
    #[serde(default)]
    pub title: String,
    pub grid: Vec<Vec<Cell>>,
}

impl SerializableMaze {
    pub fn from_maze(maze: &Maze, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            grid: maze.get_cells().iter_rows().map(<[Cell]>::to_vec).collect(),
        }
    }

    pub fn into_maze(self) -> Result<Maze, MazeError> {
        Maze::from_rows(self.grid)
    }
}

impl TryFrom<SerializableMaze> for Maze {
    type Error = MazeError;

    fn try_from(value: SerializableMaze) -> Result<Self, Self::Error> {
        value.into_maze()
    }
}
