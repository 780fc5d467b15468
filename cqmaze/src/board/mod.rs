pub mod cell;
pub mod maze;
pub mod ser;

pub use cell::{Cell, Way};
pub use maze::{Maze, MazeError};
pub use ser::SerializableMaze;
