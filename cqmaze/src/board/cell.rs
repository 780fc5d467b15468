use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::dims::Dims;

pub const START_MARKER: char = 'S';
pub const GOAL_MARKER: char = 'G';
pub const WALL_MARKER: char = '1';
pub const OPEN_MARKER: char = '0';
pub const PATH_MARKER: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Open,
    Wall,
    Start,
    Goal,
}

impl Cell {
    /// Parses a single grid marker.
    ///
    /// Besides the canonical `0`, `1`, `S` and `G`, `.` is read as an open cell and `#` as a
    /// wall.
    pub fn from_marker(marker: char) -> Option<Cell> {
        match marker {
            OPEN_MARKER | '.' => Some(Cell::Open),
            WALL_MARKER | '#' => Some(Cell::Wall),
            START_MARKER => Some(Cell::Start),
            GOAL_MARKER => Some(Cell::Goal),
            _ => None,
        }
    }

    pub fn marker(self) -> char {
        match self {
            Cell::Open => OPEN_MARKER,
            Cell::Wall => WALL_MARKER,
            Cell::Start => START_MARKER,
            Cell::Goal => GOAL_MARKER,
        }
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }

    pub fn is_walkable(self) -> bool {
        !self.is_wall()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

// Cells are written as one-character strings, but the integers 0 and 1 are accepted too,
// so grids like `[["S", 0, 1], [0, 0, "G"]]` load as-is.
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        serializer.serialize_str(self.marker().encode_utf8(&mut buf))
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCell {
            Int(i64),
            Float(f64),
            Str(String),
        }

        match RawCell::deserialize(deserializer)? {
            RawCell::Int(0) => Ok(Cell::Open),
            RawCell::Int(1) => Ok(Cell::Wall),
            RawCell::Int(other) => Err(de::Error::custom(format!("invalid cell value {other}"))),
            RawCell::Float(f) if f == 0.0 => Ok(Cell::Open),
            RawCell::Float(f) if f == 1.0 => Ok(Cell::Wall),
            RawCell::Float(other) => {
                Err(de::Error::custom(format!("invalid cell value {other}")))
            }
            RawCell::Str(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Cell::from_marker(c)
                        .ok_or_else(|| de::Error::custom(format!("invalid cell marker '{c}'"))),
                    _ => Err(de::Error::custom(format!("invalid cell marker \"{s}\""))),
                }
            }
        }
    }
}

/// One of the four grid directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Way {
    Right,
    Bottom,
    Left,
    Top,
}

impl Way {
    pub fn get_in_order() -> [Way; 4] {
        [Way::Right, Way::Bottom, Way::Left, Way::Top]
    }

    pub fn offset(&self) -> Dims {
        match self {
            Self::Right => Dims(0, 1),
            Self::Bottom => Dims(1, 0),
            Self::Left => Dims(0, -1),
            Self::Top => Dims(-1, 0),
        }
    }

    pub fn reverse(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Returns the direction leading from `from` to `to`, if they are neighbors.
    pub fn between(from: Dims, to: Dims) -> Option<Self> {
        match to - from {
            Dims(0, 1) => Some(Self::Right),
            Dims(1, 0) => Some(Self::Bottom),
            Dims(0, -1) => Some(Self::Left),
            Dims(-1, 0) => Some(Self::Top),
            _ => None,
        }
    }
}
