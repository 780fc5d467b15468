use std::{fmt::Display, path::Path};

use cqmaze::board::{Maze, MazeError, SerializableMaze};
use thiserror::Error;

use crate::helpers::constants::{self, paths::maze_file_path};

#[derive(Debug, Error)]
pub enum LoadError {
    Io(#[from] std::io::Error),
    Toml(#[from] toml::de::Error),
    Json(#[from] json5::Error),
    Maze(#[from] MazeError),
    UnknownExtension(String),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Toml(e) => write!(f, "TOML parse error: {}", e),
            LoadError::Json(e) => write!(f, "JSON parse error: {}", e),
            LoadError::Maze(e) => write!(f, "Invalid maze: {}", e),
            LoadError::UnknownExtension(ext) => write!(f, "Unknown file extension: {}", ext),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedMaze {
    pub title: String,
    pub maze: Maze,
}

impl LoadedMaze {
    pub fn builtin() -> Result<Self, LoadError> {
        Ok(Self {
            title: "built-in".to_string(),
            maze: Maze::from_rows(constants::builtin_maze())?,
        })
    }

    pub fn load_by_name(name: &str) -> Result<Self, LoadError> {
        Self::load_by_path(&maze_file_path(name))
    }

    /// Picks the format by extension, plain text when there is none.
    pub fn load_by_path(path: &Path) -> Result<Self, LoadError> {
        log::debug!("Loading maze from {:?}", path);

        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        let default_title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("maze")
            .to_string();

        let loaded = match ext {
            "" | "txt" | "maze" => Self {
                title: default_title,
                maze: content.parse()?,
            },
            "toml" => Self::from_serialized(toml::from_str(&content)?, default_title)?,
            "json" | "json5" => Self::from_serialized(json5::from_str(&content)?, default_title)?,
            other => return Err(LoadError::UnknownExtension(other.to_string())),
        };

        log::info!("Loaded maze '{}' of size {}", loaded.title, loaded.maze.size());
        Ok(loaded)
    }

    fn from_serialized(ser: SerializableMaze, default_title: String) -> Result<Self, LoadError> {
        let SerializableMaze { title, grid } = ser;
        let title = if title.is_empty() { default_title } else { title };

        Ok(Self {
            title,
            maze: Maze::from_rows(grid)?,
        })
    }
}
