use cqmaze::board::Cell;

/// Maze solved when no file is given.
pub fn builtin_maze() -> Vec<Vec<Cell>> {
    vec![
        vec![Cell::Start, Cell::Open, Cell::Wall],
        vec![Cell::Open, Cell::Open, Cell::Goal],
    ]
}

pub mod paths {
    use std::path::PathBuf;

    #[cfg(not(feature = "local_paths"))]
    pub fn base_path() -> PathBuf {
        // no preference dir means no home, current dir is the best we have
        dirs::preference_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("qmaze")
    }

    #[cfg(feature = "local_paths")]
    pub fn base_path() -> PathBuf {
        PathBuf::from("./.qmaze")
    }

    pub fn settings_path() -> PathBuf {
        base_path().join("settings.ron")
    }

    pub fn mazes_path() -> PathBuf {
        base_path().join("mazes")
    }

    /// Maze file by name, looked up in the mazes directory when it isn't a path on its own.
    pub fn maze_file_path(name: &str) -> PathBuf {
        let path = PathBuf::from(name);
        if path.exists() || path.components().count() > 1 {
            path
        } else {
            mazes_path().join(name)
        }
    }
}
