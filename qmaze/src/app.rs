use std::io::{self, Write};

use cqmaze::{
    selectors::default_registry,
    solver::{SolveError, Solution, Solver},
};
use thiserror::Error;

use crate::{
    loader::{LoadError, LoadedMaze},
    render::Renderer,
    settings::{Settings, SettingsError},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("Could not write output: {0}")]
    Io(#[from] io::Error),
    #[error("Could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Maze named on the command line, or the built-in one.
pub fn load_maze(name: Option<&str>) -> Result<LoadedMaze, AppError> {
    Ok(match name {
        Some(name) => LoadedMaze::load_by_name(name)?,
        None => LoadedMaze::builtin()?,
    })
}

/// Solves `loaded` as configured by `settings` and writes the report to `out`.
pub fn run(
    out: &mut impl Write,
    loaded: LoadedMaze,
    settings: &Settings,
) -> Result<Solution, AppError> {
    let solver = Solver::new(loaded.maze)
        .cutoff(settings.get_cutoff())
        .limit(settings.get_max_paths());

    let solution = solver.solve_with(
        &default_registry(),
        settings.get_selector(),
        &settings.params(),
    )?;

    Renderer::new(settings.get_color()).report(out, &loaded.title, &solver, &solution)?;
    Ok(solution)
}
