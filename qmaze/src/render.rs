use std::io::{self, Write};

use cqmaze::{
    array::Array2D,
    board::Cell,
    selectors::AmplifyReport,
    solver::{Solution, Solver, Tile},
};
use crossterm::style::{Attribute, Color, ContentStyle, Stylize};

/// Prints mazes and solver results as plain text, optionally colored.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn style(&self, tile: Tile) -> ContentStyle {
        let mut style = ContentStyle::new();
        if !self.color {
            return style;
        }

        match tile {
            Tile::Cell(Cell::Start) => style.foreground_color = Some(Color::Green),
            Tile::Cell(Cell::Goal) => style.foreground_color = Some(Color::Red),
            Tile::Cell(Cell::Wall) => style.foreground_color = Some(Color::DarkGrey),
            Tile::Cell(Cell::Open) => {}
            Tile::Path => {
                style.foreground_color = Some(Color::Yellow);
                style.attributes.set(Attribute::Bold);
            }
        }
        style
    }

    /// One row per line, cells separated by a space.
    pub fn grid(&self, out: &mut impl Write, tiles: &Array2D<Tile>) -> io::Result<()> {
        for row in tiles.iter_rows() {
            let line = row
                .iter()
                .map(|&tile| {
                    if self.color {
                        self.style(tile).apply(tile.to_string()).to_string()
                    } else {
                        tile.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn heading(&self, out: &mut impl Write, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(out, "{}", text.bold())
        } else {
            writeln!(out, "{}", text)
        }
    }

    fn amplification(&self, out: &mut impl Write, report: &AmplifyReport) -> io::Result<()> {
        writeln!(
            out,
            "Performing {} amplification iterations on {} qubits",
            report.iterations, report.qubits
        )?;
        writeln!(
            out,
            "Probability of measuring a path: {:.4}",
            report.marked_probability
        )?;
        if let (Some((bits, count)), Some(shots)) = (&report.top_outcome, report.shots) {
            writeln!(out, "Most frequent outcome: {} ({}/{} shots)", bits, count, shots)?;
        }
        if report.fell_back {
            writeln!(out, "Most frequent outcome was not a path, used the next best one")?;
        }
        Ok(())
    }

    /// Full report of a solver run, from the input maze down to the solution maze.
    pub fn report(
        &self,
        out: &mut impl Write,
        title: &str,
        solver: &Solver,
        solution: &Solution,
    ) -> io::Result<()> {
        let maze = solver.maze();
        let graph = solver.graph();

        self.heading(out, &format!("Input maze ({}):", title))?;
        self.grid(out, &maze.get_cells().clone().map(Tile::Cell))?;
        writeln!(out)?;

        writeln!(out, "Start position: {}", maze.start())?;
        writeln!(out, "Goal position: {}", maze.goal())?;
        writeln!(
            out,
            "Graph created with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        )?;

        let Solution::Found {
            selection,
            candidates,
        } = solution
        else {
            writeln!(out, "No path found!")?;
            return Ok(());
        };

        writeln!(out, "Found {} possible paths", candidates)?;
        if let Some(report) = &selection.report {
            self.amplification(out, report)?;
        }
        writeln!(out, "Path found: {}", selection.path)?;
        writeln!(out)?;

        self.heading(out, "Solution maze:")?;
        self.grid(out, &solution.overlay(maze))
    }
}
