use std::{collections::VecDeque, fmt};

use hashbrown::{HashMap, HashSet};

use crate::{dims::Dims, graph::GridGraph};

/// Ordered sequence of cells, consecutive cells are neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<Dims>);

impl Path {
    pub fn new(cells: Vec<Dims>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Dims] {
        &self.0
    }

    pub fn into_cells(self) -> Vec<Dims> {
        self.0
    }

    /// Number of cells, start and goal included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<Dims> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Dims> {
        self.0.last().copied()
    }

    pub fn contains(&self, pos: Dims) -> bool {
        self.0.contains(&pos)
    }

    /// Checks that every cell is a node, consecutive cells are adjacent and no cell repeats.
    pub fn is_valid_in(&self, graph: &GridGraph) -> bool {
        let unique = self.0.iter().collect::<HashSet<_>>().len() == self.0.len();

        unique
            && self.0.iter().all(|&pos| graph.contains(pos))
            && self.0.windows(2).all(|w| graph.are_adjacent(w[0], w[1]))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for pos in &self.0 {
            if !first {
                write!(f, " -> ")?;
            }
            write!(f, "{}", pos)?;
            first = false;
        }
        Ok(())
    }
}

/// Lazy depth-first enumeration of all simple paths between two nodes.
///
/// Neighbors are visited in the graph's order, so the enumeration is deterministic. Paths longer
/// than `cutoff` edges are skipped when a cutoff is set.
///
/// A branch is only entered while the target stays reachable from it without crossing the
/// current path, and within the cutoff. Every step therefore leads to a path.
pub struct SimplePaths<'a> {
    graph: &'a GridGraph,
    target: Dims,
    cutoff: Option<usize>,
    visited: Vec<Dims>,
    on_path: HashSet<Dims>,
    // next neighbor index to try, one entry per visited node
    stack: Vec<usize>,
}

impl<'a> SimplePaths<'a> {
    pub fn new(graph: &'a GridGraph, from: Dims, to: Dims) -> Self {
        let mut paths = Self {
            graph,
            target: to,
            cutoff: None,
            visited: Vec::new(),
            on_path: HashSet::new(),
            stack: Vec::new(),
        };

        if from != to && graph.contains(from) && graph.contains(to) {
            paths.visited.push(from);
            paths.on_path.insert(from);
            paths.stack.push(0);
        }

        paths
    }

    pub fn with_cutoff(mut self, cutoff: Option<usize>) -> Self {
        self.cutoff = cutoff;
        self
    }

    fn within_cutoff(&self, edges: usize) -> bool {
        self.cutoff.map_or(true, |cutoff| edges <= cutoff)
    }

    /// Edges from `from` to the target, not crossing the current path.
    fn distance_to_target(&self, from: Dims) -> Option<usize> {
        let mut seen: HashSet<Dims> = HashSet::from([from]);
        let mut queue = VecDeque::from([(from, 0)]);

        while let Some((current, dist)) = queue.pop_front() {
            if current == self.target {
                return Some(dist);
            }

            for &n in self.graph.neighbors(current) {
                if !self.on_path.contains(&n) && seen.insert(n) {
                    queue.push_back((n, dist + 1));
                }
            }
        }

        None
    }
}

impl Iterator for SimplePaths<'_> {
    type Item = Path;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(next_idx) = self.stack.last_mut() {
            let Some(&node) = self.visited.last() else {
                break;
            };
            let neighbors = self.graph.neighbors(node);

            let Some(&child) = neighbors.get(*next_idx) else {
                self.stack.pop();
                self.visited.pop();
                self.on_path.remove(&node);
                continue;
            };
            *next_idx += 1;

            if self.on_path.contains(&child) {
                continue;
            }

            let edges = self.visited.len();
            if child == self.target {
                if self.within_cutoff(edges) {
                    let mut cells = self.visited.clone();
                    cells.push(child);
                    return Some(Path(cells));
                }
                continue;
            }

            let reachable = self
                .distance_to_target(child)
                .is_some_and(|dist| self.within_cutoff(edges + dist));
            if reachable {
                self.visited.push(child);
                self.on_path.insert(child);
                self.stack.push(0);
            }
        }

        None
    }
}

/// Collects simple paths from `from` to `to`, stopping after `limit` paths when set.
pub fn all_simple_paths(
    graph: &GridGraph,
    from: Dims,
    to: Dims,
    cutoff: Option<usize>,
    limit: Option<usize>,
) -> Vec<Path> {
    let paths = SimplePaths::new(graph, from, to).with_cutoff(cutoff);
    match limit {
        Some(limit) => paths.take(limit).collect(),
        None => paths.collect(),
    }
}

/// Breadth-first shortest path, the classical baseline.
pub fn shortest_path(graph: &GridGraph, from: Dims, to: Dims) -> Option<Path> {
    if !graph.contains(from) || !graph.contains(to) {
        return None;
    }

    let mut parents: HashMap<Dims, Dims> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    parents.insert(from, from);

    while let Some(current) = queue.pop_front() {
        if current == to {
            let mut cells = vec![to];
            let mut pos = to;
            while pos != from {
                pos = parents[&pos];
                cells.push(pos);
            }
            cells.reverse();
            return Some(Path(cells));
        }

        for &n in graph.neighbors(current) {
            if !parents.contains_key(&n) {
                parents.insert(n, current);
                queue.push_back(n);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Maze;

    fn graph_of(text: &str) -> (Maze, GridGraph) {
        let maze: Maze = text.parse().unwrap();
        let graph = GridGraph::new(&maze);
        (maze, graph)
    }

    #[test]
    fn example_maze_paths() {
        let (maze, graph) = graph_of("S01\n00G");
        let paths = all_simple_paths(&graph, maze.start(), maze.goal(), None, None);

        assert_eq!(paths.len(), 2);
        let expected = Path::new(vec![Dims(0, 0), Dims(0, 1), Dims(1, 1), Dims(1, 2)]);
        assert!(paths.contains(&expected));
        assert!(paths.contains(&Path::new(vec![
            Dims(0, 0),
            Dims(1, 0),
            Dims(1, 1),
            Dims(1, 2)
        ])));
        assert!(paths.iter().all(|p| p.is_valid_in(&graph)));
        assert!(paths.iter().all(|p| !p.contains(Dims(0, 2))));
    }

    #[test]
    fn open_grid_path_count() {
        // 3x3 open grid corner to corner has 12 simple paths
        let (maze, graph) = graph_of("S00\n000\n00G");
        let paths = all_simple_paths(&graph, maze.start(), maze.goal(), None, None);
        assert_eq!(paths.len(), 12);

        let unique: HashSet<_> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
    }

    #[test]
    fn cutoff_and_limit() {
        let (maze, graph) = graph_of("S00\n000\n00G");
        let short = all_simple_paths(&graph, maze.start(), maze.goal(), Some(4), None);
        assert_eq!(short.len(), 6);
        assert!(short.iter().all(|p| p.edge_count() == 4));

        let limited = all_simple_paths(&graph, maze.start(), maze.goal(), None, Some(3));
        assert_eq!(limited.len(), 3);

        let none = all_simple_paths(&graph, maze.start(), maze.goal(), Some(3), None);
        assert!(none.is_empty());
    }

    fn open_grid(size: usize) -> String {
        let mut rows = vec!["0".repeat(size); size];
        rows[0].replace_range(0..1, "S");
        rows[size - 1].replace_range(size - 1..size, "G");
        rows.join("\n")
    }

    #[test]
    fn large_open_grid_first_paths() {
        let (maze, graph) = graph_of(&open_grid(8));
        let paths = all_simple_paths(&graph, maze.start(), maze.goal(), None, Some(3));

        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.is_valid_in(&graph)));
        assert!(paths.iter().all(|p| p.last() == Some(maze.goal())));
    }

    #[test]
    fn large_grid_with_tight_cutoff() {
        let (maze, graph) = graph_of(&open_grid(8));
        let paths = all_simple_paths(&graph, maze.start(), maze.goal(), Some(14), Some(5));

        assert_eq!(paths.len(), 5);
        assert!(paths.iter().all(|p| p.edge_count() == 14));
    }

    #[test]
    fn boxed_in_target_on_large_grid() {
        let mut text = open_grid(8);
        // walls around the goal in the bottom right corner
        text.replace_range(6 * 9 + 7..6 * 9 + 8, "1");
        text.replace_range(7 * 9 + 6..7 * 9 + 7, "1");
        let (maze, graph) = graph_of(&text);

        let mut paths = SimplePaths::new(&graph, maze.start(), maze.goal());
        assert_eq!(paths.next(), None);
    }

    #[test]
    fn disconnected_has_no_paths() {
        let (maze, graph) = graph_of("S10\n110\n00G");
        assert!(all_simple_paths(&graph, maze.start(), maze.goal(), None, None).is_empty());
        assert_eq!(shortest_path(&graph, maze.start(), maze.goal()), None);
    }

    #[test]
    fn shortest_is_manhattan_without_walls() {
        let (maze, graph) = graph_of("S000\n0000\n000G");
        let path = shortest_path(&graph, maze.start(), maze.goal()).unwrap();
        assert_eq!(path.edge_count() as i32, maze.start().manhattan(maze.goal()));
        assert!(path.is_valid_in(&graph));
        assert_eq!(path.first(), Some(maze.start()));
        assert_eq!(path.last(), Some(maze.goal()));
    }

    #[test]
    fn invalid_paths() {
        let (_, graph) = graph_of("S01\n00G");
        assert!(!Path::new(vec![Dims(0, 0), Dims(1, 1)]).is_valid_in(&graph));
        assert!(!Path::new(vec![Dims(0, 1), Dims(0, 2)]).is_valid_in(&graph));
        assert!(!Path::new(vec![Dims(0, 0), Dims(0, 1), Dims(0, 0)]).is_valid_in(&graph));
    }

    #[test]
    fn display() {
        let path = Path::new(vec![Dims(0, 0), Dims(0, 1)]);
        assert_eq!(path.to_string(), "(0, 0) -> (0, 1)");
    }
}
