use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::{board::Maze, dims::Dims};

pub type Neighbors = SmallVec<[Dims; 4]>;

/// Undirected graph over the walkable cells of a maze.
///
/// Edges connect 4-adjacent walkable cells, wall cells are never nodes.
#[derive(Debug, Clone)]
pub struct GridGraph {
    nodes: Vec<Dims>,
    adjacency: HashMap<Dims, Neighbors>,
    edge_count: usize,
}

impl GridGraph {
    pub fn new(maze: &Maze) -> Self {
        let mut nodes = Vec::new();
        let mut adjacency = HashMap::new();
        let mut degree_sum = 0;

        for pos in maze.iter_pos().filter(|&pos| maze.is_walkable(pos)) {
            let neighbors: Neighbors = maze.walkable_neighbors(pos).collect();
            degree_sum += neighbors.len();
            nodes.push(pos);
            adjacency.insert(pos, neighbors);
        }

        let graph = Self {
            nodes,
            adjacency,
            edge_count: degree_sum / 2,
        };

        log::info!(
            "Graph created with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Nodes in row-major order.
    pub fn nodes(&self) -> &[Dims] {
        &self.nodes
    }

    pub fn contains(&self, pos: Dims) -> bool {
        self.adjacency.contains_key(&pos)
    }

    pub fn neighbors(&self, pos: Dims) -> &[Dims] {
        self.adjacency.get(&pos).map(|n| n.as_slice()).unwrap_or(&[])
    }

    pub fn are_adjacent(&self, a: Dims, b: Dims) -> bool {
        self.neighbors(a).contains(&b)
    }
}
