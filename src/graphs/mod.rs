//! Cell graphs
//!
//! All graphs address cells by their index in the grid's dense cell array and
//! keep fixed six-slot tables per cell, one slot per [`Direction`]:
//! - **Adjacency**: geometric neighbours, built once from the grid layout
//! - **Rivers**: directed flow edges, at most one outgoing edge per cell
//! - **Roads**: undirected edges
//! - **Elevation**: adjacency annotated with elevation deltas, rebuilt on demand
//! - **Traversal**: movement cost over the above, for unit pathfinding consumers

pub mod adjacency;
pub mod elevation;
pub mod river;
pub mod road;
pub mod traversal;

pub use adjacency::AdjacencyGraph;
pub use elevation::{EdgeKind, ElevationEdge, ElevationGraph};
pub use river::RiverGraph;
pub use road::RoadGraph;
pub use traversal::traversal_cost;

use crate::coords::Direction;

/// A directed, direction-labelled edge between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub direction: Direction,
}

impl Edge {
    pub fn new(source: usize, target: usize, direction: Direction) -> Self {
        Self { source, target, direction }
    }

    /// The same edge walked the other way.
    pub fn reversed(self) -> Edge {
        Edge::new(self.target, self.source, self.direction.opposite())
    }
}

/// Per-cell table of optional targets, one slot per direction.
pub(crate) type DirectionSlots = [Option<usize>; 6];

pub(crate) fn slot_edges(source: usize, slots: &DirectionSlots) -> impl Iterator<Item = Edge> + '_ {
    Direction::ALL
        .into_iter()
        .filter_map(move |d| slots[d.index()].map(|target| Edge::new(source, target, d)))
}
