//! Directed river flow edges. Edited incrementally by the river pass.

use crate::coords::Direction;

use super::{slot_edges, DirectionSlots, Edge};

/// River edges as a subset of adjacency. A cell has at most one outgoing
/// river; incoming rivers are indexed by the direction they arrive from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RiverGraph {
    outgoing: Vec<Option<Edge>>,
    incoming: Vec<DirectionSlots>,
}

impl RiverGraph {
    pub fn new(cell_count: usize) -> Self {
        Self {
            outgoing: vec![None; cell_count],
            incoming: vec![[None; 6]; cell_count],
        }
    }

    pub fn outgoing(&self, cell: usize) -> Option<Edge> {
        self.outgoing.get(cell).copied().flatten()
    }

    pub fn outgoing_direction(&self, cell: usize) -> Option<Direction> {
        self.outgoing(cell).map(|edge| edge.direction)
    }

    pub fn has_outgoing(&self, cell: usize) -> bool {
        self.outgoing(cell).is_some()
    }

    pub fn has_incoming(&self, cell: usize) -> bool {
        self.incoming
            .get(cell)
            .is_some_and(|slots| slots.iter().any(Option::is_some))
    }

    pub fn has_river(&self, cell: usize) -> bool {
        self.has_outgoing(cell) || self.has_incoming(cell)
    }

    /// Incoming edges of `cell`, each pointing from its upstream source.
    pub fn incoming(&self, cell: usize) -> impl Iterator<Item = Edge> + '_ {
        self.incoming
            .get(cell)
            .into_iter()
            .flat_map(move |slots| slot_edges(cell, slots).map(Edge::reversed))
    }

    /// True if a river runs along the edge leaving `cell` in `direction`,
    /// whichever way it flows.
    pub fn has_river_through_edge(&self, cell: usize, direction: Direction) -> bool {
        self.outgoing_direction(cell) == Some(direction)
            || self
                .incoming
                .get(cell)
                .is_some_and(|slots| slots[direction.index()].is_some())
    }

    /// Record a river from `edge.source` into `edge.target`, replacing any
    /// outgoing river `edge.source` had.
    pub fn insert(&mut self, edge: Edge) {
        self.remove_outgoing(edge.source);
        self.outgoing[edge.source] = Some(edge);
        self.incoming[edge.target][edge.direction.opposite().index()] = Some(edge.source);
    }

    pub fn remove_outgoing(&mut self, cell: usize) -> Option<Edge> {
        let edge = self.outgoing.get_mut(cell)?.take()?;
        self.incoming[edge.target][edge.direction.opposite().index()] = None;
        Some(edge)
    }

    pub fn remove_incoming(&mut self, cell: usize) {
        let sources: Vec<usize> = self.incoming(cell).map(|edge| edge.source).collect();
        for source in sources {
            self.remove_outgoing(source);
        }
    }

    pub fn remove_all(&mut self, cell: usize) {
        self.remove_outgoing(cell);
        self.remove_incoming(cell);
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.outgoing.iter().flatten().copied()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().flatten().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_query() {
        let mut rivers = RiverGraph::new(4);
        rivers.insert(Edge::new(0, 1, Direction::E));

        assert!(rivers.has_outgoing(0));
        assert!(rivers.has_incoming(1));
        assert!(rivers.has_river(1));
        assert!(!rivers.has_river(2));
        assert!(rivers.has_river_through_edge(0, Direction::E));
        assert!(rivers.has_river_through_edge(1, Direction::W));
        assert_eq!(rivers.incoming(1).collect::<Vec<_>>(), vec![Edge::new(0, 1, Direction::E)]);
    }

    #[test]
    fn test_insert_replaces_outgoing() {
        let mut rivers = RiverGraph::new(4);
        rivers.insert(Edge::new(0, 1, Direction::E));
        rivers.insert(Edge::new(0, 2, Direction::NE));

        assert_eq!(rivers.edge_count(), 1);
        assert!(!rivers.has_incoming(1));
        assert!(rivers.has_incoming(2));
    }

    #[test]
    fn test_remove_all_clears_both_ends() {
        let mut rivers = RiverGraph::new(4);
        rivers.insert(Edge::new(0, 1, Direction::E));
        rivers.insert(Edge::new(1, 2, Direction::NE));
        rivers.remove_all(1);

        assert_eq!(rivers.edge_count(), 0);
        assert!(!rivers.has_river(0));
        assert!(!rivers.has_river(2));
    }
}
