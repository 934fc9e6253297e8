//! Undirected road edges.

use crate::coords::Direction;

use super::{slot_edges, DirectionSlots, Edge};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoadGraph {
    links: Vec<DirectionSlots>,
}

impl RoadGraph {
    pub fn new(cell_count: usize) -> Self {
        Self { links: vec![[None; 6]; cell_count] }
    }

    pub fn has_road_through_edge(&self, cell: usize, direction: Direction) -> bool {
        self.links
            .get(cell)
            .is_some_and(|slots| slots[direction.index()].is_some())
    }

    pub fn has_roads(&self, cell: usize) -> bool {
        self.links
            .get(cell)
            .is_some_and(|slots| slots.iter().any(Option::is_some))
    }

    /// Link both ends of `edge`.
    pub fn insert(&mut self, edge: Edge) {
        self.links[edge.source][edge.direction.index()] = Some(edge.target);
        self.links[edge.target][edge.direction.opposite().index()] = Some(edge.source);
    }

    /// Unlink the road leaving `cell` in `direction`. Returns whether there was one.
    pub fn remove(&mut self, cell: usize, direction: Direction) -> bool {
        let Some(target) = self.links.get_mut(cell).and_then(|slots| slots[direction.index()].take())
        else {
            return false;
        };
        self.links[target][direction.opposite().index()] = None;
        true
    }

    pub fn remove_all(&mut self, cell: usize) {
        for d in Direction::ALL {
            self.remove(cell, d);
        }
    }

    /// Road edges leaving `cell`.
    pub fn out_edges(&self, cell: usize) -> impl Iterator<Item = Edge> + '_ {
        self.links
            .get(cell)
            .into_iter()
            .flat_map(move |slots| slot_edges(cell, slots))
    }

    /// Every road once, reported from its lower-indexed end.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.links
            .iter()
            .enumerate()
            .flat_map(|(cell, slots)| slot_edges(cell, slots))
            .filter(|edge| edge.source < edge.target)
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roads_are_symmetric() {
        let mut roads = RoadGraph::new(3);
        roads.insert(Edge::new(0, 1, Direction::E));

        assert!(roads.has_road_through_edge(0, Direction::E));
        assert!(roads.has_road_through_edge(1, Direction::W));
        assert_eq!(roads.edge_count(), 1);

        assert!(roads.remove(1, Direction::W));
        assert!(!roads.has_roads(0));
        assert!(!roads.remove(1, Direction::W));
    }
}
