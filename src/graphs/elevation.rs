//! Adjacency annotated with elevation steps. Derived from cell elevations,
//! so it is rebuilt rather than updated whenever elevations change.

use crate::cell::Cell;
use crate::coords::Direction;

use super::{AdjacencyGraph, Edge};

/// How a unit of elevation change reads on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Flat,
    Slope,
    Cliff,
}

impl EdgeKind {
    pub fn from_delta(delta: i32) -> EdgeKind {
        match delta.abs() {
            0 => EdgeKind::Flat,
            1 => EdgeKind::Slope,
            _ => EdgeKind::Cliff,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElevationEdge {
    pub edge: Edge,
    /// `target.elevation - source.elevation`
    pub delta: i32,
    pub kind: EdgeKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElevationGraph {
    edges: Vec<[Option<ElevationEdge>; 6]>,
}

impl ElevationGraph {
    pub fn build(cells: &[Cell], adjacency: &AdjacencyGraph) -> Self {
        let edges = (0..cells.len())
            .map(|source| {
                let mut slots = [None; 6];
                for edge in adjacency.out_edges(source) {
                    let delta = cells[edge.target].elevation - cells[source].elevation;
                    slots[edge.direction.index()] = Some(ElevationEdge {
                        edge,
                        delta,
                        kind: EdgeKind::from_delta(delta),
                    });
                }
                slots
            })
            .collect();
        Self { edges }
    }

    pub fn edge(&self, cell: usize, direction: Direction) -> Option<ElevationEdge> {
        self.edges.get(cell).and_then(|slots| slots[direction.index()])
    }

    pub fn out_edges(&self, cell: usize) -> impl Iterator<Item = ElevationEdge> + '_ {
        self.edges.get(cell).into_iter().flat_map(|slots| slots.iter().flatten().copied())
    }

    pub fn count_kind(&self, cell: usize, kind: EdgeKind) -> usize {
        self.out_edges(cell).filter(|e| e.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::HexCoordinate;

    #[test]
    fn test_edge_classification() {
        assert_eq!(EdgeKind::from_delta(0), EdgeKind::Flat);
        assert_eq!(EdgeKind::from_delta(-1), EdgeKind::Slope);
        assert_eq!(EdgeKind::from_delta(1), EdgeKind::Slope);
        assert_eq!(EdgeKind::from_delta(2), EdgeKind::Cliff);
        assert_eq!(EdgeKind::from_delta(-5), EdgeKind::Cliff);
    }

    #[test]
    fn test_deltas_are_antisymmetric() {
        let adjacency = AdjacencyGraph::from_dense(5, 5, false);
        let cells: Vec<Cell> = (0..25)
            .map(|i| {
                let mut cell = Cell::new(i, HexCoordinate::from_offset((i % 5) as i32, (i / 5) as i32, 0));
                cell.elevation = (i % 7) as i32;
                cell
            })
            .collect();
        let graph = ElevationGraph::build(&cells, &adjacency);

        for cell in 0..25 {
            for e in graph.out_edges(cell) {
                let back = graph.edge(e.edge.target, e.edge.direction.opposite()).unwrap();
                assert_eq!(back.delta, -e.delta);
                assert_eq!(back.kind, e.kind);
            }
        }
    }
}
