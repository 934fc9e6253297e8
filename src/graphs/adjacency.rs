//! Geometric neighbour graph, built once from the grid dimensions.

use crate::coords::{Direction, HexCoordinate};

use super::{slot_edges, DirectionSlots, Edge};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyGraph {
    width: usize,
    height: usize,
    wrapping: bool,
    neighbors: Vec<DirectionSlots>,
}

impl AdjacencyGraph {
    /// Scan the six neighbour slots of every cell in a row-major
    /// `width x height` array. Columns wrap when `wrapping` is set; rows never do.
    pub fn from_dense(width: usize, height: usize, wrapping: bool) -> Self {
        let wrap_size = if wrapping { width as i32 } else { 0 };
        let mut neighbors = Vec::with_capacity(width * height);

        for row in 0..height {
            for col in 0..width {
                let coordinate = HexCoordinate::from_offset(col as i32, row as i32, wrap_size);
                let mut slots: DirectionSlots = [None; 6];
                for d in Direction::ALL {
                    let (ncol, nrow) = coordinate.neighbor(d).to_offset();
                    if nrow < 0 || nrow >= height as i32 {
                        continue;
                    }
                    let ncol = if wrapping {
                        ncol.rem_euclid(width as i32)
                    } else if ncol < 0 || ncol >= width as i32 {
                        continue;
                    } else {
                        ncol
                    };
                    slots[d.index()] = Some(nrow as usize * width + ncol as usize);
                }
                neighbors.push(slots);
            }
        }

        Self { width, height, wrapping, neighbors }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_wrapping(&self) -> bool {
        self.wrapping
    }

    pub fn cell_count(&self) -> usize {
        self.neighbors.len()
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors
            .iter()
            .map(|slots| slots.iter().flatten().count())
            .sum()
    }

    /// Neighbour of `cell` in `direction`, if the map has one there.
    pub fn neighbor(&self, cell: usize, direction: Direction) -> Option<usize> {
        self.neighbors.get(cell).and_then(|slots| slots[direction.index()])
    }

    /// Outgoing edges of `cell`, or `None` for an index outside the grid.
    pub fn try_get_out_edges(&self, cell: usize) -> Option<impl Iterator<Item = Edge> + '_> {
        self.neighbors.get(cell).map(|slots| slot_edges(cell, slots))
    }

    /// Outgoing edges of `cell`. Empty for an index outside the grid.
    pub fn out_edges(&self, cell: usize) -> impl Iterator<Item = Edge> + '_ {
        self.try_get_out_edges(cell).into_iter().flatten()
    }

    /// Neighbour indices of `cell`, in direction order.
    pub fn neighbors(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.out_edges(cell).map(|edge| edge.target)
    }

    pub fn out_degree(&self, cell: usize) -> usize {
        self.neighbors
            .get(cell)
            .map(|slots| slots.iter().flatten().count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_border(graph: &AdjacencyGraph, cell: usize) -> bool {
        let col = cell % graph.width();
        let row = cell / graph.width();
        let side = !graph.is_wrapping() && (col == 0 || col == graph.width() - 1);
        row == 0 || row == graph.height() - 1 || side
    }

    #[test]
    fn test_interior_cells_have_six_distinct_edges() {
        for wrapping in [false, true] {
            let graph = AdjacencyGraph::from_dense(10, 10, wrapping);
            for cell in 0..graph.cell_count() {
                if is_border(&graph, cell) {
                    continue;
                }
                let dirs: Vec<Direction> = graph.out_edges(cell).map(|e| e.direction).collect();
                assert_eq!(dirs, Direction::ALL.to_vec(), "cell {}", cell);
            }
        }
    }

    #[test]
    fn test_every_edge_has_reverse() {
        for wrapping in [false, true] {
            let graph = AdjacencyGraph::from_dense(10, 15, wrapping);
            for cell in 0..graph.cell_count() {
                for edge in graph.out_edges(cell) {
                    let back = edge.reversed();
                    assert_eq!(graph.neighbor(back.source, back.direction), Some(back.target));
                }
            }
        }
    }

    #[test]
    fn test_corner_cell_degree() {
        let graph = AdjacencyGraph::from_dense(5, 5, false);
        // Row 0, col 0: E, NE only (NW falls off the left edge on an even row)
        assert_eq!(graph.out_degree(0), 2);
        assert_eq!(graph.neighbor(0, Direction::E), Some(1));
        assert_eq!(graph.neighbor(0, Direction::NE), Some(5));
    }

    #[test]
    fn test_wrapping_links_seam() {
        let graph = AdjacencyGraph::from_dense(5, 5, true);
        assert_eq!(graph.neighbor(4, Direction::E), Some(0));
        assert_eq!(graph.neighbor(0, Direction::W), Some(4));
    }

    #[test]
    fn test_out_of_range_lookup() {
        let graph = AdjacencyGraph::from_dense(5, 5, false);
        assert!(graph.try_get_out_edges(25).is_none());
        assert_eq!(graph.out_edges(25).count(), 0);
        assert_eq!(graph.neighbor(99, Direction::E), None);
    }
}
