//! Dense hex grid
//!
//! Owns every [`Cell`] of a map in a row-major array, plus the adjacency,
//! river and road graphs over those cells. Cells refer back to the grid only
//! through their array index.

use std::ops::{Index, IndexMut};

use log::warn;

use crate::cell::Cell;
use crate::coords::{hex_metrics, Direction, HexCoordinate};
use crate::graphs::{AdjacencyGraph, Edge, EdgeKind, ElevationGraph, RiverGraph, RoadGraph};

#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    wrapping: bool,
    cells: Vec<Cell>,
    adjacency: AdjacencyGraph,
    rivers: RiverGraph,
    roads: RoadGraph,
}

/// Round a requested size up to a whole number of chunks (at least one).
fn round_to_chunks(requested: usize, chunk: usize) -> usize {
    requested.max(1).div_ceil(chunk) * chunk
}

impl Grid {
    /// Allocate a `width x height` grid of cells at elevation 0. Dimensions are
    /// rounded up to the chunk size. Border rows (and border columns on
    /// non-wrapping maps) are marked non-explorable.
    pub fn new(width: usize, height: usize, wrapping: bool) -> Self {
        let clamped_width = round_to_chunks(width, hex_metrics::CHUNK_SIZE_X);
        let clamped_height = round_to_chunks(height, hex_metrics::CHUNK_SIZE_Z);
        if clamped_width != width || clamped_height != height {
            warn!(
                "Map size {}x{} is not a multiple of the {}x{} chunk size, using {}x{}",
                width,
                height,
                hex_metrics::CHUNK_SIZE_X,
                hex_metrics::CHUNK_SIZE_Z,
                clamped_width,
                clamped_height
            );
        }
        let (width, height) = (clamped_width, clamped_height);
        let wrap_size = if wrapping { width as i32 } else { 0 };

        let mut cells = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                let index = cells.len();
                let coordinate = HexCoordinate::from_offset(col as i32, row as i32, wrap_size);
                let mut cell = Cell::new(index, coordinate);
                cell.elevation = 0;
                let side_border = !wrapping && (col == 0 || col == width - 1);
                cell.explorable = !(row == 0 || row == height - 1 || side_border);
                cells.push(cell);
            }
        }

        let cell_count = cells.len();
        Self {
            width,
            height,
            wrapping,
            cells,
            adjacency: AdjacencyGraph::from_dense(width, height, wrapping),
            rivers: RiverGraph::new(cell_count),
            roads: RoadGraph::new(cell_count),
        }
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

    /// Column count when wrapping, 0 otherwise.
    pub fn wrap_size(&self) -> i32 {
        if self.wrapping { self.width as i32 } else { 0 }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    /// Array index of the cell at an offset position, if it is on the map.
    /// Columns wrap on wrapping maps.
    pub fn index_at_offset(&self, col: i32, row: i32) -> Option<usize> {
        if row < 0 || row >= self.height as i32 {
            return None;
        }
        let col = if self.wrapping {
            col.rem_euclid(self.width as i32)
        } else if col < 0 || col >= self.width as i32 {
            return None;
        } else {
            col
        };
        Some(row as usize * self.width + col as usize)
    }

    pub fn cell_at_offset(&self, col: i32, row: i32) -> Option<&Cell> {
        self.index_at_offset(col, row).map(|i| &self.cells[i])
    }

    pub fn cell_at(&self, coordinate: HexCoordinate) -> Option<&Cell> {
        let (col, row) = coordinate.to_offset();
        self.cell_at_offset(col, row)
    }

    /// Offset (column, row) of a cell index.
    pub fn offset_of(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// World-space centre of a cell.
    pub fn position_of(&self, index: usize) -> (f32, f32) {
        let (col, row) = self.offset_of(index);
        hex_metrics::cell_position(col, row)
    }

    pub fn adjacency(&self) -> &AdjacencyGraph {
        &self.adjacency
    }

    pub fn rivers(&self) -> &RiverGraph {
        &self.rivers
    }

    pub fn roads(&self) -> &RoadGraph {
        &self.roads
    }

    /// Build the elevation graph from the current cell elevations.
    pub fn elevation_graph(&self) -> ElevationGraph {
        ElevationGraph::build(&self.cells, &self.adjacency)
    }

    pub fn neighbor(&self, cell: usize, direction: Direction) -> Option<usize> {
        self.adjacency.neighbor(cell, direction)
    }

    pub fn neighbors(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.neighbors(cell)
    }

    /// Cells that are not underwater.
    pub fn land_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_underwater()).count()
    }

    /// Whether a river may flow from `source` into `target`: downhill or
    /// level, or out of a lake whose surface meets the target.
    pub fn is_valid_river_destination(&self, source: usize, target: usize) -> bool {
        let (from, to) = (&self.cells[source], &self.cells[target]);
        from.elevation >= to.elevation || from.water_level == to.elevation
    }

    /// Point the river leaving `cell` in `direction`. Replaces any existing
    /// outgoing river, drops a river flowing the opposite way along the same
    /// edge and any road on it. Returns false (and changes nothing) when there
    /// is no neighbour or the neighbour is not a valid destination.
    pub fn set_outgoing_river(&mut self, cell: usize, direction: Direction) -> bool {
        if self.rivers.outgoing_direction(cell) == Some(direction) {
            return true;
        }
        let Some(target) = self.neighbor(cell, direction) else {
            return false;
        };
        if !self.is_valid_river_destination(cell, target) {
            return false;
        }

        if self.rivers.outgoing_direction(target) == Some(direction.opposite()) {
            self.rivers.remove_outgoing(target);
        }
        self.rivers.insert(Edge::new(cell, target, direction));
        self.cells[cell].special_index = 0;
        self.cells[target].special_index = 0;
        self.roads.remove(cell, direction);
        true
    }

    pub fn remove_outgoing_river(&mut self, cell: usize) -> bool {
        self.rivers.remove_outgoing(cell).is_some()
    }

    pub fn remove_rivers(&mut self, cell: usize) {
        self.rivers.remove_all(cell);
    }

    /// Add a road along the edge leaving `cell` in `direction`. Refused across
    /// cliffs and river edges, and next to special features.
    pub fn add_road(&mut self, cell: usize, direction: Direction) -> bool {
        let Some(target) = self.neighbor(cell, direction) else {
            return false;
        };
        if self.roads.has_road_through_edge(cell, direction) {
            return true;
        }
        let delta = self.cells[target].elevation - self.cells[cell].elevation;
        let blocked = self.rivers.has_river_through_edge(cell, direction)
            || EdgeKind::from_delta(delta) == EdgeKind::Cliff
            || self.cells[cell].special_index != 0
            || self.cells[target].special_index != 0;
        if blocked {
            return false;
        }
        self.roads.insert(Edge::new(cell, target, direction));
        true
    }

    pub fn remove_road(&mut self, cell: usize, direction: Direction) -> bool {
        self.roads.remove(cell, direction)
    }
}

impl Index<usize> for Grid {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.cells[index]
    }
}

impl IndexMut<usize> for Grid {
    fn index_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }
}
