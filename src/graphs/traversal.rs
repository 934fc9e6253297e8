//! Movement cost over grid edges, consumed by unit pathfinding.

use crate::coords::Direction;
use crate::grid::Grid;

use super::EdgeKind;

const ROAD_COST: u32 = 1;
const FLAT_COST: u32 = 5;
const SLOPE_COST: u32 = 10;

/// Cost of moving from `from` to its neighbour in `direction`, or `None` if
/// the move is impossible (off the map, into water, or up/down a cliff).
pub fn traversal_cost(grid: &Grid, from: usize, direction: Direction) -> Option<u32> {
    let to = grid.neighbor(from, direction)?;
    let target = &grid[to];
    if target.is_underwater() {
        return None;
    }
    let kind = EdgeKind::from_delta(target.elevation - grid[from].elevation);
    if kind == EdgeKind::Cliff {
        return None;
    }
    if grid.roads().has_road_through_edge(from, direction) {
        return Some(ROAD_COST);
    }
    let base = if kind == EdgeKind::Flat { FLAT_COST } else { SLOPE_COST };
    let features = target.urban_level() + target.farm_level() + target.plant_level();
    Some(base + u32::from(features))
}
