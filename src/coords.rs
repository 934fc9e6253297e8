//! Hex coordinate system
//!
//! Cube coordinates (x, y, z with x + y + z = 0) for a pointy-top hex grid laid
//! out in offset rows. Only x and z are stored; y is derived. Maps that wrap
//! horizontally pass their wrap size (the column count) to the distance and
//! direction helpers; a wrap size of 0 means no wrapping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Layout constants shared by the grid and the preview renderers.
pub mod hex_metrics {
    /// Distance from a cell centre to one of its corners.
    pub const OUTER_RADIUS: f32 = 10.0;

    /// Distance from a cell centre to the middle of one of its edges.
    pub const INNER_RADIUS: f32 = OUTER_RADIUS * 0.866025404;

    /// Grid widths are always a multiple of this.
    pub const CHUNK_SIZE_X: usize = 5;

    /// Grid heights are always a multiple of this.
    pub const CHUNK_SIZE_Z: usize = 5;

    /// World-space (x, z) centre of the cell at the given offset position.
    /// Odd rows are shifted half a cell to the right.
    pub fn cell_position(col: usize, row: usize) -> (f32, f32) {
        let x = (col as f32 + row as f32 * 0.5 - (row / 2) as f32) * (INNER_RADIUS * 2.0);
        let z = row as f32 * (OUTER_RADIUS * 1.5);
        (x, z)
    }
}

/// One of the six hex directions, in clockwise order starting north-east.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Direction {
    NE,
    E,
    SE,
    SW,
    W,
    #[default]
    NW,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction for an index, wrapping modulo 6.
    pub fn from_index(index: usize) -> Direction {
        Self::ALL[index % 6]
    }

    pub fn opposite(self) -> Direction {
        self.clockwise_rotation(3)
    }

    pub fn next(self) -> Direction {
        self.clockwise_rotation(1)
    }

    pub fn previous(self) -> Direction {
        self.clockwise_rotation(-1)
    }

    /// Two steps clockwise (skips one direction).
    pub fn next2(self) -> Direction {
        self.clockwise_rotation(2)
    }

    /// Two steps counter-clockwise (skips one direction).
    pub fn previous2(self) -> Direction {
        self.clockwise_rotation(-2)
    }

    /// Rotate by `steps` sixths of a turn. Negative values turn counter-clockwise.
    pub fn clockwise_rotation(self, steps: i32) -> Direction {
        let index = (self.index() as i32 + steps).rem_euclid(6);
        Self::ALL[index as usize]
    }

    /// Cube delta (dx, dz) of one step in this direction.
    pub fn unit(self) -> (i32, i32) {
        match self {
            Direction::NE => (0, 1),
            Direction::E => (1, 0),
            Direction::SE => (1, -1),
            Direction::SW => (0, -1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, 1),
        }
    }

    fn from_unit(dx: i32, dz: i32) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| d.unit() == (dx, dz))
    }

    /// Parse from string (for CLI)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ne" | "northeast" => Some(Self::NE),
            "e" | "east" => Some(Self::E),
            "se" | "southeast" => Some(Self::SE),
            "sw" | "southwest" => Some(Self::SW),
            "w" | "west" => Some(Self::W),
            "nw" | "northwest" => Some(Self::NW),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        };
        write!(f, "{}", name)
    }
}

/// Cube coordinate of a hex cell. Immutable; y is derived from x and z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoordinate {
    x: i32,
    z: i32,
}

impl HexCoordinate {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert an array position to cube coordinates. With a non-zero wrap
    /// size the column is first normalized into `[0, wrap_size)`.
    pub fn from_offset(col: i32, row: i32, wrap_size: i32) -> Self {
        let col = if wrap_size > 0 { col.rem_euclid(wrap_size) } else { col };
        Self::new(col - row / 2, row)
    }

    /// Inverse of [`HexCoordinate::from_offset`] for non-negative rows.
    pub fn to_offset(self) -> (i32, i32) {
        (self.x + self.z / 2, self.z)
    }

    pub fn x(self) -> i32 {
        self.x
    }

    pub fn y(self) -> i32 {
        -self.x - self.z
    }

    pub fn z(self) -> i32 {
        self.z
    }

    /// The coordinate one step away in `direction`. No wrap normalization.
    pub fn neighbor(self, direction: Direction) -> Self {
        let (dx, dz) = direction.unit();
        Self::new(self.x + dx, self.z + dz)
    }

    /// Hex-step distance. With `wrap_size > 0` the shortest of the direct,
    /// left-wrapped and right-wrapped distances is returned.
    pub fn distance(self, other: HexCoordinate, wrap_size: i32) -> i32 {
        let direct = self.unwrapped_distance(other);
        if wrap_size <= 0 {
            return direct;
        }
        let right = self.unwrapped_distance(HexCoordinate::new(other.x + wrap_size, other.z));
        let left = self.unwrapped_distance(HexCoordinate::new(other.x - wrap_size, other.z));
        direct.min(right).min(left)
    }

    fn unwrapped_distance(self, other: HexCoordinate) -> i32 {
        ((self.x - other.x).abs() + (self.y() - other.y()).abs() + (self.z - other.z).abs()) / 2
    }

    /// Direction from `self` to an adjacent `other`. Errors when the two
    /// coordinates are not neighbours, which callers must rule out.
    pub fn direction_to(self, other: HexCoordinate, wrap_size: i32) -> Result<Direction, MapError> {
        let mut dx = other.x - self.x;
        let dz = other.z - self.z;
        if wrap_size > 0 {
            if dx > 1 {
                dx -= wrap_size;
            } else if dx < -1 {
                dx += wrap_size;
            }
        }
        Direction::from_unit(dx, dz).ok_or(MapError::NotAdjacent { from: self, to: other })
    }
}

impl fmt::Display for HexCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y(), self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_invariant() {
        for row in 0..10 {
            for col in 0..10 {
                let c = HexCoordinate::from_offset(col, row, 0);
                assert_eq!(c.x() + c.y() + c.z(), 0);
            }
        }
    }

    #[test]
    fn test_offset_round_trip() {
        for row in 0..12 {
            for col in 0..12 {
                let c = HexCoordinate::from_offset(col, row, 0);
                assert_eq!(c.to_offset(), (col, row));
            }
        }
    }

    #[test]
    fn test_wrap_normalizes_column() {
        let c = HexCoordinate::from_offset(-1, 3, 10);
        assert_eq!(c.to_offset(), (9, 3));
        let c = HexCoordinate::from_offset(12, 4, 10);
        assert_eq!(c.to_offset(), (2, 4));
    }

    #[test]
    fn test_neighbors_are_distance_one() {
        let center = HexCoordinate::from_offset(4, 4, 0);
        for d in Direction::ALL {
            let n = center.neighbor(d);
            assert_eq!(center.distance(n, 0), 1);
            assert_eq!(center.direction_to(n, 0).unwrap(), d);
        }
    }

    #[test]
    fn test_wrapped_distance_is_shorter() {
        let a = HexCoordinate::from_offset(0, 2, 20);
        let b = HexCoordinate::from_offset(19, 2, 20);
        assert_eq!(a.distance(b, 0), 19);
        assert_eq!(a.distance(b, 20), 1);
        assert_eq!(b.distance(a, 20), 1);
    }

    #[test]
    fn test_direction_across_seam() {
        let a = HexCoordinate::from_offset(19, 0, 20);
        let b = HexCoordinate::from_offset(0, 0, 20);
        assert_eq!(a.direction_to(b, 20).unwrap(), Direction::E);
        assert_eq!(b.direction_to(a, 20).unwrap(), Direction::W);
    }

    #[test]
    fn test_direction_to_non_adjacent_fails() {
        let a = HexCoordinate::new(0, 0);
        let b = HexCoordinate::new(2, 0);
        assert!(matches!(a.direction_to(b, 0), Err(MapError::NotAdjacent { .. })));
        assert!(a.direction_to(a, 0).is_err());
    }

    #[test]
    fn test_direction_rotations() {
        assert_eq!(Direction::NE.opposite(), Direction::SW);
        assert_eq!(Direction::NW.next(), Direction::NE);
        assert_eq!(Direction::NE.previous(), Direction::NW);
        assert_eq!(Direction::W.next2(), Direction::NE);
        assert_eq!(Direction::E.previous2(), Direction::NW);
        assert_eq!(Direction::SE.clockwise_rotation(-8), Direction::NE);
        assert_eq!(Direction::SE.clockwise_rotation(13), Direction::SW);
    }

    #[test]
    fn test_cell_position_odd_row_offset() {
        let (x0, z0) = hex_metrics::cell_position(0, 0);
        let (x1, z1) = hex_metrics::cell_position(0, 1);
        assert_eq!(x0, 0.0);
        assert_eq!(z0, 0.0);
        assert!((x1 - hex_metrics::INNER_RADIUS).abs() < 1e-4);
        assert!((z1 - 15.0).abs() < 1e-4);
    }
}
