use proptest::prelude::*;

use hexmap_generator::{Direction, Grid, HexCoordinate};

fn direction() -> impl Strategy<Value = Direction> {
    (0usize..6).prop_map(Direction::from_index)
}

proptest! {
    #[test]
    fn offset_round_trip(col in 0i32..200, row in 0i32..200) {
        let coordinate = HexCoordinate::from_offset(col, row, 0);
        prop_assert_eq!(coordinate.to_offset(), (col, row));
        prop_assert_eq!(coordinate.x() + coordinate.y() + coordinate.z(), 0);
    }

    #[test]
    fn wrapped_round_trip_is_modular(col in -400i32..400, row in 0i32..100, wrap in 5i32..100) {
        let (c, r) = HexCoordinate::from_offset(col, row, wrap).to_offset();
        prop_assert_eq!(r, row);
        prop_assert_eq!(c.rem_euclid(wrap), col.rem_euclid(wrap));
    }

    #[test]
    fn distance_is_symmetric(
        a in (0i32..60, 0i32..60),
        b in (0i32..60, 0i32..60),
        wrap in prop_oneof![Just(0i32), 60i32..61],
    ) {
        let a = HexCoordinate::from_offset(a.0, a.1, wrap);
        let b = HexCoordinate::from_offset(b.0, b.1, wrap);
        prop_assert_eq!(a.distance(b, wrap), b.distance(a, wrap));
        prop_assert!(a.distance(b, wrap) <= a.distance(b, 0));
        prop_assert_eq!(a.distance(a, wrap), 0);
    }

    #[test]
    fn neighbors_are_one_step_away(col in 0i32..50, row in 0i32..50, d in direction()) {
        let a = HexCoordinate::from_offset(col, row, 0);
        let b = a.neighbor(d);
        prop_assert_eq!(a.distance(b, 0), 1);
        prop_assert_eq!(a.direction_to(b, 0).ok(), Some(d));
        prop_assert_eq!(b.neighbor(d.opposite()), a);
    }

    #[test]
    fn rotation_laws(d in direction(), n in -20i32..20) {
        prop_assert_eq!(d.opposite().opposite(), d);
        prop_assert_eq!(d.next().previous(), d);
        prop_assert_eq!(d.next2(), d.next().next());
        prop_assert_eq!(d.previous2(), d.previous().previous());
        prop_assert_eq!(d.clockwise_rotation(n).clockwise_rotation(-n), d);
        prop_assert_eq!(d.clockwise_rotation(n + 6), d.clockwise_rotation(n));
        prop_assert_eq!(d.clockwise_rotation(3), d.opposite());
    }

    #[test]
    fn adjacency_is_well_formed(w in 1usize..5, h in 1usize..5, wrapping in any::<bool>()) {
        let grid = Grid::new(w * 5, h * 5, wrapping);
        let adjacency = grid.adjacency();
        for cell in grid.cells() {
            let mut seen = [false; 6];
            for edge in adjacency.out_edges(cell.index()) {
                prop_assert!(!seen[edge.direction.index()]);
                seen[edge.direction.index()] = true;
                prop_assert_eq!(adjacency.neighbor(edge.target, edge.direction.opposite()), Some(cell.index()));
            }
            if cell.explorable {
                prop_assert_eq!(adjacency.out_degree(cell.index()), 6);
            }
        }
    }
}
