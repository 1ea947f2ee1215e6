//! Integration tests for grid coordinates

use serpentine_foundation::Coord;

#[test]
fn chebyshev_distance() {
    let a = Coord::new(2, 2);
    assert_eq!(a.distance(Coord::new(5, 3)), 3);
    assert_eq!(a.distance(Coord::new(1, 1)), 1);
    assert_eq!(a.distance(a), 0);
}

#[test]
fn neighbours_surround_the_cell() {
    let c = Coord::new(10, -4);
    let sum = c
        .neighbours()
        .fold(Coord::new(0, 0), |acc, n| acc + (n - c));
    assert_eq!(sum, Coord::new(0, 0));
    assert!(c.neighbours().all(|n| n.is_adjacent(c)));
}

#[test]
fn coordinates_order_by_column_then_row() {
    let mut cells = vec![Coord::new(1, 0), Coord::new(0, 5), Coord::new(0, 1)];
    cells.sort();
    assert_eq!(cells, vec![Coord::new(0, 1), Coord::new(0, 5), Coord::new(1, 0)]);
}
