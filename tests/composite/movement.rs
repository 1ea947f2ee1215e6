//! Integration tests for line movement

use serpentine_composite::{Composite, LineState};
use serpentine_foundation::Coord;
use serpentine_storage::{Feature, OccupancyIndex};

use crate::common::{arena, assert_consistent, cells, line_at};

#[test]
fn single_step_grows_before_moving() {
    let mut world = arena();
    let (mut registry, mid) = line_at(&mut world, Coord::new(10, 10), &[], 5);

    assert!(registry.move_head_to(&mut world, mid, Coord::new(11, 10)).unwrap());

    let line = registry.get(mid).unwrap().as_line().unwrap();
    assert_eq!(line.length(), 2);
    assert_eq!(line.state(), LineState::Growing);
    assert_eq!(world.position(line.head()).unwrap(), Coord::new(11, 10));
    assert!(line.located_at(&world, Coord::new(11, 10)));
    assert_eq!(world.occupancy().get(Coord::new(11, 10)), Some(line.head()));
    assert_consistent(&world, &registry);
}

#[test]
fn moving_onto_the_tail_loops() {
    let mut world = arena();
    let body = [Coord::new(4, 5), Coord::new(3, 5), Coord::new(2, 5)];
    let (mut registry, mid) = line_at(&mut world, Coord::new(5, 5), &body, 4);

    assert!(registry.move_head_to(&mut world, mid, Coord::new(2, 5)).unwrap());

    assert_eq!(
        cells(&world, &registry, mid),
        vec![Coord::new(2, 5), Coord::new(5, 5), Coord::new(4, 5), Coord::new(3, 5)]
    );
    let mut occupied: Vec<_> = world.occupancy().iter().map(|(pos, _)| pos).collect();
    occupied.sort();
    let mut expected = vec![Coord::new(5, 5), Coord::new(4, 5), Coord::new(3, 5), Coord::new(2, 5)];
    expected.sort();
    assert_eq!(occupied, expected);
    assert_consistent(&world, &registry);
}

#[test]
fn teleport_collapses_the_body() {
    let mut world = arena();
    let body = [Coord::new(4, 5), Coord::new(3, 5)];
    let (mut registry, mid) = line_at(&mut world, Coord::new(5, 5), &body, 4);

    assert!(registry.move_head_to(&mut world, mid, Coord::new(15, 15)).unwrap());
    assert_eq!(cells(&world, &registry, mid), vec![Coord::new(15, 15)]);
    assert_eq!(world.monster_count(), 1);
    assert_consistent(&world, &registry);
}

#[test]
fn blocked_moves_change_nothing() {
    let mut world = arena();
    world.set_feature(Coord::new(6, 5), Feature::DeepWater).unwrap();
    let body = [Coord::new(4, 5)];
    let (mut registry, mid) = line_at(&mut world, Coord::new(5, 5), &body, 4);
    let before = cells(&world, &registry, mid);

    assert!(!registry.move_head_to(&mut world, mid, Coord::new(6, 5)).unwrap());
    assert!(!registry.move_head_to(&mut world, mid, Coord::new(25, 5)).unwrap());
    assert_eq!(cells(&world, &registry, mid), before);
}

#[test]
fn long_walk_stays_consistent() {
    let mut world = arena();
    let (mut registry, mid) = line_at(&mut world, Coord::new(2, 2), &[], 6);

    let path = (3..18)
        .map(|x| Coord::new(x, 2))
        .chain((3..18).map(|y| Coord::new(17, y)))
        .chain((2..17).rev().map(|x| Coord::new(x, 17)));
    for target in path {
        assert!(registry.move_head_to(&mut world, mid, target).unwrap());
        assert_consistent(&world, &registry);
    }
    let line = registry.get(mid).unwrap().as_line().unwrap();
    assert_eq!(line.state(), LineState::Full);
    assert_eq!(world.position(line.head()).unwrap(), Coord::new(2, 17));
}
