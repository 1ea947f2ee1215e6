//! Integration tests for composite records

use serpentine_composite::record::{self, PARTS_KEY};
use serpentine_composite::{Composite, CompositeRegistry};
use serpentine_foundation::{Coord, ErrorKind};

use crate::common::{arena, line_at};

#[test]
fn sync_then_load_reproduces_the_line() {
    let mut world = arena();
    let body = [Coord::new(4, 5), Coord::new(3, 5), Coord::new(3, 6)];
    let (registry, mid) = line_at(&mut world, Coord::new(5, 5), &body, 6);
    registry.sync_all(&mut world).unwrap();

    let mut reloaded = CompositeRegistry::new();
    assert_eq!(reloaded.load_all(&mut world).unwrap(), 1);

    let original = registry.get(mid).unwrap();
    let restored = reloaded.get(mid).unwrap();
    assert_eq!(restored, original);
    assert_eq!(restored.parts(), original.parts());
    assert_eq!(restored.as_line().unwrap().max_length(), 6);
}

#[test]
fn part_records_point_at_the_head() {
    let mut world = arena();
    let (registry, mid) = line_at(&mut world, Coord::new(5, 5), &[Coord::new(5, 6)], 3);
    registry.sync_all(&mut world).unwrap();

    let part = registry.get(mid).unwrap().parts()[0];
    let text = record::describe_record(&world, world.monster(part).unwrap());
    assert!(text.contains("role 'part'"));
    assert!(text.contains("is 'worm' at 5,5"));
}

#[test]
fn truncated_part_list_fails_cleanly() {
    let mut world = arena();
    let (registry, mid) = line_at(&mut world, Coord::new(5, 5), &[Coord::new(5, 6)], 3);
    registry.sync_all(&mut world).unwrap();
    let head = registry.get(mid).unwrap().head();
    record::head_record_mut(&mut world, head).unwrap().insert(PARTS_KEY, "oops");

    let err = CompositeRegistry::new().load(&mut world, head).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::CorruptComposite { ref field, .. } if field == PARTS_KEY
    ));
}

#[test]
fn length_too_small_for_parts_is_corrupt() {
    let mut world = arena();
    let body = [Coord::new(4, 5), Coord::new(3, 5)];
    let (registry, mid) = line_at(&mut world, Coord::new(5, 5), &body, 3);
    registry.sync_all(&mut world).unwrap();
    let head = registry.get(mid).unwrap().head();
    record::head_record_mut(&mut world, head)
        .unwrap()
        .insert(record::LINE_LENGTH_KEY, 2_i64);

    let err = CompositeRegistry::new().load(&mut world, head).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::CorruptComposite { ref field, .. } if field == record::LINE_LENGTH_KEY
    ));
}
