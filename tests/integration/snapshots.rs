//! Sessions surviving a save/load cycle

use proptest::prelude::*;
use serpentine::composite::{Composite, LineConfig};
use serpentine::foundation::{Coord, ErrorKind, Mid};
use serpentine::runtime::serialize::{world_from_bytes, world_to_bytes};
use serpentine::runtime::Session;
use serpentine::storage::{Habitat, MonsterKind, MonsterSpec, WorldConfig};

fn worm() -> MonsterSpec {
    MonsterSpec::new(MonsterKind::new("worm", 'w', Habitat::Land))
}

fn layout(session: &Session, mid: Mid) -> Vec<(Mid, Coord)> {
    let composite = session.composites().get(mid).unwrap();
    std::iter::once(composite.head())
        .chain(composite.parts().iter().copied())
        .map(|id| {
            let m = session.world().monster(id).unwrap();
            (m.mid, m.pos)
        })
        .collect()
}

#[test]
fn several_lines_roundtrip() {
    let mut session = Session::new(WorldConfig::arena().with_seed(2)).unwrap();
    let mids: Vec<Mid> = [2, 8, 14]
        .into_iter()
        .map(|y| {
            let mid = session
                .spawn_line(worm(), Coord::new(1, y), LineConfig::new(4))
                .unwrap();
            for x in 2..7 {
                session.move_head_to(mid, Coord::new(x, y)).unwrap();
            }
            mid
        })
        .collect();

    let restored = Session::restore(&session.save().unwrap()).unwrap();
    assert_eq!(restored.composites().len(), 3);
    for mid in mids {
        assert_eq!(layout(&restored, mid), layout(&session, mid));
    }
}

#[test]
fn unsynced_world_bytes_hold_no_composites() {
    let mut session = Session::new(WorldConfig::arena()).unwrap();
    session
        .spawn_line(worm(), Coord::new(3, 3), LineConfig::new(3))
        .unwrap();

    let world = world_from_bytes(&world_to_bytes(session.world()).unwrap()).unwrap();
    let restored = Session::with_world(world).unwrap();
    assert!(restored.composites().is_empty());
    assert_eq!(restored.world().monster_count(), 1);
}

#[test]
fn dead_parts_in_a_save_are_reported() {
    let mut session = Session::new(WorldConfig::arena()).unwrap();
    let mid = session
        .spawn_line(worm(), Coord::new(3, 3), LineConfig::new(3))
        .unwrap();
    session.move_head_to(mid, Coord::new(4, 3)).unwrap();
    session.sync_composites().unwrap();

    let part = session.composites().get(mid).unwrap().parts()[0];
    session
        .world_mut()
        .destroy(part, serpentine::storage::Killer::misc(), true)
        .unwrap();
    let err = Session::with_world(session.world().clone()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CorruptComposite { mid: m, .. } if m == mid));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn random_walks_survive_snapshots(seed in any::<u64>(), steps in proptest::collection::vec(0usize..8, 1..20)) {
        let mut session = Session::new(WorldConfig::arena().with_seed(seed)).unwrap();
        let mid = session
            .spawn_line(worm(), Coord::new(10, 10), LineConfig::new(5))
            .unwrap();
        for step in steps {
            let head = session.world().monster_by_mid(mid).unwrap();
            let pos = session.world().position(head).unwrap();
            if let Some(target) = pos.neighbours().nth(step) {
                session.move_head_to(mid, target).unwrap();
            }
        }

        let restored = Session::restore(&session.save().unwrap()).unwrap();
        prop_assert_eq!(layout(&restored, mid), layout(&session, mid));
    }
}
