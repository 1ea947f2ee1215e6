//! Integration tests for world state

use serpentine_foundation::{Coord, ErrorKind};
use serpentine_storage::{
    Attitude, CombatStats, Habitat, Killer, MonsterKind, MonsterSpec, OccupancyIndex, World,
    WorldConfig,
};

fn spec(name: &str) -> MonsterSpec {
    MonsterSpec::new(MonsterKind::new(name, 'x', Habitat::Land))
}

#[test]
fn world_config_is_validated() {
    let err = World::new(WorldConfig::default().with_size(10, -1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidConfig(_)));
}

#[test]
fn spawn_applies_spec() {
    let mut world = World::new(WorldConfig::arena()).unwrap();
    let id = world
        .spawn(
            spec("imp")
                .with_stats(CombatStats::with_max_hit_points(8))
                .with_hit_points(3)
                .with_attitude(Attitude::Friendly),
            Coord::new(1, 2),
        )
        .unwrap();
    let m = world.monster(id).unwrap();

    assert_eq!(m.hit_points, 3);
    assert_eq!(m.stats.max_hit_points, 8);
    assert_eq!(m.attitude, Attitude::Friendly);
    assert_eq!(m.composite, None);
    assert_eq!(world.monster_by_mid(m.mid), Some(id));
}

#[test]
fn deaths_are_logged_in_order() {
    let mut world = World::new(WorldConfig::arena()).unwrap();
    let a = world.spawn(spec("a"), Coord::new(1, 1)).unwrap();
    let b = world.spawn(spec("b"), Coord::new(2, 1)).unwrap();
    let mid_b = world.mid(b).unwrap();

    world.destroy(b, Killer::player(), false).unwrap();
    world.destroy(a, Killer::monster(mid_b), true).unwrap();

    let deaths = world.drain_deaths();
    assert_eq!(deaths.len(), 2);
    assert_eq!(deaths[0].mid, mid_b);
    assert_eq!(deaths[1].killer, Killer::monster(mid_b));
    assert!(world.drain_deaths().is_empty());
}

#[test]
fn index_follows_spawn_and_destroy_only() {
    let mut world = World::new(WorldConfig::arena()).unwrap();
    let id = world.spawn(spec("a"), Coord::new(4, 4)).unwrap();

    world.move_to(id, Coord::new(5, 4)).unwrap();
    world.occupancy_mut().set(Coord::new(5, 4), id);
    world.occupancy_mut().clear_if(Coord::new(4, 4), id);
    assert_eq!(world.monster_at(Coord::new(5, 4)), Some(id));

    world.destroy(id, Killer::misc(), true).unwrap();
    assert_eq!(world.occupancy().occupied_count(), 0);
}

#[test]
fn same_seed_same_stream() {
    use rand::Rng;

    let mut a = World::new(WorldConfig::arena().with_seed(5)).unwrap();
    let mut b = World::new(WorldConfig::arena().with_seed(5)).unwrap();
    let xs: Vec<u32> = (0..4).map(|_| a.rng_mut().r#gen()).collect();
    let ys: Vec<u32> = (0..4).map(|_| b.rng_mut().r#gen()).collect();
    assert_eq!(xs, ys);
}
