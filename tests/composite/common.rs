//! Shared fixtures for composite tests

use serpentine_composite::{Composite, CompositeRegistry, LineComposite, LineConfig};
use serpentine_foundation::{Coord, EntityId, Mid};
use serpentine_storage::{CombatStats, Habitat, MonsterKind, MonsterSpec, OccupancyIndex, World, WorldConfig};

pub fn worm() -> MonsterSpec {
    MonsterSpec::new(MonsterKind::new("worm", 'w', Habitat::Land))
        .with_stats(CombatStats::with_max_hit_points(20))
}

pub fn arena() -> World {
    World::new(WorldConfig::arena().with_seed(3)).unwrap()
}

/// A registered line with its head at `head` and parts at `body`.
pub fn line_at(
    world: &mut World,
    head: Coord,
    body: &[Coord],
    max_length: usize,
) -> (CompositeRegistry, Mid) {
    let head = world.spawn(worm(), head).unwrap();
    let line = LineComposite::with_body(world, head, LineConfig::new(max_length), body).unwrap();
    let mut registry = CompositeRegistry::new();
    let mid = registry.register(world, line).unwrap();
    (registry, mid)
}

/// Members head-first with their cells.
pub fn cells(world: &World, registry: &CompositeRegistry, mid: Mid) -> Vec<Coord> {
    let composite = registry.get(mid).unwrap();
    std::iter::once(composite.head())
        .chain(composite.parts().iter().copied())
        .map(|m| world.position(m).unwrap())
        .collect()
}

/// Every member's cell maps back to it and nothing else is indexed.
pub fn assert_consistent(world: &World, registry: &CompositeRegistry) {
    let mut members: Vec<EntityId> = Vec::new();
    for (_, composite) in registry.iter() {
        members.extend(composite.get_parts(true));
    }
    for &m in &members {
        let pos = world.position(m).unwrap();
        assert_eq!(world.occupancy().get(pos), Some(m), "{m:?} at {pos}");
    }
    assert_eq!(world.occupancy().occupied_count(), world.monster_count());
}
