//! Integration tests for terrain and habitats

use serpentine_foundation::Coord;
use serpentine_storage::{Feature, FeatureGrid, Habitat};

#[test]
fn habitats_match_features() {
    assert!(Habitat::Land.can_occupy(Feature::ShallowWater));
    assert!(!Habitat::Land.can_occupy(Feature::DeepWater));
    assert!(Habitat::Amphibious.can_occupy(Feature::DeepWater));
    assert!(!Habitat::Water.can_occupy(Feature::Floor));
    assert!(Habitat::Lava.can_occupy(Feature::Lava));
    for habitat in [Habitat::Land, Habitat::Amphibious, Habitat::Water, Habitat::Lava] {
        assert!(!habitat.can_occupy(Feature::Wall));
        assert!(!habitat.can_occupy(Feature::Tree));
    }
}

#[test]
fn off_map_reads_as_wall() {
    let grid = FeatureGrid::new(4, 3, Feature::Floor);
    assert_eq!(grid.get(Coord::new(3, 2)), Feature::Floor);
    assert_eq!(grid.get(Coord::new(4, 0)), Feature::Wall);
    assert_eq!(grid.get(Coord::new(0, -1)), Feature::Wall);
}

#[test]
fn off_map_writes_fail() {
    let mut grid = FeatureGrid::new(4, 3, Feature::Floor);
    assert!(grid.set(Coord::new(1, 1), Feature::Lava).is_ok());
    assert!(grid.set(Coord::new(9, 9), Feature::Lava).is_err());
    assert_eq!(grid.get(Coord::new(1, 1)), Feature::Lava);
}
