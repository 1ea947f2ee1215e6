//! Sessions driven through movement and combat

use serpentine::composite::{Composite, LineConfig, LineState};
use serpentine::foundation::{Coord, Mid};
use serpentine::runtime::Session;
use serpentine::storage::{
    Attitude, Colour, CombatStats, Feature, Habitat, Hit, Killer, MonsterKind, MonsterSpec,
    OccupancyIndex, WorldConfig,
};

fn serpent() -> MonsterSpec {
    MonsterSpec::new(MonsterKind::new("sea serpent", 'S', Habitat::Amphibious))
        .with_stats(CombatStats::with_max_hit_points(40))
        .with_colour(Colour::Green)
        .with_attitude(Attitude::Neutral)
}

fn lake() -> Session {
    let mut session = Session::new(WorldConfig::arena().with_seed(17)).unwrap();
    for x in 0..20 {
        for y in 8..12 {
            session
                .world_mut()
                .set_feature(Coord::new(x, y), Feature::DeepWater)
                .unwrap();
        }
    }
    session
}

fn members_consistent(session: &Session, mid: Mid) {
    let composite = session.composites().get(mid).unwrap();
    for member in composite.get_parts(true) {
        let pos = session.world().position(member).unwrap();
        assert_eq!(session.world().occupancy().get(pos), Some(member));
    }
}

#[test]
fn parts_mirror_the_head() {
    let mut session = lake();
    let mid = session
        .spawn_line(serpent(), Coord::new(2, 9), LineConfig::new(5))
        .unwrap();
    for x in 3..8 {
        assert!(session.move_head_to(mid, Coord::new(x, 9)).unwrap());
    }

    let head = session.world().monster_by_mid(mid).unwrap();
    let head_monster = session.world().monster(head).unwrap().clone();
    let composite = session.composite_of(head).unwrap();
    assert_eq!(composite.parts().len(), 4);
    for &part in composite.parts() {
        let m = session.world().monster(part).unwrap();
        assert!(m.kind.is_part());
        assert_eq!(m.kind.habitat, Habitat::Amphibious);
        assert_eq!(m.colour, Colour::Green);
        assert_eq!(m.attitude, Attitude::Neutral);
        assert_eq!(m.stats, head_monster.stats);
        assert_eq!(m.summoner, head_monster.summoner);
        assert_eq!(m.experience, 0);
        assert_eq!(session.glyph_for(part).unwrap().ch, '*');
        assert_eq!(session.glyph_for(part).unwrap().colour, Colour::Green);
    }
    members_consistent(&session, mid);
}

#[test]
fn lines_never_exceed_their_length() {
    let mut session = lake();
    let mid = session
        .spawn_line(serpent(), Coord::new(1, 1), LineConfig::new(3))
        .unwrap();
    for x in 2..19 {
        session.move_head_to(mid, Coord::new(x, 1)).unwrap();
        let line = session.composites().get(mid).unwrap().as_line().unwrap();
        assert!(line.length() <= 3);
    }
    let line = session.composites().get(mid).unwrap().as_line().unwrap();
    assert_eq!(line.state(), LineState::Full);
    members_consistent(&session, mid);
}

#[test]
fn two_lines_block_each_other() {
    let mut session = lake();
    let a = session
        .spawn_line(serpent(), Coord::new(5, 2), LineConfig::new(4))
        .unwrap();
    let b = session
        .spawn_line(serpent(), Coord::new(7, 2), LineConfig::new(4))
        .unwrap();

    assert!(!session.move_head_to(a, Coord::new(7, 2)).unwrap());
    assert!(session.move_head_to(a, Coord::new(6, 2)).unwrap());
    assert!(!session.move_head_to(b, Coord::new(6, 2)).unwrap());
    members_consistent(&session, a);
    members_consistent(&session, b);
}

#[test]
fn combat_kills_the_whole_creature_once() {
    let mut session = lake();
    let mid = session
        .spawn_line(serpent(), Coord::new(2, 9), LineConfig::new(4))
        .unwrap();
    for x in 3..6 {
        session.move_head_to(mid, Coord::new(x, 9)).unwrap();
    }
    let head = session.world().monster_by_mid(mid).unwrap();
    let tail = session.composites().get(mid).unwrap().as_line().unwrap().tail();
    session.drain_deaths();

    assert!(!session.hurt(tail, &Hit::new(39)).unwrap());
    assert_eq!(session.world().hit_points(head).unwrap(), 1);
    assert_eq!(session.world().hit_points(tail).unwrap(), 1);

    assert!(session.hurt(tail, &Hit::new(1).by(Mid(500))).unwrap());
    assert_eq!(session.world().monster_count(), 0);
    assert!(session.composites().is_empty());

    let deaths = session.drain_deaths();
    assert_eq!(deaths.len(), 4);
    assert_eq!(deaths.iter().filter(|d| !d.silent).count(), 1);
    assert!(!session.kill(head, Killer::player()).unwrap());
}

#[test]
fn describe_lists_segments() {
    let mut session = lake();
    let mid = session
        .spawn_line(serpent(), Coord::new(2, 9), LineConfig::new(3))
        .unwrap();
    session.move_head_to(mid, Coord::new(3, 9)).unwrap();
    let head = session.world().monster_by_mid(mid).unwrap();

    let text = session.describe(head).unwrap();
    assert!(text.contains("line_monster"));
    assert!(text.contains("Head at 3,9 is 'sea serpent'"));
    assert!(text.contains("part at 2,9"));
}
