//! Monster proximity policy driven through whole monster updates.
use std::sync::Arc;

use dustbowl::config::{MonsterProfile, PlayerTuning};
use dustbowl::fsm::{MonsterState, PlayerState};
use dustbowl::monster::{pursuit, Pursuit, Radii, Sensing};
use dustbowl::{AnimationSet, EntityId, EntityKind, Facing, Monster, MonsterKind, Player};
use glam::Vec2;
use rstest::rstest;
use test_utils::{TickHarness, TEST_CLIP_FRAMES};

fn monster(kind: MonsterKind, profile: &MonsterProfile) -> Monster {
    Monster::new(
        EntityId(7),
        kind,
        Vec2::ZERO,
        profile,
        Arc::new(AnimationSet::uniform(
            EntityKind::Monster(kind),
            TEST_CLIP_FRAMES,
        )),
    )
}

fn player_at(x: f32, y: f32) -> Player {
    Player::new(
        Vec2::new(x, y),
        PlayerTuning::default(),
        Arc::new(AnimationSet::uniform(EntityKind::Player, TEST_CLIP_FRAMES)),
    )
}

#[rstest]
fn mid_range_player_is_chased_not_attacked() {
    let radii = Radii {
        notice: 550.0,
        walk: 400.0,
        attack: 50.0,
    };
    let sensing = Sensing::between(Vec2::ZERO, Vec2::new(300.0, 0.0));
    assert_eq!(pursuit(radii, sensing), Pursuit::Chase(Vec2::X));
    assert!(!radii.strikes(sensing.distance));

    let mut coffin = monster(MonsterKind::Coffin, &MonsterProfile::coffin());
    let mut player = player_at(300.0, 0.0);
    let mut harness = TickHarness::new();
    coffin.update(&mut player, &mut harness.step(0.05));

    assert_eq!(coffin.state(), MonsterState::Chasing);
    assert_eq!(coffin.body().direction, Vec2::X);
    assert!(coffin.body().center().x > 0.0);
    assert_eq!(player.state(), PlayerState::Idle);
    assert_eq!(player.body().health, 3);
}

#[rstest]
#[case::unnoticed(600.0, MonsterState::Idle, Facing::Down)]
#[case::noticed_only(450.0, MonsterState::Idle, Facing::Right)]
#[case::pursued(300.0, MonsterState::Chasing, Facing::Right)]
#[case::attack_edge_is_still_pursuit(50.0, MonsterState::Chasing, Facing::Right)]
#[case::in_reach(30.0, MonsterState::Attacking, Facing::Right)]
fn coffin_reacts_by_distance(
    #[case] distance: f32,
    #[case] state: MonsterState,
    #[case] facing: Facing,
) {
    let mut coffin = monster(MonsterKind::Coffin, &MonsterProfile::coffin());
    let mut player = player_at(distance, 0.0);
    let mut harness = TickHarness::new();
    coffin.update(&mut player, &mut harness.step(0.0));
    assert_eq!(coffin.state(), state);
    assert_eq!(coffin.body().facing, facing);
}

#[rstest]
fn cactus_holds_ground_and_shoots_inside_range() {
    let mut cactus = monster(MonsterKind::Cactus, &MonsterProfile::cactus());
    let mut player = player_at(0.0, 200.0);
    let mut harness = TickHarness::new();
    for _ in 0..9 {
        cactus.update(&mut player, &mut harness.step(0.125));
    }
    assert_eq!(cactus.state(), MonsterState::Attacking);
    assert_eq!(cactus.body().center(), Vec2::ZERO);
    assert_eq!(harness.shots.len(), 1);
    let shot = harness.shots.first().copied().expect("one shot");
    assert_eq!(shot.direction, Vec2::Y);
    assert_eq!(shot.position, Vec2::new(0.0, 150.0));
}

#[rstest]
fn monsters_stand_down_while_the_player_attacks() {
    let mut cactus = monster(MonsterKind::Cactus, &MonsterProfile::cactus());
    let mut player = player_at(200.0, 0.0);
    let mut harness = TickHarness::new();
    cactus.update(&mut player, &mut harness.step(0.05));
    assert_eq!(cactus.state(), MonsterState::Attacking);

    player.interrupt(&mut harness.context(0.0));
    cactus.update(&mut player, &mut harness.step(0.05));
    assert_eq!(cactus.state(), MonsterState::Idle);
}
