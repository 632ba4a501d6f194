//! Whole-level ticks: projectile brokering, despawning and the end state.
use std::fs;

use dustbowl::fsm::MonsterState;
use dustbowl::presentation::SpriteKind;
use dustbowl::{
    Action, EntityId, EntityKind, Faction, InputSnapshot, JsonLevel, MapSource, MonsterKind,
    Outcome, Silence, Simulation, SimulationConfig, TickReport,
};
use rstest::rstest;
use static_assertions::assert_impl_all;
use test_utils::{run, simulation, simulation_with, LevelBuilder};

assert_impl_all!(Simulation: Send, Sync);
assert_impl_all!(TickReport: Send, Clone);

/// Presses attack for one tick, then idles for `ticks` more.
fn shoot_once(simulation: &mut Simulation, dt: f32, ticks: usize) -> Vec<TickReport> {
    let fire = InputSnapshot::holding(&[Action::Attack]);
    let mut reports = vec![simulation.tick(dt, &fire, &mut Silence)];
    reports.extend(run(simulation, &InputSnapshot::none(), dt, ticks));
    reports
}

fn coffin_id(simulation: &Simulation) -> EntityId {
    simulation
        .monsters()
        .first()
        .map(|monster| monster.id())
        .expect("a coffin")
}

#[rstest]
fn player_shot_is_consumed_by_the_monster_it_hits() {
    let layout = LevelBuilder::new().player(0.0, 0.0).coffin(0.0, 480.0).build();
    let mut sim = simulation(&layout);
    let coffin = coffin_id(&sim);

    let reports = shoot_once(&mut sim, 0.05, 30);

    let spawned: Vec<_> = reports.iter().flat_map(|r| r.spawned.clone()).collect();
    assert_eq!(spawned.len(), 1);
    let consumed: Vec<_> = reports.iter().flat_map(|r| r.consumed.clone()).collect();
    assert_eq!(consumed, spawned);
    let hits: Vec<_> = reports.iter().flat_map(|r| r.monsters_hit.clone()).collect();
    assert_eq!(hits, [coffin]);
    assert!(sim.projectiles().is_empty());
    assert_eq!(sim.monster(coffin).map(|m| m.body().health), Some(2));
}

#[rstest]
fn dead_monsters_leave_on_the_following_tick() {
    let layout = LevelBuilder::new().player(0.0, 0.0).coffin(0.0, 480.0).build();
    let mut config = SimulationConfig::default();
    config.coffin.health = 1;
    let mut sim = simulation_with(&layout, config);
    let coffin = coffin_id(&sim);

    let reports = shoot_once(&mut sim, 0.05, 30);

    let hit_tick = reports
        .iter()
        .position(|r| r.monsters_hit.contains(&coffin))
        .expect("coffin was hit");
    let removed_tick = reports
        .iter()
        .position(|r| r.monsters_removed.contains(&coffin))
        .expect("coffin was removed");
    assert_eq!(removed_tick, hit_tick + 1);
    assert!(sim.monsters().is_empty());
    assert!(sim.monster(coffin).is_none());
}

#[rstest]
fn melee_death_ends_the_level() {
    let layout = LevelBuilder::new().player(0.0, 0.0).coffin(20.0, 0.0).build();
    let mut config = SimulationConfig::default();
    config.player.health = 1;
    let mut sim = simulation_with(&layout, config);

    let reports = run(&mut sim, &InputSnapshot::none(), 0.05, 3);
    let outcomes: Vec<_> = reports.iter().map(|r| r.outcome).collect();
    assert_eq!(
        outcomes,
        [Outcome::Running, Outcome::PlayerDied, Outcome::PlayerDied]
    );
    assert!(sim.player().is_dead());
    assert_eq!(
        sim.monsters().first().map(|m| m.state()),
        Some(MonsterState::Idle)
    );
}

#[rstest]
#[case::friendly_fire_only(false, 3)]
#[case::hostile_fire(true, 2)]
fn cactus_shots_hurt_the_player_only_when_enabled(#[case] hostile: bool, #[case] health: i32) {
    let layout = LevelBuilder::new().player(0.0, 200.0).cactus(0.0, 0.0).build();
    let config = SimulationConfig {
        hostile_projectiles_hit_player: hostile,
        ..SimulationConfig::default()
    };
    let mut sim = simulation_with(&layout, config);

    let reports = run(&mut sim, &InputSnapshot::none(), 0.125, 9);

    assert_eq!(reports.iter().any(|r| r.player_hit), hostile);
    assert_eq!(sim.player().body().health, health);
    let first_shot = reports
        .iter()
        .flat_map(|r| r.spawned.iter().copied())
        .next()
        .expect("cactus fired");
    let consumed = reports.iter().any(|r| r.consumed.contains(&first_shot));
    assert_eq!(consumed, hostile);
}

#[rstest]
fn unconsumed_shots_expire() {
    let layout = LevelBuilder::new().player(0.0, 0.0).build();
    let mut sim = simulation(&layout);
    let reports = shoot_once(&mut sim, 0.1, 30);
    let spawned: Vec<_> = reports.iter().flat_map(|r| r.spawned.clone()).collect();
    let expired: Vec<_> = reports.iter().flat_map(|r| r.expired.clone()).collect();
    assert_eq!(spawned.len(), 1);
    assert_eq!(expired, spawned);
    assert!(sim.projectiles().is_empty());
}

#[rstest]
fn obstacles_stop_projectiles() {
    let layout = LevelBuilder::new()
        .player(0.0, 0.0)
        .obstacle(-100, 200, 200, 40)
        .build();
    let mut sim = simulation(&layout);
    let reports = shoot_once(&mut sim, 0.05, 20);
    let spawned: Vec<_> = reports.iter().flat_map(|r| r.spawned.clone()).collect();
    let consumed: Vec<_> = reports.iter().flat_map(|r| r.consumed.clone()).collect();
    assert_eq!(spawned.len(), 1);
    assert_eq!(consumed, spawned);
    assert!(reports.iter().all(|r| r.monsters_hit.is_empty()));
}

#[rstest]
fn draw_order_runs_back_to_front() {
    let layout = LevelBuilder::new()
        .player(0.0, 0.0)
        .coffin(0.0, -480.0)
        .cactus(300.0, 480.0)
        .build();
    let sim = simulation(&layout);
    let kinds: Vec<_> = sim.draw_order().into_iter().map(|view| view.kind).collect();
    assert_eq!(
        kinds,
        [
            SpriteKind::Entity(EntityKind::Monster(MonsterKind::Coffin)),
            SpriteKind::Entity(EntityKind::Player),
            SpriteKind::Entity(EntityKind::Monster(MonsterKind::Cactus)),
        ]
    );
}

#[rstest]
fn projectiles_are_drawn_with_their_faction() {
    let layout = LevelBuilder::new().player(0.0, 0.0).build();
    let mut sim = simulation(&layout);
    shoot_once(&mut sim, 0.05, 6);
    let projectile_views: Vec<_> = sim
        .draw_order()
        .into_iter()
        .filter(|view| view.kind == SpriteKind::Projectile(Faction::Player))
        .collect();
    assert_eq!(projectile_views.len(), 1);
}

#[rstest]
fn levels_load_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("level.json");
    fs::write(
        &path,
        r#"{ "tile_size": 64,
             "fence": [[0, 4], [1, 4], [2, 4]],
             "entities": [
                 { "name": "Player", "x": 96.0, "y": 96.0 },
                 { "name": "Coffin", "x": 700.0, "y": 96.0 },
                 { "name": "Cactus", "x": 96.0, "y": 900.0 }
             ] }"#,
    )
    .expect("write level");

    let layout = JsonLevel::new(&path).load().expect("level loads");
    let sim = simulation(&layout);
    assert_eq!(sim.obstacles().len(), 3);
    assert_eq!(sim.monsters().len(), 2);
    assert_eq!(sim.outcome(), Outcome::Running);
}
