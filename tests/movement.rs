//! Axis-separated movement against static obstacles.
use std::sync::Arc;

use approx::assert_relative_eq;
use dustbowl::assets::AnimationSet;
use dustbowl::entity::BodySpec;
use dustbowl::vector_math::is_unit_or_zero;
use dustbowl::{Body, EntityKind, Obstacle};
use glam::{IVec2, Vec2};
use rstest::{fixture, rstest};
use test_utils::wall;

#[fixture]
fn walker() -> Body {
    Body::new(BodySpec {
        spawn: Vec2::new(100.0, 100.0),
        sprite_size: IVec2::splat(64),
        speed: 200.0,
        health: 3,
        despawn_on_death: false,
        animations: Arc::new(AnimationSet::uniform(EntityKind::Player, 4)),
    })
}

/// Two walls meeting at (160, 160), open towards the walker.
fn l_corner() -> [Obstacle; 2] {
    [wall(140, 60, 20, 120), wall(40, 140, 120, 20)]
}

#[rstest]
fn diagonal_walk_into_corner_stays_outside_both_walls(mut walker: Body) {
    let corner = l_corner();
    walker.direction = Vec2::ONE;
    for _ in 0..40 {
        walker.integrate(0.05, &corner);
        for obstacle in &corner {
            assert!(
                !obstacle.hitbox.collides(&walker.hitbox),
                "{:?} overlaps {:?}",
                walker.hitbox,
                obstacle.hitbox
            );
        }
    }
    assert_eq!(walker.hitbox.right(), 140);
    assert_eq!(walker.hitbox.bottom(), 140);
    assert_eq!(walker.rect.center(), walker.hitbox.center());
}

#[rstest]
fn direction_is_normalised_before_moving(mut walker: Body) {
    walker.direction = Vec2::new(3.0, 4.0);
    walker.integrate(0.1, &[]);
    assert_relative_eq!(walker.direction.length(), 1.0, epsilon = 1e-6);
    assert_relative_eq!(walker.position.x, 112.0, epsilon = 1e-3);
    assert_relative_eq!(walker.position.y, 116.0, epsilon = 1e-3);
    assert_eq!(walker.hitbox.center(), IVec2::new(112, 116));
}

#[rstest]
#[case(Vec2::new(3.0, 4.0))]
#[case(Vec2::new(-0.001, 0.0))]
#[case(Vec2::new(1e20, -1e20))]
#[case(Vec2::new(1e-30, 1e-30))]
#[case(Vec2::new(f32::NAN, 1.0))]
#[case(Vec2::new(f32::INFINITY, 0.0))]
#[case(Vec2::ZERO)]
fn direction_ends_unit_or_zero(mut walker: Body, #[case] direction: Vec2) {
    walker.direction = direction;
    walker.integrate(0.05, &[wall(0, 200, 400, 20)]);
    assert!(is_unit_or_zero(walker.direction), "{:?}", walker.direction);
    assert!(walker.position.is_finite());
}

#[rstest]
fn sliding_along_a_wall_keeps_the_free_axis(mut walker: Body) {
    let floor = [wall(0, 116, 400, 20)];
    walker.direction = Vec2::new(1.0, 1.0);
    for _ in 0..10 {
        walker.integrate(0.05, &floor);
    }
    assert_eq!(walker.hitbox.bottom(), 116);
    assert!(walker.hitbox.center_x() > 150);
}
