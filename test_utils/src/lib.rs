//! Utility helpers for tests.
//!
//! Builders for level layouts, a stand-in for the per-tick context, and a
//! one-call way to stand up a [`Simulation`] with placeholder animations.

pub mod harness;
pub mod level;

use dustbowl::{
    AssetLoader, LevelLayout, Simulation, SimulationConfig, TickReport, UniformAssets,
};

pub use harness::TickHarness;
pub use level::{wall, LevelBuilder};

/// Frames per clip in test animation sets.
///
/// Long enough for the ranged monster's release frame to be reached.
pub const TEST_CLIP_FRAMES: usize = 8;

/// Placeholder animations with [`TEST_CLIP_FRAMES`] frames per clip.
pub const fn test_assets() -> UniformAssets {
    UniformAssets {
        frames: TEST_CLIP_FRAMES,
    }
}

/// Builds a simulation for `layout` with default tuning.
///
/// # Panics
/// Panics if the layout or default config is rejected.
pub fn simulation(layout: &LevelLayout) -> Simulation {
    simulation_with(layout, SimulationConfig::default())
}

/// Builds a simulation for `layout` with `config`.
///
/// # Panics
/// Panics if the layout or config is rejected.
pub fn simulation_with(layout: &LevelLayout, config: SimulationConfig) -> Simulation {
    let assets: &dyn AssetLoader = &test_assets();
    Simulation::from_level(layout, assets, config)
        .unwrap_or_else(|e| panic!("test level rejected: {e}"))
}

/// Runs `ticks` ticks of `dt` with `input` held and silent audio, returning
/// every report.
pub fn run(
    simulation: &mut Simulation,
    input: &dyn dustbowl::InputSource,
    dt: f32,
    ticks: usize,
) -> Vec<TickReport> {
    let mut audio = dustbowl::Silence;
    (0..ticks)
        .map(|_| simulation.tick(dt, input, &mut audio))
        .collect()
}
