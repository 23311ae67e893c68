#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Garden Defence experience.

use garden_defence_core::GameSettings;
use garden_defence_world::{query, World, WorldConfig};

/// Produces data required to start and greet a session.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Builds a world from the provided settings and ambient seed.
    #[must_use]
    pub fn launch(&self, settings: GameSettings, rng_seed: u64) -> World {
        World::new(WorldConfig { settings, rng_seed })
    }

    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_applies_the_provided_settings() {
        let mut settings = GameSettings::default();
        settings.initial_sun = 75;

        let bootstrap = Bootstrap;
        let world = bootstrap.launch(settings, 7);

        assert_eq!(query::hud(&world).sun, 75);
        assert_eq!(bootstrap.welcome_banner(&world), "Welcome to Garden Defence.");
    }
}
