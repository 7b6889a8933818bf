//! Seeders shipped with the console. Files under `src/seeds/` are named
//! after their seeder type, the shape `code-gen seeder` generates into
//! `SEEDS_DIR`; new seeders must be added to [`registry`] to be runnable.

use crate::migration::Registry;
use crate::seed::Seeder;

#[path = "seeds/PublicPastesSeeder.rs"]
mod public_pastes_seeder;

pub use public_pastes_seeder::PublicPastesSeeder;

/// Every seeder the console knows how to run, keyed by name. The `seed`
/// command without `--class` runs them in this order.
pub fn registry() -> Registry<dyn Seeder> {
    let mut registry: Registry<dyn Seeder> = Registry::new();
    registry.register("PublicPastesSeeder", || Box::new(PublicPastesSeeder));
    registry
}
