use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use blast_wave::BlastParams;
use blast_world::WorldGenConfig;
use serde::Deserialize;

/// One detonation: where and how hard, the world to generate, and how to pace it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub explosion: ExplosionSection,
    #[serde(default)]
    pub world: WorldGenConfig,
    #[serde(default)]
    pub run: RunSection,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ExplosionSection {
    #[serde(default)]
    pub x: i32,
    #[serde(default = "default_y")]
    pub y: i32,
    #[serde(default)]
    pub z: i32,
    #[serde(default = "default_strength")]
    pub strength: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default = "default_length")]
    pub length: i32,
}

impl Default for ExplosionSection {
    fn default() -> Self {
        Self {
            x: 0,
            y: default_y(),
            z: 0,
            strength: default_strength(),
            speed: 0,
            length: default_length(),
        }
    }
}

impl ExplosionSection {
    pub fn params(&self) -> BlastParams {
        BlastParams::new(self.x, self.y, self.z, self.strength, self.speed, self.length)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RunSection {
    /// Jitter seed; drawn from entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Per-frame destruction budget.
    #[serde(default = "default_budget_ms")]
    pub budget_ms: u64,
    #[serde(default)]
    pub max_frames: Option<u32>,
    /// Block table; the builtin one when unset.
    #[serde(default)]
    pub blocks: Option<PathBuf>,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            seed: None,
            budget_ms: default_budget_ms(),
            max_frames: None,
            blocks: None,
        }
    }
}

impl Scenario {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

fn default_y() -> i32 {
    64
}
fn default_strength() -> i32 {
    50
}
fn default_length() -> i32 {
    10
}
fn default_budget_ms() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;
    use blast_world::WorldGenMode;

    #[test]
    fn empty_scenario_uses_defaults() {
        let sc = Scenario::from_toml_str("").unwrap();
        let p = sc.explosion.params();
        assert_eq!((p.x, p.y, p.z, p.strength, p.length), (0, 64, 0, 50, 10));
        assert_eq!(sc.run.budget_ms, 5);
        assert!(sc.run.max_frames.is_none());
        assert!(sc.run.seed.is_none());
        assert_eq!(sc.world.mode, WorldGenMode::Flat);
    }

    #[test]
    fn sections_override_fields() {
        let sc = Scenario::from_toml_str(
            r#"
            [explosion]
            x = -40
            strength = 80
            length = 24

            [world]
            mode = "hills"
            radius_chunks = 6

            [run]
            seed = 9
            max_frames = 100
            blocks = "assets/blast/blocks.toml"
            "#,
        )
        .unwrap();
        assert_eq!(sc.explosion.x, -40);
        assert_eq!(sc.explosion.y, 64);
        assert_eq!(sc.explosion.length, 24);
        assert_eq!(sc.world.mode, WorldGenMode::Hills);
        assert_eq!(sc.world.radius_chunks, 6);
        assert_eq!(sc.run.seed, Some(9));
        assert_eq!(sc.run.max_frames, Some(100));
        assert_eq!(sc.run.blocks.as_deref(), Some(Path::new("assets/blast/blocks.toml")));
    }

    #[test]
    fn bundled_scenario_parses() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let sc = Scenario::load_from_path(root.join("assets/blast/scenario.toml")).unwrap();
        assert!(sc.explosion.strength > 0);
    }

    #[test]
    fn bad_type_is_an_error() {
        assert!(Scenario::from_toml_str("[explosion]\nstrength = \"big\"").is_err());
    }
}
