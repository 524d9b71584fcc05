use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_mode")]
    pub mode: WorldGenMode,
    /// Columns generated on each side of the origin column.
    #[serde(default = "default_radius_chunks")]
    pub radius_chunks: i32,
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_surface_height")]
    pub surface_height: i32,
    #[serde(default = "default_soil_depth")]
    pub soil_depth: i32,
    /// Fluid fills air at or below this height. Negative disables it.
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    #[serde(default = "default_true")]
    pub bedrock_floor: bool,
    #[serde(default)]
    pub hills: Hills,
    #[serde(default)]
    pub layers: Layers,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            radius_chunks: default_radius_chunks(),
            seed: default_seed(),
            surface_height: default_surface_height(),
            soil_depth: default_soil_depth(),
            sea_level: default_sea_level(),
            bedrock_floor: true,
            hills: Hills::default(),
            layers: Layers::default(),
        }
    }
}

impl WorldGenConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorldGenMode {
    /// Every voxel of every column is rock.
    Solid,
    Flat,
    Hills,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Hills {
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
}

impl Default for Hills {
    fn default() -> Self {
        Self {
            amplitude: default_amplitude(),
            frequency: default_frequency(),
        }
    }
}

/// Block names used for each terrain layer.
#[derive(Clone, Debug, Deserialize)]
pub struct Layers {
    #[serde(default = "default_rock")]
    pub rock: String,
    #[serde(default = "default_soil")]
    pub soil: String,
    #[serde(default = "default_top")]
    pub top: String,
    #[serde(default = "default_fluid")]
    pub fluid: String,
    #[serde(default = "default_floor")]
    pub floor: String,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            rock: default_rock(),
            soil: default_soil(),
            top: default_top(),
            fluid: default_fluid(),
            floor: default_floor(),
        }
    }
}

fn default_mode() -> WorldGenMode {
    WorldGenMode::Flat
}
fn default_radius_chunks() -> i32 {
    4
}
fn default_seed() -> i32 {
    1337
}
fn default_surface_height() -> i32 {
    64
}
fn default_soil_depth() -> i32 {
    3
}
fn default_sea_level() -> i32 {
    -1
}
fn default_true() -> bool {
    true
}
fn default_amplitude() -> f32 {
    12.0
}
fn default_frequency() -> f32 {
    0.02
}
fn default_rock() -> String {
    "stone".into()
}
fn default_soil() -> String {
    "dirt".into()
}
fn default_top() -> String {
    "grass".into()
}
fn default_fluid() -> String {
    "water".into()
}
fn default_floor() -> String {
    "bedrock".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let cfg = WorldGenConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.mode, WorldGenMode::Flat);
        assert_eq!(cfg.radius_chunks, 4);
        assert_eq!(cfg.surface_height, 64);
        assert!(cfg.bedrock_floor);
        assert_eq!(cfg.layers.rock, "stone");
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let cfg = WorldGenConfig::from_toml_str(
            r#"
            mode = "hills"
            sea_level = 60
            [hills]
            amplitude = 4.0
            [layers]
            top = "sand"
        "#,
        )
        .unwrap();
        assert_eq!(cfg.mode, WorldGenMode::Hills);
        assert_eq!(cfg.sea_level, 60);
        assert_eq!(cfg.hills.amplitude, 4.0);
        assert_eq!(cfg.hills.frequency, 0.02);
        assert_eq!(cfg.layers.top, "sand");
        assert_eq!(cfg.layers.soil, "dirt");
    }

    #[test]
    fn unknown_mode_is_an_error() {
        assert!(WorldGenConfig::from_toml_str("mode = \"caves\"").is_err());
    }
}
