use std::error::Error;

use blast_blocks::{Block, BlockRegistry};
use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::WORLD_HEIGHT;
use crate::worldgen::{WorldGenConfig, WorldGenMode};

/// Resolved layer blocks for a generation config.
#[derive(Clone, Copy, Debug)]
struct LayerIds {
    rock: Block,
    soil: Block,
    top: Block,
    fluid: Block,
    floor: Block,
}

/// Answers "what block is generated here" for a [`WorldGenConfig`].
pub struct TerrainSampler {
    cfg: WorldGenConfig,
    ids: LayerIds,
    height: Option<FastNoiseLite>,
}

impl TerrainSampler {
    pub fn new(cfg: WorldGenConfig, reg: &BlockRegistry) -> Result<Self, Box<dyn Error>> {
        let lookup = |name: &str| -> Result<Block, Box<dyn Error>> {
            reg.block(name)
                .ok_or_else(|| format!("worldgen layer uses unknown block '{}'", name).into())
        };
        let ids = LayerIds {
            rock: lookup(&cfg.layers.rock)?,
            soil: lookup(&cfg.layers.soil)?,
            top: lookup(&cfg.layers.top)?,
            fluid: lookup(&cfg.layers.fluid)?,
            floor: lookup(&cfg.layers.floor)?,
        };
        let height = match cfg.mode {
            WorldGenMode::Hills => {
                let mut n = FastNoiseLite::with_seed(cfg.seed);
                n.set_noise_type(Some(NoiseType::OpenSimplex2));
                n.set_frequency(Some(cfg.hills.frequency));
                Some(n)
            }
            _ => None,
        };
        Ok(Self { cfg, ids, height })
    }

    #[inline]
    pub fn config(&self) -> &WorldGenConfig {
        &self.cfg
    }

    /// Height of the topmost solid voxel in the column at (wx, wz).
    pub fn surface_y(&self, wx: i32, wz: i32) -> i32 {
        let top = WORLD_HEIGHT as i32 - 1;
        match (&self.cfg.mode, &self.height) {
            (WorldGenMode::Solid, _) => top,
            (WorldGenMode::Hills, Some(n)) => {
                let h = self.cfg.surface_height as f32
                    + n.get_noise_2d(wx as f32, wz as f32) * self.cfg.hills.amplitude;
                (h.round() as i32).clamp(0, top)
            }
            _ => self.cfg.surface_height.clamp(0, top),
        }
    }

    pub fn block_at(&self, wx: i32, wy: i32, wz: i32) -> Block {
        if wy < 0 || wy >= WORLD_HEIGHT as i32 {
            return Block::AIR;
        }
        if self.cfg.mode == WorldGenMode::Solid {
            return self.ids.rock;
        }
        if wy == 0 && self.cfg.bedrock_floor {
            return self.ids.floor;
        }
        let surface = self.surface_y(wx, wz);
        if wy > surface {
            return if wy <= self.cfg.sea_level { self.ids.fluid } else { Block::AIR };
        }
        let soil_top = surface - self.cfg.soil_depth.max(0);
        if wy == surface && surface > self.cfg.sea_level {
            self.ids.top
        } else if wy > soil_top {
            self.ids.soil
        } else {
            self.ids.rock
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler(cfg: WorldGenConfig) -> TerrainSampler {
        TerrainSampler::new(cfg, &BlockRegistry::builtin()).unwrap()
    }

    #[test]
    fn flat_layers_from_floor_to_sky() {
        let reg = BlockRegistry::builtin();
        let s = sampler(WorldGenConfig::default());
        assert_eq!(s.block_at(3, 0, 3), reg.block("bedrock").unwrap());
        assert_eq!(s.block_at(3, 10, 3), reg.block("stone").unwrap());
        assert_eq!(s.block_at(3, 62, 3), reg.block("dirt").unwrap());
        assert_eq!(s.block_at(3, 64, 3), reg.block("grass").unwrap());
        assert_eq!(s.block_at(3, 65, 3), Block::AIR);
        assert_eq!(s.block_at(3, -1, 3), Block::AIR);
        assert_eq!(s.block_at(3, 256, 3), Block::AIR);
    }

    #[test]
    fn sea_fills_above_low_surface() {
        let reg = BlockRegistry::builtin();
        let cfg = WorldGenConfig { surface_height: 40, sea_level: 45, ..Default::default() };
        let s = sampler(cfg);
        assert_eq!(s.block_at(0, 45, 0), reg.block("water").unwrap());
        assert_eq!(s.block_at(0, 46, 0), Block::AIR);
        // Submerged surface keeps soil instead of grass
        assert_eq!(s.block_at(0, 40, 0), reg.block("dirt").unwrap());
    }

    #[test]
    fn solid_mode_is_uniform_rock() {
        let reg = BlockRegistry::builtin();
        let s = sampler(WorldGenConfig { mode: WorldGenMode::Solid, ..Default::default() });
        let stone = reg.block("stone").unwrap();
        for y in [0, 1, 64, 255] {
            assert_eq!(s.block_at(-17, y, 40), stone);
        }
    }

    #[test]
    fn hills_stay_in_range_and_are_deterministic() {
        let cfg = WorldGenConfig { mode: WorldGenMode::Hills, ..Default::default() };
        let a = sampler(cfg.clone());
        let b = sampler(cfg);
        for (x, z) in [(0, 0), (100, -40), (-300, 77)] {
            let h = a.surface_y(x, z);
            assert_eq!(h, b.surface_y(x, z));
            assert!((64 - 13..=64 + 13).contains(&h));
        }
    }

    #[test]
    fn unknown_layer_block_is_rejected() {
        let mut cfg = WorldGenConfig::default();
        cfg.layers.rock = "unobtainium".into();
        assert!(TerrainSampler::new(cfg, &BlockRegistry::builtin()).is_err());
    }
}
