use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::{BlockDef, BlocksConfig};
use super::types::{Block, BlockId};

/// Resistance of plain stone; the unit the builtin masquerades are expressed in.
pub const STONE_RESISTANCE: f32 = 6.0;

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    /// Resistance as configured for this block.
    pub base_resistance: f32,
    /// Resistance seen by explosions, after `resistance_as` is applied.
    pub resistance: f32,
    pub liquid: bool,
    pub masquerade: Option<(BlockId, f32)>,
}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn block(&self, name: &str) -> Option<Block> {
        self.id_by_name(name).map(Block::of)
    }

    /// Effective blast resistance. Unregistered ids are permeable.
    #[inline]
    pub fn resistance(&self, b: Block) -> f32 {
        self.get(b.id).map(|ty| ty.resistance).unwrap_or(0.0)
    }

    #[inline]
    pub fn is_liquid(&self, b: Block) -> bool {
        self.get(b.id).map(|ty| ty.liquid).unwrap_or(false)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_configs(cfg)
    }

    pub fn from_configs(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry::new();
        let mut pending: Vec<(BlockId, String, f32)> = Vec::new();
        for def in cfg.blocks.into_iter() {
            let BlockDef {
                name,
                id,
                resistance,
                liquid,
                resistance_as,
            } = def;
            let next = reg.blocks.len() as BlockId;
            let id = id.unwrap_or(next);
            if id != next {
                return Err(format!("block '{}' has id {} but ids must be dense (expected {})", name, id, next).into());
            }
            if id == Block::AIR.id && name != "air" {
                return Err(format!("id 0 is reserved for air, found '{}'", name).into());
            }
            if reg.by_name.contains_key(&name) {
                return Err(format!("duplicate block name '{}'", name).into());
            }
            let base = resistance.unwrap_or(0.0);
            if let Some(m) = resistance_as {
                pending.push((id, m.block, m.scale));
            }
            reg.by_name.insert(name.clone(), id);
            reg.blocks.push(BlockType {
                id,
                name,
                base_resistance: base,
                resistance: base,
                liquid: liquid.unwrap_or(false),
                masquerade: None,
            });
        }
        if reg.blocks.is_empty() {
            return Err("block table is empty; at least 'air' is required".into());
        }
        // Resolve after all names are known so a block may borrow from one declared later.
        for (id, target, scale) in pending {
            let tid = reg
                .id_by_name(&target)
                .ok_or_else(|| format!("resistance_as refers to unknown block '{}'", target))?;
            let base = reg.blocks[tid as usize].base_resistance;
            let ty = &mut reg.blocks[id as usize];
            ty.resistance = base * scale;
            ty.masquerade = Some((tid, scale));
        }
        Ok(reg)
    }

    /// Default table: stone as the reference rock, obsidian at three stones,
    /// sandstone blasting like stone, bedrock beyond any explosion.
    pub fn builtin() -> Self {
        let mut reg = BlockRegistry::new();
        let mut push = |name: &str, resistance: f32, liquid: bool| {
            let id = reg.blocks.len() as BlockId;
            reg.by_name.insert(name.to_string(), id);
            reg.blocks.push(BlockType {
                id,
                name: name.to_string(),
                base_resistance: resistance,
                resistance,
                liquid,
                masquerade: None,
            });
        };
        push("air", 0.0, false);
        push("stone", STONE_RESISTANCE, false);
        push("dirt", 0.5, false);
        push("grass", 0.6, false);
        push("sand", 0.5, false);
        push("sandstone", 0.8, false);
        push("obsidian", 1200.0, false);
        push("bedrock", 3_600_000.0, false);
        push("water", 60.0, true);
        push("lava", 60.0, true);
        let stone = reg.by_name["stone"];
        for (name, scale) in [("sandstone", 1.0f32), ("obsidian", 3.0)] {
            let id = reg.by_name[name] as usize;
            reg.blocks[id].resistance = STONE_RESISTANCE * scale;
            reg.blocks[id].masquerade = Some((stone, scale));
        }
        reg
    }
}
