use std::sync::Arc;

use blast_blocks::{Block, BlockRegistry};
use blast_world::{BlastWorld, ChunkCoord, RemovalMode, TerrainSampler};
use hashbrown::HashMap;

use crate::{ColumnBuf, generate_column};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Removal {
    pub pos: (i32, i32, i32),
    pub mode: RemovalMode,
    pub prev: Block,
}

/// Every block cleared through [`BlastWorld::clear_block`], in request order.
#[derive(Clone, Debug, Default)]
pub struct RemovalLog {
    pub entries: Vec<Removal>,
    pub open: usize,
    pub silent: usize,
}

impl RemovalLog {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, r: Removal) {
        match r.mode {
            RemovalMode::Open => self.open += 1,
            RemovalMode::Silent => self.silent += 1,
        }
        self.entries.push(r);
    }
}

/// Sparse set of loaded columns backed by a block table.
pub struct ColumnWorld {
    reg: Arc<BlockRegistry>,
    columns: HashMap<ChunkCoord, ColumnBuf>,
    removals: RemovalLog,
}

impl ColumnWorld {
    pub fn new(reg: Arc<BlockRegistry>) -> Self {
        Self {
            reg,
            columns: HashMap::new(),
            removals: RemovalLog::default(),
        }
    }

    /// Generates every column within the sampler's configured radius.
    pub fn generate(reg: Arc<BlockRegistry>, sampler: &TerrainSampler) -> Self {
        let r = sampler.config().radius_chunks.max(0);
        let mut world = Self::new(reg);
        for cz in -r..=r {
            for cx in -r..=r {
                let coord = ChunkCoord::new(cx, cz);
                world.insert_column(generate_column(sampler, coord));
            }
        }
        log::debug!("generated {} columns (radius {})", world.columns.len(), r);
        world
    }

    /// Square of columns filled top to bottom with one block.
    pub fn filled(reg: Arc<BlockRegistry>, radius_chunks: i32, block: Block) -> Self {
        let mut world = Self::new(reg);
        for cz in -radius_chunks..=radius_chunks {
            for cx in -radius_chunks..=radius_chunks {
                let coord = ChunkCoord::new(cx, cz);
                world.insert_column(ColumnBuf::filled(coord, block));
            }
        }
        world
    }

    pub fn insert_column(&mut self, buf: ColumnBuf) {
        self.columns.insert(buf.coord, buf);
    }

    #[inline]
    pub fn column(&self, coord: ChunkCoord) -> Option<&ColumnBuf> {
        self.columns.get(&coord)
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn registry(&self) -> &BlockRegistry {
        &self.reg
    }

    /// Direct write, bypassing the removal log. Returns false for unloaded positions.
    pub fn set_block(&mut self, wx: i32, wy: i32, wz: i32, b: Block) -> bool {
        let coord = ChunkCoord::from_world(wx, wz);
        self.columns
            .get_mut(&coord)
            .and_then(|c| c.set_world(wx, wy, wz, b))
            .is_some()
    }

    #[inline]
    pub fn removals(&self) -> &RemovalLog {
        &self.removals
    }

    pub fn take_removals(&mut self) -> RemovalLog {
        std::mem::take(&mut self.removals)
    }

    pub fn count_non_air(&self) -> usize {
        self.columns.values().map(|c| c.count_non_air()).sum()
    }
}

impl BlastWorld for ColumnWorld {
    #[inline]
    fn block_at(&self, wx: i32, wy: i32, wz: i32) -> Option<Block> {
        let coord = ChunkCoord::from_world(wx, wz);
        self.columns.get(&coord)?.get_world(wx, wy, wz)
    }

    #[inline]
    fn resistance(&self, b: Block) -> f32 {
        self.reg.resistance(b)
    }

    #[inline]
    fn is_liquid(&self, b: Block) -> bool {
        self.reg.is_liquid(b)
    }

    fn clear_block(&mut self, wx: i32, wy: i32, wz: i32, mode: RemovalMode) {
        let coord = ChunkCoord::from_world(wx, wz);
        let Some(prev) = self
            .columns
            .get_mut(&coord)
            .and_then(|c| c.set_world(wx, wy, wz, Block::AIR))
        else {
            log::trace!("clear_block outside loaded columns at ({}, {}, {})", wx, wy, wz);
            return;
        };
        self.removals.push(Removal {
            pos: (wx, wy, wz),
            mode,
            prev,
        });
    }
}
