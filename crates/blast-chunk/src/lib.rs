//! Column buffers and an in-memory world built from them.
#![forbid(unsafe_code)]

mod column_world;

pub use column_world::{ColumnWorld, Removal, RemovalLog};

use blast_blocks::Block;
use blast_world::{CHUNK_SIZE, ChunkCoord, TerrainSampler, WORLD_HEIGHT};

/// One full-height chunk column of blocks.
#[derive(Clone, Debug)]
pub struct ColumnBuf {
    pub coord: ChunkCoord,
    pub blocks: Vec<Block>,
}

impl ColumnBuf {
    pub const SX: usize = CHUNK_SIZE;
    pub const SY: usize = WORLD_HEIGHT;
    pub const SZ: usize = CHUNK_SIZE;
    pub const LEN: usize = Self::SX * Self::SY * Self::SZ;

    #[inline]
    pub fn idx(x: usize, y: usize, z: usize) -> usize {
        (y * Self::SZ + z) * Self::SX + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[Self::idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, b: Block) {
        self.blocks[Self::idx(x, y, z)] = b;
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        let (base_x, base_z) = self.coord.world_origin();
        if wy < 0 || wy >= Self::SY as i32 {
            return false;
        }
        wx >= base_x && wx < base_x + Self::SX as i32 && wz >= base_z && wz < base_z + Self::SZ as i32
    }

    #[inline]
    fn local_of(&self, wx: i32, wy: i32, wz: i32) -> Option<(usize, usize, usize)> {
        if !self.contains_world(wx, wy, wz) {
            return None;
        }
        let (base_x, base_z) = self.coord.world_origin();
        Some(((wx - base_x) as usize, wy as usize, (wz - base_z) as usize))
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<Block> {
        self.local_of(wx, wy, wz)
            .map(|(lx, ly, lz)| self.get_local(lx, ly, lz))
    }

    /// Writes `b` if the position lies in this column. Returns the previous block.
    pub fn set_world(&mut self, wx: i32, wy: i32, wz: i32, b: Block) -> Option<Block> {
        let (lx, ly, lz) = self.local_of(wx, wy, wz)?;
        let prev = self.get_local(lx, ly, lz);
        self.set_local(lx, ly, lz, b);
        Some(prev)
    }

    pub fn from_blocks_local(coord: ChunkCoord, blocks: Vec<Block>) -> Self {
        let mut b = blocks;
        if b.len() != Self::LEN {
            b.resize(Self::LEN, Block::AIR);
        }
        ColumnBuf { coord, blocks: b }
    }

    pub fn filled(coord: ChunkCoord, block: Block) -> Self {
        ColumnBuf {
            coord,
            blocks: vec![block; Self::LEN],
        }
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| *b != Block::AIR)
    }

    pub fn count_non_air(&self) -> usize {
        self.blocks.iter().filter(|b| **b != Block::AIR).count()
    }
}

pub fn generate_column(sampler: &TerrainSampler, coord: ChunkCoord) -> ColumnBuf {
    let mut blocks = vec![Block::AIR; ColumnBuf::LEN];
    let (base_x, base_z) = coord.world_origin();
    for z in 0..ColumnBuf::SZ {
        for x in 0..ColumnBuf::SX {
            let wx = base_x + x as i32;
            let wz = base_z + z as i32;
            // Nothing but fluid sits above the surface, so stop at the higher of the two.
            let top = sampler
                .surface_y(wx, wz)
                .max(sampler.config().sea_level)
                .clamp(0, ColumnBuf::SY as i32 - 1) as usize;
            for y in 0..=top {
                blocks[ColumnBuf::idx(x, y, z)] = sampler.block_at(wx, y as i32, wz);
            }
        }
    }
    ColumnBuf { coord, blocks }
}
