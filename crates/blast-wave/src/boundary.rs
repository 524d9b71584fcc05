use blast_world::{CHUNK_SIZE, ChunkCoord, WORLD_HEIGHT};
use hashbrown::HashMap;

/// One of the four horizontal sides of a chunk column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    NegX = 0,
    PosX = 1,
    NegZ = 2,
    PosZ = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::NegX, Side::PosX, Side::NegZ, Side::PosZ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::NegX => Side::PosX,
            Side::PosX => Side::NegX,
            Side::NegZ => Side::PosZ,
            Side::PosZ => Side::NegZ,
        }
    }

    /// Chunk coordinate along the axis parallel to this side; faces are keyed by it.
    #[inline]
    pub fn key(self, chunk: ChunkCoord) -> i32 {
        match self {
            Side::NegX | Side::PosX => chunk.cz,
            Side::NegZ | Side::PosZ => chunk.cx,
        }
    }
}

// Face planes are indexed (u, y) where u is the horizontal coordinate running
// along the edge: z for X faces, x for Z faces. index = y * CHUNK_SIZE + u
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryFace {
    pub energy: Vec<f32>,
    pub spread: Vec<f32>,
}

impl BoundaryFace {
    pub const LEN: usize = CHUNK_SIZE * WORLD_HEIGHT;

    pub fn new() -> Self {
        Self {
            energy: vec![0.0; Self::LEN],
            spread: vec![0.0; Self::LEN],
        }
    }

    #[inline]
    pub fn idx(u: usize, y: usize) -> usize {
        y * CHUNK_SIZE + u
    }

    #[inline]
    pub fn get(&self, u: usize, y: usize) -> (f32, f32) {
        let i = Self::idx(u, y);
        (self.energy[i], self.spread[i])
    }

    #[inline]
    pub fn set(&mut self, u: usize, y: usize, energy: f32, spread: f32) {
        let i = Self::idx(u, y);
        self.energy[i] = energy;
        self.spread[i] = spread;
    }
}

impl Default for BoundaryFace {
    fn default() -> Self {
        Self::new()
    }
}

/// Edge planes of processed chunks, looked up by the chunks processed after them.
///
/// `faces[side]` holds what a chunk sees when it looks across its own `side`:
/// the opposite edge of the neighbor in that direction. Only the side facing away
/// from the epicenter is ever stored; the inward neighbor of any chunk is
/// processed first and nothing looks back toward it.
#[derive(Default)]
pub struct BoundaryCache {
    faces: [HashMap<i32, BoundaryFace>; 4],
}

impl BoundaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn put(&mut self, side: Side, key: i32, face: BoundaryFace) {
        self.faces[side.index()].insert(key, face);
    }

    #[inline]
    pub fn get(&self, side: Side, key: i32) -> Option<&BoundaryFace> {
        self.faces[side.index()].get(&key)
    }

    /// The plane `chunk` reads when a voxel looks across its `side`.
    #[inline]
    pub fn neighbor_face(&self, chunk: ChunkCoord, side: Side) -> Option<&BoundaryFace> {
        self.get(side, side.key(chunk))
    }

    /// Stores the outward edges of a freshly processed chunk. `edges[s]` is the
    /// chunk's own edge plane on side `s`.
    pub fn publish(&mut self, chunk: ChunkCoord, edges: [BoundaryFace; 4]) {
        let [neg_x, pos_x, neg_z, pos_z] = edges;
        // Axis chunks publish both ways.
        if chunk.cx >= 0 {
            self.put(Side::NegX, chunk.cz, pos_x);
        }
        if chunk.cx <= 0 {
            self.put(Side::PosX, chunk.cz, neg_x);
        }
        if chunk.cz >= 0 {
            self.put(Side::NegZ, chunk.cx, pos_z);
        }
        if chunk.cz <= 0 {
            self.put(Side::PosZ, chunk.cx, neg_z);
        }
    }

    pub fn len(&self) -> usize {
        self.faces.iter().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
