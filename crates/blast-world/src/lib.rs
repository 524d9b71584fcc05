//! World sizing, coordinates, the block access contract, and terrain generation.
#![forbid(unsafe_code)]

mod access;
mod chunk_coord;
pub mod terrain;
pub mod worldgen;

pub use access::{BlastWorld, RemovalMode};
pub use chunk_coord::ChunkCoord;
pub use terrain::TerrainSampler;
pub use worldgen::{WorldGenConfig, WorldGenMode};

/// Horizontal edge of a chunk column, in voxels.
pub const CHUNK_SIZE: usize = 16;
/// Vertical extent of the world; columns span `0..WORLD_HEIGHT`.
pub const WORLD_HEIGHT: usize = 256;
