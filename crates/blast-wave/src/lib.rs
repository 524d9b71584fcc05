//! Chunked, time-sliced explosion propagation over a voxel column world.
#![forbid(unsafe_code)]

pub mod boundary;
mod explosion;
pub mod mutate;
mod params;
pub mod propagate;
pub mod schedule;
mod source;

pub use boundary::{BoundaryCache, BoundaryFace, Side};
pub use explosion::{Explosion, ExplosionStats, TickState};
pub use mutate::{REMOVAL_THRESHOLD, RemovalCounts, apply_removals, removal_mode};
pub use params::BlastParams;
pub use propagate::{ChunkGrid, MAX_RESISTANCE, VISITED_FLOOR, propagate_chunk};
pub use schedule::{RingScheduler, octant_layer};
pub use source::{Clock, FnClock, FnRandom, RandomSource};

pub use blast_world::{BlastWorld, ChunkCoord, RemovalMode};
