use blast_world::{BlastWorld, CHUNK_SIZE, RemovalMode, WORLD_HEIGHT};

use crate::params::BlastParams;
use crate::propagate::ChunkGrid;

/// Energy a voxel must exceed to be removed. Neighbors at or below it count as
/// the blast's outer shell.
pub const REMOVAL_THRESHOLD: f32 = 0.0001;

const SX: usize = CHUNK_SIZE;
const SY: usize = WORLD_HEIGHT;
const SZ: usize = CHUNK_SIZE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RemovalCounts {
    pub open: usize,
    pub silent: usize,
}

impl RemovalCounts {
    #[inline]
    pub fn total(&self) -> usize {
        self.open + self.silent
    }
}

/// How the voxel at local (x, y, z) should be cleared, or `None` if it stays.
///
/// Voxels on an edge facing away from the epicenter are cleared silently: the
/// chunk across that edge has not been evaluated yet. Otherwise a voxel that
/// touches a surviving neighbor inside the chunk is cleared openly so the
/// survivors see the update; fully interior voxels go silently.
pub fn removal_mode(grid: &ChunkGrid, x: usize, y: usize, z: usize) -> Option<RemovalMode> {
    if !grid.is_destroyable(x, y, z) || grid.energy(x, y, z) <= REMOVAL_THRESHOLD {
        return None;
    }
    let c = grid.chunk;
    let outward = (x == SX - 1 && c.cx >= 0)
        || (x == 0 && c.cx <= 0)
        || (z == SZ - 1 && c.cz >= 0)
        || (z == 0 && c.cz <= 0);
    if outward {
        return Some(RemovalMode::Silent);
    }

    let shell = |nx: usize, ny: usize, nz: usize| grid.energy(nx, ny, nz) <= REMOVAL_THRESHOLD;
    let touches_shell = (y > 0 && shell(x, y - 1, z))
        || (y < SY - 1 && shell(x, y + 1, z))
        || (x > 0 && shell(x - 1, y, z))
        || (x < SX - 1 && shell(x + 1, y, z))
        || (z > 0 && shell(x, y, z - 1))
        || (z < SZ - 1 && shell(x, y, z + 1));
    Some(if touches_shell { RemovalMode::Open } else { RemovalMode::Silent })
}

/// Clears every destroyable voxel of `grid` from the world, columns first,
/// bottom to top within a column.
pub fn apply_removals<W>(params: &BlastParams, grid: &ChunkGrid, world: &mut W) -> RemovalCounts
where
    W: BlastWorld + ?Sized,
{
    let mut counts = RemovalCounts::default();
    for x in 0..SX {
        for z in 0..SZ {
            for y in 0..SY {
                let Some(mode) = removal_mode(grid, x, y, z) else {
                    continue;
                };
                let Some((wx, wy, wz)) = grid.world_pos(params, x, y, z) else {
                    continue;
                };
                world.clear_block(wx, wy, wz, mode);
                match mode {
                    RemovalMode::Open => counts.open += 1,
                    RemovalMode::Silent => counts.silent += 1,
                }
            }
        }
    }
    counts
}
