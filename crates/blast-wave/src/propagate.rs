use std::collections::VecDeque;

use blast_world::{BlastWorld, CHUNK_SIZE, ChunkCoord, WORLD_HEIGHT};

use crate::boundary::{BoundaryCache, BoundaryFace, Side};
use crate::params::BlastParams;
use crate::source::RandomSource;

/// Resistance at which a block stops the wave outright.
pub const MAX_RESISTANCE: f64 = 600_000.0;
/// Energy stored for voxels the wave reached but could not carry past.
/// Unreached voxels stay at exactly zero.
pub const VISITED_FLOOR: f32 = 0.000_000_000_01;

const SX: usize = CHUNK_SIZE;
const SY: usize = WORLD_HEIGHT;
const SZ: usize = CHUNK_SIZE;

// +X, -X, +Y, -Y, +Z, -Z
const NEIGHBORS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Per-chunk working state of the wave. Dropped once the chunk's removals are issued.
pub struct ChunkGrid {
    pub chunk: ChunkCoord,
    /// The epicenter in this chunk's local frame; may lie outside the chunk.
    pub center: (i32, i32, i32),
    energy: Vec<f32>,
    spread: Vec<f32>,
    destroyable: Vec<bool>,
    edges: [BoundaryFace; 4],
    visited: usize,
    boundary_misses: usize,
}

impl ChunkGrid {
    pub const LEN: usize = SX * SY * SZ;

    pub fn new(chunk: ChunkCoord, center: (i32, i32, i32)) -> Self {
        Self {
            chunk,
            center,
            energy: vec![0.0; Self::LEN],
            spread: vec![0.0; Self::LEN],
            destroyable: vec![false; Self::LEN],
            edges: Default::default(),
            visited: 0,
            boundary_misses: 0,
        }
    }

    #[inline]
    pub fn idx(x: usize, y: usize, z: usize) -> usize {
        (y * SZ + z) * SX + x
    }

    #[inline]
    pub fn energy(&self, x: usize, y: usize, z: usize) -> f32 {
        self.energy[Self::idx(x, y, z)]
    }

    /// Energy with the visited floor read back as zero.
    #[inline]
    pub fn residual(&self, x: usize, y: usize, z: usize) -> f32 {
        let e = self.energy(x, y, z);
        if e <= VISITED_FLOOR { 0.0 } else { e }
    }

    #[inline]
    pub fn spread(&self, x: usize, y: usize, z: usize) -> f32 {
        self.spread[Self::idx(x, y, z)]
    }

    #[inline]
    pub fn is_visited(&self, x: usize, y: usize, z: usize) -> bool {
        self.energy(x, y, z) > 0.0
    }

    #[inline]
    pub fn is_destroyable(&self, x: usize, y: usize, z: usize) -> bool {
        self.destroyable[Self::idx(x, y, z)]
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// Horizontal lookups that found no published neighbor plane.
    #[inline]
    pub fn boundary_misses(&self) -> usize {
        self.boundary_misses
    }

    #[inline]
    pub fn edge(&self, side: Side) -> &BoundaryFace {
        &self.edges[side.index()]
    }

    /// Moves the edge planes out, leaving empty ones behind.
    pub fn take_edges(&mut self) -> [BoundaryFace; 4] {
        std::mem::take(&mut self.edges)
    }

    /// World position of a local voxel for an explosion centered at `params`,
    /// or `None` past the edge of the `i32` world.
    #[inline]
    pub fn world_pos(&self, params: &BlastParams, x: usize, y: usize, z: usize) -> Option<(i32, i32, i32)> {
        let wx = x as i64 - i64::from(self.center.0) + i64::from(params.x);
        let wz = z as i64 - i64::from(self.center.2) + i64::from(params.z);
        Some((i32::try_from(wx).ok()?, y as i32, i32::try_from(wz).ok()?))
    }

    #[inline]
    fn sample(&self, x: usize, y: usize, z: usize) -> (f32, f32) {
        let i = Self::idx(x, y, z);
        (self.energy[i], self.spread[i])
    }

    fn record(&mut self, x: usize, y: usize, z: usize, energy: f32, spread: f32, destroyable: bool) {
        let i = Self::idx(x, y, z);
        self.energy[i] = energy;
        self.spread[i] = spread;
        self.destroyable[i] = destroyable;
        self.visited += 1;
        if x == 0 {
            self.edges[Side::NegX.index()].set(z, y, energy, spread);
        } else if x == SX - 1 {
            self.edges[Side::PosX.index()].set(z, y, energy, spread);
        }
        if z == 0 {
            self.edges[Side::NegZ.index()].set(x, y, energy, spread);
        } else if z == SZ - 1 {
            self.edges[Side::PosZ.index()].set(x, y, energy, spread);
        }
    }
}

/// Epicenter in the chunk's local frame.
pub fn local_center(params: &BlastParams, chunk: ChunkCoord) -> (i32, i32, i32) {
    let (ex, ez) = params.local_epicenter();
    (ex - chunk.cx * SX as i32, params.y, ez - chunk.cz * SZ as i32)
}

/// Where the wave enters a chunk: the epicenter for the center chunk, otherwise
/// the edge facing it. Height is clamped into the world.
pub fn entry_point(params: &BlastParams, chunk: ChunkCoord) -> (usize, usize, usize) {
    let (ex, ez) = params.local_epicenter();
    let pick = |c: i32, e: i32, edge_max: usize| -> usize {
        match c {
            c if c > 0 => 0,
            c if c < 0 => edge_max,
            _ => e as usize,
        }
    };
    let y = params.y.clamp(0, SY as i32 - 1) as usize;
    (pick(chunk.cx, ex, SX - 1), y, pick(chunk.cz, ez, SZ - 1))
}

#[inline]
fn distance(x: usize, y: usize, z: usize, c: (i64, i64, i64)) -> f32 {
    let dx = (x as i64 - c.0) as f64;
    let dy = (y as i64 - c.1) as f64;
    let dz = (z as i64 - c.2) as f64;
    (dx * dx + dy * dy + dz * dz).sqrt() as f32
}

#[inline]
fn widen(c: (i32, i32, i32)) -> (i64, i64, i64) {
    (i64::from(c.0), i64::from(c.1), i64::from(c.2))
}

struct Wave<'a, W: ?Sized, R: ?Sized> {
    params: &'a BlastParams,
    chunk: ChunkCoord,
    cache: &'a BoundaryCache,
    world: &'a W,
    rng: &'a mut R,
    center: (i32, i32, i32),
    first_step: bool,
}

impl<W: BlastWorld + ?Sized, R: RandomSource + ?Sized> Wave<'_, W, R> {
    #[inline]
    fn strength(&self) -> f32 {
        self.params.strength as f32
    }

    fn across(&self, grid: &mut ChunkGrid, side: Side, u: usize, y: usize) -> (f32, f32) {
        match self.cache.neighbor_face(self.chunk, side) {
            Some(face) => face.get(u, y),
            None => {
                // Neighbor never published; treat the seam as open air at full strength.
                grid.boundary_misses += 1;
                (self.strength(), 0.0)
            }
        }
    }

    fn sample_x(&self, grid: &mut ChunkGrid, x: usize, y: usize, z: usize, step: i32) -> (f32, f32) {
        let nx = x as i32 + step;
        if nx < 0 {
            self.across(grid, Side::NegX, z, y)
        } else if nx >= SX as i32 {
            self.across(grid, Side::PosX, z, y)
        } else {
            grid.sample(nx as usize, y, z)
        }
    }

    fn sample_z(&self, grid: &mut ChunkGrid, x: usize, y: usize, z: usize, step: i32) -> (f32, f32) {
        let nz = z as i32 + step;
        if nz < 0 {
            self.across(grid, Side::NegZ, x, y)
        } else if nz >= SZ as i32 {
            self.across(grid, Side::PosZ, x, y)
        } else {
            grid.sample(x, y, nz as usize)
        }
    }

    fn sample_y(&self, grid: &ChunkGrid, x: usize, y: usize, z: usize, step: i32) -> (f32, f32) {
        let ny = y as i32 + step;
        if ny < 0 || ny >= SY as i32 {
            // Above the sky and below the floor nothing absorbs anything.
            let (cx, cy, cz) = widen(self.center);
            (self.strength(), distance(x, y, z, (cx, cy + i64::from(step), cz)))
        } else {
            grid.sample(x, ny as usize, z)
        }
    }

    /// Energy and spread arriving at (x, y, z), blended from the neighbor one
    /// step toward the center on each axis, weighted by that axis' share of
    /// the Manhattan distance.
    fn inflow(&self, grid: &mut ChunkGrid, x: usize, y: usize, z: usize) -> (f32, f32) {
        let (cx, cy, cz) = widen(self.center);
        let (dx, dy, dz) = (cx - x as i64, cy - y as i64, cz - z as i64);
        let total = (dx.abs() + dy.abs() + dz.abs()) as f32;
        if total == 0.0 {
            return (self.strength(), 0.0);
        }
        let (wx, wy, wz) = (dx.abs() as f32 / total, dy.abs() as f32 / total, dz.abs() as f32 / total);
        let (ex, sx) = self.sample_x(grid, x, y, z, dx.signum() as i32);
        let (ey, sy) = self.sample_y(grid, x, y, z, dy.signum() as i32);
        let (ez, sz) = self.sample_z(grid, x, y, z, dz.signum() as i32);
        (ex * wx + ey * wy + ez * wz, sx * wx + sy * wy + sz * wz)
    }

    fn settle(&mut self, grid: &mut ChunkGrid, x: usize, y: usize, z: usize) {
        let (mut energy, mut spread) = self.inflow(grid, x, y, z);
        let mut jitter = self.rng.next_f32();
        if self.first_step {
            energy = self.strength();
            spread = 0.0;
            jitter = 0.5;
            self.first_step = false;
        }

        let distance = distance(x, y, z, widen(self.center));
        let mut attenuation = distance - spread;
        let block = grid
            .world_pos(self.params, x, y, z)
            .and_then(|(wx, wy, wz)| self.world.block_at(wx, wy, wz));
        if let Some(b) = block {
            let fac = (1.0 - f64::from(distance) / f64::from(self.params.strength)) * 7.0;
            attenuation *= jitter * 1.9 + 0.05;
            if !self.world.is_liquid(b) {
                let r = f64::from(self.world.resistance(b));
                if r < MAX_RESISTANCE {
                    energy -= r.powf(7.5 - fac) as f32 * attenuation;
                } else {
                    energy = 0.0;
                }
            }
        }

        let length = self.params.length as f32;
        if distance > length - 1.0 && (distance > length || self.rng.next_f32() < 0.5) {
            energy = 0.0;
        }

        let destroyable = if energy.is_nan() || energy <= 0.0 {
            energy = VISITED_FLOOR;
            false
        } else {
            matches!(block, Some(b) if !b.is_air())
        };
        grid.record(x, y, z, energy, distance, destroyable);
    }
}

/// Floods one chunk from its entry point, reading already-processed neighbors
/// through `cache`. The cache is not modified; publishing the result is up to
/// the caller.
pub fn propagate_chunk<W, R>(
    params: &BlastParams,
    chunk: ChunkCoord,
    cache: &BoundaryCache,
    world: &W,
    rng: &mut R,
) -> ChunkGrid
where
    W: BlastWorld + ?Sized,
    R: RandomSource + ?Sized,
{
    let center = local_center(params, chunk);
    let mut grid = ChunkGrid::new(chunk, center);
    let mut wave = Wave {
        params,
        chunk,
        cache,
        world,
        rng,
        center,
        first_step: chunk == ChunkCoord::default() && (0..SY as i32).contains(&params.y),
    };

    let (x0, y0, z0) = entry_point(params, chunk);
    wave.settle(&mut grid, x0, y0, z0);
    let mut q: VecDeque<(usize, usize, usize)> = VecDeque::new();
    q.push_back((x0, y0, z0));
    while let Some((x, y, z)) = q.pop_front() {
        for (dx, dy, dz) in NEIGHBORS {
            let (nx, ny, nz) = (x as i32 + dx, y as i32 + dy, z as i32 + dz);
            if nx < 0 || ny < 0 || nz < 0 || nx >= SX as i32 || ny >= SY as i32 || nz >= SZ as i32 {
                continue;
            }
            let (nx, ny, nz) = (nx as usize, ny as usize, nz as usize);
            if grid.is_visited(nx, ny, nz) {
                continue;
            }
            wave.settle(&mut grid, nx, ny, nz);
            q.push_back((nx, ny, nz));
        }
    }
    if grid.boundary_misses > 0 {
        log::debug!(
            "chunk ({}, {}) read {} voxels across unpublished seams",
            chunk.cx,
            chunk.cz,
            grid.boundary_misses
        );
    }
    grid
}
