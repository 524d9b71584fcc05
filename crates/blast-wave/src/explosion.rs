use blast_world::{BlastWorld, ChunkCoord};

use crate::boundary::BoundaryCache;
use crate::mutate::apply_removals;
use crate::params::BlastParams;
use crate::propagate::propagate_chunk;
use crate::schedule::RingScheduler;
use crate::source::{Clock, RandomSource};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickState {
    /// Nothing processed yet.
    Idle,
    /// Working through one ring; `cursor` is the next chunk of `layer`.
    RingActive { layer: Vec<ChunkCoord>, cursor: usize },
    Complete,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExplosionStats {
    pub rings: usize,
    pub chunks_processed: usize,
    pub voxels_visited: usize,
    pub boundary_misses: usize,
    pub open: usize,
    pub silent: usize,
}

impl ExplosionStats {
    #[inline]
    pub fn removed(&self) -> usize {
        self.open + self.silent
    }
}

/// One detonation, advanced a slice at a time by [`Explosion::destruction_tick`].
///
/// Chunks are walked outward in rings of increasing squared distance from the
/// epicenter's column. Each chunk is flooded, cleared and then publishes the
/// edges the next ring will read.
pub struct Explosion<W, R, C> {
    params: BlastParams,
    world: W,
    rng: R,
    clock: C,
    schedule: RingScheduler,
    cache: BoundaryCache,
    state: TickState,
    cancelled: bool,
    stats: ExplosionStats,
}

impl<W, R, C> Explosion<W, R, C>
where
    W: BlastWorld,
    R: RandomSource,
    C: Clock,
{
    pub fn new(world: W, rng: R, clock: C, params: BlastParams) -> Self {
        log::info!(
            "explosion at ({}, {}, {}) strength {} length {} ({} chunk radius)",
            params.x,
            params.y,
            params.z,
            params.strength,
            params.length,
            params.max_distance_chunks()
        );
        Self {
            params,
            world,
            rng,
            clock,
            schedule: RingScheduler::new(params.ring_limit()),
            cache: BoundaryCache::new(),
            state: TickState::Idle,
            cancelled: false,
            stats: ExplosionStats::default(),
        }
    }

    /// Processes whole chunks until the budget is spent or the blast runs out of
    /// radius. At least one chunk is processed per call while work remains; a
    /// chunk is never split across calls.
    pub fn destruction_tick(&mut self, budget_ms: u64) {
        if self.cancelled {
            return;
        }
        let start = self.clock.now_millis();
        while let Some(chunk) = self.next_pending() {
            self.process_chunk(chunk);
            if self.clock.now_millis().saturating_sub(start) > budget_ms {
                return;
            }
        }
    }

    /// Chunk preloading hook. Columns are read on demand, so there is nothing to do.
    pub fn cache_chunks_tick(&mut self, _budget_ms: u64) {}

    /// Stops the explosion where it is. Already cleared blocks stay cleared.
    pub fn cancel(&mut self) {
        if !self.cancelled && !self.is_complete() {
            log::debug!(
                "explosion at ({}, {}, {}) cancelled after {} chunks",
                self.params.x,
                self.params.y,
                self.params.z,
                self.stats.chunks_processed
            );
        }
        self.cancelled = true;
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == TickState::Complete
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    #[inline]
    pub fn params(&self) -> &BlastParams {
        &self.params
    }

    #[inline]
    pub fn state(&self) -> &TickState {
        &self.state
    }

    #[inline]
    pub fn stats(&self) -> ExplosionStats {
        self.stats
    }

    #[inline]
    pub fn boundary_cache(&self) -> &BoundaryCache {
        &self.cache
    }

    #[inline]
    pub fn world(&self) -> &W {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn into_world(self) -> W {
        self.world
    }

    fn next_pending(&mut self) -> Option<ChunkCoord> {
        loop {
            if let TickState::RingActive { layer, cursor } = &mut self.state {
                if let Some(&c) = layer.get(*cursor) {
                    *cursor += 1;
                    return Some(c);
                }
            }
            if self.is_complete() {
                return None;
            }
            let Some(layer) = self.schedule.next_layer() else {
                self.finish();
                return None;
            };
            self.stats.rings += 1;
            log::debug!(
                "ring {} opened: {} chunks at squared distance {}",
                self.stats.rings,
                layer.len(),
                layer.first().map(|c| c.ring_key()).unwrap_or_default()
            );
            self.state = TickState::RingActive { layer, cursor: 0 };
        }
    }

    fn process_chunk(&mut self, chunk: ChunkCoord) {
        let mut grid = propagate_chunk(&self.params, chunk, &self.cache, &self.world, &mut self.rng);
        let counts = apply_removals(&self.params, &grid, &mut self.world);
        self.cache.publish(chunk, grid.take_edges());

        self.stats.chunks_processed += 1;
        self.stats.voxels_visited += grid.visited_count();
        self.stats.boundary_misses += grid.boundary_misses();
        self.stats.open += counts.open;
        self.stats.silent += counts.silent;
        let abs = self.params.absolute_chunk(chunk);
        log::trace!(
            "chunk ({}, {}) [rel ({}, {})]: {} visited, {} open, {} silent",
            abs.cx,
            abs.cz,
            chunk.cx,
            chunk.cz,
            grid.visited_count(),
            counts.open,
            counts.silent
        );
    }

    fn finish(&mut self) {
        self.state = TickState::Complete;
        log::info!(
            "explosion at ({}, {}, {}) complete: {} rings, {} chunks, {} removed ({} open, {} silent)",
            self.params.x,
            self.params.y,
            self.params.z,
            self.stats.rings,
            self.stats.chunks_processed,
            self.stats.removed(),
            self.stats.open,
            self.stats.silent
        );
    }
}
