//! Frame-paced detonation driver and its wall-clock collaborators.
#![forbid(unsafe_code)]

mod clock;
mod random;

pub use clock::SystemClock;
pub use random::SeededRandom;

use std::time::Instant;

use blast_wave::{BlastParams, BlastWorld, Clock, Explosion, ExplosionStats, RandomSource};

/// Totals of one detonation as seen from the host's frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetonationStats {
    pub frames: u32,
    pub rings: usize,
    pub chunks: usize,
    pub voxels_visited: usize,
    pub open: usize,
    pub silent: usize,
    pub t_total_ms: u32,
    pub t_slowest_frame_ms: u32,
    pub completed: bool,
    pub cancelled: bool,
}

impl DetonationStats {
    #[inline]
    pub fn removed(&self) -> usize {
        self.open + self.silent
    }

    fn absorb(&mut self, s: ExplosionStats) {
        self.rings = s.rings;
        self.chunks = s.chunks_processed;
        self.voxels_visited = s.voxels_visited;
        self.open = s.open;
        self.silent = s.silent;
    }
}

/// Runs one explosion the way a game loop would: each frame preloads, then
/// spends at most `budget_ms` on destruction.
pub struct Detonator<W, R = SeededRandom, C = SystemClock> {
    explosion: Explosion<W, R, C>,
    budget_ms: u64,
    max_frames: Option<u32>,
    stats: DetonationStats,
}

impl<W: BlastWorld> Detonator<W> {
    pub fn new(world: W, params: BlastParams, seed: u64, budget_ms: u64) -> Self {
        Self::with_sources(world, params, SeededRandom::new(seed), SystemClock::new(), budget_ms)
    }
}

impl<W, R, C> Detonator<W, R, C>
where
    W: BlastWorld,
    R: RandomSource,
    C: Clock,
{
    pub fn with_sources(world: W, params: BlastParams, rng: R, clock: C, budget_ms: u64) -> Self {
        Self {
            explosion: Explosion::new(world, rng, clock, params),
            budget_ms,
            max_frames: None,
            stats: DetonationStats::default(),
        }
    }

    /// Gives up after `frames` frames; the explosion is cancelled where it stands.
    pub fn with_max_frames(mut self, frames: u32) -> Self {
        self.max_frames = Some(frames);
        self
    }

    #[inline]
    pub fn explosion(&self) -> &Explosion<W, R, C> {
        &self.explosion
    }

    #[inline]
    pub fn stats(&self) -> DetonationStats {
        self.stats
    }

    pub fn is_running(&self) -> bool {
        !self.explosion.is_complete() && !self.explosion.is_cancelled()
    }

    pub fn cancel(&mut self) {
        self.explosion.cancel();
        self.stats.cancelled = true;
    }

    /// Advances one frame. Returns false once there is nothing left to do.
    pub fn frame(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        if self.max_frames.is_some_and(|m| self.stats.frames >= m) {
            log::warn!("detonation stopped after {} frames", self.stats.frames);
            self.cancel();
            return false;
        }
        let t0 = Instant::now();
        self.explosion.cache_chunks_tick(self.budget_ms);
        self.explosion.destruction_tick(self.budget_ms);
        let frame_ms = t0.elapsed().as_millis() as u32;

        self.stats.frames += 1;
        self.stats.t_total_ms = self.stats.t_total_ms.saturating_add(frame_ms);
        self.stats.t_slowest_frame_ms = self.stats.t_slowest_frame_ms.max(frame_ms);
        self.stats.absorb(self.explosion.stats());
        self.stats.completed = self.explosion.is_complete();
        log::trace!(
            "frame {}: {} ms, {} chunks so far",
            self.stats.frames,
            frame_ms,
            self.stats.chunks
        );
        self.is_running()
    }

    /// Runs frames until the explosion completes or the frame cap is hit.
    pub fn run(mut self) -> (W, DetonationStats) {
        while self.frame() {}
        log::debug!(
            "detonation finished in {} frames, {} ms total, slowest frame {} ms",
            self.stats.frames,
            self.stats.t_total_ms,
            self.stats.t_slowest_frame_ms
        );
        (self.explosion.into_world(), self.stats)
    }
}
