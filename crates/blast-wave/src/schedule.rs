use std::collections::{BTreeMap, BTreeSet};

use blast_world::ChunkCoord;

/// Base points of the first octant (0 <= z <= x), bucketed by squared radius.
///
/// Each base point stands for up to eight chunks, produced by [`octant_layer`].
/// Popping a base point schedules its successors, so the frontier grows one
/// step at a time instead of being enumerated up front.
pub struct RingScheduler {
    buckets: BTreeMap<i64, Vec<ChunkCoord>>,
    limit: i64,
    exhausted: bool,
}

impl RingScheduler {
    /// `limit` is the largest squared chunk distance that will be handed out.
    pub fn new(limit: i64) -> Self {
        let mut s = Self {
            buckets: BTreeMap::new(),
            limit,
            exhausted: false,
        };
        s.add_ring(0, 0);
        s
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        self.limit
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn add_ring(&mut self, x: i32, z: i32) {
        let c = ChunkCoord::new(x, z);
        self.buckets.entry(c.ring_key()).or_default().push(c);
    }

    /// Smallest scheduled squared distance, if any.
    pub fn peek_key(&self) -> Option<i64> {
        self.buckets.keys().next().copied()
    }

    /// Removes the nearest base point. Within a bucket the latest insert wins.
    /// Returns `None` once the nearest key lies past the limit; that is sticky.
    pub fn next_chunk(&mut self) -> Option<ChunkCoord> {
        if self.exhausted {
            return None;
        }
        let Some(mut entry) = self.buckets.first_entry() else {
            self.exhausted = true;
            return None;
        };
        let key = *entry.key();
        let point = entry.get_mut().pop();
        if entry.get().is_empty() {
            entry.remove();
        }
        if key > self.limit {
            self.exhausted = true;
            return None;
        }
        point
    }

    /// Schedules the base points that follow `base` in the octant walk.
    pub fn schedule_successors(&mut self, base: ChunkCoord) {
        if base.cz == 0 {
            self.add_ring(base.cx + 1, 0);
        }
        if base.cx > base.cz {
            self.add_ring(base.cx, base.cz + 1);
        }
    }

    /// Next ring of chunks to process, or `None` when the explosion has run out
    /// of radius.
    pub fn next_layer(&mut self) -> Option<Vec<ChunkCoord>> {
        let base = self.next_chunk()?;
        self.schedule_successors(base);
        Some(octant_layer(base))
    }
}

/// The distinct images of `base` under the eight symmetries of the square, in
/// (x, z) order.
pub fn octant_layer(base: ChunkCoord) -> Vec<ChunkCoord> {
    let (x, z) = (base.cx, base.cz);
    let set: BTreeSet<ChunkCoord> = [
        (x, z),
        (x, -z),
        (-x, z),
        (-x, -z),
        (z, x),
        (z, -x),
        (-z, x),
        (-z, -x),
    ]
    .into_iter()
    .map(ChunkCoord::from)
    .collect();
    set.into_iter().collect()
}
