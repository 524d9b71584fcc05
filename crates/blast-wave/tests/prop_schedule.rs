use std::collections::HashSet;

use blast_wave::{ChunkCoord, RingScheduler, octant_layer};
use proptest::prelude::*;

fn drain(limit: i64) -> Vec<Vec<ChunkCoord>> {
    let mut s = RingScheduler::new(limit);
    let mut layers = Vec::new();
    while let Some(layer) = s.next_layer() {
        layers.push(layer);
    }
    layers
}

#[test]
fn layer_sizes_by_symmetry_class() {
    assert_eq!(octant_layer(ChunkCoord::new(0, 0)), vec![ChunkCoord::new(0, 0)]);
    assert_eq!(octant_layer(ChunkCoord::new(3, 0)).len(), 4);
    assert_eq!(octant_layer(ChunkCoord::new(2, 2)).len(), 4);
    assert_eq!(octant_layer(ChunkCoord::new(3, 1)).len(), 8);
}

#[test]
fn layer_is_sorted() {
    let layer = octant_layer(ChunkCoord::new(2, 1));
    let mut sorted = layer.clone();
    sorted.sort();
    assert_eq!(layer, sorted);
    assert!(layer.contains(&ChunkCoord::new(-1, 2)));
    assert!(layer.contains(&ChunkCoord::new(-2, -1)));
}

#[test]
fn smallest_radius_covers_thirteen_chunks() {
    let layers = drain(4);
    assert_eq!(layers.len(), 4);
    assert_eq!(layers.iter().map(Vec::len).sum::<usize>(), 13);
}

#[test]
fn exhaustion_is_sticky() {
    let mut s = RingScheduler::new(1);
    while s.next_layer().is_some() {}
    assert!(s.is_exhausted());
    assert!(s.next_chunk().is_none());
    assert!(s.next_layer().is_none());
}

#[test]
fn equal_keys_pop_latest_first() {
    let mut s = RingScheduler::new(100);
    assert_eq!(s.next_chunk(), Some(ChunkCoord::new(0, 0)));
    s.add_ring(5, 0);
    s.add_ring(4, 3);
    assert_eq!(s.peek_key(), Some(25));
    assert_eq!(s.next_chunk(), Some(ChunkCoord::new(4, 3)));
    assert_eq!(s.next_chunk(), Some(ChunkCoord::new(5, 0)));
    assert_eq!(s.next_chunk(), None);
}

proptest! {
    // Rings come out in non-decreasing squared distance and never past the limit
    #[test]
    fn rings_are_ordered(limit in 0i64..400) {
        let mut last = -1i64;
        for layer in drain(limit) {
            let key = layer[0].ring_key();
            prop_assert!(layer.iter().all(|c| c.ring_key() == key));
            prop_assert!(key >= last);
            prop_assert!(key <= limit);
            last = key;
        }
    }

    // Every chunk inside the limit is handed out exactly once
    #[test]
    fn disc_is_covered_once(limit in 0i64..400) {
        let mut seen = HashSet::new();
        for layer in drain(limit) {
            for c in layer {
                prop_assert!(seen.insert(c), "{:?} handed out twice", c);
            }
        }
        let r = (limit as f64).sqrt() as i32 + 1;
        for cx in -r..=r {
            for cz in -r..=r {
                let c = ChunkCoord::new(cx, cz);
                prop_assert_eq!(seen.contains(&c), c.ring_key() <= limit);
            }
        }
    }

    // Each layer is closed under the square's symmetries
    #[test]
    fn layers_are_symmetric(x in -50i32..50, z in -50i32..50) {
        let layer: HashSet<_> = octant_layer(ChunkCoord::new(x, z)).into_iter().collect();
        for c in &layer {
            prop_assert!(layer.contains(&ChunkCoord::new(-c.cx, c.cz)));
            prop_assert!(layer.contains(&ChunkCoord::new(c.cx, -c.cz)));
            prop_assert!(layer.contains(&ChunkCoord::new(c.cz, c.cx)));
        }
    }
}
