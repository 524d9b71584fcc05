use serde::{Deserialize, Serialize};

use crate::CHUNK_SIZE;

/// Column coordinate on the horizontal chunk grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Column containing world position (wx, wz).
    #[inline]
    pub fn from_world(wx: i32, wz: i32) -> Self {
        let s = CHUNK_SIZE as i32;
        Self::new(wx.div_euclid(s), wz.div_euclid(s))
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dz = i64::from(self.cz - other.cz);
        dx * dx + dz * dz
    }

    /// Squared distance from the origin column.
    #[inline]
    pub fn ring_key(self) -> i64 {
        self.distance_sq(ChunkCoord::default())
    }

    /// World position of the column's (0, 0) corner.
    #[inline]
    pub fn world_origin(self) -> (i32, i32) {
        let s = CHUNK_SIZE as i32;
        (self.cx * s, self.cz * s)
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn from_world_contains_origin(wx in -1_000_000i32..1_000_000, wz in -1_000_000i32..1_000_000) {
            let c = ChunkCoord::from_world(wx, wz);
            let (ox, oz) = c.world_origin();
            prop_assert!(ox <= wx && wx < ox + CHUNK_SIZE as i32);
            prop_assert!(oz <= wz && wz < oz + CHUNK_SIZE as i32);
        }

        #[test]
        fn distance_is_symmetric(a in any::<ChunkCoord>().prop_map(|c| ChunkCoord::new(c.cx % 100_000, c.cz % 100_000)),
                                 b in any::<ChunkCoord>().prop_map(|c| ChunkCoord::new(c.cx % 100_000, c.cz % 100_000))) {
            prop_assert_eq!(a.distance_sq(b), b.distance_sq(a));
            prop_assert_eq!(a.distance_sq(a), 0);
        }

        #[test]
        fn tuple_roundtrip(c in any::<ChunkCoord>()) {
            let t: (i32, i32) = c.into();
            prop_assert_eq!(ChunkCoord::from(t), c);
        }
    }

    #[test]
    fn ring_key_is_squared_radius() {
        assert_eq!(ChunkCoord::new(3, -4).ring_key(), 25);
        assert_eq!(ChunkCoord::new(0, 0).ring_key(), 0);
        assert_eq!(ChunkCoord::new(-1, 0).offset(1, 2), ChunkCoord::new(0, 2));
    }
}
