use blast_world::{CHUNK_SIZE, ChunkCoord};

/// Detonation parameters. Positions are world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlastParams {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Peak energy; also the distance scale of the resistance exponent.
    pub strength: i32,
    /// Carried for hosts that pace explosions by it; propagation does not read it.
    pub speed: i32,
    /// Radius past which nothing survives edge erosion. Negative erodes everything.
    pub length: i32,
}

impl BlastParams {
    pub fn new(x: i32, y: i32, z: i32, strength: i32, speed: i32, length: i32) -> Self {
        if strength < 1 {
            log::warn!("explosion strength {} clamped to 1", strength);
        }
        Self {
            x,
            y,
            z,
            strength: strength.max(1),
            speed,
            length,
        }
    }

    /// Radius of the chunk walk, in chunks. The shift is arithmetic, so a
    /// negative length shrinks the walk down to the center column.
    #[inline]
    pub fn max_distance_chunks(&self) -> i64 {
        (i64::from(self.length >> 4) + 2).abs()
    }

    /// Largest squared chunk distance that is processed.
    #[inline]
    pub fn ring_limit(&self) -> i64 {
        let r = self.max_distance_chunks();
        r * r
    }

    /// The epicenter's position inside its own column.
    #[inline]
    pub fn local_epicenter(&self) -> (i32, i32) {
        let s = CHUNK_SIZE as i32;
        (self.x.rem_euclid(s), self.z.rem_euclid(s))
    }

    /// Absolute column of a chunk given relative to the epicenter's column.
    #[inline]
    pub fn absolute_chunk(&self, rel: ChunkCoord) -> ChunkCoord {
        ChunkCoord::from_world(self.x, self.z).offset(rel.cx, rel.cz)
    }
}
