use blast_blocks::Block;

/// How a cleared block is announced to the rest of the world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RemovalMode {
    /// Neighbors are notified; loose blocks may fall or drop.
    Open,
    /// The block vanishes without neighbor updates.
    Silent,
}

/// World access needed by an explosion.
///
/// Positions are absolute world coordinates. `block_at` returns `None` for
/// anything the world cannot answer (unloaded columns, out-of-range heights);
/// callers treat that as empty space.
pub trait BlastWorld {
    fn block_at(&self, wx: i32, wy: i32, wz: i32) -> Option<Block>;
    fn resistance(&self, b: Block) -> f32;
    fn is_liquid(&self, b: Block) -> bool;
    fn clear_block(&mut self, wx: i32, wy: i32, wz: i32, mode: RemovalMode);
}

impl<T: BlastWorld + ?Sized> BlastWorld for &mut T {
    #[inline]
    fn block_at(&self, wx: i32, wy: i32, wz: i32) -> Option<Block> {
        (**self).block_at(wx, wy, wz)
    }

    #[inline]
    fn resistance(&self, b: Block) -> f32 {
        (**self).resistance(b)
    }

    #[inline]
    fn is_liquid(&self, b: Block) -> bool {
        (**self).is_liquid(b)
    }

    #[inline]
    fn clear_block(&mut self, wx: i32, wy: i32, wz: i32, mode: RemovalMode) {
        (**self).clear_block(wx, wy, wz, mode)
    }
}
