use std::fmt::Write as _;

use blast_chunk::{ColumnWorld, RemovalLog};
use blast_runtime::DetonationStats;
use blast_wave::BlastParams;
use blast_world::{BlastWorld, RemovalMode};
use hashbrown::HashMap;

const MAX_SLICE_RADIUS: i32 = 48;

pub fn summary(params: &BlastParams, stats: &DetonationStats, before: usize, after: usize) -> String {
    let state = if stats.completed {
        "complete"
    } else if stats.cancelled {
        "cancelled"
    } else {
        "unfinished"
    };
    let mut out = String::new();
    let _ = writeln!(
        out,
        "explosion at ({}, {}, {}) strength {} length {}: {}",
        params.x, params.y, params.z, params.strength, params.length, state
    );
    let _ = writeln!(
        out,
        "  {} frames, {} ms total, slowest frame {} ms",
        stats.frames, stats.t_total_ms, stats.t_slowest_frame_ms
    );
    let _ = writeln!(
        out,
        "  {} rings, {} chunks, {} voxels visited",
        stats.rings, stats.chunks, stats.voxels_visited
    );
    let _ = writeln!(
        out,
        "  {} blocks removed ({} open, {} silent); solid blocks {} -> {}",
        stats.removed(),
        stats.open,
        stats.silent,
        before,
        after
    );
    out
}

/// Top-down map of the epicenter's layer. `O`/`s` are open/silent removals,
/// `#` solid, `~` liquid, `.` air, `?` outside the loaded world.
pub fn slice(world: &ColumnWorld, removals: &RemovalLog, params: &BlastParams) -> String {
    let r = params.length.saturating_add(2).clamp(2, MAX_SLICE_RADIUS);
    let y = params.y;
    let cleared: HashMap<(i32, i32), RemovalMode> = removals
        .entries
        .iter()
        .filter(|e| e.pos.1 == y)
        .map(|e| ((e.pos.0, e.pos.2), e.mode))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "layer y = {} around ({}, {})", y, params.x, params.z);
    for z in params.z.saturating_sub(r)..=params.z.saturating_add(r) {
        for x in params.x.saturating_sub(r)..=params.x.saturating_add(r) {
            let c = match cleared.get(&(x, z)) {
                Some(RemovalMode::Open) => 'O',
                Some(RemovalMode::Silent) => 's',
                None => match world.block_at(x, y, z) {
                    None => '?',
                    Some(b) if b.is_air() => '.',
                    Some(b) if world.is_liquid(b) => '~',
                    Some(_) => '#',
                },
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use blast_blocks::BlockRegistry;
    use std::sync::Arc;

    #[test]
    fn slice_marks_removals_and_unloaded() {
        let reg = Arc::new(BlockRegistry::builtin());
        let stone = reg.block("stone").unwrap();
        let mut world = ColumnWorld::filled(reg, 0, stone);
        world.clear_block(1, 64, 1, RemovalMode::Open);
        world.clear_block(2, 64, 1, RemovalMode::Silent);
        let log = world.take_removals();
        let params = BlastParams::new(1, 64, 1, 50, 0, 0);
        let map = slice(&world, &log, &params);
        let rows: Vec<&str> = map.lines().skip(1).collect();
        assert_eq!(rows.len(), 5);
        // x from -1 to 3, z from -1 to 3
        assert_eq!(rows[0], "?????");
        assert_eq!(rows[2], "?#Os#");
    }

    #[test]
    fn summary_names_the_outcome() {
        let params = BlastParams::new(0, 64, 0, 50, 0, 10);
        let stats = DetonationStats { completed: true, open: 2, silent: 3, ..Default::default() };
        let s = summary(&params, &stats, 10, 5);
        assert!(s.contains("complete"));
        assert!(s.contains("5 blocks removed (2 open, 3 silent)"));
    }
}
