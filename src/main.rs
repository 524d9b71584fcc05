mod cli;
mod logging;
mod report;
mod scenario;

use std::error::Error;
use std::sync::Arc;

use blast_blocks::BlockRegistry;
use blast_chunk::ColumnWorld;
use blast_runtime::{Detonator, SeededRandom, SystemClock};
use blast_world::{ChunkCoord, TerrainSampler};
use clap::Parser;

use crate::cli::Cli;
use crate::scenario::Scenario;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.log_level, cli.log_file.as_deref())?;

    let mut sc = match &cli.scenario {
        Some(path) => Scenario::load_from_path(path)?,
        None => Scenario::default(),
    };
    cli.apply(&mut sc);

    let reg = Arc::new(match &sc.run.blocks {
        Some(path) => BlockRegistry::load_from_path(path)?,
        None => BlockRegistry::builtin(),
    });
    let params = sc.explosion.params();

    let home = ChunkCoord::from_world(params.x, params.z);
    let reach = home.cx.abs().max(home.cz.abs()) as i64 + params.max_distance_chunks();
    if reach > i64::from(sc.world.radius_chunks) {
        log::warn!(
            "world radius {} does not cover the blast (needs {}); unloaded columns are left alone",
            sc.world.radius_chunks,
            reach
        );
    }

    let sampler = TerrainSampler::new(sc.world.clone(), &reg)?;
    let world = ColumnWorld::generate(reg, &sampler);
    let before = world.count_non_air();
    log::info!("generated {} columns, {} solid blocks", world.column_count(), before);

    let rng = match sc.run.seed {
        Some(seed) => SeededRandom::new(seed),
        None => {
            log::info!("no seed given; jitter seeded from entropy");
            SeededRandom::from_entropy()
        }
    };
    let mut det = Detonator::with_sources(world, params, rng, SystemClock::new(), sc.run.budget_ms);
    if let Some(frames) = sc.run.max_frames {
        det = det.with_max_frames(frames);
    }
    let (mut world, stats) = det.run();
    let removals = world.take_removals();

    print!("{}", report::summary(&params, &stats, before, world.count_non_air()));
    if cli.slice {
        print!("{}", report::slice(&world, &removals, &params));
    }
    Ok(())
}
