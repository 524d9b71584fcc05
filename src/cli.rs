use std::path::PathBuf;

use blast_world::WorldGenMode;
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "blast", version, about = "Detonate an explosion in a generated voxel world")]
pub struct Cli {
    /// Scenario TOML ([explosion], [world], [run])
    #[arg(long)]
    pub scenario: Option<PathBuf>,
    /// Block table TOML; overrides the scenario's
    #[arg(long)]
    pub blocks: Option<PathBuf>,
    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    pub z: Option<i32>,
    #[arg(long)]
    pub strength: Option<i32>,
    #[arg(long)]
    pub length: Option<i32>,
    #[arg(long)]
    pub speed: Option<i32>,
    #[arg(long, value_enum)]
    pub world_mode: Option<ModeArg>,
    /// Columns generated around the origin
    #[arg(long)]
    pub radius_chunks: Option<i32>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Destruction budget per frame
    #[arg(long)]
    pub budget_ms: Option<u64>,
    #[arg(long)]
    pub max_frames: Option<u32>,
    /// Print an ASCII map of the epicenter layer afterwards
    #[arg(long)]
    pub slice: bool,
    /// Also write the log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Solid,
    Flat,
    Hills,
}

impl From<ModeArg> for WorldGenMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Solid => WorldGenMode::Solid,
            ModeArg::Flat => WorldGenMode::Flat,
            ModeArg::Hills => WorldGenMode::Hills,
        }
    }
}

impl Cli {
    /// Command-line values win over the scenario file.
    pub fn apply(&self, sc: &mut Scenario) {
        let ex = &mut sc.explosion;
        ex.x = self.x.unwrap_or(ex.x);
        ex.y = self.y.unwrap_or(ex.y);
        ex.z = self.z.unwrap_or(ex.z);
        ex.strength = self.strength.unwrap_or(ex.strength);
        ex.length = self.length.unwrap_or(ex.length);
        ex.speed = self.speed.unwrap_or(ex.speed);
        if let Some(m) = self.world_mode {
            sc.world.mode = m.into();
        }
        if let Some(r) = self.radius_chunks {
            sc.world.radius_chunks = r;
        }
        if let Some(s) = self.seed {
            sc.run.seed = Some(s);
        }
        if let Some(b) = self.budget_ms {
            sc.run.budget_ms = b;
        }
        if self.max_frames.is_some() {
            sc.run.max_frames = self.max_frames;
        }
        if self.blocks.is_some() {
            sc.run.blocks = self.blocks.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_scenario_values() {
        let cli = Cli::try_parse_from([
            "blast",
            "--x",
            "-12",
            "--strength",
            "90",
            "--world-mode",
            "solid",
            "--seed",
            "3",
            "--slice",
        ])
        .unwrap();
        let mut sc = Scenario::default();
        cli.apply(&mut sc);
        assert_eq!(sc.explosion.x, -12);
        assert_eq!(sc.explosion.y, 64);
        assert_eq!(sc.explosion.strength, 90);
        assert_eq!(sc.world.mode, WorldGenMode::Solid);
        assert_eq!(sc.run.seed, Some(3));
        assert!(cli.slice);
        assert_eq!(cli.log_level, LevelFilter::Info);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["blast", "--world-mode", "lava"]).is_err());
    }
}
