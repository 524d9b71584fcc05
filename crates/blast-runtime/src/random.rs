use blast_wave::RandomSource;

/// Reproducible jitter source.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: fastrand::Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: fastrand::Rng::with_seed(seed) }
    }

    /// Seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self { rng: fastrand::Rng::new() }
    }
}

impl RandomSource for SeededRandom {
    #[inline]
    fn next_f32(&mut self) -> f32 {
        self.rng.f32()
    }
}
