/// Uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

/// Monotonic milliseconds; only differences are used.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// Closure adapter for [`RandomSource`].
pub struct FnRandom<F>(pub F);

impl<F: FnMut() -> f32> RandomSource for FnRandom<F> {
    #[inline]
    fn next_f32(&mut self) -> f32 {
        (self.0)()
    }
}

/// Closure adapter for [`Clock`].
pub struct FnClock<F>(pub F);

impl<F: Fn() -> u64> Clock for FnClock<F> {
    #[inline]
    fn now_millis(&self) -> u64 {
        (self.0)()
    }
}
