//! UUID0 generator and related types.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::id::TICKS_PER_SECOND;
use crate::{Error, Uuid0};

pub mod with_rand08;

/// A trait that defines the minimum random number generator interface for [`Generator`].
///
/// Implementations used outside tests should draw from a cryptographically secure source.
pub trait RandSource {
    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// A trait that defines the minimum system clock interface for [`Generator`].
pub trait TimeSource {
    /// Returns the time elapsed since the UNIX epoch.
    fn now(&mut self) -> Duration;
}

/// The default [`TimeSource`] that reads the system wall clock.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn now(&mut self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock may have gone backwards")
    }
}

/// Represents a UUID0 generator built from a random number generator and a clock.
///
/// The generator holds no state of its own besides the two sources, so identifiers produced in
/// the same tick are distinguished by their 80 random bits only.
///
/// # Examples
///
/// ```rust
/// use uuid0::Generator;
///
/// let mut g = Generator::with_rand08(rand::rngs::OsRng);
/// let x = g.generate_at(1_600_000_000.0)?;
/// assert_eq!(x.unix_ts(), 1_600_000_000.0);
/// assert_eq!(&x.as_bytes()[..6], &[0x0e, 0x8d, 0x4a, 0x51, 0x00, 0x00]);
/// # Ok::<(), uuid0::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Generator<R, T = StdSystemTime> {
    /// The random number generator used by the generator.
    rng: R,

    /// The clock used by [`Generator::generate`].
    time_source: T,
}

impl<R: RandSource> Generator<R> {
    /// Creates a generator that reads the system clock.
    pub const fn new(rng: R) -> Self {
        Self::with_rand_and_time_sources(rng, StdSystemTime)
    }
}

impl<R: RandSource, T: TimeSource> Generator<R, T> {
    /// Creates a generator with a random number generator and a clock.
    pub const fn with_rand_and_time_sources(rng: R, time_source: T) -> Self {
        Self { rng, time_source }
    }

    /// Generates a new object from the current time of the clock.
    pub fn generate(&mut self) -> Uuid0 {
        let now = self.time_source.now();
        self.generate_from_ticks(ticks_from_duration(now))
    }

    /// Generates a new object from fractional seconds since the UNIX epoch.
    ///
    /// Sub-tick precision is truncated and tick counts beyond 48 bits wrap around.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] if `unix_ts` is negative or not finite.
    pub fn generate_at(&mut self, unix_ts: f64) -> Result<Uuid0, Error> {
        ticks_from_unix_ts(unix_ts).map(|ticks| self.generate_from_ticks(ticks))
    }

    /// Generates a new object from a tick count.
    ///
    /// Only the 48 least significant bits of `ticks` are stored.
    pub fn generate_from_ticks(&mut self, ticks: u64) -> Uuid0 {
        let mut random = [0u8; 10];
        self.rng.fill_bytes(&mut random);
        Uuid0::from_ticks_and_random(ticks, random)
    }
}

/// Supports operations as an infinite iterator that produces a new object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid0::Generator;
///
/// Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for Generator<R, T> {
    type Item = Uuid0;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> std::iter::FusedIterator for Generator<R, T> {}

const TICK_MODULUS: u128 = 1 << 48;

/// Converts a duration since the UNIX epoch into a tick count wrapped to 48 bits.
fn ticks_from_duration(elapsed: Duration) -> u64 {
    ((elapsed.as_micros() / 100) % TICK_MODULUS) as u64
}

/// Converts fractional seconds since the UNIX epoch into a tick count wrapped to 48 bits.
///
/// # Errors
///
/// Returns [`Error::Range`] if `unix_ts` is negative or not finite.
pub fn ticks_from_unix_ts(unix_ts: f64) -> Result<u64, Error> {
    if !unix_ts.is_finite() || unix_ts < 0.0 {
        return Err(Error::range(format!(
            "timestamp {} must be a finite number of seconds at or after the UNIX epoch",
            unix_ts
        )));
    }

    let ticks = (unix_ts * TICKS_PER_SECOND as f64).floor();
    if !ticks.is_finite() {
        return Err(Error::range(format!("timestamp {} is too large", unix_ts)));
    }
    // fmod is exact, so the wrap is exact for any finite tick count
    Ok(ticks.rem_euclid(TICK_MODULUS as f64) as u64)
}

#[cfg(test)]
mod tests;
