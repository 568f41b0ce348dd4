use super::*;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A clock that stays at the same instant.
#[derive(Clone, Debug)]
struct FixedTimeSource(Duration);

impl TimeSource for FixedTimeSource {
    fn now(&mut self) -> Duration {
        self.0
    }
}

/// A random source that counts upwards so that every output is predictable.
#[derive(Clone, Debug, Default)]
struct CountingRandSource(u8);

impl RandSource for CountingRandSource {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for e in dest {
            *e = self.0;
            self.0 = self.0.wrapping_add(1);
        }
    }
}

fn seeded(seed: u64) -> with_rand08::Adapter<ChaCha8Rng> {
    with_rand08::Adapter(ChaCha8Rng::seed_from_u64(seed))
}

/// Encodes reference timestamp into first six bytes
#[test]
fn encodes_reference_timestamp_into_first_six_bytes() {
    let mut g = Generator::new(CountingRandSource::default());
    let e = g.generate_at(1_600_000_000.0).unwrap();
    assert_eq!(e.ticks(), 16_000_000_000_000);
    assert_eq!(&e.as_bytes()[..6], &[0x0e, 0x8d, 0x4a, 0x51, 0x00, 0x00]);
    assert_eq!(&e.as_bytes()[6..], &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(e.unix_ts(), 1_600_000_000.0);
}

/// Recovers timestamps within one tick
#[test]
fn recovers_timestamps_within_one_tick() {
    use rand::Rng;
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut g = Generator::new(seeded(1));
    for _ in 0..10_000 {
        let ts = rng.gen_range(0.0..28_000_000_000.0);
        let e = g.generate_at(ts).unwrap();
        let diff = ts - e.unix_ts();
        assert!((-1e-5..0.0001 + 1e-5).contains(&diff), "{} {}", ts, diff);
    }
}

/// Truncates sub-tick precision
#[test]
fn truncates_sub_tick_precision() {
    let mut g = Generator::new(seeded(2));
    assert_eq!(g.generate_at(0.00019).unwrap().ticks(), 1);
    assert_eq!(g.generate_at(0.00009).unwrap().ticks(), 0);
    assert_eq!(g.generate_at(0.0).unwrap().ticks(), 0);
    assert_eq!(g.generate_at(1.5).unwrap().ticks(), 15_000);
}

/// Rejects negative and non-finite timestamps
#[test]
fn rejects_negative_and_non_finite_timestamps() {
    let mut g = Generator::new(seeded(3));
    for ts in [-0.0001, -1.0, -1e12, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, f64::MAX] {
        assert!(matches!(g.generate_at(ts), Err(Error::Range(_))), "{}", ts);
    }
}

/// Wraps tick counts beyond 48 bits
#[test]
fn wraps_tick_counts_beyond_48_bits() {
    let mut g = Generator::new(seeded(4));
    // 28147497672 s = 2^48 + 9344 ticks
    assert_eq!(g.generate_at(28_147_497_672.0).unwrap().ticks(), 9_344);
    assert_eq!(ticks_from_unix_ts(28_147_497_672.0), Ok(9_344));
    assert_eq!(g.generate_from_ticks((1 << 48) + 7).ticks(), 7);
    assert_eq!(
        ticks_from_duration(Duration::from_secs(28_147_497_672)),
        9_344
    );
}

/// Generates distinct values in the same tick
#[test]
fn generates_distinct_values_in_the_same_tick() {
    use std::collections::HashSet;
    let now = Duration::from_micros(1_600_000_000_123_456);
    let g = Generator::with_rand_and_time_sources(seeded(5), FixedTimeSource(now));
    let samples: Vec<Uuid0> = g.take(10_000).collect();

    let s: HashSet<&Uuid0> = samples.iter().collect();
    assert_eq!(s.len(), 10_000);
    for e in &samples {
        assert_eq!(e.ticks(), 16_000_000_001_234);
    }
}

/// Reproduces output of deterministic sources
#[test]
fn reproduces_output_of_deterministic_sources() {
    let now = Duration::from_secs(1_263_513_636);
    let a = Generator::with_rand_and_time_sources(seeded(6), FixedTimeSource(now));
    let b = Generator::with_rand_and_time_sources(seeded(6), FixedTimeSource(now));
    assert!(a.take(100).eq(b.take(100)));

    let mut c = Generator::with_rand_and_time_sources(
        CountingRandSource(0x83),
        FixedTimeSource(now),
    );
    assert_eq!(
        c.generate().to_string(),
        "0b7dd8d0-7e40-8384-8586-8788898a8b8c"
    );
}

/// Reads the system clock by default
#[test]
fn reads_the_system_clock_by_default() {
    let mut g = Generator::with_rand08(rand::thread_rng());
    for _ in 0..1_000 {
        let before = ticks_from_duration(StdSystemTime.now());
        let e = g.generate();
        let after = ticks_from_duration(StdSystemTime.now());
        assert!(before <= e.ticks() && e.ticks() <= after);
    }
}
