//! Default generator and entry point functions

use rand::rngs::ThreadRng;

use crate::generator::{with_rand08, Generator};
use crate::{Error, Uuid0};

/// The generator behind the entry point functions: the thread-local CSPRNG of `rand` and the
/// system clock.
type DefaultGenerator = Generator<with_rand08::Adapter<ThreadRng>>;

/// Generates a UUID0 object from the current time.
///
/// On Unix, this function reseeds the thread-local random number generator when the process ID
/// changes (i.e. upon process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid0::generate();
/// println!("{}", uuid); // e.g., "0dc7ef03-c534-d288-67b7-34cf4dfa9350"
/// println!("{}", uuid.base62()); // e.g., "Q0GkabucRaE8pZsTpX9VY"
///
/// let uuid_string: String = uuid0::generate().to_string();
/// ```
pub fn generate() -> Uuid0 {
    unix_fork_safety::reseed_thread_rng_upon_pid_change();
    DefaultGenerator::default().generate()
}

/// Generates a UUID0 object from fractional seconds since the UNIX epoch.
///
/// Like [`generate`], this function reseeds the thread-local random number generator upon process
/// forks on Unix.
///
/// # Errors
///
/// Returns [`Error::Range`] if `unix_ts` is negative or not finite.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid0::generate_at(1_263_513_636.0)?;
/// assert!(uuid.to_string().starts_with("0b7dd8d0-7e40-"));
/// assert_eq!(uuid.datetime()?.to_rfc3339(), "2010-01-15T00:00:36+00:00");
/// # Ok::<(), uuid0::Error>(())
/// ```
pub fn generate_at(unix_ts: f64) -> Result<Uuid0, Error> {
    unix_fork_safety::reseed_thread_rng_upon_pid_change();
    DefaultGenerator::default().generate_at(unix_ts)
}

#[cfg(unix)]
mod unix_fork_safety {
    use std::{cell::Cell, process};

    thread_local! {
        static PID: Cell<u32> = Cell::new(process::id());
    }

    /// Reseeds ThreadRng immediately when the process ID changes (i.e. upon process forks),
    /// returning true if ThreadRng is reseeded or false otherwise.
    pub fn reseed_thread_rng_upon_pid_change() -> bool {
        reseed_thread_rng_unless_pid_is(process::id())
    }

    fn reseed_thread_rng_unless_pid_is(pid: u32) -> bool {
        PID.with(|last_pid| {
            if pid == last_pid.replace(pid) {
                false
            } else {
                // rand v0.8 ThreadRng hands out the rest of its buffered block (up to 63 `u32`
                // values) before it notices a fork, so drain that block first.
                let _: [[u32; 32]; 2] = rand::random();
                true
            }
        })
    }

    #[cfg(test)]
    mod tests {
        use super::{reseed_thread_rng_unless_pid_is, reseed_thread_rng_upon_pid_change};
        use std::process;

        /// Reseeds only when process ID changes
        #[test]
        fn reseeds_only_when_process_id_changes() {
            let pid = process::id();
            let other = pid.wrapping_add(1);

            assert!(!reseed_thread_rng_upon_pid_change());
            assert!(!reseed_thread_rng_upon_pid_change());

            // as seen by a forked child
            assert!(reseed_thread_rng_unless_pid_is(other));
            assert!(!reseed_thread_rng_unless_pid_is(other));

            assert!(reseed_thread_rng_upon_pid_change());
            assert!(!reseed_thread_rng_upon_pid_change());
        }

        /// Keeps generating distinct values across process ID changes
        #[test]
        fn keeps_generating_distinct_values_across_process_id_changes() {
            use std::collections::HashSet;
            let other = process::id().wrapping_add(1);

            let mut s = HashSet::new();
            for i in 0..1_000 {
                if i % 10 == 0 {
                    assert!(reseed_thread_rng_unless_pid_is(other));
                }
                let e = crate::generate_at(1_600_000_000.0).unwrap();
                assert_eq!(e.ticks(), 16_000_000_000_000);
                s.insert(e);
            }
            assert_eq!(s.len(), 1_000);
        }
    }
}

#[cfg(not(unix))]
mod unix_fork_safety {
    pub const fn reseed_thread_rng_upon_pid_change() -> bool {
        false
    }
}
