//! Timestamped UUIDs (UUID0) for databases and web apps
//!
//! ```rust
//! let uuid = uuid0::generate();
//! println!("{}", uuid); // e.g., "0dc7ef03-c534-d288-67b7-34cf4dfa9350"
//! println!("{}", uuid.base62()); // e.g., "Q0GkabucRaE8pZsTpX9VY"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let x: uuid0::Uuid0 = "{0b7dd8d0-7e40-8360-9322-4a361d7b573f}".parse()?;
//! assert_eq!(x.datetime()?.to_rfc3339(), "2010-01-15T00:00:36+00:00");
//! assert_eq!(x.base62(), "LgQWTxkOpLyTaEuRAav9D");
//! assert_eq!(uuid0::Uuid0::from_base62("LgQWTxkOpLyTaEuRAav9D")?, x);
//! # Ok::<(), uuid0::Error>(())
//! ```
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            ticks                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |            ticks              |             rand              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit big-endian `ticks` field holds the number of 100-microsecond periods elapsed
//!   since the UNIX epoch, truncating any fractional tick. It overflows in the year 2861 and
//!   wraps around silently.
//! - The remaining 80 `rand` bits are filled with a cryptographically strong random number.
//!   Unlike standard UUIDs, no version or variant bits are set unless explicitly requested with
//!   [`Uuid0::with_version`].
//!
//! Values sort by creation time within the resolution of one tick, in both binary and
//! hexadecimal forms.
//!
//! # Text forms
//!
//! Besides the canonical 8-4-4-4-12 hexadecimal form, identifiers have a compact base62 form
//! (see [`base62`]) of at most 22 characters over the alphabet `0-9A-Za-z`, suited to URLs and
//! database keys.
//!
//! # Crate features
//!
//! - `serde`: `Serialize`/`Deserialize` implementations and the
//!   `serde_support::base62` field adapter.
//! - `uuid`: lossless conversions to and from [`uuid::Uuid`](https://docs.rs/uuid).
//! - `cli`: the `uuid0` command-line generator.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::Error;

mod id;
#[cfg(feature = "serde")]
pub use id::serde_support;
pub use id::{Fields, Uuid0, Variant, MAX_TICKS, TICKS_PER_SECOND};

mod parse;
pub use parse::{Repr, Source};

pub mod base62;

pub mod generator;
#[doc(inline)]
pub use generator::Generator;

mod entry;
pub use entry::{generate, generate_at};
