use std::{fmt, str};

use chrono::{DateTime, Local, Utc};
use fstr::FStr;

use crate::{base62, Error};

/// Number of timestamp ticks per second. One tick is 100 microseconds.
pub const TICKS_PER_SECOND: u64 = 10_000;

/// Largest tick count the 48-bit timestamp field can hold.
pub const MAX_TICKS: u64 = (1 << 48) - 1;

/// Six-field tuple of the standard 128-bit layout: `time_low`, `time_mid`, `time_hi_version`,
/// `clock_seq_hi_variant`, `clock_seq_low` and the 48-bit `node`.
pub type Fields = (u32, u16, u16, u8, u8, u64);

/// Represents a timestamped UUID (UUID0).
///
/// The first 48 bits hold the number of 100-microsecond ticks elapsed since the UNIX epoch and the
/// remaining 80 bits hold random data.
///
/// [`Default`] yields [`Uuid0::NIL`]. Fields that should default to a freshly generated value can
/// name [`generate`](crate::generate) instead, e.g. `#[serde(default = "uuid0::generate")]`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid0([u8; 16]);

/// Variant families of the standard 128-bit layout, as indicated by the most significant bits of
/// the `clock_seq_hi_variant` field.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// `0xx`: reserved for NCS backward compatibility.
    Var0,
    /// `10x`: the RFC 4122 layout.
    Var10,
    /// `110`: reserved for Microsoft backward compatibility.
    Var110,
    /// `111`: reserved for future definition.
    VarReserved,
}

impl Uuid0 {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates a value from a tick count and 80 bits of randomness.
    ///
    /// Tick counts that do not fit in 48 bits wrap around; only the 48 least significant bits are
    /// stored.
    pub const fn from_ticks_and_random(ticks: u64, random: [u8; 10]) -> Self {
        let t = (ticks & MAX_TICKS).to_be_bytes();
        Self([
            t[2], t[3], t[4], t[5], t[6], t[7], random[0], random[1], random[2], random[3],
            random[4], random[5], random[6], random[7], random[8], random[9],
        ])
    }

    /// Creates an object from a 128-bit unsigned integer.
    pub const fn from_u128(src: u128) -> Self {
        Self(src.to_be_bytes())
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the 128-bit unsigned integer representation.
    pub const fn as_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// Returns the bytes with `time_low`, `time_mid` and `time_hi_version` in little-endian order.
    pub const fn to_bytes_le(&self) -> [u8; 16] {
        swap_field_order(self.0)
    }

    /// Returns the six-field tuple of the standard layout.
    pub const fn fields(&self) -> Fields {
        let b = &self.0;
        (
            u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            u16::from_be_bytes([b[4], b[5]]),
            u16::from_be_bytes([b[6], b[7]]),
            b[8],
            b[9],
            u64::from_be_bytes([0, 0, b[10], b[11], b[12], b[13], b[14], b[15]]),
        )
    }

    /// Returns the number of 100-microsecond ticks since the UNIX epoch stored in the first 48
    /// bits.
    pub const fn ticks(&self) -> u64 {
        let b = &self.0;
        u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]])
    }

    /// Returns the embedded timestamp as fractional seconds since the UNIX epoch.
    pub fn unix_ts(&self) -> f64 {
        self.ticks() as f64 / TICKS_PER_SECOND as f64
    }

    /// Returns the embedded timestamp as a calendar date and time in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] if the timestamp is outside the range `chrono` can represent.
    pub fn datetime(&self) -> Result<DateTime<Utc>, Error> {
        let ticks = self.ticks();
        let secs = (ticks / TICKS_PER_SECOND) as i64;
        let nanos = ((ticks % TICKS_PER_SECOND) * 100_000) as u32;
        DateTime::from_timestamp(secs, nanos).ok_or_else(|| {
            Error::range(format!(
                "timestamp {} is not representable as a calendar date",
                self.unix_ts()
            ))
        })
    }

    /// Returns the embedded timestamp as a calendar date and time in the local time zone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] under the same conditions as [`Uuid0::datetime`].
    pub fn datetime_local(&self) -> Result<DateTime<Local>, Error> {
        self.datetime().map(|dt| dt.with_timezone(&Local))
    }

    /// Reports the variant family indicated by the `clock_seq_hi_variant` field.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 5 {
            0b000..=0b011 => Variant::Var0,
            0b100 | 0b101 => Variant::Var10,
            0b110 => Variant::Var110,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version number if the value follows the RFC 4122 variant, or `None` otherwise.
    ///
    /// Generated values carry random bits in this position, so the result is only meaningful for
    /// values built with [`Uuid0::with_version`] or imported from a standard UUID.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns a copy with the variant bits set to `10` and the version bits set to `version`.
    ///
    /// This overwrites whatever the source representation carried in those six bits, including
    /// timestamp or random bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Argument`] if `version` does not fit in four bits.
    pub fn with_version(self, version: u8) -> Result<Self, Error> {
        if version > 0xf {
            return Err(Error::Argument("version must be a 4-bit number"));
        }
        let mut bytes = self.0;
        bytes[6] = (version << 4) | (bytes[6] & 0x0f);
        bytes[8] = 0x80 | (bytes[8] & 0x3f);
        Ok(Self(bytes))
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid0::Uuid0;
    ///
    /// let x = "{0B7DD8D0-7E40-8360-9322-4A361D7B573F}".parse::<Uuid0>()?;
    /// assert_eq!(x.encode().as_str(), "0b7dd8d0-7e40-8360-9322-4a361d7b573f");
    /// # Ok::<(), uuid0::Error>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        encode_hex(&self.0, true)
    }

    /// Returns the 32-digit hexadecimal string representation without hyphens.
    pub fn simple(&self) -> FStr<32> {
        encode_hex(&self.0, false)
    }

    /// Returns the `urn:uuid:` prefixed string representation.
    pub fn urn(&self) -> String {
        format!("urn:uuid:{}", self.encode())
    }

    /// Returns the base62 string representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid0::Uuid0;
    ///
    /// let x = "0b7dd8d0-7e40-8360-9322-4a361d7b573f".parse::<Uuid0>()?;
    /// assert_eq!(x.base62(), "LgQWTxkOpLyTaEuRAav9D");
    /// # Ok::<(), uuid0::Error>(())
    /// ```
    pub fn base62(&self) -> String {
        base62::encode(self.as_u128())
    }
}

/// Converts between the big-endian and little-endian byte layouts. The conversion is its own
/// inverse.
pub(crate) const fn swap_field_order(b: [u8; 16]) -> [u8; 16] {
    [
        b[3], b[2], b[1], b[0], b[5], b[4], b[7], b[6], b[8], b[9], b[10], b[11], b[12], b[13],
        b[14], b[15],
    ]
}

fn encode_hex<const N: usize>(bytes: &[u8; 16], hyphenated: bool) -> FStr<N> {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    let mut buffer = [0u8; N];
    let mut pos = 0;
    for (i, &e) in bytes.iter().enumerate() {
        buffer[pos] = DIGITS[(e >> 4) as usize];
        buffer[pos + 1] = DIGITS[(e & 15) as usize];
        pos += 2;
        if hyphenated && matches!(i, 3 | 5 | 7 | 9) {
            buffer[pos] = b'-';
            pos += 1;
        }
    }
    debug_assert_eq!(pos, N);
    debug_assert!(buffer.is_ascii());
    // SAFETY: every byte written is an ASCII hex digit or hyphen
    unsafe { FStr::from_inner_unchecked(buffer) }
}

impl fmt::Display for Uuid0 {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid0 {
    type Err = Error;

    /// Creates an object from a hexadecimal string representation. See [`Uuid0::from_hex`].
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::from_hex(src)
    }
}

impl From<Uuid0> for [u8; 16] {
    fn from(src: Uuid0) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid0 {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid0 {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(src)
    }
}

impl AsRef<[u8]> for Uuid0 {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid0> for u128 {
    fn from(src: Uuid0) -> Self {
        src.as_u128()
    }
}

impl From<u128> for Uuid0 {
    fn from(src: u128) -> Self {
        Self::from_u128(src)
    }
}

impl From<Uuid0> for String {
    fn from(src: Uuid0) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid0 {
    type Error = Error;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl TryFrom<&str> for Uuid0 {
    type Error = Error;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        src.parse()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid0;

    impl From<Uuid0> for uuid::Uuid {
        fn from(src: Uuid0) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid0 {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }

}

/// Serde support for [`Uuid0`].
///
/// `Uuid0` itself serializes as the canonical hexadecimal string in human-readable formats and as
/// 16 raw bytes otherwise. The [`base62`](serde_support::base62) module serializes the base62
/// form instead and is meant for use with `#[serde(with = "uuid0::serde_support::base62")]`.
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod serde_support {
    use super::{fmt, Uuid0};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid0 {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid0 {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid0;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID0 representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::from_bytes(value).map_err(de::Error::custom)
        }
    }

    /// (De)serializes a [`Uuid0`] through its base62 string form.
    ///
    /// Deserialization accepts a base62 string and falls back to the hexadecimal forms, so
    /// values submitted in either form are read back.
    pub mod base62 {
        use super::{fmt, Uuid0};
        use serde::{de, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &Uuid0, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&value.base62())
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid0, D::Error> {
            deserializer.deserialize_str(Base62Visitor)
        }

        struct Base62Visitor;

        impl<'de> de::Visitor<'de> for Base62Visitor {
            type Value = Uuid0;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "a base62 or hexadecimal UUID0 string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Uuid0::from_base62(value)
                    .or_else(|_| value.parse())
                    .map_err(de::Error::custom)
            }
        }
    }

}
