//! Constructors from external representations

use crate::id::{swap_field_order, Fields};
use crate::{base62, Error, Uuid0};

impl Uuid0 {
    /// Creates an object from a string of 32 hexadecimal digits.
    ///
    /// A leading `urn:uuid:` prefix, surrounding braces and hyphens are ignored, and digits are
    /// accepted in either case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the input contains anything else or does not have exactly 32
    /// digits once the decoration is stripped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid0::Uuid0;
    ///
    /// let x = Uuid0::from_hex("urn:uuid:0b7dd8d0-7e40-8360-9322-4a361d7b573f")?;
    /// let y = Uuid0::from_hex("{0B7DD8D07E40836093224A361D7B573F}")?;
    /// assert_eq!(x, y);
    /// # Ok::<(), uuid0::Error>(())
    /// ```
    pub fn from_hex(src: &str) -> Result<Self, Error> {
        let body = strip_urn_prefix(src).trim_matches(|c: char| c == '{' || c == '}');

        let mut dst = [0u8; 16];
        let mut n_digits = 0usize;
        for c in body.chars().filter(|&c| c != '-') {
            let digit = c
                .to_digit(16)
                .ok_or_else(|| Error::format(format!("invalid hex digit {:?}", c)))?;
            if n_digits == 32 {
                return Err(Error::format("more than 32 hex digits"));
            }
            dst[n_digits / 2] |= if n_digits % 2 == 0 {
                (digit as u8) << 4
            } else {
                digit as u8
            };
            n_digits += 1;
        }

        if n_digits == 32 {
            Ok(Self::from(dst))
        } else {
            Err(Error::format(format!(
                "expected 32 hex digits, got {}",
                n_digits
            )))
        }
    }

    /// Creates an object from a 16-byte big-endian sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if `src` is not exactly 16 bytes long.
    pub fn from_bytes(src: &[u8]) -> Result<Self, Error> {
        <[u8; 16]>::try_from(src)
            .map(Self::from)
            .map_err(|_| Error::format(format!("expected 16 bytes, got {}", src.len())))
    }

    /// Creates an object from a 16-byte sequence whose `time_low`, `time_mid` and
    /// `time_hi_version` fields are in little-endian order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if `src` is not exactly 16 bytes long.
    pub fn from_bytes_le(src: &[u8]) -> Result<Self, Error> {
        Self::from_bytes(src).map(|e| Self::from(swap_field_order(*e.as_bytes())))
    }

    /// Creates an object from the six fields of the standard layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the `node` field does not fit in 48 bits.
    pub fn from_fields(fields: Fields) -> Result<Self, Error> {
        let (time_low, time_mid, time_hi_version, clock_seq_hi_variant, clock_seq_low, node) =
            fields;
        if node >= 1 << 48 {
            return Err(Error::format("node field out of 48-bit range"));
        }

        let value = (time_low as u128) << 96
            | (time_mid as u128) << 80
            | (time_hi_version as u128) << 64
            | (clock_seq_hi_variant as u128) << 56
            | (clock_seq_low as u128) << 48
            | node as u128;
        Ok(Self::from(value))
    }

    /// Creates an object from a base62 string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if `src` is not a valid base62 string or exceeds 128 bits.
    pub fn from_base62(src: &str) -> Result<Self, Error> {
        base62::decode(src).map(Self::from)
    }

    /// Creates an object from a tagged representation, optionally overwriting the variant and
    /// version bits afterwards.
    ///
    /// # Errors
    ///
    /// Returns whatever error the named constructor for `repr` returns, or [`Error::Argument`] if
    /// `version` does not fit in four bits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid0::{Repr, Uuid0};
    ///
    /// let x = Uuid0::parse(Repr::Base62("LgQWTxkOpLyTaEuRAav9D"), None)?;
    /// assert_eq!(x.to_string(), "0b7dd8d0-7e40-8360-9322-4a361d7b573f");
    ///
    /// let v4 = Uuid0::parse(Repr::Hex("0b7dd8d07e40836093224a361d7b573f"), Some(4))?;
    /// assert_eq!(v4.to_string(), "0b7dd8d0-7e40-4360-9322-4a361d7b573f");
    /// # Ok::<(), uuid0::Error>(())
    /// ```
    pub fn parse(repr: Repr<'_>, version: Option<u8>) -> Result<Self, Error> {
        let value = match repr {
            Repr::Hex(src) => Self::from_hex(src)?,
            Repr::Bytes(src) => Self::from_bytes(src)?,
            Repr::BytesLe(src) => Self::from_bytes_le(src)?,
            Repr::Fields(fields) => Self::from_fields(fields)?,
            Repr::Int(src) => Self::from_u128(src),
            Repr::Base62(src) => Self::from_base62(src)?,
        };
        match version {
            Some(v) => value.with_version(v),
            None => Ok(value),
        }
    }
}

/// One of the supported external representations of a [`Uuid0`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Repr<'a> {
    /// Hexadecimal string, optionally hyphenated, braced or `urn:uuid:` prefixed.
    Hex(&'a str),
    /// 16-byte big-endian sequence.
    Bytes(&'a [u8]),
    /// 16-byte sequence with the first three fields in little-endian order.
    BytesLe(&'a [u8]),
    /// Six-field tuple of the standard layout.
    Fields(Fields),
    /// 128-bit unsigned integer.
    Int(u128),
    /// Base62 string.
    Base62(&'a str),
}

/// Single entry point that accepts any one representation through optional slots.
///
/// Exactly one slot must be filled. This mirrors keyword-style construction at API boundaries
/// where the input form is only known at run time; code that knows the form should call the named
/// constructors or [`Uuid0::parse`] directly.
///
/// # Examples
///
/// ```rust
/// use uuid0::{Error, Source};
///
/// let x = Source {
///     base62: Some("LgQWTxkOpLyTaEuRAav9D"),
///     ..Default::default()
/// }
/// .parse()?;
/// assert_eq!(x.to_string(), "0b7dd8d0-7e40-8360-9322-4a361d7b573f");
///
/// let both = Source {
///     hex: Some("0b7dd8d0-7e40-8360-9322-4a361d7b573f"),
///     int: Some(0),
///     ..Default::default()
/// };
/// assert!(matches!(both.parse(), Err(Error::Argument(_))));
/// # Ok::<(), uuid0::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Source<'a> {
    pub hex: Option<&'a str>,
    pub bytes: Option<&'a [u8]>,
    pub bytes_le: Option<&'a [u8]>,
    pub fields: Option<Fields>,
    pub int: Option<u128>,
    pub base62: Option<&'a str>,

    /// Version number to stamp onto the result, together with the RFC 4122 variant bits.
    pub version: Option<u8>,
}

impl<'a> Source<'a> {
    /// Returns the only filled representation slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Argument`] if no slot or more than one slot is filled.
    pub fn repr(&self) -> Result<Repr<'a>, Error> {
        let candidates = [
            self.hex.map(Repr::Hex),
            self.bytes.map(Repr::Bytes),
            self.bytes_le.map(Repr::BytesLe),
            self.fields.map(Repr::Fields),
            self.int.map(Repr::Int),
            self.base62.map(Repr::Base62),
        ];

        let mut filled = candidates.into_iter().flatten();
        match (filled.next(), filled.next()) {
            (Some(repr), None) => Ok(repr),
            (None, _) => Err(Error::Argument(
                "one of hex, bytes, bytes_le, fields, int or base62 must be given",
            )),
            (Some(_), Some(_)) => Err(Error::Argument(
                "only one of hex, bytes, bytes_le, fields, int or base62 may be given",
            )),
        }
    }

    /// Builds a [`Uuid0`] from the only filled slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Argument`] if the slots are not filled correctly, or the error of the
    /// named constructor for the filled slot.
    pub fn parse(&self) -> Result<Uuid0, Error> {
        Uuid0::parse(self.repr()?, self.version)
    }
}

fn strip_urn_prefix(src: &str) -> &str {
    const PREFIX: &str = "urn:uuid:";
    match src.get(..PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(PREFIX) => &src[PREFIX.len()..],
        _ => src,
    }
}
