//! Base62 text transcoder for 128-bit values
//!
//! Values are written in big-endian positional notation over the alphabet `0-9A-Za-z`, without
//! leading-zero padding. Zero is encoded as `"0"` and the maximum 128-bit value takes 22 symbols.
//!
//! ```rust
//! let n = 0x0b7dd8d0_7e40_8360_9322_4a361d7b573f_u128;
//! assert_eq!(uuid0::base62::encode(n), "LgQWTxkOpLyTaEuRAav9D");
//! assert_eq!(uuid0::base62::decode("LgQWTxkOpLyTaEuRAav9D"), Ok(n));
//! ```

use crate::Error;

const DIGITS: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Maximum number of symbols an encoded 128-bit value can take.
pub const MAX_LEN: usize = 22;

/// Encodes a 128-bit unsigned integer into its minimal-length base62 string.
pub fn encode(value: u128) -> String {
    let mut buffer = [0u8; MAX_LEN];
    let mut pos = MAX_LEN;
    let mut n = value;
    loop {
        pos -= 1;
        buffer[pos] = DIGITS[(n % 62) as usize];
        n /= 62;
        if n == 0 {
            break;
        }
    }
    debug_assert!(buffer[pos..].is_ascii());
    buffer[pos..].iter().map(|&e| e as char).collect()
}

/// Decodes a base62 string into a 128-bit unsigned integer.
///
/// Redundant leading zero symbols are accepted and ignored.
///
/// # Errors
///
/// Returns [`Error::Format`] if `src` is empty, contains a character outside the alphabet, or
/// denotes a value that does not fit in 128 bits.
pub fn decode(src: &str) -> Result<u128, Error> {
    if src.is_empty() {
        return Err(Error::format("empty base62 string"));
    }

    src.chars().try_fold(0u128, |acc, c| {
        let digit = decode_digit(c)
            .ok_or_else(|| Error::format(format!("invalid base62 character {:?}", c)))?;
        acc.checked_mul(62)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| Error::format("base62 value exceeds 128 bits"))
    })
}

fn decode_digit(c: char) -> Option<u128> {
    let offset = match c {
        '0'..='9' => c as u32 - '0' as u32,
        'A'..='Z' => c as u32 - 'A' as u32 + 10,
        'a'..='z' => c as u32 - 'a' as u32 + 36,
        _ => return None,
    };
    Some(offset as u128)
}
