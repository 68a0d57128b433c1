//! Lump name helpers shared by every record family
//!
//! Lump names are at most eight ASCII characters and compare
//! case-insensitively. Names keep the spelling they were read with so that
//! records round-trip byte for byte; maps key them by [`name_key`]. Bytes
//! outside ASCII are carried one per `char` (Latin-1).

use std::cmp::Ordering;
use std::io::{self, Read};

/// Maximum length of a lump name
pub const NAME_LENGTH: usize = 8;

/// Case-folded lookup key for a lump name.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.to_ascii_uppercase()
}

/// Case-insensitive name ordering.
///
/// Letters compare as lower case, so `_` and `[` through `^` sort before them.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|b| b.to_ascii_lowercase())
        .cmp(b.bytes().map(|b| b.to_ascii_lowercase()))
}

/// Whether `name` can be stored in an eight-byte lump name field.
///
/// Printable ASCII only, no spaces.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= NAME_LENGTH && name.bytes().all(|b| b.is_ascii_graphic())
}

/// Read a NUL-padded name field of `width` bytes.
pub(crate) fn read_name<R: Read>(reader: &mut R, width: usize) -> io::Result<String> {
    let mut buf = vec![0u8; width];
    reader.read_exact(&mut buf)?;
    Ok(name_from_bytes(&buf))
}

/// Decode a name field, stopping at the first NUL.
pub(crate) fn name_from_bytes(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let len = len.min(NAME_LENGTH);
    bytes[..len].iter().copied().map(char::from).collect()
}

/// Append `name` as a NUL-padded field of `width` bytes.
///
/// Names longer than [`NAME_LENGTH`] are truncated. Characters past
/// U+00FF have no single-byte form and are written as `?`.
pub(crate) fn put_name(out: &mut Vec<u8>, name: &str, width: usize) {
    let start = out.len();
    out.extend(
        name.chars()
            .take(NAME_LENGTH.min(width))
            .map(|c| u8::try_from(c).unwrap_or(b'?')),
    );
    out.resize(start + width, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        let mut buf = Vec::new();
        put_name(&mut buf, "STARTAN3", NAME_LENGTH);
        assert_eq!(buf, b"STARTAN3");

        let mut buf = Vec::new();
        put_name(&mut buf, "SKY1", 9);
        assert_eq!(buf, b"SKY1\0\0\0\0\0");
        assert_eq!(read_name(&mut buf.as_slice(), 9).unwrap(), "SKY1");
    }

    #[test]
    fn test_high_bytes_round_trip() {
        let field = [b'W', 0xC9, b'T', 0xFF, 0, 0, 0, 0];
        let name = name_from_bytes(&field);
        assert_eq!(name.chars().count(), 4);

        let mut buf = Vec::new();
        put_name(&mut buf, &name, NAME_LENGTH);
        assert_eq!(buf, field);
    }

    #[test]
    fn test_overlong_name_truncated() {
        let mut buf = Vec::new();
        put_name(&mut buf, "LONGNAME99", NAME_LENGTH);
        assert_eq!(buf, b"LONGNAME");
    }

    #[test]
    fn test_compare_names_ignores_case() {
        assert_eq!(compare_names("wall01", "WALL01"), Ordering::Equal);
        assert_eq!(compare_names("a", "B"), Ordering::Less);
        assert_eq!(compare_names("X1_", "X1A"), Ordering::Less);
        assert_eq!(compare_names("X1[", "x1a"), Ordering::Less);
        assert!(is_valid_name("SW1BRCOM"));
        assert!(!is_valid_name("TOOLONGNAME"));
        assert!(!is_valid_name("BAD NAME"));
        assert!(!is_valid_name(""));
    }
}
