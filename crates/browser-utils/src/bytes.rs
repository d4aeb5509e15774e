//! Byte-length counting over UTF-16 code units.
//!
//! Browser strings are UTF-16. The count assigns each code unit the number
//! of bytes it would take in UTF-8, treating a surrogate pair as one
//! four-byte character. Lone surrogates count as three bytes.

/// Count the bytes of a string as sized by its UTF-16 code units.
///
/// For any valid Rust string this equals `s.len()`.
///
/// ```
/// use browser_utils::byte_length;
///
/// assert_eq!(byte_length("abc"), 3);
/// assert_eq!(byte_length("é"), 2);
/// assert_eq!(byte_length("中"), 3);
/// assert_eq!(byte_length("😀"), 4);
/// ```
pub fn byte_length(s: &str) -> usize {
    let units: Vec<u16> = s.encode_utf16().collect();
    byte_length_utf16(&units)
}

/// Count the bytes of raw UTF-16 code units, which may contain unpaired
/// surrogates (JavaScript strings can).
pub fn byte_length_utf16(units: &[u16]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        total += match unit {
            0x0000..=0x007F => 1,
            0x0080..=0x07FF => 2,
            0xD800..=0xDBFF if is_low_surrogate(units.get(i + 1)) => {
                i += 1;
                4
            }
            _ => 3,
        };
        i += 1;
    }
    total
}

fn is_low_surrogate(unit: Option<&u16>) -> bool {
    matches!(unit, Some(0xDC00..=0xDFFF))
}
