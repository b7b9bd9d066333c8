//! Byte-to-text helpers shared by the string token types
//!
//! PDF text strings are either single-byte (one code point per byte) or
//! UTF-16 introduced by a byte order mark. Decoding here is always lossy:
//! unpaired surrogates and a dangling odd byte become U+FFFD.

/// Big-endian UTF-16 byte order mark
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Little-endian UTF-16 byte order mark
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// Decode big-endian UTF-16 code units (no BOM expected)
pub fn decode_utf16_be(bytes: &[u8]) -> String {
    decode_utf16(bytes, u16::from_be_bytes)
}

/// Decode little-endian UTF-16 code units (no BOM expected)
pub fn decode_utf16_le(bytes: &[u8]) -> String {
    decode_utf16(bytes, u16::from_le_bytes)
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| unit([chunk[0], chunk[1]]))
        .collect();

    let mut text = String::from_utf16_lossy(&units);
    if bytes.len() % 2 != 0 {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

/// Map every byte to the code point of the same value
pub fn decode_single_byte(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encode text as BOM-prefixed big-endian UTF-16
pub fn encode_utf16_be(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&UTF16_BE_BOM);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf16_be_basic() {
        assert_eq!(decode_utf16_be(&[0x00, 0x41, 0x00, 0x42]), "AB");
        assert_eq!(decode_utf16_be(&[0x4E, 0x2D, 0x65, 0x87]), "中文");
    }

    #[test]
    fn test_decode_utf16_be_surrogate_pair() {
        // U+1F600
        assert_eq!(decode_utf16_be(&[0xD8, 0x3D, 0xDE, 0x00]), "\u{1F600}");
    }

    #[test]
    fn test_decode_utf16_lossy() {
        // Lone high surrogate
        assert_eq!(decode_utf16_be(&[0xD8, 0x3D]), "\u{FFFD}");
        // Dangling odd byte
        assert_eq!(decode_utf16_be(&[0x00, 0x41, 0x42]), "A\u{FFFD}");
        assert_eq!(decode_utf16_be(&[]), "");
    }

    #[test]
    fn test_decode_utf16_le() {
        assert_eq!(decode_utf16_le(&[0x41, 0x00, 0x42, 0x00]), "AB");
    }

    #[test]
    fn test_decode_single_byte_keeps_high_bytes() {
        assert_eq!(decode_single_byte(&[0x48, 0xE9]), "Hé");
        assert_eq!(decode_single_byte(&[0x00]), "\0");
    }

    #[test]
    fn test_encode_utf16_be_has_bom() {
        assert_eq!(encode_utf16_be("A"), vec![0xFE, 0xFF, 0x00, 0x41]);
        assert_eq!(encode_utf16_be(""), vec![0xFE, 0xFF]);
    }
}
