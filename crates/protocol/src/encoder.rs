//! UTF-8 percent encoding with an extended reserved-character set
//!
//! The beacon format escapes everything outside the RFC 3986 unreserved set,
//! plus any characters the caller declares reserved. The assembler always
//! reserves `_` so that user-supplied values can never collide with the
//! underscore-separated fields of a web-request tag.

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Percent encode a string into its UTF-8 wire representation.
///
/// Each byte of the UTF-8 encoding is emitted verbatim if it is an RFC 3986
/// unreserved character (`A-Z a-z 0-9 - . _ ~`) and not in
/// `additional_reserved`; otherwise it is emitted as `%` followed by two
/// upper-case hex digits.
///
/// # Example
///
/// ```
/// use vantage_protocol::percent_encode;
///
/// assert_eq!(percent_encode("a b", &[]), "a%20b");
/// assert_eq!(percent_encode("a_b", &['_']), "a%5Fb");
/// ```
pub fn percent_encode(input: &str, additional_reserved: &[char]) -> String {
    let mut out = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        if is_unreserved(byte) && !additional_reserved.contains(&(byte as char)) {
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
            out.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
        }
    }
    out
}

#[inline]
fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}
