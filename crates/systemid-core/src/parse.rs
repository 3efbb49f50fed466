//! Narrowing numeric token parser.
//!
//! Operator-entered tokens never fail to parse: the leading run of digits is
//! taken, anything after it is ignored, a token without digits reads as 0 and
//! out-of-range values saturate into `0..=255`.

/// Parse the leading integer of `token` in the given radix and saturate it to `u8`.
///
/// Accepts optional leading whitespace, an optional sign and, for radix 16, an
/// optional `0x`/`0X` prefix.
pub(crate) fn narrow_u8(token: &str, radix: u32) -> u8 {
    let s = token.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let s = if radix == 16 {
        s.strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .filter(|rest| rest.starts_with(|c: char| c.is_ascii_hexdigit()))
            .unwrap_or(s)
    } else {
        s
    };

    let mut value: u32 = 0;
    for c in s.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        value = value.saturating_mul(radix).saturating_add(digit);
    }

    if negative {
        0
    } else {
        value.min(u32::from(u8::MAX)) as u8
    }
}
