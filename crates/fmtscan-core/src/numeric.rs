//! Integer conversion for numeric directives.
//!
//! strtoll/strtoull-style scanning over a byte slice, minus the leading
//! whitespace skip (the driver has already collapsed whitespace by the time
//! a numeric conversion runs). Out-of-range magnitudes saturate to the
//! destination family's limit, as the C conversions do on ERANGE.

/// A successfully scanned integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedInt {
    /// Two's-complement bit pattern of the value, widened to 64 bits. The
    /// driver truncates this to the destination slot's width.
    pub raw: u64,
    /// Number of input bytes the scan consumed (sign, radix prefix, digits).
    pub consumed: usize,
}

/// Scan a signed integer. `base` 0 selects auto-radix (`0x` -> 16,
/// leading `0` -> 8, else 10). Returns `None` when no digits were consumed.
pub fn scan_signed(s: &[u8], base: u32) -> Option<ScannedInt> {
    let mut i = 0;
    let mut negative = false;
    if let Some(&sign) = s.first() {
        if sign == b'-' || sign == b'+' {
            negative = sign == b'-';
            i = 1;
        }
    }
    let limit = if negative {
        1u64 << 63
    } else {
        i64::MAX as u64
    };
    let (magnitude, used) = scan_magnitude(&s[i..], base, limit)?;
    let value = if negative {
        (magnitude as i64).wrapping_neg()
    } else {
        magnitude as i64
    };
    Some(ScannedInt {
        raw: value as u64,
        consumed: i + used,
    })
}

/// Scan an unsigned magnitude. No sign is accepted (`%u`/`%o`/`%x`/`%p`
/// parse magnitude only). Returns `None` when no digits were consumed.
pub fn scan_unsigned(s: &[u8], base: u32) -> Option<ScannedInt> {
    let (magnitude, used) = scan_magnitude(s, base, u64::MAX)?;
    Some(ScannedInt {
        raw: magnitude,
        consumed: used,
    })
}

/// Digit loop shared by both signednesses.
///
/// A `0x`/`0X` prefix is consumed for base 16 (and auto-detected base 16)
/// only when a hex digit follows; otherwise the leading `0` alone is
/// consumed, matching strtol. Accumulation clamps at `limit`.
fn scan_magnitude(s: &[u8], base: u32, limit: u64) -> Option<(u64, usize)> {
    let mut i = 0;
    let mut base = base as u64;

    let has_0x_prefix =
        s.len() >= 2 && s[0] == b'0' && (s[1] == b'x' || s[1] == b'X');
    let prefix_usable = has_0x_prefix && s.len() >= 3 && s[2].is_ascii_hexdigit();

    if base == 0 {
        if prefix_usable {
            base = 16;
            i = 2;
        } else if s.first() == Some(&b'0') {
            base = 8;
        } else {
            base = 10;
        }
    } else if base == 16 && prefix_usable {
        i = 2;
    }

    let cutoff = limit / base;
    let cutlim = limit % base;

    let mut acc: u64 = 0;
    let mut any_digits = false;
    let mut overflow = false;

    while i < s.len() {
        let c = s[i];
        let digit = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'z' => c - b'a' + 10,
            b'A'..=b'Z' => c - b'A' + 10,
            _ => break,
        };
        if (digit as u64) >= base {
            break;
        }
        any_digits = true;
        if !overflow {
            if acc > cutoff || (acc == cutoff && (digit as u64) > cutlim) {
                overflow = true;
            } else {
                acc = acc * base + digit as u64;
            }
        }
        i += 1;
    }

    if !any_digits {
        return None;
    }
    Some((if overflow { limit } else { acc }, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_decimal() {
        let n = scan_signed(b"124", 10).unwrap();
        assert_eq!(n.raw as i64, 124);
        assert_eq!(n.consumed, 3);

        let n = scan_signed(b"-124", 10).unwrap();
        assert_eq!(n.raw as i64, -124);
        assert_eq!(n.consumed, 4);

        let n = scan_signed(b"+124x", 10).unwrap();
        assert_eq!(n.raw as i64, 124);
        assert_eq!(n.consumed, 4);
    }

    #[test]
    fn test_sign_without_digits() {
        assert!(scan_signed(b"-", 10).is_none());
        assert!(scan_signed(b"+x", 10).is_none());
        assert!(scan_signed(b"", 10).is_none());
    }

    #[test]
    fn test_unsigned_rejects_sign() {
        assert!(scan_unsigned(b"-12", 10).is_none());
        assert!(scan_unsigned(b"+12", 10).is_none());
    }

    #[test]
    fn test_auto_radix() {
        let n = scan_signed(b"010", 0).unwrap();
        assert_eq!(n.raw as i64, 8);

        let n = scan_signed(b"0x1f", 0).unwrap();
        assert_eq!(n.raw as i64, 31);
        assert_eq!(n.consumed, 4);

        let n = scan_signed(b"-0x1f", 0).unwrap();
        assert_eq!(n.raw as i64, -31);

        let n = scan_signed(b"42", 0).unwrap();
        assert_eq!(n.raw as i64, 42);
    }

    #[test]
    fn test_auto_radix_bare_zero() {
        // "0" alone: octal branch, one digit consumed.
        let n = scan_signed(b"0", 0).unwrap();
        assert_eq!(n.raw, 0);
        assert_eq!(n.consumed, 1);

        // "09": '9' is not an octal digit.
        let n = scan_signed(b"09", 0).unwrap();
        assert_eq!(n.raw, 0);
        assert_eq!(n.consumed, 1);
    }

    #[test]
    fn test_hex_prefix_edge() {
        // "0x" with no digit after: only the '0' is consumed.
        let n = scan_unsigned(b"0x", 16).unwrap();
        assert_eq!(n.raw, 0);
        assert_eq!(n.consumed, 1);

        let n = scan_unsigned(b"0xDEAD", 16).unwrap();
        assert_eq!(n.raw, 0xDEAD);
        assert_eq!(n.consumed, 6);

        // Bare hex digits, no prefix.
        let n = scan_unsigned(b"1f", 16).unwrap();
        assert_eq!(n.raw, 31);
    }

    #[test]
    fn test_octal_digit_bound() {
        let n = scan_unsigned(b"19", 8).unwrap();
        assert_eq!(n.raw, 1);
        assert_eq!(n.consumed, 1);
    }

    #[test]
    fn test_saturation() {
        let n = scan_signed(b"9223372036854775807", 10).unwrap();
        assert_eq!(n.raw as i64, i64::MAX);

        let n = scan_signed(b"99999999999999999999", 10).unwrap();
        assert_eq!(n.raw as i64, i64::MAX);

        let n = scan_signed(b"-9223372036854775808", 10).unwrap();
        assert_eq!(n.raw as i64, i64::MIN);

        let n = scan_unsigned(b"18446744073709551615", 10).unwrap();
        assert_eq!(n.raw, u64::MAX);

        let n = scan_unsigned(b"18446744073709551616", 10).unwrap();
        assert_eq!(n.raw, u64::MAX);
    }
}
