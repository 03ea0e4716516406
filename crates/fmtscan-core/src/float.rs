//! Floating-point conversion (feature `float`).
//!
//! strtod-style scanning of the common decimal subset: optional sign,
//! digits with an optional fraction, optional signed exponent. An exponent
//! marker without following digits is not consumed (strtod rolls back to
//! the end of the mantissa).

/// A successfully scanned float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScannedFloat {
    pub value: f64,
    /// Number of input bytes the scan consumed.
    pub consumed: usize,
}

/// Scan a decimal floating-point value. Returns `None` when no mantissa
/// digits were consumed.
pub fn scan_float(s: &[u8]) -> Option<ScannedFloat> {
    let mut i = 0;
    if matches!(s.first(), Some(b'+') | Some(b'-')) {
        i = 1;
    }

    let mut mantissa_digits = 0;
    while i < s.len() && s[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < s.len() && s[i] == b'.' {
        i += 1;
        while i < s.len() && s[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    // Exponent, only if at least one digit follows the marker and sign.
    if i < s.len() && (s[i] == b'e' || s[i] == b'E') {
        let mut j = i + 1;
        if j < s.len() && (s[j] == b'+' || s[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < s.len() && s[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    let text = std::str::from_utf8(&s[..i]).ok()?;
    let value = text.parse::<f64>().ok()?;
    Some(ScannedFloat { value, consumed: i })
}
