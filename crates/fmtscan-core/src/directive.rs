//! Scan directive parsing.
//!
//! Grammar per directive: `%` `*`? digits? (`h`|`hh`|`l`|`ll`|`L`)? conv
//! where conv is one of `d i o u x X p n % c s [`...`]`.

use crate::charclass::{ClassSet, compile_class};

/// Length modifier attached to a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMod {
    None,
    Hh,   // 'hh'
    H,    // 'h'
    L,    // 'l'
    Ll,   // 'll'
    BigL, // 'L'
}

/// The conversion a directive performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// `%d`/`%i`/`%o`/`%u`/`%x`/`%X`/`%p`. `base` 0 means auto-radix (`%i`).
    Int { base: u32, signed: bool },
    /// `%f`/`%e`/`%g`/`%a` and uppercase variants. Dispatch is gated behind
    /// the `float` feature; without it the driver stops on this conversion.
    Float,
    /// `%c`: raw byte(s), width-controlled, no whitespace skip.
    Char,
    /// `%s`: whitespace-delimited token.
    Str,
    /// `%[...]`: class-delimited token, set already negated if `^` was given.
    CharClass(ClassSet),
    /// `%n`: record the cursor position; never counted.
    Position,
    /// `%%`: literal percent match.
    Percent,
}

/// A parsed scan directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSpec {
    /// `*` modifier: convert and validate but assign nothing.
    pub suppress: bool,
    /// Maximum field width; 0 means unspecified.
    pub width: usize,
    pub length: LengthMod,
    pub conversion: Conversion,
}

/// Parse a single scan directive starting after the `%` character.
///
/// `fmt` points to the first byte AFTER `%`. Returns `(spec, bytes_consumed)`
/// where `bytes_consumed` counts from `fmt[0]`. Returns `None` if the
/// directive is malformed (truncated at end of format, unknown conversion
/// letter, or unterminated bracket expression).
pub fn parse_scan_spec(fmt: &[u8]) -> Option<(ScanSpec, usize)> {
    let mut pos = 0;
    let len = fmt.len();

    // --- assignment suppression ---
    let suppress = pos < len && fmt[pos] == b'*';
    if suppress {
        pos += 1;
    }

    // --- width ---
    let start = pos;
    while pos < len && fmt[pos].is_ascii_digit() {
        pos += 1;
    }
    let width = if pos > start {
        parse_decimal(&fmt[start..pos])
    } else {
        0
    };

    // --- length modifier ---
    let length = if pos < len {
        match fmt[pos] {
            b'h' => {
                pos += 1;
                if pos < len && fmt[pos] == b'h' {
                    pos += 1;
                    LengthMod::Hh
                } else {
                    LengthMod::H
                }
            }
            b'l' => {
                pos += 1;
                if pos < len && fmt[pos] == b'l' {
                    pos += 1;
                    LengthMod::Ll
                } else {
                    LengthMod::L
                }
            }
            b'L' => {
                pos += 1;
                LengthMod::BigL
            }
            _ => LengthMod::None,
        }
    } else {
        LengthMod::None
    };

    // --- conversion specifier ---
    if pos >= len {
        return None;
    }
    let conv = fmt[pos];
    pos += 1;

    let conversion = match conv {
        b'd' => Conversion::Int {
            base: 10,
            signed: true,
        },
        b'i' => Conversion::Int {
            base: 0,
            signed: true,
        },
        b'u' => Conversion::Int {
            base: 10,
            signed: false,
        },
        b'o' => Conversion::Int {
            base: 8,
            signed: false,
        },
        b'x' | b'X' | b'p' => Conversion::Int {
            base: 16,
            signed: false,
        },
        b'f' | b'F' | b'e' | b'E' | b'g' | b'G' | b'a' | b'A' => Conversion::Float,
        b'c' => Conversion::Char,
        b's' => Conversion::Str,
        b'n' => Conversion::Position,
        b'%' => Conversion::Percent,
        b'[' => {
            let (set, used) = compile_class(&fmt[pos..])?;
            pos += used;
            Conversion::CharClass(set)
        }
        _ => return None,
    };

    Some((
        ScanSpec {
            suppress,
            width,
            length,
            conversion,
        },
        pos,
    ))
}

fn parse_decimal(digits: &[u8]) -> usize {
    digits
        .iter()
        .fold(0usize, |acc, &d| {
            acc.saturating_mul(10).saturating_add((d - b'0') as usize)
        })
}
