//! Destination slots and the caller-contract error type.
//!
//! The C original receives its output targets as variadic pointers and
//! trusts the caller for arity, typing, and buffer capacity. Here the
//! caller builds an ordered sequence of tagged slots instead, and the
//! engine checks all three, reporting violations as [`ScanError`].

use thiserror::Error;

/// A caller-owned write target for one non-suppressed directive.
///
/// Integer slots define the stored width; the engine truncates the
/// converted value to the slot (the C behavior of writing through a
/// narrower pointer). `Bytes` is the raw `%c` target and doubles as a
/// bounded, NUL-terminated C-style target for `%s`/`%[`; `Token` is the
/// growable target for the same conversions.
#[derive(Debug)]
pub enum Dest<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    #[cfg(feature = "float")]
    F32(&'a mut f32),
    #[cfg(feature = "float")]
    F64(&'a mut f64),
    /// Fixed-capacity byte buffer.
    Bytes(&'a mut [u8]),
    /// Growable token buffer; cleared before the token is written.
    Token(&'a mut Vec<u8>),
    /// Cursor position target for `%n`.
    Pos(&'a mut usize),
}

impl Dest<'_> {
    /// Slot kind name used in mismatch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Dest::I8(_) | Dest::I16(_) | Dest::I32(_) | Dest::I64(_) => "signed integer",
            Dest::U8(_) | Dest::U16(_) | Dest::U32(_) | Dest::U64(_) => "unsigned integer",
            #[cfg(feature = "float")]
            Dest::F32(_) | Dest::F64(_) => "float",
            Dest::Bytes(_) => "byte buffer",
            Dest::Token(_) => "token buffer",
            Dest::Pos(_) => "position",
        }
    }
}

/// Caller-contract violations.
///
/// These never arise from input that merely fails to match; match failures
/// terminate the scan and surface through the returned count. An `Err`
/// means the destination list itself did not fit the format string.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    #[error("directive {directive} has no destination slot")]
    MissingDestination { directive: usize },
    #[error("directive {directive} expects a {expected} slot, found {found}")]
    DestinationMismatch {
        directive: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("destination buffer too small: need {needed} bytes, have {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
}

/// Store a converted integer bit pattern, truncating to the slot width.
pub(crate) fn store_int(
    slot: &mut Dest<'_>,
    raw: u64,
    directive: usize,
) -> Result<(), ScanError> {
    match slot {
        Dest::I8(p) => **p = raw as i8,
        Dest::I16(p) => **p = raw as i16,
        Dest::I32(p) => **p = raw as i32,
        Dest::I64(p) => **p = raw as i64,
        Dest::U8(p) => **p = raw as u8,
        Dest::U16(p) => **p = raw as u16,
        Dest::U32(p) => **p = raw as u32,
        Dest::U64(p) => **p = raw,
        other => {
            return Err(ScanError::DestinationMismatch {
                directive,
                expected: "integer",
                found: other.kind(),
            });
        }
    }
    Ok(())
}

/// Store a converted float, narrowing to the slot width.
#[cfg(feature = "float")]
pub(crate) fn store_float(
    slot: &mut Dest<'_>,
    value: f64,
    directive: usize,
) -> Result<(), ScanError> {
    match slot {
        Dest::F32(p) => **p = value as f32,
        Dest::F64(p) => **p = value,
        other => {
            return Err(ScanError::DestinationMismatch {
                directive,
                expected: "float",
                found: other.kind(),
            });
        }
    }
    Ok(())
}

/// Store a `%s`/`%[` token. `Token` slots are cleared and refilled; `Bytes`
/// slots get the C layout (token plus NUL terminator) with a capacity check.
pub(crate) fn store_token(
    slot: &mut Dest<'_>,
    token: &[u8],
    directive: usize,
) -> Result<(), ScanError> {
    match slot {
        Dest::Token(v) => {
            v.clear();
            v.extend_from_slice(token);
        }
        Dest::Bytes(buf) => {
            let needed = token.len() + 1;
            if buf.len() < needed {
                return Err(ScanError::BufferTooSmall {
                    needed,
                    capacity: buf.len(),
                });
            }
            buf[..token.len()].copy_from_slice(token);
            buf[token.len()] = 0;
        }
        other => {
            return Err(ScanError::DestinationMismatch {
                directive,
                expected: "token buffer",
                found: other.kind(),
            });
        }
    }
    Ok(())
}

/// Store raw `%c` bytes (no terminator) with a capacity check.
pub(crate) fn store_bytes(
    slot: &mut Dest<'_>,
    bytes: &[u8],
    directive: usize,
) -> Result<(), ScanError> {
    match slot {
        Dest::Bytes(buf) => {
            if buf.len() < bytes.len() {
                return Err(ScanError::BufferTooSmall {
                    needed: bytes.len(),
                    capacity: buf.len(),
                });
            }
            buf[..bytes.len()].copy_from_slice(bytes);
        }
        other => {
            return Err(ScanError::DestinationMismatch {
                directive,
                expected: "byte buffer",
                found: other.kind(),
            });
        }
    }
    Ok(())
}
