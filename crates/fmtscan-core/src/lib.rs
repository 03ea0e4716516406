//! # fmtscan-core
//!
//! Safe Rust implementation of the POSIX `sscanf` format-directed scanner.
//!
//! The engine scans an input byte buffer under the control of a format
//! string mixing literal bytes, whitespace, and `%`-directives, converts
//! matched substrings to typed values, and writes them into caller-supplied
//! [`Dest`] slots. The return value follows the C convention: the number of
//! successful, non-suppressed conversions, or -1 when the scan terminated
//! before the first format token completed.
//!
//! Reference: POSIX.1-2024 fscanf, ISO C11 7.21.6.2
//!
//! Unlike the C original, destinations are an ordered sequence of tagged
//! slots rather than variadic pointers: arity and buffer capacity are
//! validated, and violations surface as [`ScanError`] instead of undefined
//! behavior.

#![deny(unsafe_code)]

pub mod charclass;
pub mod dest;
pub mod directive;
#[cfg(feature = "float")]
pub mod float;
pub mod numeric;
pub mod scan;

pub use charclass::ClassSet;
pub use dest::{Dest, ScanError};
pub use directive::{Conversion, LengthMod, ScanSpec};
pub use scan::scan;
