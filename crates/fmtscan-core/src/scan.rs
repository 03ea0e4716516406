//! The scan driver.
//!
//! Walks the format string token by token: literal bytes must match the
//! input, whitespace runs collapse, and `%`-directives dispatch to the
//! converters. Termination and counting replicate the original
//! single-pass loop, restructured as an explicit dispatch returning
//! `Continue`/`Stop` instead of goto-style control flow.

use crate::dest::{Dest, ScanError, store_bytes, store_int, store_token};
use crate::directive::{Conversion, ScanSpec, parse_scan_spec};
use crate::numeric::{scan_signed, scan_unsigned};

/// Outcome of one format token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Stop,
}

/// Whitespace as the original defines it: any byte at or below 0x20.
#[inline]
fn is_space(b: u8) -> bool {
    b <= b' '
}

/// The input and format are treated as C strings: a NUL byte ends them.
fn clip_at_nul(s: &[u8]) -> &[u8] {
    match s.iter().position(|&b| b == 0) {
        Some(i) => &s[..i],
        None => s,
    }
}

/// Scan `input` under the control of `format`, writing converted values
/// into `slots` in directive order.
///
/// Returns the C-convention match count: -1 if the scan terminated before
/// the first format token completed, otherwise the number of successful,
/// non-suppressed, counted conversions. Suppressed directives and `%n`
/// are never counted.
///
/// `Err` is reserved for destination-list violations (arity, slot kind,
/// buffer capacity); input that merely fails to match is not an error.
///
/// ```
/// use fmtscan_core::{Dest, scan};
///
/// let mut value = 0i32;
/// let count = scan(b"-124", b"%d", &mut [Dest::I32(&mut value)]).unwrap();
/// assert_eq!(count, 1);
/// assert_eq!(value, -124);
/// ```
pub fn scan(input: &[u8], format: &[u8], slots: &mut [Dest<'_>]) -> Result<i32, ScanError> {
    let input = clip_at_nul(input);
    let format = clip_at_nul(format);

    let mut driver = Driver {
        input,
        cur: 0,
        slots,
        next_slot: 0,
        count: -1,
        bump_pending: true,
        directive_no: 0,
    };

    let mut fpos = 0;
    while fpos < format.len() {
        let step = match format[fpos] {
            b'%' => {
                let Some((spec, used)) = parse_scan_spec(&format[fpos + 1..]) else {
                    // Malformed directive: stop with the count so far.
                    return Ok(driver.count);
                };
                fpos += 1 + used;
                driver.directive_no += 1;
                driver.dispatch(&spec)?
            }
            b if is_space(b) => {
                // A whitespace run in the format skips any amount of input
                // whitespace; this never fails.
                while fpos < format.len() && is_space(format[fpos]) {
                    fpos += 1;
                }
                driver.skip_input_space();
                Step::Continue
            }
            literal => {
                fpos += 1;
                driver.match_literal(literal)
            }
        };
        match step {
            Step::Continue => {
                // The first format token of any kind that completes lifts
                // the count off the -1 sentinel.
                if driver.bump_pending {
                    driver.bump_pending = false;
                    driver.count += 1;
                }
            }
            Step::Stop => return Ok(driver.count),
        }
    }
    Ok(driver.count)
}

struct Driver<'i, 'd, 's> {
    input: &'i [u8],
    cur: usize,
    slots: &'d mut [Dest<'s>],
    next_slot: usize,
    count: i32,
    bump_pending: bool,
    directive_no: usize,
}

impl Driver<'_, '_, '_> {
    fn skip_input_space(&mut self) {
        while self.cur < self.input.len() && is_space(self.input[self.cur]) {
            self.cur += 1;
        }
    }

    fn match_literal(&mut self, literal: u8) -> Step {
        if self.cur < self.input.len() && self.input[self.cur] == literal {
            self.cur += 1;
            Step::Continue
        } else {
            Step::Stop
        }
    }

    /// Claim the next destination slot for a non-suppressed directive.
    fn claim_slot(&mut self) -> Result<usize, ScanError> {
        let idx = self.next_slot;
        if idx >= self.slots.len() {
            return Err(ScanError::MissingDestination {
                directive: self.directive_no,
            });
        }
        self.next_slot += 1;
        Ok(idx)
    }

    fn dispatch(&mut self, spec: &ScanSpec) -> Result<Step, ScanError> {
        match &spec.conversion {
            Conversion::Percent => Ok(self.match_percent()),
            Conversion::Position => self.record_position(spec),
            Conversion::Int { base, signed } => self.convert_int(spec, *base, *signed),
            Conversion::Float => self.convert_float(spec),
            Conversion::Char => self.take_chars(spec),
            Conversion::Str => self.take_token(spec),
            Conversion::CharClass(set) => self.take_class(spec, set),
        }
    }

    /// `%%`: literal percent after optional input whitespace.
    fn match_percent(&mut self) -> Step {
        self.skip_input_space();
        self.match_literal(b'%')
    }

    /// `%n`: record bytes consumed so far; consumes nothing, counts nothing.
    fn record_position(&mut self, spec: &ScanSpec) -> Result<Step, ScanError> {
        if !spec.suppress {
            let idx = self.claim_slot()?;
            match &mut self.slots[idx] {
                Dest::Pos(p) => **p = self.cur,
                other => {
                    return Err(ScanError::DestinationMismatch {
                        directive: self.directive_no,
                        expected: "position",
                        found: other.kind(),
                    });
                }
            }
        }
        Ok(Step::Continue)
    }

    /// Integer family: `%d`/`%i`/`%o`/`%u`/`%x`/`%X`/`%p`.
    fn convert_int(&mut self, spec: &ScanSpec, base: u32, signed: bool) -> Result<Step, ScanError> {
        self.skip_input_space();
        let rest = &self.input[self.cur..];
        // A width in [1, 64] caps the conversion source; any other width
        // converts from the live input (the original's scratch-buffer rule).
        let src = if (1..=64).contains(&spec.width) {
            &rest[..rest.len().min(spec.width)]
        } else {
            rest
        };
        let scanned = if signed {
            scan_signed(src, base)
        } else {
            scan_unsigned(src, base)
        };
        let Some(num) = scanned else {
            return Ok(Step::Stop);
        };
        self.cur += num.consumed;
        if !spec.suppress {
            let idx = self.claim_slot()?;
            store_int(&mut self.slots[idx], num.raw, self.directive_no)?;
            self.count += 1;
        }
        Ok(Step::Continue)
    }

    #[cfg(feature = "float")]
    fn convert_float(&mut self, spec: &ScanSpec) -> Result<Step, ScanError> {
        self.skip_input_space();
        let rest = &self.input[self.cur..];
        let src = if (1..=64).contains(&spec.width) {
            &rest[..rest.len().min(spec.width)]
        } else {
            rest
        };
        let Some(f) = crate::float::scan_float(src) else {
            return Ok(Step::Stop);
        };
        self.cur += f.consumed;
        if !spec.suppress {
            let idx = self.claim_slot()?;
            crate::dest::store_float(&mut self.slots[idx], f.value, self.directive_no)?;
            self.count += 1;
        }
        Ok(Step::Continue)
    }

    /// Without the `float` feature a float directive terminates the scan,
    /// as the original does when built without floating-point support.
    #[cfg(not(feature = "float"))]
    fn convert_float(&mut self, _spec: &ScanSpec) -> Result<Step, ScanError> {
        Ok(Step::Stop)
    }

    /// `%c`: raw bytes, no whitespace skip.
    fn take_chars(&mut self, spec: &ScanSpec) -> Result<Step, ScanError> {
        if spec.width < 2 {
            if self.cur >= self.input.len() {
                return Ok(Step::Stop);
            }
            if !spec.suppress {
                let idx = self.claim_slot()?;
                let b = self.input[self.cur];
                store_bytes(&mut self.slots[idx], &[b], self.directive_no)?;
                self.count += 1;
            }
            self.cur += 1;
            return Ok(Step::Continue);
        }

        let remaining = self.input.len() - self.cur;
        if remaining < spec.width {
            return Ok(Step::Stop);
        }
        if !spec.suppress {
            let idx = self.claim_slot()?;
            let bytes = &self.input[self.cur..self.cur + spec.width];
            store_bytes(&mut self.slots[idx], bytes, self.directive_no)?;
            self.count += 1;
        }
        // Historical quirk, preserved: with an explicit width the cursor
        // advances past the entire remaining input, not just `width` bytes.
        self.cur = self.input.len();
        Ok(Step::Continue)
    }

    /// `%s`: whitespace-delimited token.
    fn take_token(&mut self, spec: &ScanSpec) -> Result<Step, ScanError> {
        self.skip_input_space();
        let limit = if spec.width == 0 {
            usize::MAX
        } else {
            spec.width
        };
        let start = self.cur;
        let mut end = self.cur;
        while end < self.input.len() && !is_space(self.input[end]) && end - start < limit {
            end += 1;
        }
        self.finish_token(spec, start, end)
    }

    /// `%[...]`: class-delimited token, no whitespace skip.
    fn take_class(
        &mut self,
        spec: &ScanSpec,
        set: &crate::charclass::ClassSet,
    ) -> Result<Step, ScanError> {
        let limit = if spec.width == 0 {
            usize::MAX
        } else {
            spec.width
        };
        let start = self.cur;
        let mut end = self.cur;
        while end < self.input.len() && set.contains(self.input[end]) && end - start < limit {
            end += 1;
        }
        self.finish_token(spec, start, end)
    }

    fn finish_token(&mut self, spec: &ScanSpec, start: usize, end: usize) -> Result<Step, ScanError> {
        if end == start {
            // Zero bytes matched: the directive fails.
            return Ok(Step::Stop);
        }
        self.cur = end;
        if !spec.suppress {
            let idx = self.claim_slot()?;
            let token = &self.input[start..end];
            store_token(&mut self.slots[idx], token, self.directive_no)?;
            self.count += 1;
        }
        Ok(Step::Continue)
    }
}
