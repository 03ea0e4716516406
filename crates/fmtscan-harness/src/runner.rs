//! Fixture execution engine.
//!
//! Allocates destination slots from fixture expectations (or infers them
//! from a format string), drives `fmtscan_core::scan`, and compares the
//! observed count and slot states against the expected ones.

use fmtscan_core::directive::{Conversion, LengthMod, parse_scan_spec};
use fmtscan_core::{Dest, scan};

use crate::HarnessError;
use crate::fixtures::{ExpectedValue, FixtureCase, FixtureSet};

/// Owned backing storage for one destination slot.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedSlot {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bytes(Vec<u8>),
    Token(Vec<u8>),
    Pos(usize),
}

impl OwnedSlot {
    /// Storage for a fixture expectation (wide integer/float slots).
    pub fn for_expected(expected: &ExpectedValue) -> Self {
        match expected {
            ExpectedValue::Int(_) => OwnedSlot::I64(0),
            ExpectedValue::Uint(_) => OwnedSlot::U64(0),
            ExpectedValue::Float(_) => OwnedSlot::F64(0.0),
            ExpectedValue::Token(_) => OwnedSlot::Token(Vec::new()),
            ExpectedValue::Bytes(s) => OwnedSlot::Bytes(vec![0; s.len()]),
            ExpectedValue::Pos(_) => OwnedSlot::Pos(0),
        }
    }

    /// Borrow as a scan destination.
    pub fn as_dest(&mut self) -> Dest<'_> {
        match self {
            OwnedSlot::I8(v) => Dest::I8(v),
            OwnedSlot::I16(v) => Dest::I16(v),
            OwnedSlot::I32(v) => Dest::I32(v),
            OwnedSlot::I64(v) => Dest::I64(v),
            OwnedSlot::U8(v) => Dest::U8(v),
            OwnedSlot::U16(v) => Dest::U16(v),
            OwnedSlot::U32(v) => Dest::U32(v),
            OwnedSlot::U64(v) => Dest::U64(v),
            OwnedSlot::F32(v) => Dest::F32(v),
            OwnedSlot::F64(v) => Dest::F64(v),
            OwnedSlot::Bytes(v) => Dest::Bytes(v.as_mut_slice()),
            OwnedSlot::Token(v) => Dest::Token(v),
            OwnedSlot::Pos(v) => Dest::Pos(v),
        }
    }

    /// Post-scan state, rendered in fixture-value form.
    pub fn snapshot(&self) -> ExpectedValue {
        match self {
            OwnedSlot::I8(v) => ExpectedValue::Int(i64::from(*v)),
            OwnedSlot::I16(v) => ExpectedValue::Int(i64::from(*v)),
            OwnedSlot::I32(v) => ExpectedValue::Int(i64::from(*v)),
            OwnedSlot::I64(v) => ExpectedValue::Int(*v),
            OwnedSlot::U8(v) => ExpectedValue::Uint(u64::from(*v)),
            OwnedSlot::U16(v) => ExpectedValue::Uint(u64::from(*v)),
            OwnedSlot::U32(v) => ExpectedValue::Uint(u64::from(*v)),
            OwnedSlot::U64(v) => ExpectedValue::Uint(*v),
            OwnedSlot::F32(v) => ExpectedValue::Float(f64::from(*v)),
            OwnedSlot::F64(v) => ExpectedValue::Float(*v),
            OwnedSlot::Bytes(v) => {
                ExpectedValue::Bytes(String::from_utf8_lossy(v).into_owned())
            }
            OwnedSlot::Token(v) => {
                ExpectedValue::Token(String::from_utf8_lossy(v).into_owned())
            }
            OwnedSlot::Pos(v) => ExpectedValue::Pos(*v),
        }
    }
}

/// Outcome of one fixture case.
#[derive(Debug, Clone)]
pub struct VerificationResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    pub diff: Option<String>,
}

/// Run a single fixture case.
pub fn run_case(case: &FixtureCase) -> Result<VerificationResult, HarnessError> {
    let mut storage: Vec<OwnedSlot> = case.expected.iter().map(OwnedSlot::for_expected).collect();
    let count = {
        let mut slots: Vec<Dest<'_>> = storage.iter_mut().map(OwnedSlot::as_dest).collect();
        scan(case.input.as_bytes(), case.format.as_bytes(), &mut slots)?
    };

    let actual_values: Vec<ExpectedValue> = storage.iter().map(OwnedSlot::snapshot).collect();
    let count_ok = count == case.expected_count;
    let values_ok = case.expected.len() == actual_values.len()
        && case
            .expected
            .iter()
            .zip(&actual_values)
            .all(|(e, a)| values_match(e, a));

    let expected = render(case.expected_count, &case.expected);
    let actual = render(count, &actual_values);
    let passed = count_ok && values_ok;
    let diff = if passed {
        None
    } else {
        Some(format!("- {expected}\n+ {actual}"))
    };

    Ok(VerificationResult {
        case_name: case.name.clone(),
        passed,
        expected,
        actual,
        diff,
    })
}

/// Run all cases in a fixture set.
pub fn run_set(set: &FixtureSet) -> Result<Vec<VerificationResult>, HarnessError> {
    set.cases.iter().map(run_case).collect()
}

fn values_match(expected: &ExpectedValue, actual: &ExpectedValue) -> bool {
    match (expected, actual) {
        // Floats compare with tolerance; everything else exactly.
        (ExpectedValue::Float(e), ExpectedValue::Float(a)) => {
            (e - a).abs() < 1e-6 * e.abs().max(1.0)
        }
        (e, a) => e == a,
    }
}

fn render(count: i32, values: &[ExpectedValue]) -> String {
    let body = serde_json::to_string(values).unwrap_or_else(|_| "<unrenderable>".into());
    format!("count={count} values={body}")
}

/// Infer destination slots from a format string: one slot per
/// non-suppressed directive, sized by its length modifier.
///
/// Used by the CLI `scan` subcommand, where no fixture declares the slot
/// list. Inference stops where the driver would stop (malformed
/// directive), so the slot list always covers every directive the scan
/// can reach.
pub fn infer_slots(format: &[u8]) -> Vec<OwnedSlot> {
    let mut slots = Vec::new();
    let mut pos = 0;
    while pos < format.len() {
        if format[pos] != b'%' {
            pos += 1;
            continue;
        }
        let Some((spec, used)) = parse_scan_spec(&format[pos + 1..]) else {
            break;
        };
        pos += 1 + used;
        if spec.suppress {
            continue;
        }
        let slot = match spec.conversion {
            Conversion::Int { signed: true, .. } => match spec.length {
                LengthMod::Hh => OwnedSlot::I8(0),
                LengthMod::H => OwnedSlot::I16(0),
                LengthMod::None => OwnedSlot::I32(0),
                LengthMod::L | LengthMod::Ll | LengthMod::BigL => OwnedSlot::I64(0),
            },
            Conversion::Int { signed: false, .. } => match spec.length {
                LengthMod::Hh => OwnedSlot::U8(0),
                LengthMod::H => OwnedSlot::U16(0),
                LengthMod::None => OwnedSlot::U32(0),
                LengthMod::L | LengthMod::Ll | LengthMod::BigL => OwnedSlot::U64(0),
            },
            Conversion::Float => match spec.length {
                LengthMod::None | LengthMod::Hh | LengthMod::H => OwnedSlot::F32(0.0),
                LengthMod::L | LengthMod::Ll | LengthMod::BigL => OwnedSlot::F64(0.0),
            },
            Conversion::Char => OwnedSlot::Bytes(vec![0; spec.width.max(1)]),
            Conversion::Str | Conversion::CharClass(_) => OwnedSlot::Token(Vec::new()),
            Conversion::Position => OwnedSlot::Pos(0),
            Conversion::Percent => continue,
        };
        slots.push(slot);
    }
    slots
}

/// Scan ad hoc input with inferred slots; returns the count and the
/// post-scan slot snapshots.
pub fn scan_with_inferred(
    input: &str,
    format: &str,
) -> Result<(i32, Vec<ExpectedValue>), HarnessError> {
    let mut storage = infer_slots(format.as_bytes());
    let count = {
        let mut slots: Vec<Dest<'_>> = storage.iter_mut().map(OwnedSlot::as_dest).collect();
        scan(input.as_bytes(), format.as_bytes(), &mut slots)?
    };
    let values = storage.iter().map(OwnedSlot::snapshot).collect();
    Ok((count, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixtureCase;

    fn case(name: &str, input: &str, format: &str, count: i32, expected: Vec<ExpectedValue>) -> FixtureCase {
        FixtureCase {
            name: name.into(),
            input: input.into(),
            format: format.into(),
            expected_count: count,
            expected,
        }
    }

    #[test]
    fn test_passing_case() {
        let c = case(
            "mixed",
            "12 abc",
            "%d %s",
            2,
            vec![ExpectedValue::Int(12), ExpectedValue::Token("abc".into())],
        );
        let result = run_case(&c).unwrap();
        assert!(result.passed, "diff: {:?}", result.diff);
    }

    #[test]
    fn test_failing_case_produces_diff() {
        let c = case("wrong", "12", "%d", 1, vec![ExpectedValue::Int(99)]);
        let result = run_case(&c).unwrap();
        assert!(!result.passed);
        assert!(result.diff.is_some());
    }

    #[test]
    fn test_eof_sentinel_case() {
        let c = case("eof", "", "%u", -1, vec![ExpectedValue::Uint(0)]);
        let result = run_case(&c).unwrap();
        assert!(result.passed, "diff: {:?}", result.diff);
    }

    #[test]
    fn test_infer_slots() {
        let slots = infer_slots(b"%d %*u %hhx %3c %[a-z] %lln %s");
        assert_eq!(
            slots,
            vec![
                OwnedSlot::I32(0),
                OwnedSlot::U8(0),
                OwnedSlot::Bytes(vec![0; 3]),
                OwnedSlot::Token(Vec::new()),
                OwnedSlot::Pos(0),
                OwnedSlot::Token(Vec::new()),
            ]
        );
    }

    #[test]
    fn test_scan_with_inferred() {
        let (count, values) = scan_with_inferred("42 hello", "%u %s").unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            values,
            vec![
                ExpectedValue::Uint(42),
                ExpectedValue::Token("hello".into())
            ]
        );
    }
}
