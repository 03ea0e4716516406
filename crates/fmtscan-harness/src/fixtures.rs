//! Fixture loading and management.

use serde::{Deserialize, Serialize};

use crate::HarnessError;

/// Expected post-scan state of one destination slot. The variant also
/// determines the slot type the runner allocates for the case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ExpectedValue {
    /// Signed integer slot (64-bit).
    Int(i64),
    /// Unsigned integer slot (64-bit).
    Uint(u64),
    /// Float slot (64-bit).
    Float(f64),
    /// Growable `%s`/`%[` token slot.
    Token(String),
    /// Fixed `%c` byte buffer; the string length sets the capacity.
    Bytes(String),
    /// `%n` position slot.
    Pos(usize),
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Input text handed to the scanner.
    pub input: String,
    /// Format string.
    pub format: String,
    /// Expected return count (C convention, -1 sentinel included).
    pub expected_count: i32,
    /// Expected slot states, in directive order.
    pub expected: Vec<ExpectedValue>,
}

/// A collection of fixture cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Suite name.
    pub family: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &std::path::Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_round_trip() {
        let set = FixtureSet {
            version: "1".into(),
            family: "scan".into(),
            cases: vec![FixtureCase {
                name: "decimal".into(),
                input: "124".into(),
                format: "%d".into(),
                expected_count: 1,
                expected: vec![ExpectedValue::Int(124)],
            }],
        };
        let json = set.to_json().unwrap();
        let back = FixtureSet::from_json(&json).unwrap();
        assert_eq!(back.cases.len(), 1);
        assert_eq!(back.cases[0].expected, vec![ExpectedValue::Int(124)]);
    }

    #[test]
    fn test_expected_value_tagging() {
        let v: ExpectedValue =
            serde_json::from_str(r#"{"kind":"token","value":"abc"}"#).unwrap();
        assert_eq!(v, ExpectedValue::Token("abc".into()));
        let v: ExpectedValue = serde_json::from_str(r#"{"kind":"pos","value":3}"#).unwrap();
        assert_eq!(v, ExpectedValue::Pos(3));
    }
}
