//! Rule Vocabulary - Closed Tag Set
//!
//! Rules are a closed sum type; the synthesizer matches on it
//! exhaustively, so adding a rule is a compile-checked change.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A parsed validation directive from a struct tag.
///
/// Bounds are non-negative; a malformed operand is rejected here at
/// parse time and never reaches the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleToken {
    /// Value must differ from the type's zero value.
    Required,
    /// Value (or length, for textual fields) must be >= N. Tag: `gte=N`.
    MinBound(u32),
    /// Value (or length, for textual fields) must be <= N. Tag: `lte=N`.
    MaxBound(u32),
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleToken::Required => write!(f, "required"),
            RuleToken::MinBound(n) => write!(f, "gte={}", n),
            RuleToken::MaxBound(n) => write!(f, "lte={}", n),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseRuleError {
    #[error("Unknown rule clause: {0}")]
    UnknownClause(String),

    #[error("Malformed bound in clause {clause}: {reason}")]
    MalformedBound { clause: String, reason: String },
}

impl FromStr for RuleToken {
    type Err = ParseRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "required" {
            return Ok(RuleToken::Required);
        }
        if let Some(raw) = s.strip_prefix("gte=") {
            return parse_bound(s, raw).map(RuleToken::MinBound);
        }
        if let Some(raw) = s.strip_prefix("lte=") {
            return parse_bound(s, raw).map(RuleToken::MaxBound);
        }
        Err(ParseRuleError::UnknownClause(s.to_string()))
    }
}

fn parse_bound(clause: &str, raw: &str) -> Result<u32, ParseRuleError> {
    raw.parse::<u32>()
        .map_err(|e| ParseRuleError::MalformedBound {
            clause: clause.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a comma-separated tag value, e.g. `"required,gte=5"`.
///
/// Empty input yields no rules (the field contributes no checks).
pub fn parse_tag(tag: &str) -> Result<Vec<RuleToken>, ParseRuleError> {
    tag.split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(str::parse)
        .collect()
}

// Rules appear in description payloads as their tag clauses, so the
// wire form and the source annotation are the same text.
impl Serialize for RuleToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RuleToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let clause = String::deserialize(deserializer)?;
        clause.parse().map_err(D::Error::custom)
    }
}

/// Classification of a field's declared type, chosen by lookup rather
/// than per-type branching so the rule/type matrix stays explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeClass {
    Textual,
    Unsigned,
    Boolean,
}

impl TypeClass {
    /// Classify a declared type name as written in the source.
    /// Unknown names are unclassified, not coerced.
    pub fn classify(type_name: &str) -> Option<TypeClass> {
        match type_name {
            "string" => Some(TypeClass::Textual),
            "uint" | "uint8" | "uint16" | "uint32" | "uint64" => Some(TypeClass::Unsigned),
            "bool" => Some(TypeClass::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeClass::Textual => write!(f, "textual"),
            TypeClass::Unsigned => write!(f, "unsigned"),
            TypeClass::Boolean => write!(f, "boolean"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_clauses() {
        assert_eq!("required".parse(), Ok(RuleToken::Required));
        assert_eq!("gte=5".parse(), Ok(RuleToken::MinBound(5)));
        assert_eq!("lte=130".parse(), Ok(RuleToken::MaxBound(130)));
        assert_eq!("gte=0".parse(), Ok(RuleToken::MinBound(0)));
    }

    #[test]
    fn test_parse_tag_multi_clause() {
        let rules = parse_tag("required,gte=5").unwrap();
        assert_eq!(rules, vec![RuleToken::Required, RuleToken::MinBound(5)]);
    }

    #[test]
    fn test_unknown_clause_rejected() {
        let err = "email".parse::<RuleToken>().unwrap_err();
        assert_eq!(err, ParseRuleError::UnknownClause("email".to_string()));
    }

    #[test]
    fn test_malformed_bound_rejected() {
        assert!(matches!(
            "gte=abc".parse::<RuleToken>(),
            Err(ParseRuleError::MalformedBound { .. })
        ));
        // Negative bounds are malformed, not coerced
        assert!(matches!(
            "lte=-1".parse::<RuleToken>(),
            Err(ParseRuleError::MalformedBound { .. })
        ));
    }

    #[test]
    fn test_classify_known_types() {
        assert_eq!(TypeClass::classify("string"), Some(TypeClass::Textual));
        assert_eq!(TypeClass::classify("uint8"), Some(TypeClass::Unsigned));
        assert_eq!(TypeClass::classify("bool"), Some(TypeClass::Boolean));
        assert_eq!(TypeClass::classify("chan int"), None);
    }

    #[test]
    fn test_rule_round_trips_as_tag_text() {
        let json = serde_json::to_string(&RuleToken::MinBound(5)).unwrap();
        assert_eq!(json, r#""gte=5""#);
        let back: RuleToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RuleToken::MinBound(5));
    }
}
