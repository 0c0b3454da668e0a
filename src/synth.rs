//! Expression Synthesizer - One Rule, One Check
//!
//! Maps a (rule, type class) pair to a comparison shape. The match is
//! exhaustive; a pair outside the table is an error, never a guessed
//! fallback.

use crate::pipeline::GenerateError;
use crate::rules::{RuleToken, TypeClass};
use crate::syntax::SyntaxTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Lt,
    Gt,
}

impl CmpOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
        }
    }
}

/// One synthesized runtime comparison plus its failure message.
/// Transient: produced per rule, rendered into a guard block, dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckExpr {
    pub loperand: String,
    pub operator: CmpOp,
    pub roperand: String,
    pub message: String,
}

/// Synthesize the check for one rule on one field.
///
/// Bound rules compare the value for unsigned fields and the length
/// for textual fields; the two shapes are never interchanged.
pub fn synthesize(
    field_name: &str,
    rule: RuleToken,
    class: TypeClass,
    syntax: &SyntaxTemplate,
) -> Result<CheckExpr, GenerateError> {
    let access = syntax.accessor(field_name);

    match (rule, class) {
        (RuleToken::Required, TypeClass::Textual) => Ok(CheckExpr {
            loperand: access,
            operator: CmpOp::Eq,
            roperand: syntax.empty_string_literal().to_string(),
            message: format!("{} required", field_name),
        }),
        (RuleToken::Required, TypeClass::Unsigned) => Ok(CheckExpr {
            loperand: access,
            operator: CmpOp::Eq,
            roperand: syntax.zero_literal().to_string(),
            message: format!("{} required", field_name),
        }),
        (RuleToken::MinBound(n), TypeClass::Unsigned) => Ok(CheckExpr {
            loperand: access,
            operator: CmpOp::Lt,
            roperand: n.to_string(),
            message: format!("{} must be >= {}", field_name, n),
        }),
        (RuleToken::MaxBound(n), TypeClass::Unsigned) => Ok(CheckExpr {
            loperand: access,
            operator: CmpOp::Gt,
            roperand: n.to_string(),
            message: format!("{} must be <= {}", field_name, n),
        }),
        (RuleToken::MinBound(n), TypeClass::Textual) => Ok(CheckExpr {
            loperand: syntax.length_of(&access),
            operator: CmpOp::Lt,
            roperand: n.to_string(),
            message: format!("length {} must be >= {}", field_name, n),
        }),
        (RuleToken::MaxBound(n), TypeClass::Textual) => Ok(CheckExpr {
            loperand: syntax.length_of(&access),
            operator: CmpOp::Gt,
            roperand: n.to_string(),
            message: format!("length {} must be <= {}", field_name, n),
        }),
        (rule, TypeClass::Boolean) => Err(GenerateError::UnsupportedCombination {
            field: field_name.to_string(),
            rule,
            class,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synth(field: &str, rule: RuleToken, class: TypeClass) -> Result<CheckExpr, GenerateError> {
        synthesize(field, rule, class, &SyntaxTemplate::go())
    }

    #[test]
    fn test_synthesis_table() {
        let cases = [
            (
                "myfield1",
                RuleToken::Required,
                TypeClass::Textual,
                ("obj.myfield1", CmpOp::Eq, r#""""#, "myfield1 required"),
            ),
            (
                "myfield2",
                RuleToken::Required,
                TypeClass::Unsigned,
                ("obj.myfield2", CmpOp::Eq, "0", "myfield2 required"),
            ),
            (
                "myfield3",
                RuleToken::MinBound(0),
                TypeClass::Unsigned,
                ("obj.myfield3", CmpOp::Lt, "0", "myfield3 must be >= 0"),
            ),
            (
                "myfield4",
                RuleToken::MaxBound(130),
                TypeClass::Unsigned,
                ("obj.myfield4", CmpOp::Gt, "130", "myfield4 must be <= 130"),
            ),
            (
                "myfield5",
                RuleToken::MinBound(5),
                TypeClass::Textual,
                (
                    "len(obj.myfield5)",
                    CmpOp::Lt,
                    "5",
                    "length myfield5 must be >= 5",
                ),
            ),
            (
                "myfield6",
                RuleToken::MaxBound(10),
                TypeClass::Textual,
                (
                    "len(obj.myfield6)",
                    CmpOp::Gt,
                    "10",
                    "length myfield6 must be <= 10",
                ),
            ),
        ];

        for (field, rule, class, (lop, op, rop, msg)) in cases {
            let check = synth(field, rule, class).unwrap();
            assert_eq!(
                check,
                CheckExpr {
                    loperand: lop.to_string(),
                    operator: op,
                    roperand: rop.to_string(),
                    message: msg.to_string(),
                },
                "case: {} {} {}",
                field,
                rule,
                class
            );
        }
    }

    #[test]
    fn test_boolean_fields_unsupported() {
        let err = synth("Active", RuleToken::Required, TypeClass::Boolean).unwrap_err();
        match err {
            GenerateError::UnsupportedCombination { field, rule, class } => {
                assert_eq!(field, "Active");
                assert_eq!(rule, RuleToken::Required);
                assert_eq!(class, TypeClass::Boolean);
            }
            other => panic!("expected UnsupportedCombination, got {other:?}"),
        }
    }
}
