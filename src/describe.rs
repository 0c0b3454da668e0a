//! Struct Descriptions - Generation Input
//!
//! Produced by an upstream source inspector that has already located
//! the struct, classified each field's declared type, and parsed its
//! tag into rule tokens. Field order here is emission order.

use serde::{Deserialize, Serialize};

use crate::rules::{parse_tag, ParseRuleError, RuleToken, TypeClass};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructDescription {
    pub name: String,
    pub package_name: String,
    /// Informational only: emission is decided by each field's rules.
    #[serde(default)]
    pub declares_validation: bool,
    #[serde(default)]
    pub fields: Vec<FieldDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescription {
    pub name: String,
    pub type_class: TypeClass,
    /// Raw tag text, kept for diagnostics. Never reparsed by the core.
    #[serde(default)]
    pub raw_tag: String,
    #[serde(default)]
    pub rules: Vec<RuleToken>,
}

impl FieldDescription {
    /// Build a field by parsing its tag value, e.g. `"required,gte=5"`.
    /// Convenience for upstream inspectors; keeps `raw_tag` and `rules`
    /// in sync.
    pub fn from_tag(name: &str, type_class: TypeClass, tag: &str) -> Result<Self, ParseRuleError> {
        Ok(Self {
            name: name.to_string(),
            type_class,
            raw_tag: tag.to_string(),
            rules: parse_tag(tag)?,
        })
    }
}

impl StructDescription {
    pub fn new(name: &str, package_name: &str) -> Self {
        Self {
            name: name.to_string(),
            package_name: package_name.to_string(),
            declares_validation: false,
            fields: Vec::new(),
        }
    }

    /// Total number of checks this description will emit.
    pub fn rule_count(&self) -> usize {
        self.fields.iter().map(|f| f.rules.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_tag_keeps_raw_text() {
        let field = FieldDescription::from_tag("FirstName", TypeClass::Textual, "required").unwrap();
        assert_eq!(field.raw_tag, "required");
        assert_eq!(field.rules, vec![RuleToken::Required]);
    }

    #[test]
    fn test_rule_count_spans_fields() {
        let mut desc = StructDescription::new("User", "main");
        desc.fields.push(
            FieldDescription::from_tag("FirstName", TypeClass::Textual, "required,gte=5").unwrap(),
        );
        desc.fields
            .push(FieldDescription::from_tag("MyAge", TypeClass::Unsigned, "lte=130").unwrap());
        assert_eq!(desc.rule_count(), 3);
    }

    #[test]
    fn test_description_deserializes_tag_clauses() {
        let payload = r#"{
            "name": "User",
            "packageName": "main",
            "declaresValidation": true,
            "fields": [
                {"name": "FirstName", "typeClass": "textual", "rules": ["required", "gte=5"]}
            ]
        }"#;
        let desc: StructDescription = serde_json::from_str(payload).unwrap();
        assert_eq!(desc.fields[0].rules[1], RuleToken::MinBound(5));
    }
}
