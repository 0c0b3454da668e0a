//! Syntax Templates - Emission as Data
//!
//! The emitted language's exact surface (preamble, literals, accessor
//! and guard shapes) lives here, so classification and synthesis never
//! touch target-language keywords.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::synth::CheckExpr;

pub type SyntaxId = String;

/// The built-in template registered in every registry.
pub const GO_SYNTAX_ID: &str = "go";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxTemplate {
    pub id: SyntaxId,
    pub description: String,
    #[serde(default = "default_version")]
    pub template_version: String,
    #[serde(default = "default_version")]
    pub engine_min_version: String,
    #[serde(default = "default_func_suffix")]
    pub func_suffix: String,
    #[serde(default = "default_receiver")]
    pub receiver: String,
    #[serde(default = "default_errs_var")]
    pub errs_var: String,
    #[serde(default = "default_sentinel")]
    pub sentinel_error: String,
    #[serde(default = "default_error_ctor")]
    pub error_ctor: String,
    #[serde(default = "default_imports")]
    pub imports: Vec<String>,
}

fn default_version() -> String {
    crate::MIN_SYNTAX_VERSION.to_string()
}
fn default_func_suffix() -> String {
    "Validate".to_string()
}
fn default_receiver() -> String {
    "obj".to_string()
}
fn default_errs_var() -> String {
    "errs".to_string()
}
fn default_sentinel() -> String {
    "ErrValidation".to_string()
}
fn default_error_ctor() -> String {
    "fmt.Errorf".to_string()
}
fn default_imports() -> Vec<String> {
    vec!["fmt".to_string()]
}

impl SyntaxTemplate {
    /// The built-in Go surface.
    pub fn go() -> Self {
        Self {
            id: GO_SYNTAX_ID.to_string(),
            description: "Go validator functions".to_string(),
            template_version: default_version(),
            engine_min_version: default_version(),
            func_suffix: default_func_suffix(),
            receiver: default_receiver(),
            errs_var: default_errs_var(),
            sentinel_error: default_sentinel(),
            error_ctor: default_error_ctor(),
            imports: default_imports(),
        }
    }

    /// Direct field access, e.g. `obj.FirstName`.
    pub fn accessor(&self, field_name: &str) -> String {
        format!("{}.{}", self.receiver, field_name)
    }

    /// Length-of accessor, e.g. `len(obj.FirstName)`.
    pub fn length_of(&self, accessor: &str) -> String {
        format!("len({})", accessor)
    }

    pub fn empty_string_literal(&self) -> &'static str {
        r#""""#
    }

    pub fn zero_literal(&self) -> &'static str {
        "0"
    }

    /// Package clause plus the import block.
    pub fn render_preamble(&self, package_name: &str) -> String {
        let mut out = format!("package {}\n\n", package_name);
        out.push_str("import (\n");
        for import in &self.imports {
            out.push_str(&format!("\t\"{}\"\n", import));
        }
        out.push_str(")\n\n");
        out
    }

    /// Function signature and result declaration, e.g.
    /// `func UserValidate(obj *User) []error`.
    pub fn render_func_open(&self, struct_name: &str) -> String {
        format!(
            "func {name}{suffix}({recv} *{name}) []error {{\n\tvar {errs} []error\n\n",
            name = struct_name,
            suffix = self.func_suffix,
            recv = self.receiver,
            errs = self.errs_var,
        )
    }

    /// One guard block: the comparison plus the sentinel-wrapped append.
    pub fn render_guard(&self, check: &CheckExpr) -> String {
        format!(
            "\tif {lop} {op} {rop} {{\n\t\t{errs} = append({errs}, {ctor}(\"%w: {msg}\", {sentinel}))\n\t}}\n\n",
            lop = check.loperand,
            op = check.operator.as_str(),
            rop = check.roperand,
            errs = self.errs_var,
            ctor = self.error_ctor,
            msg = check.message,
            sentinel = self.sentinel_error,
        )
    }

    pub fn render_func_close(&self) -> String {
        format!("\treturn {}\n}}\n", self.errs_var)
    }
}

/// Syntax registry - loads and caches templates
pub struct SyntaxRegistry {
    templates: HashMap<SyntaxId, SyntaxTemplate>,
}

impl SyntaxRegistry {
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// A registry with the built-in Go template registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(SyntaxTemplate::go());
        registry
    }

    /// Built-in templates plus any JSON templates found in `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Self, std::io::Error> {
        let mut registry = Self::builtin();
        if dir.exists() {
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().map_or(false, |e| e == "json") {
                    if let Ok(content) = fs::read_to_string(&path) {
                        if let Ok(template) = serde_json::from_str::<SyntaxTemplate>(&content) {
                            registry.templates.insert(template.id.clone(), template);
                        }
                    }
                }
            }
        }
        Ok(registry)
    }

    pub fn get(&self, id: &str) -> Option<&SyntaxTemplate> {
        self.templates.get(id)
    }

    pub fn list(&self) -> Vec<&SyntaxTemplate> {
        self.templates.values().collect()
    }

    pub fn register(&mut self, template: SyntaxTemplate) {
        self.templates.insert(template.id.clone(), template);
    }
}

impl Default for SyntaxRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
