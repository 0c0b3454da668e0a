//! Generation Pipeline - Single Entry Point
//!
//! CRITICAL: every emitted guard goes through the synthesizer table.
//! No bypass, and no partial source on error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::describe::StructDescription;
use crate::hashing::{compute_job_hash, compute_manifest_hash, sha256_hex};
use crate::rules::{RuleToken, TypeClass};
use crate::syntax::{SyntaxRegistry, SyntaxTemplate, GO_SYNTAX_ID};
use crate::synth::synthesize;
use crate::ENGINE_VERSION;

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static ASSEMBLE_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_assemble_call_count() -> u32 {
    ASSEMBLE_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_assemble_call_count() {
    ASSEMBLE_CALL_COUNT.store(0, Ordering::SeqCst);
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Syntax template not found: {0}")]
    SyntaxNotFound(String),

    #[error("Unsupported rule {rule} for {class} field {field}")]
    UnsupportedCombination {
        field: String,
        rule: RuleToken,
        class: TypeClass,
    },

    #[error("Syntax template {0} requires engine >= {1}, current is {2}")]
    EngineVersionMismatch(String, String, String),

    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default = "default_syntax_id")]
    pub syntax_id: String,
    pub description: StructDescription,
}

fn default_syntax_id() -> String {
    GO_SYNTAX_ID.to_string()
}

/// Manifest for one generated source unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedUnit {
    pub id: String,
    pub struct_name: String,
    pub package_name: String,
    pub syntax_id: String,
    pub syntax_version: String,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    pub manifest_hash: String,
    pub job_hash: String,
    pub check_count: usize,
    pub source_hash: String,
    pub source: String,
}

/// One unsupported (rule, type) pairing found during a check pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckProblem {
    pub field: String,
    pub rule: String,
    pub class: TypeClass,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub valid: bool,
    pub struct_name: String,
    pub syntax_id: String,
    pub problems: Vec<CheckProblem>,
}

/// The generation pipeline - single entry point for all emission
pub struct GeneratePipeline {
    registry: SyntaxRegistry,
}

impl GeneratePipeline {
    pub fn new(registry: SyntaxRegistry) -> Self {
        Self { registry }
    }

    /// List all registered syntax templates
    pub fn list_syntaxes(&self) -> Vec<&SyntaxTemplate> {
        self.registry.list()
    }

    /// Get a specific syntax template
    pub fn get_syntax(&self, id: &str) -> Option<&SyntaxTemplate> {
        self.registry.get(id)
    }

    /// Dry-run every rule of a description through the synthesizer and
    /// report the pairings the table rejects, without emitting source.
    pub fn check_description(
        &self,
        description: &StructDescription,
        syntax_id: &str,
    ) -> Result<CheckReport, GenerateError> {
        let syntax = self
            .registry
            .get(syntax_id)
            .ok_or_else(|| GenerateError::SyntaxNotFound(syntax_id.to_string()))?;
        self.check_engine_version(syntax)?;

        let mut problems = Vec::new();
        for field in &description.fields {
            for rule in &field.rules {
                if let Err(err) = synthesize(&field.name, *rule, field.type_class, syntax) {
                    problems.push(CheckProblem {
                        field: field.name.clone(),
                        rule: rule.to_string(),
                        class: field.type_class,
                        message: err.to_string(),
                    });
                }
            }
        }

        Ok(CheckReport {
            valid: problems.is_empty(),
            struct_name: description.name.clone(),
            syntax_id: syntax_id.to_string(),
            problems,
        })
    }

    /// Assemble the source unit for a description.
    ///
    /// This is the ONLY emission entry point. Guards are emitted in
    /// field-then-rule declaration order; the first synthesizer error
    /// aborts the whole assembly. A description with no rules still
    /// yields the full function frame with no guards.
    pub fn assemble_source(
        &self,
        description: &StructDescription,
        syntax_id: &str,
    ) -> Result<String, GenerateError> {
        #[cfg(feature = "test-hooks")]
        ASSEMBLE_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

        let syntax = self
            .registry
            .get(syntax_id)
            .ok_or_else(|| GenerateError::SyntaxNotFound(syntax_id.to_string()))?;

        self.check_engine_version(syntax)?;

        let mut source = String::new();
        source.push_str(&syntax.render_preamble(&description.package_name));
        source.push_str(&syntax.render_func_open(&description.name));

        for field in &description.fields {
            for rule in &field.rules {
                let check = synthesize(&field.name, *rule, field.type_class, syntax)?;
                source.push_str(&syntax.render_guard(&check));
            }
        }

        source.push_str(&syntax.render_func_close());
        Ok(source)
    }

    /// Generate a source unit with its manifest.
    ///
    /// CRITICAL: this ALWAYS assembles through assemble_source. No bypass possible.
    pub fn generate_unit(&self, request: &GenerateRequest) -> Result<GeneratedUnit, GenerateError> {
        let syntax = self
            .registry
            .get(&request.syntax_id)
            .ok_or_else(|| GenerateError::SyntaxNotFound(request.syntax_id.clone()))?;
        let syntax_version = syntax.template_version.clone();

        let source = self.assemble_source(&request.description, &request.syntax_id)?;

        let job_hash = compute_job_hash(
            &request.syntax_id,
            &syntax_version,
            &request.description,
            ENGINE_VERSION,
        )?;

        let mut unit = GeneratedUnit {
            id: Uuid::new_v4().to_string(),
            struct_name: request.description.name.clone(),
            package_name: request.description.package_name.clone(),
            syntax_id: request.syntax_id.clone(),
            syntax_version,
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            manifest_hash: String::new(), // Computed after
            job_hash,
            check_count: request.description.rule_count(),
            source_hash: sha256_hex(source.as_bytes()),
            source,
        };

        // Manifest hash covers everything, source text included
        unit.manifest_hash = compute_manifest_hash(&unit)?;

        Ok(unit)
    }

    fn check_engine_version(&self, syntax: &SyntaxTemplate) -> Result<(), GenerateError> {
        let engine_ver = semver::Version::parse(ENGINE_VERSION)
            .map_err(|_| GenerateError::GenerationError("Invalid engine version".into()))?;
        let min_ver = semver::Version::parse(&syntax.engine_min_version)
            .map_err(|_| GenerateError::GenerationError("Invalid syntax min version".into()))?;

        if engine_ver < min_ver {
            return Err(GenerateError::EngineVersionMismatch(
                syntax.id.clone(),
                syntax.engine_min_version.clone(),
                ENGINE_VERSION.to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for GeneratePipeline {
    fn default() -> Self {
        Self::new(SyntaxRegistry::default())
    }
}
