//! ValidForge Core - Validation Code Generator
//!
//! # The Five Laws (Non-Negotiable)
//! 1. Tags Are Contracts
//! 2. Declaration Order Is Output Order
//! 3. Unsupported Combinations Abort
//! 4. Deterministic Output
//! 5. Manifests Enable Reproduction

pub mod describe;
pub mod rules;
pub mod syntax;
pub mod synth;
pub mod hashing;
pub mod pipeline;

pub use describe::{FieldDescription, StructDescription};
pub use rules::{ParseRuleError, RuleToken, TypeClass};
pub use syntax::{SyntaxId, SyntaxRegistry, SyntaxTemplate};
pub use synth::{synthesize, CheckExpr, CmpOp};
pub use hashing::{canonical_json, compute_job_hash, compute_manifest_hash};
pub use pipeline::{
    CheckProblem, CheckReport, GenerateError, GeneratePipeline, GenerateRequest, GeneratedUnit,
};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MIN_SYNTAX_VERSION: &str = "1.0.0";
