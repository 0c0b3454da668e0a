//! ValidForge CLI - Bridge interface for build tooling
//!
//! Commands: syntaxes, check, generate
//! Outputs JSON to stdout
//! Returns non-zero on generation failure

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use validforge_core::{
    syntax::SyntaxRegistry, GeneratePipeline, GenerateRequest, StructDescription,
};

#[derive(Parser)]
#[command(name = "validforge-cli")]
#[command(about = "ValidForge CLI - Validation Code Generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to extra syntax template directory
    #[arg(short, long, default_value = "syntaxes")]
    syntax_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered syntax templates
    Syntaxes,

    /// Check a description for unsupported rule/type pairings
    Check {
        /// Syntax template ID
        #[arg(short = 't', long, default_value = "go")]
        syntax: String,

        /// JSON payload (StructDescription)
        #[arg(short, long)]
        payload: String,
    },

    /// Generate a validator source unit
    Generate {
        /// Syntax template ID
        #[arg(short = 't', long, default_value = "go")]
        syntax: String,

        /// JSON payload (StructDescription)
        #[arg(short, long)]
        payload: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load syntax templates (built-in Go plus any from the directory)
    let registry = match SyntaxRegistry::load_from_dir(&cli.syntax_dir) {
        Ok(r) => r,
        Err(e) => {
            eprintln!(r#"{{"error": "Failed to load syntax templates: {}"}}"#, e);
            return ExitCode::FAILURE;
        }
    };

    let pipeline = GeneratePipeline::new(registry);

    match cli.command {
        Commands::Syntaxes => {
            let syntaxes: Vec<_> = pipeline
                .list_syntaxes()
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "id": s.id,
                        "description": s.description,
                        "version": s.template_version,
                        "funcSuffix": s.func_suffix,
                        "sentinelError": s.sentinel_error,
                    })
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&syntaxes).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Check { syntax, payload } => {
            let description: StructDescription = match serde_json::from_str(&payload) {
                Ok(d) => d,
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "Invalid payload: {}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            match pipeline.check_description(&description, &syntax) {
                Ok(report) => {
                    println!("{}", serde_json::to_string_pretty(&report).unwrap());
                    if report.valid {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::from(2) // Unsupported pairings present
                    }
                }
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "{}"}}"#, e);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Generate { syntax, payload } => {
            let description: StructDescription = match serde_json::from_str(&payload) {
                Ok(d) => d,
                Err(e) => {
                    println!(r#"{{"success": false, "error": "Invalid payload: {}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            let request = GenerateRequest {
                syntax_id: syntax,
                description,
            };

            match pipeline.generate_unit(&request) {
                Ok(unit) => {
                    let output = serde_json::json!({
                        "success": true,
                        "unit": unit,
                    });
                    println!("{}", serde_json::to_string_pretty(&output).unwrap());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    let output = serde_json::json!({
                        "success": false,
                        "error": e.to_string(),
                    });
                    println!("{}", serde_json::to_string(&output).unwrap());
                    ExitCode::from(2) // Generation failure (unsupported pairing)
                }
            }
        }
    }
}
