//! CLI arguments for binding generation

use std::path::PathBuf;

use bindings_core::{Error, Result};
use clap::Args;

use super::{generate_contract_bindings, CodegenOptions};

/// Generate typed bindings from a contract ABI
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Path to the contract ABI JSON file (bare array or build artifact)
    pub abi_file: String,

    /// Contract name used for the generated struct and module
    #[arg(long)]
    pub name: String,

    /// Bytecode file; adds a `deploy` constructor to the binding
    #[arg(long, value_name = "PATH")]
    pub bin: Option<String>,

    /// Output directory for generated code; the configured directory when unset
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<String>,

    /// Preview generated code without writing files
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    pub fn options(&self, default_output_dir: &str) -> CodegenOptions {
        CodegenOptions {
            name: self.name.clone(),
            output_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| default_output_dir.to_string()),
            bin_file: self.bin.clone(),
            dry_run: self.dry_run,
        }
    }
}

/// Handle the generate command
pub async fn run(args: &GenerateArgs, default_output_dir: &str) -> Result<Vec<PathBuf>> {
    validate_contract_name(&args.name)?;
    validate_abi_file(&args.abi_file).await?;
    if let Some(bin) = &args.bin {
        validate_bytecode_file(bin).await?;
    }

    let files = generate_contract_bindings(&args.abi_file, args.options(default_output_dir)).await?;

    if !args.dry_run {
        for file in &files {
            println!("wrote {}", file.display());
        }
    }
    Ok(files)
}

/// Contract names must be usable as Rust identifiers
pub fn validate_contract_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    match chars.next() {
        None => Err(Error::config("Contract name cannot be empty")),
        Some(first) if !first.is_ascii_alphabetic() => Err(Error::config(format!(
            "Contract name must start with a letter: {}",
            name
        ))),
        Some(_) if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') => Err(Error::config(format!(
            "Contract name may only contain letters, digits and underscores: {}",
            name
        ))),
        Some(_) => Ok(()),
    }
}

/// Validate ABI file exists and holds JSON
pub async fn validate_abi_file(file_path: &str) -> Result<()> {
    let content = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|e| Error::config(format!("Failed to read ABI file {}: {}", file_path, e)))?;

    serde_json::from_str::<serde_json::Value>(&content)
        .map_err(|e| Error::config(format!("Invalid JSON in ABI file: {}", e)))?;

    Ok(())
}

async fn validate_bytecode_file(file_path: &str) -> Result<()> {
    let content = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|e| Error::config(format!("Failed to read bytecode file {}: {}", file_path, e)))?;

    let code = content.trim();
    hex::decode(code.strip_prefix("0x").unwrap_or(code))
        .map_err(|e| Error::config(format!("Bytecode is not valid hex: {}", e)))?;

    Ok(())
}
