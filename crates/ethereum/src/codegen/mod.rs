//! Code generation for contract bindings
//!
//! Turns a contract ABI (and optionally its bytecode) into a Rust module in
//! the same shape as the bindings under [`crate::contracts`].

pub mod cli;
pub mod generator;
pub mod parser;

#[cfg(test)]
mod tests;

pub use generator::{BindingGenerator, GeneratedFile};
pub use parser::{AbiParser, EthereumAbi};

use std::path::PathBuf;

use bindings_core::{Error, Result};
use tracing::info;

/// Options for generating one contract binding
#[derive(Debug, Clone)]
pub struct CodegenOptions {
    /// Contract name; becomes the struct name and (snake cased) the module name
    pub name: String,
    /// Output directory for generated code
    pub output_dir: String,
    /// Bytecode file, makes the binding deployable
    pub bin_file: Option<String>,
    /// Print the generated files instead of writing them
    pub dry_run: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            output_dir: "./generated".to_string(),
            bin_file: None,
            dry_run: false,
        }
    }
}

/// Main entry point for binding generation
pub async fn generate_contract_bindings(abi_file: &str, options: CodegenOptions) -> Result<Vec<PathBuf>> {
    if options.name.is_empty() {
        return Err(Error::config("Contract name is required"));
    }

    let abi = AbiParser::new().parse_file(abi_file)?;
    let bytecode = match &options.bin_file {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| Error::config(format!("Failed to read bytecode file {}: {}", path, e)))?,
        ),
        None => None,
    };

    info!(
        contract = %options.name,
        functions = abi.functions.len(),
        events = abi.events.len(),
        "Generating contract bindings"
    );

    BindingGenerator::new(options)
        .generate(&abi, bytecode.as_deref())
        .await
}
