//! Ethereum ABI parser
//!
//! Reads contract ABI JSON into the interface description the binding
//! generator works from.

use bindings_core::{Error, Result};
use ethers::utils::keccak256;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed contract interface
#[derive(Debug, Clone, Serialize)]
pub struct EthereumAbi {
    pub constructor: Option<AbiFunction>,
    pub functions: Vec<AbiFunction>,
    pub events: Vec<AbiEvent>,
    /// ABI array as found in the input, embedded next to the generated module
    pub raw_abi: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct AbiFunction {
    pub name: String,
    pub inputs: Vec<AbiParameter>,
    pub outputs: Vec<AbiParameter>,
    /// pure, view, nonpayable or payable
    pub state_mutability: String,
    /// view or pure
    pub constant: bool,
    /// 4-byte selector, hex encoded; `None` for the constructor
    pub selector: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AbiEvent {
    pub name: String,
    pub inputs: Vec<AbiParameter>,
    pub anonymous: bool,
    /// Topic 0, hex encoded
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiParameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<AbiParameter>>,
    #[serde(default)]
    pub indexed: bool,
}

/// One ABI array entry before it is sorted by kind
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entry {
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    name: Option<String>,
    #[serde(default)]
    inputs: Vec<AbiParameter>,
    #[serde(default)]
    outputs: Vec<AbiParameter>,
    state_mutability: Option<String>,
    #[serde(default)]
    constant: bool,
    #[serde(default)]
    payable: bool,
    #[serde(default)]
    anonymous: bool,
}

fn function_kind() -> String {
    "function".to_string()
}

impl Entry {
    // pre-0.5 compilers emit constant/payable flags instead of stateMutability
    fn mutability(&self) -> String {
        match &self.state_mutability {
            Some(mutability) => mutability.clone(),
            None if self.constant => "view".to_string(),
            None if self.payable => "payable".to_string(),
            None => "nonpayable".to_string(),
        }
    }

    fn into_function(self, selector: bool) -> AbiFunction {
        let state_mutability = self.mutability();
        let name = self.name.unwrap_or_else(|| self.kind.clone());
        let selector = selector.then(|| {
            let hash = keccak256(canonical_signature(&name, &self.inputs).as_bytes());
            format!("0x{}", hex::encode(&hash[..4]))
        });

        AbiFunction {
            constant: state_mutability == "view" || state_mutability == "pure",
            name,
            inputs: self.inputs,
            outputs: self.outputs,
            state_mutability,
            selector,
        }
    }

    fn into_event(self) -> Result<AbiEvent> {
        let name = self.name.ok_or_else(|| Error::abi("Event must have a name"))?;
        let topic = format!(
            "0x{}",
            hex::encode(keccak256(canonical_signature(&name, &self.inputs).as_bytes()))
        );

        Ok(AbiEvent {
            name,
            inputs: self.inputs,
            anonymous: self.anonymous,
            topic,
        })
    }
}

/// Ethereum ABI parser
#[derive(Debug, Default)]
pub struct AbiParser;

impl AbiParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_file(&self, file_path: &str) -> Result<EthereumAbi> {
        let content = std::fs::read_to_string(file_path)?;
        self.parse_content(&content)
    }

    /// Accepts a bare ABI array or a build artifact with an `abi` field.
    pub fn parse_content(&self, content: &str) -> Result<EthereumAbi> {
        let value: Value = serde_json::from_str(content)?;
        match value.get("abi") {
            Some(abi) => self.parse_abi(abi),
            None => self.parse_abi(&value),
        }
    }

    fn parse_abi(&self, value: &Value) -> Result<EthereumAbi> {
        let entries: Vec<Entry> = serde_json::from_value(value.clone())
            .map_err(|e| Error::abi(format!("Invalid ABI: {}", e)))?;

        let mut abi = EthereumAbi {
            constructor: None,
            functions: Vec::new(),
            events: Vec::new(),
            raw_abi: value.clone(),
        };

        for entry in entries {
            for param in entry.inputs.iter().chain(&entry.outputs) {
                check_type(param)?;
            }
            match entry.kind.as_str() {
                "constructor" => abi.constructor = Some(entry.into_function(false)),
                "function" => abi.functions.push(entry.into_function(true)),
                "event" => abi.events.push(entry.into_event()?),
                // errors, fallback and receive have no binding
                _ => {}
            }
        }

        Ok(abi)
    }
}

/// Reject type names with unbalanced or non-numeric array dimensions
fn check_type(param: &AbiParameter) -> Result<()> {
    let ty = param.param_type.as_str();
    let invalid = || Error::abi(format!("Invalid ABI type '{}' for parameter '{}'", ty, param.name));

    let base_end = ty.find('[').unwrap_or(ty.len());
    let base = &ty[..base_end];
    if base.is_empty() || base.contains(']') {
        return Err(invalid());
    }

    let mut dims = &ty[base_end..];
    while !dims.is_empty() {
        let inner = dims.strip_prefix('[').ok_or_else(invalid)?;
        let close = inner.find(']').ok_or_else(invalid)?;
        if !inner[..close].chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        dims = &inner[close + 1..];
    }

    for component in param.components.iter().flatten() {
        check_type(component)?;
    }
    Ok(())
}

/// Canonical `name(type,...)` signature; tuples are expanded to their components
pub fn canonical_signature(name: &str, inputs: &[AbiParameter]) -> String {
    let types: Vec<String> = inputs.iter().map(canonical_type).collect();
    format!("{}({})", name, types.join(","))
}

fn canonical_type(param: &AbiParameter) -> String {
    match (param.param_type.strip_prefix("tuple"), &param.components) {
        (Some(suffix), Some(components)) => {
            let inner: Vec<String> = components.iter().map(canonical_type).collect();
            format!("({}){}", inner.join(","), suffix)
        }
        _ => param.param_type.clone(),
    }
}

fn named(param: &AbiParameter, marker: &str) -> String {
    let mut out = param.param_type.clone();
    out.push_str(marker);
    if !param.name.is_empty() {
        out.push(' ');
        out.push_str(&param.name);
    }
    out
}

impl AbiFunction {
    /// e.g. `balanceOf(address _owner) view returns (uint256)`
    pub fn human_signature(&self) -> String {
        let inputs: Vec<String> = self.inputs.iter().map(|p| named(p, "")).collect();
        let mut signature = format!("{}({})", self.name, inputs.join(", "));
        if self.constant {
            signature.push(' ');
            signature.push_str(&self.state_mutability);
        }
        if !self.outputs.is_empty() {
            let outputs: Vec<&str> = self.outputs.iter().map(|p| p.param_type.as_str()).collect();
            signature.push_str(&format!(" returns ({})", outputs.join(", ")));
        }
        signature
    }
}

impl AbiEvent {
    pub fn signature(&self) -> String {
        canonical_signature(&self.name, &self.inputs)
    }

    pub fn human_signature(&self) -> String {
        let inputs: Vec<String> = self
            .inputs
            .iter()
            .map(|p| named(p, if p.indexed { " indexed" } else { "" }))
            .collect();
        format!("{}({})", self.name, inputs.join(", "))
    }
}

impl EthereumAbi {
    pub fn get_view_functions(&self) -> Vec<&AbiFunction> {
        self.functions.iter().filter(|f| f.constant).collect()
    }

    pub fn get_transaction_functions(&self) -> Vec<&AbiFunction> {
        self.functions.iter().filter(|f| !f.constant).collect()
    }

    /// Whether more than one function shares `name`
    pub fn is_overloaded(&self, name: &str) -> bool {
        self.functions.iter().filter(|f| f.name == name).count() > 1
    }
}
