//! Binding generator
//!
//! Emits one Rust module per contract. The module wraps a `ContractHandle`
//! with one typed method per ABI function (calls for view/pure, transactions
//! otherwise), plus a record type and `filter_`/`watch_`/`parse_` methods per
//! event.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use convert_case::{Boundary, Case, Converter};
use tracing::{debug, info};

use bindings_core::{Error, Result};

use super::parser::{AbiEvent, AbiFunction, AbiParameter, EthereumAbi};
use super::CodegenOptions;

/// Identifiers that need a trailing underscore to be used as Rust names
const RESERVED: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "yield", "opts", "sink", "log", "backend",
];

/// Methods every generated binding defines before its ABI functions
const FIXED_METHODS: &[&str] = &[
    "new",
    "from_handle",
    "deploy",
    "address",
    "handle",
    "session",
    "caller_session",
    "transactor_session",
];

/// A file produced by the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Code generator for contract bindings
pub struct BindingGenerator {
    options: CodegenOptions,
}

impl BindingGenerator {
    pub fn new(options: CodegenOptions) -> Self {
        Self { options }
    }

    /// File stem and module name of the generated binding
    pub fn module_name(&self) -> String {
        snake_case(&self.options.name)
    }

    /// Name of the generated binding struct
    pub fn struct_name(&self) -> String {
        pascal_case(&self.options.name)
    }

    /// Render the binding module and the ABI (and bytecode) it embeds
    pub fn render(&self, abi: &EthereumAbi, bytecode: Option<&str>) -> Result<Vec<GeneratedFile>> {
        if abi.functions.is_empty() && abi.events.is_empty() {
            return Err(Error::abi(format!(
                "ABI for {} has no functions or events",
                self.options.name
            )));
        }

        let output_dir = Path::new(&self.options.output_dir);
        let module = self.module_name();

        let mut files = vec![
            GeneratedFile {
                path: output_dir.join(format!("{}.rs", module)),
                contents: self.render_module(abi, bytecode.is_some()),
            },
            GeneratedFile {
                path: output_dir.join(format!("{}.json", module)),
                contents: serde_json::to_string_pretty(&abi.raw_abi)?,
            },
        ];
        if let Some(bytecode) = bytecode {
            files.push(GeneratedFile {
                path: output_dir.join(format!("{}.bin", module)),
                contents: bytecode.trim().to_string(),
            });
        }
        Ok(files)
    }

    /// Render and write the binding, or print it on a dry run
    pub async fn generate(&self, abi: &EthereumAbi, bytecode: Option<&str>) -> Result<Vec<PathBuf>> {
        let files = self.render(abi, bytecode)?;

        if !self.options.dry_run {
            tokio::fs::create_dir_all(&self.options.output_dir)
                .await
                .map_err(|e| Error::config(format!("Failed to create output directory: {}", e)))?;
        }

        for file in &files {
            self.write_file(file).await?;
        }

        info!(
            contract = %self.options.name,
            files = files.len(),
            dry_run = self.options.dry_run,
            "Generated contract bindings"
        );
        Ok(files.into_iter().map(|file| file.path).collect())
    }

    fn render_module(&self, abi: &EthereumAbi, deployable: bool) -> String {
        let name = &self.options.name;
        let module = self.module_name();
        let struct_name = self.struct_name();
        let mut code = String::new();

        let bytecode = if deployable {
            format!("Some(include_str!(\"{}.bin\"))", module)
        } else {
            "None".to_string()
        };

        code.push_str(&format!(
            r#"//! Bindings for the `{name}` contract
//!
//! Generated by `contract-bindings generate`.

use bindings_ethereum::prelude::*;

pub static METADATA: ContractMetadata = ContractMetadata::new(
    "{name}",
    include_str!("{module}.json"),
    {bytecode},
);

/// `{name}` bound to an address
#[derive(Debug, Clone)]
pub struct {struct_name}(ContractHandle);

impl {struct_name} {{
    /// Bind to a deployed instance
    pub fn new<B: ContractBackend + 'static>(address: Address, backend: Arc<B>) -> Result<Self> {{
        ContractHandle::bind(address, &METADATA, backend).map(Self)
    }}

    pub fn from_handle(handle: ContractHandle) -> Self {{
        Self(handle)
    }}
"#
        ));

        if deployable {
            code.push_str(&self.render_deploy(abi));
        }

        code.push_str(
            r#"
    pub fn address(&self) -> Address {
        self.0.address()
    }

    pub fn handle(&self) -> &ContractHandle {
        &self.0
    }

    /// Same contract with fixed call and transaction options
    pub fn session(&self, call_opts: CallOpts, transact_opts: TransactOpts) -> Self {
        Self(self.0.with_call_opts(call_opts).with_transact_opts(transact_opts))
    }

    pub fn caller_session(&self, call_opts: CallOpts) -> Self {
        Self(self.0.with_call_opts(call_opts))
    }

    pub fn transactor_session(&self, transact_opts: TransactOpts) -> Self {
        Self(self.0.with_transact_opts(transact_opts))
    }
"#,
        );

        let method_names = overload_names(
            abi.functions.iter().map(|f| escape(snake_case(&f.name))),
            FIXED_METHODS,
        );
        for (function, method) in abi.functions.iter().zip(&method_names) {
            // overloads are addressed by their full signature
            let target = if abi.is_overloaded(&function.name) {
                super::parser::canonical_signature(&function.name, &function.inputs)
            } else {
                function.name.clone()
            };
            code.push_str(&render_function(function, method, &target));
        }

        let event_names = overload_names(
            abi.events.iter().map(|e| pascal_case(&e.name)),
            &[struct_name.as_str(), "METADATA"],
        );
        for (event, type_name) in abi.events.iter().zip(&event_names) {
            code.push_str(&render_event_methods(event, type_name));
        }
        code.push_str("}\n");

        for (event, type_name) in abi.events.iter().zip(&event_names) {
            code.push_str(&render_event_type(event, type_name));
        }

        debug!(contract = %name, bytes = code.len(), "Rendered binding module");
        code
    }

    fn render_deploy(&self, abi: &EthereumAbi) -> String {
        let inputs = abi
            .constructor
            .as_ref()
            .map(|c| c.inputs.as_slice())
            .unwrap_or_default();

        let params: String = inputs
            .iter()
            .enumerate()
            .map(|(i, p)| format!("        {}: {},\n", param_name(p, i), rust_type(p)))
            .collect();
        let args = if inputs.is_empty() {
            "Vec::new()".to_string()
        } else {
            format!("vec![{}]", token_list(inputs))
        };

        format!(
            r#"
    /// Deploy a new instance
    pub async fn deploy<B: ContractBackend + 'static>(
        opts: &TransactOpts,
        backend: Arc<B>,
{params}    ) -> Result<(Address, PendingTx, Self)> {{
        let args = {args};
        let (address, pending, handle) =
            ContractHandle::deploy(&METADATA, opts, backend, args).await?;
        Ok((address, pending, Self(handle)))
    }}
"#
        )
    }

    async fn write_file(&self, file: &GeneratedFile) -> Result<()> {
        if self.options.dry_run {
            println!("\n--- {} ---", file.path.display());
            println!("{}", file.contents);
            return Ok(());
        }

        tokio::fs::write(&file.path, &file.contents)
            .await
            .map_err(|e| Error::config(format!("Failed to write file {}: {}", file.path.display(), e)))?;
        debug!(path = %file.path.display(), "Wrote generated file");
        Ok(())
    }
}

fn render_function(function: &AbiFunction, method: &str, target: &str) -> String {
    let params: String = function
        .inputs
        .iter()
        .enumerate()
        .map(|(i, p)| format!(", {}: {}", param_name(p, i), rust_type(p)))
        .collect();
    let args = format!("vec![{}]", token_list(&function.inputs));

    if function.constant {
        let output = match function.outputs.as_slice() {
            [] => "()".to_string(),
            [single] => rust_type(single),
            outputs => format!(
                "({})",
                outputs.iter().map(rust_type).collect::<Vec<_>>().join(", ")
            ),
        };
        format!(
            r#"
    /// `{signature}`
    pub fn {method}(&self{params}) -> ContractCall<{output}> {{
        self.0.call("{target}", {args})
    }}
"#,
            signature = function.human_signature()
        )
    } else {
        format!(
            r#"
    /// `{signature}`
    pub fn {method}(&self{params}) -> ContractTransaction {{
        self.0.transact("{target}", {args})
    }}
"#,
            signature = function.human_signature()
        )
    }
}

fn render_event_methods(event: &AbiEvent, type_name: &str) -> String {
    let method = snake_case(type_name);
    let indexed: Vec<(usize, &AbiParameter)> = event
        .inputs
        .iter()
        .enumerate()
        .filter(|(_, p)| p.indexed)
        .collect();

    let filter_params: String = indexed
        .iter()
        .map(|(i, p)| format!("        {}: &[{}],\n", param_name(p, *i), rust_type(p)))
        .collect();
    let topics = format!(
        "vec![{}]",
        indexed
            .iter()
            .map(|(i, p)| format!("topics({})", param_name(p, *i)))
            .collect::<Vec<_>>()
            .join(", ")
    );

    format!(
        r#"
    pub async fn filter_{method}(
        &self,
        opts: &FilterOpts,
{filter_params}    ) -> Result<EventIterator<{type_name}>> {{
        self.0.filter(opts, {topics}).await
    }}

    pub async fn watch_{method}(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<{type_name}>>,
{filter_params}    ) -> Result<WatchSubscription> {{
        self.0.watch(opts, sink, {topics}).await
    }}

    pub fn parse_{method}(&self, log: &Log) -> Result<EventRecord<{type_name}>> {{
        self.0.parse(log)
    }}
"#
    )
}

fn render_event_type(event: &AbiEvent, type_name: &str) -> String {
    let fields: Vec<(String, String)> = event
        .inputs
        .iter()
        .enumerate()
        .map(|(i, p)| (param_name(p, i), field_type(p)))
        .collect();

    let (body, from_tokens) = match fields.as_slice() {
        [] => (
            ";".to_string(),
            "    fn from_tokens(_tokens: Vec<Token>) -> Result<Self> {\n        Ok(Self)\n    }"
                .to_string(),
        ),
        [(name, _)] => (
            struct_body(&fields),
            format!(
                "    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {{\n        Ok(Self {{\n            {}: detokenize(tokens)?,\n        }})\n    }}",
                name
            ),
        ),
        _ => {
            let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
            let inits: String = names
                .iter()
                .map(|name| format!("            {},\n", name))
                .collect();
            (
                struct_body(&fields),
                format!(
                    "    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {{\n        let ({}) = detokenize(tokens)?;\n        Ok(Self {{\n{}        }})\n    }}",
                    names.join(", "),
                    inits
                ),
            )
        }
    };

    format!(
        r#"
/// `{human}`
#[derive(Debug, Clone, PartialEq)]
pub struct {type_name}{body}

impl ContractEvent for {type_name} {{
    const NAME: &'static str = "{name}";
    const SIGNATURE: &'static str = "{signature}";

{from_tokens}
}}
"#,
        human = event.human_signature(),
        name = event.name,
        signature = event.signature(),
    )
}

fn struct_body(fields: &[(String, String)]) -> String {
    let mut body = String::from(" {\n");
    for (name, ty) in fields {
        body.push_str(&format!("    pub {}: {},\n", name, ty));
    }
    body.push('}');
    body
}

fn token_list(params: &[AbiParameter]) -> String {
    params
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}.into_token()", param_name(p, i)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rust type used for an ABI parameter
pub fn rust_type(param: &AbiParameter) -> String {
    rust_type_for(&param.param_type)
}

/// Event field type; indexed dynamic values only survive in the log as their hash
fn field_type(param: &AbiParameter) -> String {
    if param.indexed && is_hashed_topic(&param.param_type) {
        "H256".to_string()
    } else {
        rust_type(param)
    }
}

fn is_hashed_topic(abi_type: &str) -> bool {
    abi_type == "string" || abi_type == "bytes" || abi_type.ends_with(']') || abi_type.starts_with("tuple")
}

/// Rust type used for an ABI type name
pub fn rust_type_for(abi_type: &str) -> String {
    if let Some(base) = abi_type.strip_suffix("[]") {
        return format!("Vec<{}>", rust_type_for(base));
    }
    if abi_type.starts_with("tuple") {
        return "Token".to_string();
    }
    if let Some((base, size)) = abi_type.strip_suffix(']').and_then(|t| t.rsplit_once('[')) {
        return format!("[{}; {}]", rust_type_for(base), size);
    }

    match abi_type {
        "bool" => "bool".to_string(),
        "address" => "Address".to_string(),
        "string" => "String".to_string(),
        "bytes" => "Bytes".to_string(),
        "bytes32" => "H256".to_string(),
        _ if abi_type.starts_with("bytes") => format!("[u8; {}]", &abi_type[5..]),
        _ if abi_type.starts_with("uint") => match bit_width(&abi_type[4..]) {
            0..=8 => "u8".to_string(),
            9..=16 => "u16".to_string(),
            17..=32 => "u32".to_string(),
            33..=64 => "u64".to_string(),
            65..=128 => "u128".to_string(),
            _ => "U256".to_string(),
        },
        _ if abi_type.starts_with("int") => match bit_width(&abi_type[3..]) {
            0..=8 => "i8".to_string(),
            9..=16 => "i16".to_string(),
            17..=32 => "i32".to_string(),
            33..=64 => "i64".to_string(),
            65..=128 => "i128".to_string(),
            _ => "I256".to_string(),
        },
        _ => "Token".to_string(),
    }
}

fn bit_width(suffix: &str) -> u32 {
    suffix.parse().unwrap_or(256)
}

fn converter(case: Case) -> Converter {
    Converter::new()
        .set_boundaries(&[
            Boundary::Underscore,
            Boundary::LowerUpper,
            Boundary::Acronym,
            Boundary::DigitUpper,
        ])
        .to_case(case)
}

pub fn snake_case(name: &str) -> String {
    converter(Case::Snake).convert(name.trim_start_matches('_'))
}

pub fn pascal_case(name: &str) -> String {
    converter(Case::Pascal).convert(name.trim_start_matches('_'))
}

/// Rust identifier for a parameter; unnamed parameters become `arg{index}`
pub fn param_name(param: &AbiParameter, index: usize) -> String {
    let name = snake_case(&param.name);
    if name.is_empty() {
        format!("arg{}", index)
    } else {
        escape(name)
    }
}

fn escape(name: String) -> String {
    if RESERVED.contains(&name.as_str()) {
        format!("{}_", name)
    } else {
        name
    }
}

/// Disambiguate repeated names: the first keeps its name, later ones get `0`, `1`, ...
///
/// Names in `taken` are already defined, so an ABI name equal to one starts at `0`.
fn overload_names(names: impl Iterator<Item = String>, taken: &[&str]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = taken.iter().map(|name| (name.to_string(), 1)).collect();
    names
        .map(|name| {
            let count = seen.entry(name.clone()).or_insert(0);
            let unique = match *count {
                0 => name,
                n => format!("{}{}", name, n - 1),
            };
            *count += 1;
            unique
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversion() {
        assert_eq!(snake_case("getRoundData"), "get_round_data");
        assert_eq!(snake_case("_roundId"), "round_id");
        assert_eq!(snake_case("setTTL"), "set_ttl");
        assert_eq!(snake_case("MockV3Aggregator"), "mock_v3_aggregator");
        assert_eq!(pascal_case("ENSInterface"), "EnsInterface");
    }

    #[test]
    fn test_rust_types() {
        assert_eq!(rust_type_for("uint8"), "u8");
        assert_eq!(rust_type_for("uint80"), "u128");
        assert_eq!(rust_type_for("uint256"), "U256");
        assert_eq!(rust_type_for("int256"), "I256");
        assert_eq!(rust_type_for("address[]"), "Vec<Address>");
        assert_eq!(rust_type_for("bytes32"), "H256");
        assert_eq!(rust_type_for("bytes4"), "[u8; 4]");
        assert_eq!(rust_type_for("uint256[2]"), "[U256; 2]");
        assert_eq!(rust_type_for("uint8[2][]"), "Vec<[u8; 2]>");
    }

    #[test]
    fn test_malformed_types_do_not_panic() {
        assert_eq!(rust_type_for("uint256["), "U256");
        assert_eq!(rust_type_for("]"), "Token");
    }

    #[test]
    fn test_indexed_dynamic_fields_are_hashes() {
        let param = |ty: &str, indexed| AbiParameter {
            name: "label".to_string(),
            param_type: ty.to_string(),
            components: None,
            indexed,
        };
        assert_eq!(field_type(&param("string", true)), "H256");
        assert_eq!(field_type(&param("uint256[]", true)), "H256");
        assert_eq!(field_type(&param("string", false)), "String");
        assert_eq!(field_type(&param("address", true)), "Address");
        assert_eq!(field_type(&param("bytes32", true)), "H256");
    }

    #[test]
    fn test_overload_names() {
        let names = overload_names(
            ["Transfer", "Approval", "Transfer"]
                .iter()
                .map(|s| s.to_string()),
            &[],
        );
        assert_eq!(names, vec!["Transfer", "Approval", "Transfer0"]);

        let names = overload_names(
            ["address", "owner"].iter().map(|s| s.to_string()),
            FIXED_METHODS,
        );
        assert_eq!(names, vec!["address0", "owner"]);
    }
}
