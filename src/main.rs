/// Contract bindings command line
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use ethers::abi::{Abi, Event, ParamType, RawLog, StateMutability};
use ethers::types::Address;
use tokio::signal;
use tracing::{error, info, warn};

use bindings_core::config::BindingsConfig;
use bindings_core::logging::init_tracing;
use bindings_ethereum::codegen::cli::{self as codegen_cli, GenerateArgs};
use bindings_ethereum::registry;
use bindings_ethereum::{BoundContract, EthereumProvider, LogSubscription, WatchOpts};

#[derive(Parser)]
#[command(name = "contract-bindings")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file path (TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the bundled contracts
    Contracts,

    /// Show the methods and events of a bundled contract
    Inspect {
        /// Contract name
        name: String,
    },

    /// Generate bindings from an ABI file
    Generate(GenerateArgs),

    /// Log decoded events of a deployed contract until interrupted
    Watch {
        /// Bundled contract name
        name: String,

        /// Contract address
        #[arg(long)]
        address: Address,

        /// Only this event; every event when unset
        #[arg(long)]
        event: Option<String>,

        /// First block to deliver events from
        #[arg(long)]
        from_block: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BindingsConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => {
            let mut config = BindingsConfig::default();
            config.apply_environment_overrides()?;
            config
        }
    };

    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Contracts => list_contracts()?,
        Commands::Inspect { name } => inspect(&name)?,
        Commands::Generate(args) => {
            codegen_cli::run(&args, &config.codegen.output_dir).await?;
        }
        Commands::Watch {
            name,
            address,
            event,
            from_block,
        } => watch(&config, &name, address, event.as_deref(), from_block).await?,
    }

    Ok(())
}

fn list_contracts() -> Result<()> {
    println!("{:<20} {:<11} {:>9} {:>7}", "NAME", "DEPLOYABLE", "FUNCTIONS", "EVENTS");
    for metadata in registry::all() {
        let abi = metadata.abi()?;
        println!(
            "{:<20} {:<11} {:>9} {:>7}",
            metadata.name(),
            if metadata.is_deployable() { "yes" } else { "no" },
            abi.functions().count(),
            abi.events().count()
        );
    }
    Ok(())
}

fn inspect(name: &str) -> Result<()> {
    let metadata = registry::lookup(name).ok_or_else(|| anyhow!("Unknown contract: {}", name))?;
    let abi = metadata.abi()?;

    println!("{}", metadata.name());
    if let Some(constructor) = abi.constructor() {
        println!("  {}", signature("constructor", constructor.inputs.iter().map(|p| &p.kind)));
    }

    for function in abi.functions() {
        let kind = match function.state_mutability {
            StateMutability::View | StateMutability::Pure => "call",
            _ => "transact",
        };
        let outputs: Vec<String> = function.outputs.iter().map(|p| p.kind.to_string()).collect();
        println!(
            "  {:<9} {} -> ({})",
            kind,
            signature(&function.name, function.inputs.iter().map(|p| &p.kind)),
            outputs.join(",")
        );
    }

    for event in abi.events() {
        println!(
            "  {:<9} {}",
            "event",
            signature(&event.name, event.inputs.iter().map(|p| &p.kind))
        );
    }
    Ok(())
}

async fn watch(
    config: &BindingsConfig,
    name: &str,
    address: Address,
    event: Option<&str>,
    from_block: Option<u64>,
) -> Result<()> {
    let metadata = registry::lookup(name).ok_or_else(|| anyhow!("Unknown contract: {}", name))?;
    let abi = metadata.abi()?;

    let events = selected_events(&abi, event)?;
    let provider = EthereumProvider::new(&config.provider).await?;
    let contract = BoundContract::with_backend(address, abi, Arc::new(provider));

    let opts = WatchOpts { start: from_block };
    let mut tasks = Vec::new();
    for event in events {
        let event_signature = signature(&event.name, event.inputs.iter().map(|p| &p.kind));
        let subscription = contract.watch_logs(&opts, &event_signature, Vec::new()).await?;
        info!(contract = %metadata.name(), address = ?address, event = %event_signature, "Watching events");
        tasks.push(tokio::spawn(log_events(event, subscription)));
    }

    match signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(err) => error!("Unable to listen for shutdown signal: {}", err),
    }

    // aborting drops each subscription, which unsubscribes upstream
    for task in tasks {
        task.abort();
    }
    Ok(())
}

fn selected_events(abi: &Abi, name: Option<&str>) -> Result<Vec<Event>> {
    let events: Vec<Event> = abi
        .events()
        .filter(|event| name.map_or(true, |name| event.name == name))
        .cloned()
        .collect();
    if events.is_empty() {
        return Err(match name {
            Some(name) => anyhow!("Event '{}' not found", name),
            None => anyhow!("Contract has no events"),
        });
    }
    Ok(events)
}

async fn log_events(event: Event, mut subscription: LogSubscription) {
    loop {
        let log = match subscription.next_log().await {
            Ok(Some(log)) => log,
            Ok(None) => break,
            Err(err) => {
                error!(event = %event.name, error = %err, "Subscription failed");
                return;
            }
        };

        let raw = RawLog {
            topics: log.topics.clone(),
            data: log.data.to_vec(),
        };
        match event.parse_log(raw) {
            Ok(parsed) => {
                let fields: Vec<String> = parsed
                    .params
                    .iter()
                    .map(|param| format!("{}={}", param.name, param.value))
                    .collect();
                info!(
                    event = %event.name,
                    block = ?log.block_number,
                    tx = ?log.transaction_hash,
                    "{}",
                    fields.join(" ")
                );
            }
            Err(err) => warn!(event = %event.name, error = %err, "Failed to decode log"),
        }
    }
    info!(event = %event.name, "Subscription ended");
}

/// Canonical `name(type,...)` signature
fn signature<'a>(name: &str, kinds: impl Iterator<Item = &'a ParamType>) -> String {
    let kinds: Vec<String> = kinds.map(ToString::to_string).collect();
    format!("{}({})", name, kinds.join(","))
}
