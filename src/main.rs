//! gnocall: call gno.land realm functions through an external signer.
//!
//! # Architecture Overview
//!
//! ```text
//!   gnocall call --from g1... --pkg-path gno.land/r/demo/hello --func Inc
//!        │
//!        ▼
//!   ┌──────────┐   abci_query auth/accounts/{addr}   ┌───────────┐
//!   │ account  │────────────────────────────────────▶│           │
//!   └────┬─────┘                                     │           │
//!        ▼                                           │  tm2 node │
//!   ┌──────────┐   sign_amino(SignDoc)  ┌────────┐   │ (JSON-RPC)│
//!   │ sign doc │───────────────────────▶│ signer │   │           │
//!   └────┬─────┘◀───────────────────────└────────┘   │           │
//!        ▼                                           │           │
//!   ┌──────────┐   broadcast_tx_commit {tx: base64}  │           │
//!   │ encoder  │────────────────────────────────────▶│           │
//!   └──────────┘◀─── check_tx / deliver_tx ──────────└───────────┘
//! ```

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use gnocall::blockchain::AccountResolver;
use gnocall::config::loader::read_config;
use gnocall::config::validation::validate_config;
use gnocall::observability::logging::init_logging;
use gnocall::tx::{MessageBuilder, SignDocBuilder};
use gnocall::{BroadcastOrchestrator, CommandSigner, RpcClient};

#[derive(Parser)]
#[command(name = "gnocall")]
#[command(about = "Sign and broadcast gno.land realm calls", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the node RPC URL.
    #[arg(short, long, global = true)]
    remote: Option<String>,

    /// Override the chain ID.
    #[arg(long, global = true)]
    chain_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a realm call with the external signer and broadcast it
    Call(CallArgs),
    /// Show account number and sequence for an address
    Account {
        /// Bech32 address (g1...)
        address: String,
    },
    /// Print the sign document a call would produce, without signing
    SignDoc(CallArgs),
}

#[derive(Args)]
struct CallArgs {
    /// Caller address; its key signs the transaction.
    #[arg(long)]
    from: String,

    /// Realm package path, e.g. gno.land/r/demo/hello.
    #[arg(long)]
    pkg_path: String,

    /// Function to call.
    #[arg(long)]
    func: String,

    /// Call argument; repeat for each argument, in order.
    #[arg(long = "arg")]
    args: Vec<String>,

    /// Coins to send with the call, e.g. 1000ugnot.
    #[arg(long, default_value = "")]
    send: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = read_config(cli.config.as_deref())?;
    if let Some(remote) = cli.remote {
        config.rpc.url = remote;
    }
    if let Some(chain_id) = cli.chain_id {
        config.chain.chain_id = chain_id;
    }
    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            eprintln!("Invalid configuration: {}", error);
        }
        std::process::exit(2);
    }

    init_logging(&config.observability.log_level);

    tracing::info!(
        rpc_url = %config.rpc.url,
        chain_id = %config.chain.chain_id,
        timeout_secs = config.rpc.timeout_secs,
        "Configuration loaded"
    );

    let rpc = RpcClient::new(config.rpc.clone())?;

    match cli.command {
        Commands::Account { address } => {
            let account = AccountResolver::new(rpc).fetch(&address).await?;
            print_json(&account)?;
        }
        Commands::SignDoc(call) => {
            let account = AccountResolver::new(rpc).fetch(&call.from).await?;
            let message = MessageBuilder::new()
                .with_send(call.send)
                .build(&call.from, &call.pkg_path, &call.func, &call.args);
            let doc = SignDocBuilder::from_config(&config).build(&account, message);
            print_json(&doc)?;
        }
        Commands::Call(call) => {
            let signer = Arc::new(CommandSigner::from_config(&config.signer)?);
            let orchestrator = BroadcastOrchestrator::new(rpc, signer, &config);
            let message = MessageBuilder::new()
                .with_send(call.send)
                .build(&call.from, &call.pkg_path, &call.func, &call.args);

            match orchestrator.broadcast(message).await {
                Ok(committed) => print_json(&committed)?,
                Err(failure) => {
                    eprintln!("Error: {}", failure.error);
                    eprintln!("Reached: {}", failure.reached);
                    if let Some(phase) = failure.tx_phase() {
                        eprintln!("Phase: {:?}", phase);
                    }
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
