//! `nft-mint`: mint NFTs from the command line.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI (this file) ──submit/close──▶ MintWorkflow ──▶ WalletConnector (RpcWalletConnector)
//!        ▲                               │         └─▶ ChainReader (NftContract)
//!        └──── MintView ◀── MintState ◀──┘
//! ```
//!
//! The CLI plays the presentation layer: it renders every published state
//! as the dialog a browser front end would show.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use nft_minter::blockchain::{BlockchainClient, NftContract, RpcWalletConnector, Wallet};
use nft_minter::config::{load_config, ChainConfig, TargetChain};
use nft_minter::mint::format::format_ether;
use nft_minter::mint::ChainReader;
use nft_minter::observability::{logging, metrics};
use nft_minter::{MintState, MintView, MintWorkflow, Quantity};

#[derive(Parser)]
#[command(name = "nft-mint")]
#[command(about = "Mint NFTs on Ethereum", long_about = None)]
struct Cli {
    /// TOML configuration file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint one or more NFTs
    Mint {
        #[arg(short, long, default_value_t = Quantity::ONE)]
        quantity: Quantity,

        /// Minting is globally paused; refuse to submit
        #[arg(long)]
        paused: bool,
    },
    /// Show the current mint fee
    Fee,
    /// Show the minting account's balance
    Balance,
    /// Print the resolved chain configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init_logging(&config.observability);
    tracing::debug!(
        testnet = config.network.testnet,
        rpc_url = %config.network.rpc_url,
        contract = %config.contract.address,
        "Configuration loaded"
    );

    if let Some(addr) = &config.observability.metrics_address {
        metrics::init_metrics(addr.parse()?)?;
    }

    let chain = Arc::new(ChainConfig::from_config(&config)?);
    let client = BlockchainClient::new(chain.clone());
    let contract = NftContract::new(client.clone());

    match cli.command {
        Commands::Status => {
            println!("{}", serde_json::to_string_pretty(chain.as_ref())?);
        }
        Commands::Fee => {
            let fee = contract.get_mint_fee().await?;
            println!("{} {}", format_ether(fee), chain.target.currency());
        }
        Commands::Balance => {
            let wallet = Wallet::from_env()?;
            let balance = contract.get_balance(wallet.address()).await?;
            println!(
                "{} {} ({})",
                format_ether(balance),
                chain.target.currency(),
                wallet.address()
            );
        }
        Commands::Mint { quantity, paused } => {
            let wallet = Wallet::from_env()?;
            let connector = RpcWalletConnector::new(client, wallet);
            let workflow = MintWorkflow::new(connector, contract, chain.clone());

            if !workflow.view(paused).submit_enabled {
                eprintln!("Minting is paused.");
                std::process::exit(2);
            }

            let renderer = tokio::spawn(render(workflow.subscribe(), chain.target));

            let state = tokio::select! {
                state = workflow.submit(quantity) => state,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted; a broadcast transaction stays on chain");
                    workflow.close();
                    MintState::Idle
                }
            };

            drop(workflow);
            let _ = renderer.await;

            if !state.is_completed() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Print the dialog every time it changes.
async fn render(
    mut states: tokio::sync::watch::Receiver<MintState>,
    chain: TargetChain,
) {
    let mut last: Option<MintView> = None;
    while states.changed().await.is_ok() {
        // Only the dialog is printed; the trigger is this process itself.
        let view = MintView::derive(&states.borrow_and_update(), false, false, chain);
        if last.as_ref() == Some(&view) || !view.dialog_open {
            continue;
        }
        if let Some(title) = view.title {
            println!("== {} ==", title);
        }
        for line in &view.body {
            println!("{}", line);
        }
        last = Some(view);
    }
}
