//! Plume command-line wallet.
//!
//! Drives the transaction engine against a live backend: list receiving
//! addresses, estimate fees, and send payments.

use clap::{Parser, Subcommand};
use plume_backend::HttpBackend;
use plume_tx::LinearFeePolicy;
use plume_types::{AddressRole, Network};
use plume_wallet::{AddressBook, SeedVault, TxEngine, WalletError, WalletKeys};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "plume", version, about = "Plume light-client wallet")]
struct Cli {
    /// Backend base URL.
    #[arg(long, default_value = "http://localhost:8080")]
    backend_url: String,

    /// Network: mainnet or testnet.
    #[arg(long, default_value = "testnet")]
    network: String,

    /// 32-byte wallet seed, hex-encoded.
    #[arg(long, env = "PLUME_SEED", hide_env_values = true)]
    seed: String,

    /// Number of receiving addresses the wallet has handed out.
    #[arg(long, default_value_t = 20)]
    receive_addresses: u32,

    /// Account index.
    #[arg(long, default_value_t = 0)]
    account: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the wallet's receiving addresses.
    Addresses,
    /// Estimate the fee for a payment without signing anything.
    Estimate {
        #[arg(long)]
        to: String,
        /// Amount in atomic units.
        #[arg(long)]
        amount: u64,
    },
    /// Sign and broadcast a payment.
    Send {
        #[arg(long)]
        to: String,
        /// Amount in atomic units.
        #[arg(long)]
        amount: u64,
    },
}

fn parse_network(name: &str) -> Result<Network, String> {
    match name {
        "mainnet" => Ok(Network::Mainnet),
        "testnet" => Ok(Network::Testnet),
        other => Err(format!("unknown network: {}", other)),
    }
}

fn parse_seed(hex_seed: &str) -> Result<[u8; 32], String> {
    let bytes = hex::decode(hex_seed).map_err(|e| format!("seed is not hex: {}", e))?;
    bytes
        .try_into()
        .map_err(|_| "seed must be exactly 32 bytes of hex".to_string())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let network = parse_network(&cli.network)?;
    let seed = parse_seed(&cli.seed)?;
    let keys = WalletKeys::from_seed(seed, network);

    // Register the externally-visible receiving addresses so discovery
    // covers them.
    let book = Arc::new(AddressBook::new());
    for _ in 0..cli.receive_addresses {
        let address = book.derive_next(&keys, cli.account, AddressRole::External);
        book.commit(address);
    }
    log::debug!("registered {} receiving addresses", book.len());

    match cli.command {
        Command::Addresses => {
            for index in 0..cli.receive_addresses {
                let path = plume_types::DerivationPath::new(
                    cli.account,
                    AddressRole::External,
                    index,
                );
                println!("{}  {}", path, keys.address(&path).id);
            }
            Ok(())
        }
        Command::Estimate { ref to, amount } => {
            let engine = build_engine(&cli, &keys, &book, "")?;
            let estimate = engine
                .estimate_fee(&to, amount)
                .await
                .map_err(describe_error)?;
            println!("fee: {}", estimate.fee);
            Ok(())
        }
        Command::Send { ref to, amount } => {
            let password = rpassword::prompt_password("Spend password: ")
                .map_err(|e| format!("failed to read password: {}", e))?;
            let engine = build_engine(&cli, &keys, &book, &password)?;
            let accepted = engine
                .send(&to, amount, &password)
                .await
                .map_err(describe_error)?;
            match accepted.tx_id {
                Some(id) => println!("accepted: {}", id),
                None => println!("accepted"),
            }
            Ok(())
        }
    }
}

fn build_engine(
    cli: &Cli,
    keys: &WalletKeys,
    book: &Arc<AddressBook>,
    password: &str,
) -> Result<TxEngine<HttpBackend, LinearFeePolicy>, String> {
    // Stateless CLI: the vault is sealed fresh from the provided seed. A
    // persistent wallet would load the sealed blob from storage instead.
    let seed = parse_seed(&cli.seed)?;
    let vault = SeedVault::seal(&seed, password).map_err(|e| e.to_string())?;
    Ok(TxEngine::new(
        HttpBackend::new(&cli.backend_url),
        keys.address_only(),
        vault,
        Arc::clone(book),
        LinearFeePolicy::default(),
        cli.account,
    ))
}

fn describe_error(err: WalletError) -> String {
    match &err {
        WalletError::InsufficientFunds { .. } => {
            format!("{} (reduce the amount or add funds)", err)
        }
        _ => err.to_string(),
    }
}
