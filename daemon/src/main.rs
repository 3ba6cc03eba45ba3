//! tcrd: entry point for running a registry node from the command line.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};

use tcr_ledger::GenesisState;
use tcr_node::{open_lmdb_app, Block, NodeConfig, RegistryApp};
use tcr_store_lmdb::LmdbEnvironment;
use tcr_transactions::{CommitTx, RevealTx, Transaction};
use tcr_types::{AccountAddress, Identifier, NetworkId};
use tcr_utils::LogFormat;

#[derive(Parser)]
#[command(name = "tcrd", about = "Token-curated registry node")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "TCR_CONFIG")]
    config: Option<PathBuf>,

    /// Network preset: "live", "test", or "dev".
    #[arg(long, env = "TCR_NETWORK")]
    network: Option<NetworkId>,

    /// Data directory for registry storage.
    #[arg(long, env = "TCR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "TCR_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output: "human" or "json".
    #[arg(long, env = "TCR_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Credit the genesis balances of a fresh data directory.
    Init {
        /// JSON file: {"accounts": [{"address": ..., "balance": ...}]}.
        #[arg(long)]
        genesis: PathBuf,
    },
    /// Execute a JSON array of blocks and print one receipt per transaction.
    Exec {
        #[arg(long)]
        blocks: PathBuf,
    },
    /// Read registry state.
    Query {
        #[command(subcommand)]
        what: Query,
    },
    /// Print current balances in genesis form.
    Export,
    /// Seal a vote under a fresh nonce. Prints the commit transaction and
    /// the reveal transaction to submit once the reveal stage opens.
    Seal {
        #[arg(long)]
        voter: String,
        #[arg(long)]
        identifier: String,
        /// Vote to accept the candidate; omit to vote against.
        #[arg(long)]
        approve: bool,
        /// Weight staked at reveal.
        #[arg(long)]
        bond: u128,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(clap::Subcommand)]
enum Query {
    Ballot { identifier: String },
    Listing { identifier: String },
    Listings,
    Balance { address: String },
    Phase { identifier: String },
    Queue,
}

impl Cli {
    /// File config (or defaults) with flags and env vars layered on top.
    fn resolve_config(&self) -> anyhow::Result<NodeConfig> {
        let mut config = match &self.config {
            Some(path) => NodeConfig::from_toml_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => NodeConfig::default(),
        };
        if let Some(network) = self.network {
            config.network = network;
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    tcr_utils::init_logging(config.log_format, &config.log_level);

    match cli.command {
        Command::Config => print!("{}", config.to_toml_string()?),
        Command::Init { genesis } => {
            let raw = read(&genesis)?;
            let state = GenesisState::from_json(&raw)?;
            open(&config)?.init_genesis(&state)?;
            println!("genesis applied: {} accounts", state.accounts.len());
        }
        Command::Exec { blocks } => {
            let raw = read(&blocks)?;
            let blocks = Block::list_from_json(&raw)?;
            let mut app = open(&config)?;
            for block in &blocks {
                for receipt in app.execute_block(block)? {
                    print_json(&receipt)?;
                }
            }
        }
        Command::Query { what } => {
            let app = open(&config)?;
            match what {
                Query::Ballot { identifier } => {
                    print_json(&app.ballot(&Identifier::new(identifier))?)?
                }
                Query::Listing { identifier } => {
                    print_json(&app.listing(&Identifier::new(identifier))?)?
                }
                Query::Listings => print_json(&app.listings()?)?,
                Query::Balance { address } => {
                    print_json(&app.balance(&parse_address(&address)?)?)?
                }
                Query::Phase { identifier } => {
                    print_json(&app.phase_of(&Identifier::new(identifier))?)?
                }
                Query::Queue => print_json(&app.queue_snapshot()?)?,
            }
        }
        Command::Seal {
            voter,
            identifier,
            approve,
            bond,
        } => {
            let (commit, reveal) = seal(&voter, identifier, approve, bond)?;
            println!("{}", commit.to_json()?);
            println!("{}", reveal.to_json()?);
        }
        Command::Export => println!("{}", open(&config)?.export_genesis()?.to_json()?),
    }
    Ok(())
}

fn open(config: &NodeConfig) -> anyhow::Result<RegistryApp<LmdbEnvironment>> {
    let params = config.registry_params();
    tracing::info!(
        network = config.network.as_str(),
        data_dir = %config.data_dir.display(),
        "opening registry"
    );
    open_lmdb_app(&config.data_dir, config.map_size_bytes(), params)
        .with_context(|| format!("opening {}", config.data_dir.display()))
}

fn parse_address(raw: &str) -> anyhow::Result<AccountAddress> {
    AccountAddress::parse(raw).with_context(|| format!("bad address {raw:?}"))
}

/// A commit transaction and its matching reveal under a fresh nonce.
fn seal(
    voter: &str,
    identifier: String,
    approve: bool,
    bond: u128,
) -> anyhow::Result<(Transaction, Transaction)> {
    let voter = parse_address(voter)?;
    let identifier = Identifier::new(identifier);
    let nonce = tcr_crypto::generate_nonce()?;
    let commit: Transaction =
        CommitTx::sealed(voter.clone(), identifier.clone(), approve, &nonce).into();
    let reveal: Transaction =
        RevealTx::new(voter, identifier, approve, nonce.to_vec(), bond).into();
    commit.validate_basic()?;
    reveal.validate_basic()?;
    Ok((commit, reveal))
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
