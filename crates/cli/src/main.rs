//! Command line interface for the Covus liquid-staking vault.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use covus_app::prelude::*;
use covus_domain::format::{format_fixed, format_grouped};
use covus_domain::token::NATIVE_DECIMALS;
use covus_domain::value_objects::amount::Amount;
use covus_protocols::prelude::*;
use dotenv::dotenv;
use ethers::providers::Middleware;
use ethers::types::{Address, U256};
use prettytable::{Table, row};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "covus")]
#[command(about = "Covus liquid staking vault client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show protocol status (TVL, exchange rate, health, queue totals)
    Status,
    /// Show a position: shares, staked value, share of supply
    Portfolio {
        /// Address to inspect; defaults to the configured signer
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Stake STT and receive csSTT
    Stake {
        /// Amount in STT, e.g. 1.5
        amount: String,
    },
    /// Withdraw STT; instant when liquidity allows, queued otherwise
    Unstake {
        /// Amount in STT, e.g. 1.5
        amount: String,
    },
    /// Show withdrawal queue status
    Queue,
    /// Trigger processing of all pending withdrawal requests
    ProcessQueue,
    /// List recent withdrawal requests from vault events
    Requests {
        /// First block to scan
        #[arg(short, long, default_value_t = 0)]
        from_block: u64,
    },
    /// Preview a swap on the bundled exchange
    Quote {
        direction: Direction,
        /// Amount in, in STT/csSTT units
        amount: String,
    },
    /// Execute a swap on the bundled exchange
    Swap {
        direction: Direction,
        /// Amount in, in STT/csSTT units
        amount: String,
    },
    /// Add native STT liquidity to the exchange
    DexDeposit {
        amount: String,
    },
    /// Remove liquidity from the exchange
    DexWithdraw {
        amount: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    /// STT in, csSTT out
    SttToCs,
    /// csSTT in, STT out
    CsToStt,
}

impl From<Direction> for SwapDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::SttToCs => SwapDirection::SttToCsStt,
            Direction::CsToStt => SwapDirection::CsSttToStt,
        }
    }
}

fn parse_stt(s: &str) -> Result<U256> {
    let d = Decimal::from_str(s).with_context(|| format!("invalid amount: {s}"))?;
    let amount = Amount::from_decimal(d, NATIVE_DECIMALS)
        .map_err(|e| anyhow::anyhow!("invalid amount {s}: {e}"))?;
    Ok(amount.raw)
}

fn display(raw: U256) -> String {
    match Amount::native(raw).to_decimal() {
        Ok(d) => format_grouped(d),
        Err(_) => raw.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = RpcConfig::from_env()?;

    match &cli.command {
        Commands::Status => {
            let provider = config.provider()?;
            let vault = Arc::new(VaultClient::new(config.vault_address()?, provider));
            let status = StatusService::new(vault, config.vault_address.clone())
                .fetch()
                .await?;

            let mut table = Table::new();
            table.add_row(row![
                "TVL",
                format!("{} {}", format_grouped(status.tvl), status.asset.symbol)
            ]);
            table.add_row(row![
                "Exchange rate",
                format!(
                    "1 {} = {} {}",
                    status.share_token.symbol,
                    format_fixed(status.assets_per_share, 6),
                    status.asset.symbol
                )
            ]);
            table.add_row(row![
                "Inverse rate",
                format!(
                    "1 {} = {} {}",
                    status.asset.symbol,
                    format_fixed(status.shares_per_asset, 6),
                    status.share_token.symbol
                )
            ]);
            table.add_row(row![
                "Free liquidity",
                format!("{} STT", display(status.observed.snapshot.free_liquidity))
            ]);
            table.add_row(row![
                "Queued assets",
                format!("{} STT", display(status.observed.snapshot.queued_assets))
            ]);
            table.add_row(row!["Rate healthy", status.rate_healthy]);
            table.add_row(row!["Paused", status.paused]);
            table.add_row(row!["Max slippage", format!("{} bps", status.max_slippage_bps)]);
            table.printstd();

            if !status.accepting_transactions() {
                println!("⚠️  Protocol is not currently accepting transactions");
            }
        }
        Commands::Portfolio { address } => {
            let provider = config.provider()?;
            let vault: Arc<VaultClient<_>> =
                Arc::new(VaultClient::new(config.vault_address()?, provider));
            let owner = resolve_address(&config, address.as_deref())?;
            let staking = StakingService::new(vault.clone(), vault, RouterConfig::default());
            let view = staking.portfolio(owner).await?;

            let mut table = Table::new();
            table.add_row(row!["csSTT shares", display(view.shares)]);
            table.add_row(row!["Staked value", format!("{} STT", display(view.staked_assets))]);
            table.add_row(row![
                "Share of supply",
                format!("{}%", view.share_of_supply_pct)
            ]);
            table.add_row(row![
                "Exchange rate",
                format!("1 csSTT = {} STT", format_fixed(view.assets_per_share, 6))
            ]);
            table.printstd();
        }
        Commands::Stake { amount } => {
            let (staking, owner) = staking_service(&config)?;
            let value = parse_stt(amount)?;

            println!("🏦 Staking {} STT...", display(value));
            let hash = staking.deposit(value, owner).await?;
            println!("✅ Submitted: {hash:?}");
        }
        Commands::Unstake { amount } => {
            let (staking, owner) = staking_service(&config)?;
            let value = parse_stt(amount)?;

            println!("🏦 Withdrawing {} STT...", display(value));
            let outcome = staking.withdraw(value, owner).await?;
            if outcome.route.is_instant() {
                println!("⚡ Instant redemption submitted: {:?}", outcome.tx_hash);
            } else {
                println!("⏳ Queued withdrawal submitted: {:?}", outcome.tx_hash);
                println!("   Run `covus queue` to watch the queue.");
            }
        }
        Commands::Queue => {
            let provider = config.provider()?;
            let vault: Arc<VaultClient<_>> =
                Arc::new(VaultClient::new(config.vault_address()?, provider));
            let queue = QueueService::new(vault.clone(), vault);
            let view = queue.status().await?;

            println!("{}", view.summary);
            let mut table = Table::new();
            table.add_row(row![
                "Pending requests",
                view.state.pending_requests.to_string()
            ]);
            table.add_row(row![
                "Queued assets",
                format!("{} STT", format_grouped(view.queued_assets))
            ]);
            table.add_row(row![
                "Free liquidity",
                format!("{} STT", format_grouped(view.free_liquidity))
            ]);
            table.add_row(row!["Queue position", view.queue_position]);
            table.printstd();
        }
        Commands::ProcessQueue => {
            let signer = config.signer()?;
            let vault: Arc<VaultClient<_>> =
                Arc::new(VaultClient::new(config.vault_address()?, signer));
            let queue = QueueService::new(vault.clone(), vault);

            match queue.process().await? {
                Some(hash) => println!("✅ processQueue submitted: {hash:?}"),
                None => println!("Queue is empty, nothing to process."),
            }
        }
        Commands::Requests { from_block } => {
            let provider = config.provider()?;
            let scanner = QueueEventScanner::new(config.vault_address()?, provider);
            let requests = scanner.requests_since(*from_block).await?;

            if requests.is_empty() {
                println!("No withdrawal requests since block {from_block}.");
            } else {
                let activity = RecentActivity::new(requests);
                let mut table = Table::new();
                table.add_row(row!["ID", "Owner", "Assets owed", "Status"]);
                for req in &activity.requests {
                    table.add_row(row![
                        req.id,
                        req.owner,
                        format!("{} STT", display(req.assets_owed)),
                        if req.fulfilled { "fulfilled" } else { "pending" }
                    ]);
                }
                table.printstd();
                println!(
                    "{} pending, {} fulfilled",
                    activity.pending().count(),
                    activity.fulfilled_count()
                );
            }
        }
        Commands::Quote { direction, amount } => {
            let provider = config.provider()?;
            let dex = dex_service(&config, provider)?;
            let amount_in = parse_stt(amount)?;
            let preview = dex.preview((*direction).into(), amount_in).await?;

            let mut table = Table::new();
            table.add_row(row!["Amount in", display(preview.amount_in)]);
            table.add_row(row!["Amount out", display(preview.amount_out)]);
            table.add_row(row!["Spot price", format_fixed(preview.spot_price, 6)]);
            table.add_row(row![
                "Execution price",
                format_fixed(preview.execution_price, 6)
            ]);
            table.add_row(row![
                "Price impact",
                format!("{}%", preview.price_impact_pct)
            ]);
            table.printstd();
            println!("💡 Preview only: the exchange recomputes the trade at execution time.");
        }
        Commands::Swap { direction, amount } => {
            let signer = config.signer()?;
            let dex = dex_service(&config, signer)?;
            let amount_in = parse_stt(amount)?;

            println!("🦄 Swapping {}...", display(amount_in));
            let hashes = dex.swap((*direction).into(), amount_in).await?;
            for hash in hashes {
                println!("✅ Submitted: {hash:?}");
            }
        }
        Commands::DexDeposit { amount } => {
            let signer = config.signer()?;
            let dex = dex_service(&config, signer)?;
            let value = parse_stt(amount)?;

            let hash = dex.add_liquidity(value).await?;
            println!("✅ Liquidity deposit submitted: {hash:?}");
        }
        Commands::DexWithdraw { amount } => {
            let signer = config.signer()?;
            let dex = dex_service(&config, signer)?;
            let value = parse_stt(amount)?;

            let hash = dex.remove_liquidity(value).await?;
            println!("✅ Liquidity withdrawal submitted: {hash:?}");
        }
    }

    Ok(())
}

fn resolve_address(config: &RpcConfig, explicit: Option<&str>) -> Result<Address> {
    match explicit {
        Some(s) => s.parse().context("invalid address"),
        None => {
            let signer = config.signer().context(
                "pass --address or configure COVUS_PRIVATE_KEY to inspect the signer's position",
            )?;
            Ok(signer.address())
        }
    }
}

fn staking_service(
    config: &RpcConfig,
) -> Result<(StakingService, Address)> {
    let signer = config.signer()?;
    let owner = signer.address();
    let vault: Arc<VaultClient<_>> = Arc::new(VaultClient::new(config.vault_address()?, signer));
    Ok((
        StakingService::new(vault.clone(), vault, RouterConfig::default()),
        owner,
    ))
}

fn dex_service<M: Middleware + 'static>(config: &RpcConfig, client: Arc<M>) -> Result<DexService> {
    let dex_address = config.dex_address()?;
    let vault_address = config.vault_address()?;
    let dex: Arc<DexClient<M>> = Arc::new(DexClient::new(dex_address, vault_address, client.clone()));
    let vault: Arc<VaultClient<M>> = Arc::new(VaultClient::new(vault_address, client));
    Ok(DexService::new(dex.clone(), dex, vault, dex_address))
}
