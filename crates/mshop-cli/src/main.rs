use anyhow::Result;
use clap::{Parser, Subcommand};
use mshop_pricing::{compute_pricing_from_input, Plan, ALL_PLANS, TOKEN_PRESETS};

mod commands;
mod terminal;

use commands::checkout::CheckoutArgs;

#[derive(Parser)]
#[command(name = "mshop")]
#[command(about = "Storefront mini app CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a token package
    Quote {
        /// Requested amount; clamped to 100..=5000
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// List subscription plans and token presets
    Plans,

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> env -> local overrides)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Run one purchase through the checkout flow
    Checkout {
        /// Layered config paths in merge order. Falls back to MSHOP_CONFIG
        /// (comma-separated) when omitted.
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Subscription plan slug (start | optimal | pro)
        #[arg(long, conflicts_with = "tokens", required_unless_present = "tokens")]
        plan: Option<Plan>,

        /// Token amount, priced like typed calculator input
        #[arg(long, allow_hyphen_values = true)]
        tokens: Option<String>,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "Card")]
        method: String,

        #[arg(long, default_value = "RUB")]
        currency: String,

        /// Platform user id. Required by remote checkout.
        #[arg(long)]
        user_id: Option<i64>,

        /// Fail instead of warn on config keys the selected strategy never reads
        #[arg(long, default_value_t = false)]
        strict_config: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience); silent when absent.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Quote { amount } => {
            let q = compute_pricing_from_input(&amount);
            println!("amount={} price={} total={}", q.amount, q.price, q.bonus);
        }

        Commands::Plans => {
            for plan in ALL_PLANS {
                println!("{:<8} {:<12} {}", plan.slug(), plan.display_name(), plan.price());
            }
            let presets: Vec<String> = TOKEN_PRESETS.iter().map(u32::to_string).collect();
            println!("token_presets={}", presets.join(","));
        }

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(String::as_str).collect();
            let loaded = mshop_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Checkout {
            config_paths,
            plan,
            tokens,
            email,
            method,
            currency,
            user_id,
            strict_config,
        } => {
            commands::checkout::run(CheckoutArgs {
                config_paths,
                plan,
                tokens,
                email,
                method,
                currency,
                user_id,
                strict_config,
            })
            .await?;
        }
    }

    Ok(())
}

/// Logs go to stderr so command output stays parseable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
