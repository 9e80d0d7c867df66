//! Kasir CLI - point-of-sale client for the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the token is kept in the session file)
//! kasir login --email kasir@toko.id --password rahasia
//!
//! # Browse the catalog
//! kasir products --search kopi
//! kasir product 64f1c0
//!
//! # Create a product
//! kasir add-product --name "Es Kopi" --price 15000 --size jumbo --type drink
//!
//! # Ring up and check out an order
//! kasir order 64f1c0=2 64f1c7=1
//! ```
//!
//! # Logging
//!
//! Logs go to stderr. `RUST_LOG` overrides the default filter
//! (`info,kasir=debug`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use kasir_core::{ProductSize, ProductType};

mod commands;

#[derive(Parser)]
#[command(name = "kasir")]
#[command(author, version, about = "Kasir point-of-sale client")]
struct Cli {
    /// Config file (defaults to kasir.toml in the platform config directory)
    #[arg(long, global = true, env = "KASIR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(short, long, env = "KASIR_EMAIL")]
        email: String,

        #[arg(short, long, env = "KASIR_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show the signed-in user id
    Whoami,
    /// List products
    Products {
        /// Only show products whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Print the distinct product names only
        #[arg(long)]
        names: bool,
    },
    /// Show one product
    Product {
        /// Product id
        id: String,
    },
    /// Create a product
    AddProduct {
        #[arg(long)]
        name: String,

        /// Price in rupiah; separators are ignored ("15.000" = 15000)
        #[arg(long)]
        price: String,

        /// PLASTIC, MEDIUM or JUMBO
        #[arg(long)]
        size: ProductSize,

        /// DRINK or FOOD
        #[arg(long = "type")]
        product_type: ProductType,

        #[arg(long)]
        description: Option<String>,

        /// Image URL (http or https)
        #[arg(long)]
        image: Option<String>,
    },
    /// Ring up an order and check it out
    Order {
        /// Line items as `<product-id>=<quantity>`
        #[arg(required = true, value_parser = commands::order::parse_line)]
        lines: Vec<(String, u32)>,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Command failed: {e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = commands::Context::load(cli.config)?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&ctx, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Products { search, names } => {
            commands::products::list(&ctx, search.as_deref(), names).await
        }
        Commands::Product { id } => commands::products::show(&ctx, &id).await,
        Commands::AddProduct {
            name,
            price,
            size,
            product_type,
            description,
            image,
        } => {
            let form = commands::products::ProductForm {
                name,
                price,
                size,
                product_type,
                description,
                image,
            };
            commands::products::add(&ctx, form).await
        }
        Commands::Order { lines } => commands::order::place(&ctx, &lines).await,
    }
}

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "info,kasir=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kasir=trace` - Show trace for kasir crates only
/// - Default: `info,kasir=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    subscriber(filter).init();
}

/// stderr formatter gated by `filter` alone.
///
/// The `EnvFilter` must stay the only level gate: a `with_max_level` call on
/// the builder replaces it.
fn subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}
