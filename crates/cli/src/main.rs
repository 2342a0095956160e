//! GoMarket CLI - Inspect and edit the persisted shopping cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cli cart show
//!
//! # Add a product
//! gm-cli cart add --id 1 --title "Coffee" --image-url https://cdn.example.com/1.png --price 19.99
//!
//! # Change quantities
//! gm-cli cart increment 1
//! gm-cli cart decrement 1
//!
//! # Use a different storage directory
//! gm-cli --storage-dir /tmp/cart cart show
//! ```
//!
//! # Commands
//!
//! - `cart show` - Print the cart as JSON
//! - `cart add` - Add one unit of a product
//! - `cart increment` / `cart decrement` - Change a line's quantity
//! - `cart clear` - Delete the persisted cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gomarket_cart::CartConfig;
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "gm-cli")]
#[command(author, version, about = "GoMarket CLI tools")]
struct Cli {
    /// Override the storage directory (`GOMARKET_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Override the cart storage key (`GOMARKET_CART_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart as JSON
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long, default_value = "")]
        image_url: String,

        /// Unit price (e.g. 19.99)
        #[arg(long)]
        price: Decimal,
    },
    /// Add one unit to an existing line
    Increment {
        /// Product ID
        id: String,
    },
    /// Remove one unit from an existing line
    Decrement {
        /// Product ID
        id: String,
    },
    /// Delete the persisted cart
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CartConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match CartConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so stdout stays machine-readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gomarket_cli=info,gomarket_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
async fn run(cli: Cli, mut config: CartConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(key) = cli.key {
        config.set_cart_key(key)?;
    }

    match cli.command {
        Commands::Cart { action } => {
            let store = commands::cart::open(&config).await;
            match action {
                CartAction::Show => println!("{}", commands::cart::show(&store).await?),
                CartAction::Add {
                    id,
                    title,
                    image_url,
                    price,
                } => {
                    let output =
                        commands::cart::add(&store, &id, &title, &image_url, price).await?;
                    println!("{output}");
                }
                CartAction::Increment { id } => {
                    println!("{}", commands::cart::increment(&store, &id).await?);
                }
                CartAction::Decrement { id } => {
                    println!("{}", commands::cart::decrement(&store, &id).await?);
                }
                CartAction::Clear => commands::cart::clear(&store).await?,
            }
        }
    }
    Ok(())
}
