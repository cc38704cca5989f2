//! Mera Bestie CLI - browse, shop and check out from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Start a session
//! bestie login 65f0c1e2a9
//!
//! # Browse the catalog
//! bestie catalog list --category birthday-gifts --pages 2
//! bestie catalog show P-1042
//!
//! # Work with the cart
//! bestie cart add P-1042 --qty 2
//! bestie cart qty P-1042 -1
//! bestie cart show --voucher off10
//!
//! # Check out
//! bestie checkout address --street "12 MG Road" --city Pune --state MH --pincode 411001 --phone 9999999999
//! bestie checkout save-address on
//! bestie checkout place --voucher OFF10
//! ```
//!
//! # Environment Variables
//!
//! See `bestie_storefront::config`. `BESTIE_API_BASE_URL` is required.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;

use bestie_storefront::AppState;
use bestie_storefront::config::StorefrontConfig;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "bestie")]
#[command(author, version, about = "Mera Bestie storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a session for a user id
    Login {
        /// User id issued by the store
        user_id: String,
    },
    /// End the current session
    Logout,
    /// Show the logged-in user and cart badge
    Whoami,
    /// Browse products
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// View and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Shipping address and order placement
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
    /// List past orders
    Orders,
    /// Show recently viewed products
    Recent,
    /// Seller tools
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, optionally filtered by category
    List {
        /// Category name or slug (`all` for every category)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Number of pages to show
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// List the gift categories
    Categories,
    /// Show best sellers
    BestSellers,
    /// Search products by name
    Search {
        /// Text to look for
        query: String,
    },
    /// Show one product
    Show {
        /// Product id
        product_id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show {
        /// Voucher code to apply
        #[arg(short, long)]
        voucher: Option<String>,
    },
    /// Add a product
    Add {
        /// Product id
        product_id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Change a line's quantity by a signed amount
    Qty {
        /// Product id
        product_id: String,

        /// Change in quantity, e.g. `1` or `-1`
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove a line
    Remove {
        /// Product id
        product_id: String,
    },
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Show or edit the shipping address
    Address {
        #[arg(long)]
        street: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        pincode: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Turn address saving on or off
    SaveAddress {
        #[arg(value_enum)]
        toggle: commands::checkout::Toggle,
    },
    /// Place the order
    Place {
        /// Voucher code to apply
        #[arg(short, long)]
        voucher: Option<String>,

        /// Return immediately instead of pausing on the confirmation
        #[arg(long)]
        no_wait: bool,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Check that a seller id is logged in
    Verify {
        /// Seller id
        seller_id: String,
    },
}

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    App(#[from] bestie_storefront::AppError),

    #[error("Invalid id: {0}")]
    InvalidId(#[from] bestie_core::IdError),

    #[error("Output error: {0}")]
    Io(#[from] io::Error),
}

impl From<bestie_storefront::config::ConfigError> for CliError {
    fn from(e: bestie_storefront::config::ConfigError) -> Self {
        Self::App(e.into())
    }
}

impl From<bestie_storefront::api::ApiError> for CliError {
    fn from(e: bestie_storefront::api::ApiError) -> Self {
        Self::App(e.into())
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
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
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bestie_storefront=info,bestie_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        if let CliError::App(app) = &e {
            app.report();
        }
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CliError> {
    let state = AppState::new(config)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Login { user_id } => commands::session::login(&state, &mut out, &user_id)?,
        Commands::Logout => commands::session::logout(&state, &mut out)?,
        Commands::Whoami => commands::session::whoami(&state, &mut out).await?,
        Commands::Catalog { action } => match action {
            CatalogAction::List { category, pages } => {
                commands::catalog::list(&state, &mut out, &category, pages).await?;
            }
            CatalogAction::Categories => commands::catalog::categories(&mut out)?,
            CatalogAction::BestSellers => commands::catalog::best_sellers(&state, &mut out).await?,
            CatalogAction::Search { query } => {
                commands::catalog::search(&state, &mut out, &query).await?;
            }
            CatalogAction::Show { product_id } => {
                commands::catalog::show(&state, &mut out, &product_id).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show { voucher } => {
                commands::cart::show(&state, &mut out, voucher.as_deref()).await?;
            }
            CartAction::Add { product_id, qty } => {
                commands::cart::add(&state, &mut out, &product_id, qty).await?;
            }
            CartAction::Qty { product_id, delta } => {
                commands::cart::change_quantity(&state, &mut out, &product_id, delta).await?;
            }
            CartAction::Remove { product_id } => {
                commands::cart::remove(&state, &mut out, &product_id).await?;
            }
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Address {
                street,
                city,
                state: region,
                pincode,
                phone,
            } => {
                let edits = commands::checkout::AddressEdits {
                    street,
                    city,
                    state: region,
                    pincode,
                    phone,
                };
                commands::checkout::address(&state, &mut out, edits)?;
            }
            CheckoutAction::SaveAddress { toggle } => {
                commands::checkout::save_address(&state, &mut out, toggle)?;
            }
            CheckoutAction::Place { voucher, no_wait } => {
                commands::checkout::place(&state, &mut out, voucher.as_deref(), !no_wait).await?;
            }
        },
        Commands::Orders => commands::orders::list(&state, &mut out).await?,
        Commands::Recent => commands::catalog::recent(&state, &mut out).await?,
        Commands::Admin { action } => match action {
            AdminAction::Verify { seller_id } => {
                commands::admin::verify(&state, &mut out, &seller_id).await?;
            }
        },
    }
    Ok(())
}
