//! # Command-Line Interface
//!
//! Headless front end over the command functions. Every subcommand prints
//! its result as pretty JSON on stdout; logs go to stderr.
//!
//! ```text
//! tripus [--config FILE] [--seed N] [--offline] <COMMAND>
//!
//!   dashboard                         revenue, payment mix, best/slow sellers
//!   forecast [--days N]               flat revenue forecast
//!   product-forecast                  7-day history + 7-day prediction
//!   recommend [--month M]             recommendation strings
//!   catalog                           stock catalog
//!   products [--search Q]             inventory
//!   seed                              reset inventory to the default set
//!   sell --item P001:2 [--method cash] [--received 200] [--name] [--email]
//!   credit --customer CUST001 --item P001:2 [--email] [--remind]
//!   team [--member 1 ...] [--message TEXT]
//!   export [--out FILE]               transactions CSV
//!   email-settings [--api-key] [--sender-email] [--sender-name]
//!   config                            effective configuration
//! ```
//!
//! Customers, transactions and credit are regenerated per process; only
//! products, bills and email settings survive between runs (snapshot cache).

use chrono::{Datelike, NaiveDate, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::commands::{analytics, cart, checkout, config, credit, export, product, team};
use crate::error::ApiError;
use crate::state::ConfigState;
use crate::{database_path, AppContext};
use tripus_core::{EmailSettings, Money, PaymentMethod, SeededRandom, Tender};
use tripus_notify::{EmailTransport, HttpEmailTransport, Mailer, NotifyConfig, RecordingTransport};
use tripus_store::{Database, StoreConfig};

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "tripus", about = "TriPUS point-of-sale and business dashboard", version)]
pub struct Cli {
    /// Config file (defaults to config.toml in the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for generated data and forecasts (reproducible output)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Record emails instead of calling the email endpoint
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dashboard summary over the sales ledger
    Dashboard,
    /// Aggregate revenue forecast
    Forecast {
        /// Days to forecast (defaults to the configured horizon)
        #[arg(long)]
        days: Option<usize>,
    },
    /// Per-product demand forecast
    ProductForecast,
    /// Stocking and pricing recommendations
    Recommend {
        /// Calendar month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
    },
    /// Stock catalog
    Catalog,
    /// List or search inventory
    Products {
        #[arg(long)]
        search: Option<String>,
    },
    /// Reset inventory to the default products
    Seed,
    /// Check out items with cash or an electronic method
    Sell(SellArgs),
    /// Grant store credit for items
    Credit(CreditArgs),
    /// Send the team reminder
    Team(TeamArgs),
    /// Export transactions as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show or update email sender settings
    EmailSettings(EmailSettingsArgs),
    /// Show the effective configuration
    Config,
}

#[derive(Debug, Args)]
pub struct SellArgs {
    /// Line item as CODE:QTY (repeatable)
    #[arg(long = "item", required = true, value_parser = parse_item)]
    pub items: Vec<ItemArg>,

    /// cash, upi, card, netbanking or qr
    #[arg(long, default_value = "cash", value_parser = parse_method)]
    pub method: PaymentMethod,

    /// Cash handed over, in major units (defaults to the exact total)
    #[arg(long, value_parser = parse_amount)]
    pub received: Option<Money>,

    #[arg(long)]
    pub name: Option<String>,

    /// Receipt address
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct CreditArgs {
    #[arg(long)]
    pub customer: String,

    #[arg(long = "item", required = true, value_parser = parse_item)]
    pub items: Vec<ItemArg>,

    /// Invoice address instead of the customer's own
    #[arg(long)]
    pub email: Option<String>,

    /// Also send a payment reminder for the new credit
    #[arg(long, action = ArgAction::SetTrue)]
    pub remind: bool,
}

#[derive(Debug, Args)]
pub struct TeamArgs {
    /// Member id (repeatable; defaults to the whole team)
    #[arg(long = "member")]
    pub members: Vec<String>,

    #[arg(long)]
    pub message: Option<String>,
}

#[derive(Debug, Args)]
pub struct EmailSettingsArgs {
    #[arg(long)]
    pub api_key: Option<String>,
    #[arg(long)]
    pub sender_email: Option<String>,
    #[arg(long)]
    pub sender_name: Option<String>,
}

/// `CODE:QTY` from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    pub code: String,
    pub quantity: i64,
}

fn parse_item(raw: &str) -> Result<ItemArg, String> {
    let (code, quantity) = match raw.split_once(':') {
        Some((code, qty)) => {
            let quantity = qty
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("invalid quantity '{qty}'"))?;
            (code, quantity)
        }
        None => (raw, 1),
    };

    let code = code.trim();
    if code.is_empty() {
        return Err("product code cannot be empty".to_string());
    }
    Ok(ItemArg {
        code: code.to_string(),
        quantity,
    })
}

fn parse_method(raw: &str) -> Result<PaymentMethod, String> {
    PaymentMethod::parse(raw).ok_or_else(|| format!("unknown payment method '{raw}'"))
}

/// Parses "250", "250.5" or "250.50" as major units.
fn parse_amount(raw: &str) -> Result<Money, String> {
    let invalid = || format!("invalid amount '{raw}'");
    let raw = raw.trim();

    let (major, minor) = match raw.split_once('.') {
        Some((major, minor)) => {
            if minor.is_empty() || minor.len() > 2 || !minor.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            let minor_value: i64 = minor.parse().map_err(|_| invalid())?;
            (major, if minor.len() == 1 { minor_value * 10 } else { minor_value })
        }
        None => (raw, 0),
    };

    // Digits only, so "-0.50" cannot slip through as zero.
    if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let major: i64 = major.parse().map_err(|_| invalid())?;
    Ok(Money::from_major_minor(major, minor))
}

// =============================================================================
// Execution
// =============================================================================

/// Builds the context and runs one subcommand.
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let config = ConfigState::load(cli.config.clone());
    let notify_config = NotifyConfig::load_or_default(cli.config.clone());

    let db = Database::new(StoreConfig::new(database_path(&config)?)).await?;

    let recorder = cli.offline.then(RecordingTransport::new);
    let transport: Arc<dyn EmailTransport> = match &recorder {
        Some(recorder) => Arc::new(recorder.clone()),
        None => Arc::new(HttpEmailTransport::new(&notify_config)?),
    };

    let rng = match cli.seed {
        Some(seed) => SeededRandom::from_seed(seed),
        None => SeededRandom::from_entropy(),
    };
    let today = Utc::now().date_naive();

    let ctx = AppContext::bootstrap(config, db, Mailer::new(transport), today, Box::new(rng)).await;
    let result = execute(&ctx, cli.command, today).await;

    if let Some(recorder) = recorder {
        let recorded = recorder.sent().await;
        if !recorded.is_empty() {
            info!(count = recorded.len(), "Offline run: emails recorded, not sent");
        }
    }

    ctx.store.inner().close().await;
    result
}

async fn execute(ctx: &AppContext, command: Command, today: NaiveDate) -> Result<(), ApiError> {
    match command {
        Command::Dashboard => print_json(&analytics::get_dashboard(&ctx.session, &ctx.dataset)),
        Command::Forecast { days } => print_json(&analytics::get_revenue_forecast(
            &ctx.config,
            &ctx.dataset,
            &ctx.random,
            today,
            days,
        )?),
        Command::ProductForecast => print_json(&analytics::get_product_forecast(
            &ctx.session,
            &ctx.random,
            today,
        )),
        Command::Recommend { month } => print_json(&analytics::get_recommendations(
            &ctx.dataset,
            month.unwrap_or_else(|| today.month()),
        )?),
        Command::Catalog => print_json(&analytics::get_catalog(&ctx.dataset)),
        Command::Products { search } => match search {
            Some(query) => print_json(&product::search_products(&ctx.session, &query)?),
            None => print_json(&product::list_products(&ctx.session)),
        },
        Command::Seed => print_json(&product::reset_products(&ctx.session, &ctx.store).await?),
        Command::Sell(args) => {
            fill_cart(ctx, &args.items)?;
            let total = ctx.cart.with_cart(|c| c.total());
            let tender = match args.method {
                PaymentMethod::Cash => Tender::Cash {
                    received: args.received.unwrap_or(total),
                },
                method => Tender::Electronic { method },
            };
            let response = checkout::checkout(
                ctx,
                checkout::CheckoutRequest {
                    tender,
                    customer_name: args.name,
                    customer_email: args.email,
                },
            )
            .await?;
            print_json(&response)
        }
        Command::Credit(args) => {
            fill_cart(ctx, &args.items)?;
            let response = credit::grant_credit(
                ctx,
                credit::GrantCreditRequest {
                    customer_id: args.customer,
                    email: args.email,
                },
            )
            .await?;
            print_json(&response)?;

            if args.remind {
                print_json(&credit::send_credit_reminder(ctx, &response.transaction.id).await?)?;
            }
            Ok(())
        }
        Command::Team(args) => {
            let members = if args.members.is_empty() {
                team::list_team(&ctx.session)
                    .into_iter()
                    .map(|m| m.id)
                    .collect()
            } else {
                args.members
            };
            print_json(&team::send_team_reminder(ctx, &members, args.message.as_deref()).await?)
        }
        Command::Export { out } => {
            let csv = export::export_transactions(&ctx.session, &ctx.config, today);
            match out {
                Some(path) => {
                    std::fs::write(&path, &csv.contents).map_err(|e| {
                        ApiError::internal(format!("Could not write {}: {}", path.display(), e))
                    })?;
                    info!(path = %path.display(), rows = csv.rows, "CSV written");
                    print_json(&csv.file_name)
                }
                None => {
                    println!("{}", csv.contents);
                    Ok(())
                }
            }
        }
        Command::EmailSettings(args) => {
            let current = config::get_email_settings(&ctx.store).await;
            if args.api_key.is_none() && args.sender_email.is_none() && args.sender_name.is_none() {
                return print_json(&current);
            }
            let updated = EmailSettings {
                api_key: args.api_key.unwrap_or(current.api_key),
                sender_email: args.sender_email.unwrap_or(current.sender_email),
                sender_name: args.sender_name.unwrap_or(current.sender_name),
            };
            print_json(&config::save_email_settings(&ctx.store, updated).await?)
        }
        Command::Config => print_json(&config::get_config(&ctx.config)),
    }
}

fn fill_cart(ctx: &AppContext, items: &[ItemArg]) -> Result<(), ApiError> {
    for item in items {
        cart::add_to_cart(&ctx.session, &ctx.cart, &item.code, Some(item.quantity))?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ApiError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::internal(format!("Could not render output: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
