//! # TriPUS POS Library
//!
//! Orchestration layer for the TriPUS point-of-sale and business dashboard.
//! Owns application state, exposes command functions and the CLI.
//!
//! ## Module Organization
//! ```text
//! tripus_pos/
//! ├── lib.rs          ◄─── You are here (tracing, bootstrap)
//! ├── state/          ◄─── Config, store, cart, session, dataset, random
//! ├── commands/       ◄─── product, cart, checkout, credit, analytics,
//! │                        team, export, config
//! ├── cli.rs          ◄─── clap front end
//! └── error.rs        ◄─── ApiError returned by every command
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging ──► tracing-subscriber + EnvFilter (RUST_LOG)   │
//! │  2. Load Config ─────────► defaults → config.toml → TRIPUS_* env       │
//! │  3. Open Cache ──────────► SQLite (WAL) + migrations                   │
//! │  4. Build Session ───────► cached products/bills (or defaults),        │
//! │                            generated customers, default team           │
//! │  5. Generate Dataset ────► 30-day sales ledger + stock catalog         │
//! │  6. Run Command          ► CLI subcommand, JSON to stdout              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use chrono::NaiveDate;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use tracing_subscriber::util::SubscriberInitExt;
use state::{CartState, ConfigState, DatasetState, RandomState, SessionState, StoreState};
use tripus_core::generator::{generate_catalog, generate_customers, generate_sales_data};
use tripus_core::team::default_team;
use tripus_core::{history_from_bills, RandomSource, Session};
use tripus_notify::Mailer;
use tripus_store::Database;

/// Days of synthetic sales history generated at startup.
pub const LEDGER_DAYS: usize = 30;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tripus=debug,sqlx=warn";

/// Everything a command may need, built once per process.
#[derive(Clone)]
pub struct AppContext {
    pub config: ConfigState,
    pub store: StoreState,
    pub session: SessionState,
    pub cart: CartState,
    pub dataset: DatasetState,
    pub random: RandomState,
    pub mailer: Mailer,
}

impl AppContext {
    /// Loads cached state and generates the demo dataset.
    ///
    /// `today` anchors the sales ledger; `rng` seeds every random draw,
    /// here and in later forecasts.
    pub async fn bootstrap(
        config: ConfigState,
        db: Database,
        mailer: Mailer,
        today: NaiveDate,
        mut rng: Box<dyn RandomSource + Send>,
    ) -> Self {
        let snapshots = db.snapshots();
        let products = snapshots.load_products().await;
        let bills = snapshots.load_bills().await;

        let customers = generate_customers(rng.as_mut());
        let ledger = generate_sales_data(LEDGER_DAYS, today, rng.as_mut());
        let catalog = generate_catalog(rng.as_mut());

        info!(
            products = products.len(),
            bills = bills.len(),
            customers = customers.len(),
            ledger = ledger.len(),
            "Session initialized"
        );

        // Checkout history is rebuilt from cached bills so product
        // forecasts see earlier runs.
        let history = history_from_bills(&bills);

        let session = Session::new(products)
            .with_customers(customers)
            .with_transactions(history)
            .with_bills(bills)
            .with_team(default_team());

        AppContext {
            config,
            store: StoreState::new(db),
            session: SessionState::new(session),
            cart: CartState::new(),
            dataset: DatasetState::new(ledger, catalog),
            random: RandomState::new(rng),
            mailer,
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tripus=trace` - Show trace for tripus crates only
/// - Default: INFO, DEBUG for tripus crates
///
/// Logs go to stderr so command output on stdout stays valid JSON.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    build_subscriber(filter).init();
}

fn build_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

/// Determines the snapshot cache path.
///
/// ## Resolution
/// 1. `database_path` from config (includes the `TRIPUS_DB_PATH` override)
/// 2. Platform data directory:
///    - **macOS**: `~/Library/Application Support/com.tripus.pos/tripus.db`
///    - **Windows**: `%APPDATA%\tripus\pos\data\tripus.db`
///    - **Linux**: `~/.local/share/pos/tripus.db`
pub fn database_path(config: &ConfigState) -> Result<PathBuf, ApiError> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "tripus", "pos")
        .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir).map_err(|e| {
        ApiError::internal(format!("Could not create {}: {}", data_dir.display(), e))
    })?;

    Ok(data_dir.join("tripus.db"))
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Arc;
    use tripus_core::{EmailSettings, FixedRandom};
    use tripus_notify::RecordingTransport;
    use tripus_store::StoreConfig;

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    /// Context over an in-memory cache, a recording transport, a fixed
    /// random source and no payment delay.
    pub async fn context() -> (AppContext, RecordingTransport) {
        let config = ConfigState {
            payment_delay_ms: 0,
            ..ConfigState::default()
        };
        let db = Database::new(StoreConfig::in_memory()).await.unwrap();
        let transport = RecordingTransport::new();
        let mailer = Mailer::new(Arc::new(transport.clone()));

        let ctx = AppContext::bootstrap(
            config,
            db,
            mailer,
            today(),
            Box::new(FixedRandom::midpoint()),
        )
        .await;
        (ctx, transport)
    }

    pub fn configured_settings() -> EmailSettings {
        EmailSettings {
            api_key: "re_test".to_string(),
            sender_email: "shop@example.com".to_string(),
            sender_name: "TriPUS Store".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_uses_defaults_on_empty_cache() {
        let (ctx, _) = testing::context().await;

        ctx.session.with_session(|s| {
            assert_eq!(s.products().len(), 5);
            assert_eq!(s.customers().len(), 50);
            assert_eq!(s.team().len(), 3);
            assert!(s.bills().is_empty());
        });
        assert!(!ctx.dataset.ledger().is_empty());
        assert_eq!(ctx.dataset.catalog().len(), 20);
    }

    #[tokio::test]
    async fn test_bootstrap_restores_history_from_cached_bills() {
        use crate::commands::analytics::get_product_forecast;
        use crate::commands::cart::add_to_cart;
        use crate::commands::checkout::{checkout, CheckoutRequest};
        use std::sync::Arc;
        use tripus_core::{FixedRandom, PaymentMethod, Tender};
        use tripus_notify::RecordingTransport;

        let (ctx, _) = testing::context().await;
        add_to_cart(&ctx.session, &ctx.cart, "P001", Some(5)).unwrap();
        checkout(
            &ctx,
            CheckoutRequest {
                tender: Tender::Electronic {
                    method: PaymentMethod::Upi,
                },
                customer_name: None,
                customer_email: None,
            },
        )
        .await
        .unwrap();

        // A fresh process over the same cache.
        let reopened = AppContext::bootstrap(
            ctx.config.clone(),
            ctx.store.inner().clone(),
            Mailer::new(Arc::new(RecordingTransport::new())),
            chrono::Utc::now().date_naive(),
            Box::new(FixedRandom::midpoint()),
        )
        .await;

        reopened.session.with_session(|s| {
            assert_eq!(s.bills().len(), 1);
            assert_eq!(s.transactions().len(), 1);
            assert_eq!(s.transactions()[0].id, "TXN001");
        });

        let forecast = get_product_forecast(
            &reopened.session,
            &reopened.random,
            chrono::Utc::now().date_naive(),
        );
        let rice = forecast
            .series
            .iter()
            .find(|series| series.product == "Rice (1kg)")
            .unwrap();
        assert_eq!(rice.historical[6], 5);
    }

    #[test]
    fn test_default_log_filter_is_applied() {
        use tracing::Level;

        let subscriber = build_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing::subscriber::with_default(subscriber, || {
            assert!(!tracing::enabled!(target: "sqlx::query", Level::TRACE));
            assert!(!tracing::enabled!(target: "sqlx::query", Level::INFO));
            assert!(tracing::enabled!(target: "sqlx::query", Level::WARN));
            assert!(tracing::enabled!(target: "tripus_pos::commands", Level::DEBUG));
            assert!(!tracing::enabled!(target: "hyper::client", Level::DEBUG));
        });
    }

    #[test]
    fn test_database_path_prefers_config() {
        let config = ConfigState {
            database_path: Some(PathBuf::from("/tmp/custom.db")),
            ..ConfigState::default()
        };
        assert_eq!(database_path(&config).unwrap(), PathBuf::from("/tmp/custom.db"));
    }
}
