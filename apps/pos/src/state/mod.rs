//! # State Module
//!
//! Manages application state shared by the commands.
//!
//! Separate state types instead of one `AppState`: commands declare exactly
//! what they touch, and independent states don't block each other.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐ │
//! │  │  StoreState  │  │  CartState   │  │ SessionState │  │ ConfigState │ │
//! │  │              │  │              │  │              │  │             │ │
//! │  │  snapshot    │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │  store name │ │
//! │  │  cache pool  │  │    Cart>>    │  │   Session>>  │  │  currency   │ │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └─────────────┘ │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐                                    │
//! │  │ DatasetState │  │ RandomState  │                                    │
//! │  │ ledger +     │  │ Mutex<Box<   │                                    │
//! │  │ catalog (ro) │  │  RandomSrc>> │                                    │
//! │  └──────────────┘  └──────────────┘                                    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: SqlitePool is thread-safe                               │
//! │  • CartState / SessionState / RandomState: exclusive Mutex access      │
//! │  • ConfigState / DatasetState: read-only after initialization          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod dataset;
mod random;
mod session;
mod store;

pub use cart::CartState;
pub use config::ConfigState;
pub use dataset::DatasetState;
pub use random::RandomState;
pub use session::SessionState;
pub use store::StoreState;
