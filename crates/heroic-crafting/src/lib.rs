//! Payment resolution, crafting projects, and configuration for Heroic
//! Crafting.
//!
//! This is the crate a host integration talks to. It combines coin
//! arithmetic from `heroic-coins` with trove payment from `heroic-trove`
//! into the five payment policies, and keeps an actor's crafting projects.
//!
//! # Modules
//!
//! - [`payment`] -- [`Accounting`] and the combined payment resolver
//! - [`project`] -- [`ProjectBook`] and project cost/progress helpers
//! - [`config`] -- [`CraftingConfig`] loaded from YAML
//!
//! # Usage
//!
//! ```
//! use heroic_crafting::Accounting;
//! use heroic_types::{Coins, PaymentPolicy, TroveId, TroveRecord};
//!
//! let accounting = Accounting::standard();
//! let troves = vec![TroveRecord {
//!     id: TroveId::new("trove-1"),
//!     level: 5,
//!     quantity: 3,
//!     leftover: Coins::ZERO,
//! }];
//!
//! let outcome = accounting.resolve(
//!     PaymentPolicy::PreferTrove,
//!     &Coins::from_gold(10),
//!     &troves,
//!     &Coins::from_gold(8),
//! );
//! assert!(outcome.can_pay);
//! assert_eq!(outcome.remove_copper, 200);
//! ```

pub mod config;
pub mod payment;
pub mod project;

pub use config::{AccountingConfig, ConfigError, CraftingConfig, LOG_LEVEL_ENV, LoggingConfig};
pub use payment::Accounting;
pub use project::{
    NewProject, ProjectBook, ProjectError, batch_cost, craft_progress, is_complete,
    max_starting_spend, progress_percent,
};
