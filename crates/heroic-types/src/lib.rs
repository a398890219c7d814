//! Shared type definitions for the Heroic Crafting accounting core.
//!
//! This crate is the single source of truth for the plain data exchanged
//! with the host module. Types flow downstream to `TypeScript` via `ts-rs`
//! so the host can build requests and apply results without hand-written
//! mirrors.
//!
//! # Modules
//!
//! - [`ids`] -- Project UUIDs and opaque host trove identifiers
//! - [`enums`] -- Denominations, payment policies, spending durations
//! - [`coins`] -- The denominated amount ([`Coins`])
//! - [`structs`] -- Trove records, mutations, payment outcomes, projects

pub mod coins;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use coins::Coins;
pub use enums::{Denomination, PaymentPolicy, PlatinumPolicy, ProgressDirection, SpendingDuration};
pub use ids::{ProjectId, TroveId};
pub use structs::{CraftProject, PaymentOutcome, TroveMutation, TroveRecord};
