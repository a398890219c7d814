//! Core record structs: troves, payment outcomes, and crafting projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coins::Coins;
use crate::ids::{ProjectId, TroveId};

// ---------------------------------------------------------------------------
// Material troves
// ---------------------------------------------------------------------------

/// Snapshot of one material trove held in an actor's inventory.
///
/// `quantity` counts light-bulk units: the tens digit is whole Bulk and the
/// ones digit is light Bulk, so `14` reads as "1; 4L". Each unit is worth
/// the level's hourly spending limit. Value too small for one unit is kept
/// in `leftover`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TroveRecord {
    /// Host item identifier.
    pub id: TroveId,
    /// Item level; valid troves are level 1 through 20.
    pub level: u32,
    /// Light-bulk units held.
    #[ts(type = "number")]
    pub quantity: u64,
    /// Value that does not fill a whole unit.
    #[serde(default)]
    pub leftover: Coins,
}

/// New state for a trove after value has been drawn from it.
///
/// Computed by this core, applied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TroveMutation {
    /// The trove to update.
    pub id: TroveId,
    /// Replacement light-bulk quantity.
    #[ts(type = "number")]
    pub quantity: u64,
    /// Replacement leftover value.
    pub leftover: Coins,
}

// ---------------------------------------------------------------------------
// Payment outcome
// ---------------------------------------------------------------------------

/// The plan for covering a cost, as produced by the combined resolver.
///
/// `can_pay == false` always comes with `remove_copper == 0` and no trove
/// updates, so an aborted plan can never be half-applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PaymentOutcome {
    /// Whether the cost can be covered under the chosen policy.
    pub can_pay: bool,
    /// Copper to remove from the actor's coins.
    #[ts(type = "number")]
    pub remove_copper: u64,
    /// Trove updates to apply, in drain order.
    pub trove_updates: Vec<TroveMutation>,
}

impl PaymentOutcome {
    /// The outcome for a cost that cannot be covered.
    pub const fn unpayable() -> Self {
        Self {
            can_pay: false,
            remove_copper: 0,
            trove_updates: Vec::new(),
        }
    }

    /// A successful outcome drawing only on coins.
    pub const fn coins_only(remove_copper: u64) -> Self {
        Self {
            can_pay: true,
            remove_copper,
            trove_updates: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Crafting projects
// ---------------------------------------------------------------------------

/// A long-running crafting project stored on an actor.
///
/// Wire names match the host's stored project flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CraftProject {
    /// Unique project identifier.
    #[serde(rename = "ID")]
    pub id: ProjectId,
    /// Host document reference of the item being crafted.
    #[serde(rename = "ItemUUID")]
    pub item_id: String,
    /// Value already invested, in copper.
    #[serde(rename = "progressInCopper")]
    #[ts(type = "number")]
    pub progress_in_copper: u64,
    /// Number of items crafted in one batch.
    #[serde(rename = "batchSize")]
    pub batch_size: u32,
    /// When the project was begun.
    #[serde(rename = "startedAt")]
    pub started_at: DateTime<Utc>,
}
