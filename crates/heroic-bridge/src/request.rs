//! The JSON request the host sends and its resolution.
//!
//! Amounts arrive as the strings the host already stores ("5 gp, 4 sp"),
//! so the host never has to convert them to copper itself.

use serde::Deserialize;
use tracing::debug;

use heroic_coins::{parse_coins, parse_coins_or_zero};
use heroic_crafting::Accounting;
use heroic_types::{PaymentOutcome, PaymentPolicy, TroveId, TroveRecord};

use crate::error::BridgeError;

/// A payment to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Policy to apply; the configured default when absent.
    #[serde(default)]
    pub policy: Option<PaymentPolicy>,
    /// The actor's coins. Blank means none.
    #[serde(default)]
    pub liquid: String,
    /// The actor's material troves.
    #[serde(default)]
    pub troves: Vec<TroveRequest>,
    /// The cost to cover.
    pub cost: String,
}

/// One trove as the host describes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TroveRequest {
    /// Host item identifier.
    pub id: TroveId,
    /// Item level.
    pub level: u32,
    /// Light-bulk units held.
    pub quantity: u64,
    /// Sub-unit value. Blank means none.
    #[serde(default)]
    pub leftover: String,
}

impl TroveRequest {
    fn into_record(self) -> Result<TroveRecord, BridgeError> {
        let leftover = parse_coins_or_zero(&self.leftover).map_err(|source| BridgeError::Amount {
            field: format!("troves[{}].leftover", self.id),
            source,
        })?;
        Ok(TroveRecord {
            id: self.id,
            level: self.level,
            quantity: self.quantity,
            leftover,
        })
    }
}

/// Resolve `request` under `accounting`.
///
/// # Errors
///
/// Returns [`BridgeError::Amount`] if any amount string is unreadable. A
/// blank cost is an error; blank coins and leftovers count as zero.
pub fn resolve(
    accounting: &Accounting,
    default_policy: PaymentPolicy,
    request: PaymentRequest,
) -> Result<PaymentOutcome, BridgeError> {
    let policy = request.policy.unwrap_or(default_policy);
    let cost = parse_coins(&request.cost).map_err(|source| BridgeError::Amount {
        field: "cost".to_owned(),
        source,
    })?;
    let liquid = parse_coins_or_zero(&request.liquid).map_err(|source| BridgeError::Amount {
        field: "liquid".to_owned(),
        source,
    })?;
    let troves = request
        .troves
        .into_iter()
        .map(TroveRequest::into_record)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(?policy, troves = troves.len(), "resolving bridge request");
    Ok(accounting.resolve(policy, &liquid, &troves, &cost))
}
