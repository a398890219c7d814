//! Coin normalization, difference, and parsing for Heroic Crafting.
//!
//! All value in the accounting core is tracked as an exact copper total.
//! This crate converts between that total and the four-denomination
//! breakdown players see, and between the breakdown and the strings the
//! host stores in item flags and chat cards.
//!
//! # Modules
//!
//! - [`arithmetic`] -- [`normalize`], [`difference`], and checked add/scale
//! - [`parse`] -- [`parse_coins`] for host and hand-typed amount strings
//!
//! # Usage
//!
//! ```
//! use heroic_coins::{difference, normalize, parse_coins};
//! use heroic_types::{Coins, PlatinumPolicy};
//!
//! let cost = parse_coins("5 gp, 4 sp").ok();
//! assert_eq!(cost, Some(Coins::new(0, 5, 4, 0)));
//!
//! assert_eq!(normalize(1234, PlatinumPolicy::Convert), Coins::new(1, 2, 3, 4));
//!
//! let short = difference(&Coins::from_gold(3), &Coins::from_gold(5), PlatinumPolicy::Ignore);
//! assert!(short.is_none());
//! ```

pub mod arithmetic;
pub mod parse;

pub use arithmetic::{add, difference, half, normalize, renormalize, scale, sum};
pub use parse::{parse_coins, parse_coins_or_zero};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when reading an amount string.
#[derive(Debug, thiserror::Error)]
pub enum CoinError {
    /// The input was blank.
    #[error("empty currency amount")]
    Empty,

    /// A count was not a non-negative whole number.
    #[error("invalid coin count '{token}': {source}")]
    InvalidCount {
        /// The offending token.
        token: String,
        /// The underlying integer parse error.
        source: core::num::ParseIntError,
    },

    /// A label did not name any denomination.
    #[error("unknown denomination: '{0}'")]
    UnknownDenomination(String),

    /// A count was not followed by a denomination label.
    #[error("missing denomination after count '{count}'")]
    MissingDenomination {
        /// The count left without a label.
        count: String,
    },

    /// A denomination count overflowed while accumulating.
    #[error("coin count overflow")]
    Overflow,
}
