//! Parsing user-facing amount strings.
//!
//! Accepts the host's own format (`"1 gp, 5 sp"`) plus a few forgiving
//! variants that show up in hand-edited fields and chat: whitespace instead
//! of commas, glued counts (`"5gp"`), full names (`"5 gold 3 silver"`), and
//! a bare integer meaning copper. Formatting is [`Coins`]'s `Display` impl.

use heroic_types::{Coins, Denomination};

use crate::CoinError;

/// Parse an amount string into [`Coins`], keeping the breakdown as written.
///
/// Repeated denominations accumulate (`"1 gp, 2 gp"` is `3 gp`).
///
/// # Errors
///
/// Returns [`CoinError::Empty`] for blank input,
/// [`CoinError::InvalidCount`] for a count that is not a whole number,
/// [`CoinError::UnknownDenomination`] for an unrecognized label,
/// [`CoinError::MissingDenomination`] when a count has no label, and
/// [`CoinError::Overflow`] if a denomination count or the copper total
/// overflows.
pub fn parse_coins(input: &str) -> Result<Coins, CoinError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CoinError::Empty);
    }

    if let Ok(copper) = input.parse::<u64>() {
        return Ok(Coins::from_copper(copper));
    }

    let mut coins = Coins::ZERO;
    let mut tokens = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty());

    while let Some(token) = tokens.next() {
        let (count_text, glued_label) = split_glued(token);
        let label = if glued_label.is_empty() {
            tokens.next().ok_or_else(|| CoinError::MissingDenomination {
                count: count_text.to_owned(),
            })?
        } else {
            glued_label
        };

        let count: u64 = count_text
            .parse()
            .map_err(|source| CoinError::InvalidCount {
                token: count_text.to_owned(),
                source,
            })?;
        let denomination = Denomination::from_label(label)
            .ok_or_else(|| CoinError::UnknownDenomination(label.to_owned()))?;

        let slot = match denomination {
            Denomination::Platinum => &mut coins.platinum,
            Denomination::Gold => &mut coins.gold,
            Denomination::Silver => &mut coins.silver,
            Denomination::Copper => &mut coins.copper,
        };
        *slot = slot.checked_add(count).ok_or(CoinError::Overflow)?;
    }

    if coins.checked_copper_value().is_none() {
        return Err(CoinError::Overflow);
    }
    Ok(coins)
}

/// Split `"5gp"` into `("5", "gp")`. Tokens without a leading digit run
/// come back whole with an empty label.
fn split_glued(token: &str) -> (&str, &str) {
    let digits_end = token
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(token.len(), |(index, _)| index);
    if digits_end == 0 {
        return (token, "");
    }
    token.split_at(digits_end)
}

/// Parse an amount string, treating blank input as zero.
///
/// The host stores empty leftovers as an empty string or omits them; both
/// mean no value.
///
/// # Errors
///
/// Same as [`parse_coins`] for non-blank input.
pub fn parse_coins_or_zero(input: &str) -> Result<Coins, CoinError> {
    if input.trim().is_empty() {
        Ok(Coins::ZERO)
    } else {
        parse_coins(input)
    }
}
