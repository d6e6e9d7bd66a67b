//! Amount parsing and formatting for the JSON surface.
//!
//! The wire format for money is a two-decimal string ("45.01"); storage is
//! minor units.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use salvo::prelude::StatusError;

/// Parse a decimal amount from its wire form.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, StatusError> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_parse_error| StatusError::bad_request().brief("Invalid amount"))
}

/// Parse a decimal amount into minor units, rejecting sub-penny residues.
pub(crate) fn parse_minor(raw: &str) -> Result<u64, StatusError> {
    let scaled = parse_amount(raw)? * Decimal::ONE_HUNDRED;

    if !scaled.fract().is_zero() {
        return Err(StatusError::bad_request().brief("Amounts must have at most two decimals"));
    }

    scaled
        .to_u64()
        .ok_or_else(|| StatusError::bad_request().brief("Amount out of range"))
}

/// Render minor units as a two-decimal string.
pub(crate) fn format_minor(amount: u64) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}
