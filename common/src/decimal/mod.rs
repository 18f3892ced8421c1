//! Decimal type utilities for monetary amounts

use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

use crate::error::{Error, Result};

/// Monetary amount with decimal precision
pub type Amount = Decimal;

/// Reject amounts that are zero or negative
///
/// Operations carry their direction in their type, so every amount that
/// enters a statement must be strictly positive.
pub fn ensure_positive(amount: Amount) -> Result<Amount> {
    if amount <= Amount::ZERO {
        return Err(Error::InvalidArgument(format!(
            "Amount must be greater than zero, got {}",
            amount
        )));
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_amount_is_accepted() {
        assert_eq!(ensure_positive(dec!(0.01)).unwrap(), dec!(0.01));
        assert_eq!(ensure_positive(dec!(100)).unwrap(), dec!(100));
    }

    #[test]
    fn test_zero_and_negative_amounts_are_rejected() {
        assert!(matches!(ensure_positive(Amount::ZERO), Err(Error::InvalidArgument(_))));
        assert!(matches!(ensure_positive(dec!(-5)), Err(Error::InvalidArgument(_))));
    }
}
