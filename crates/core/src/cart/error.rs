//! Boundary validation for cart input.
//!
//! The store itself accepts any quantity. Callers that take quantities from
//! users run them through [`validate_quantity`] first.

/// Errors raised when validating cart input at the boundary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantity below the minimum of one.
    #[error("quantity must be at least {min} (got {got})")]
    InvalidQuantity {
        /// Smallest accepted quantity.
        min: u32,
        /// Value supplied by the caller.
        got: i64,
    },
}

/// Smallest quantity a user may add or set.
pub const MIN_QUANTITY: u32 = 1;

/// Accept `quantity` if it is a positive `u32`.
///
/// # Errors
///
/// Returns [`CartError::InvalidQuantity`] for zero, negative, or
/// out-of-range values.
pub fn validate_quantity(quantity: i64) -> Result<u32, CartError> {
    u32::try_from(quantity)
        .ok()
        .filter(|q| *q >= MIN_QUANTITY)
        .ok_or(CartError::InvalidQuantity {
            min: MIN_QUANTITY,
            got: quantity,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_positive() {
        assert_eq!(validate_quantity(1), Ok(1));
        assert_eq!(validate_quantity(42), Ok(42));
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(matches!(
            validate_quantity(0),
            Err(CartError::InvalidQuantity { got: 0, .. })
        ));
        assert!(matches!(
            validate_quantity(-3),
            Err(CartError::InvalidQuantity { got: -3, .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(validate_quantity(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = validate_quantity(0).unwrap_err();
        assert_eq!(err.to_string(), "quantity must be at least 1 (got 0)");
    }
}
