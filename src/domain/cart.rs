use crate::error::{AppError, AppResult};

/// Outcome of moving a cart line's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(i32),
    Removed,
}

pub fn validate_quantity(qty: i32) -> AppResult<()> {
    if qty < 1 {
        return Err(AppError::Validation("qty must be at least 1".into()));
    }
    Ok(())
}

/// Quantity of an existing cart line after adding `qty` more.
pub fn increment(current: i32, qty: i32) -> AppResult<i32> {
    validate_quantity(qty)?;
    current
        .checked_add(qty)
        .ok_or_else(|| AppError::Validation("quantity is out of range".into()))
}

/// A line that drops to zero or below is removed, not rejected.
pub fn apply_delta(current: i32, delta: i32) -> AppResult<QuantityChange> {
    if delta == 0 {
        return Err(AppError::Validation("delta must not be zero".into()));
    }
    let next = current
        .checked_add(delta)
        .ok_or_else(|| AppError::Validation("quantity is out of range".into()))?;
    if next <= 0 {
        Ok(QuantityChange::Removed)
    } else {
        Ok(QuantityChange::Updated(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_adds_onto_existing_line() {
        assert_eq!(increment(3, 2).unwrap(), 5);
    }

    #[test]
    fn increment_rejects_non_positive_qty() {
        assert!(matches!(increment(3, 0), Err(AppError::Validation(_))));
        assert!(matches!(increment(3, -1), Err(AppError::Validation(_))));
    }

    #[test]
    fn increment_overflow_is_a_validation_error() {
        assert!(matches!(increment(i32::MAX, 1), Err(AppError::Validation(_))));
    }

    #[test]
    fn decrease_to_zero_removes_the_line() {
        assert_eq!(apply_delta(1, -1).unwrap(), QuantityChange::Removed);
        assert_eq!(apply_delta(2, -5).unwrap(), QuantityChange::Removed);
    }

    #[test]
    fn delta_updates_positive_quantities() {
        assert_eq!(apply_delta(2, -1).unwrap(), QuantityChange::Updated(1));
        assert_eq!(apply_delta(2, 1).unwrap(), QuantityChange::Updated(3));
    }

    #[test]
    fn zero_delta_is_rejected() {
        assert!(matches!(apply_delta(2, 0), Err(AppError::Validation(_))));
    }
}
