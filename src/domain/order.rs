use std::collections::HashMap;

use rand::seq::IndexedRandom;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub const REF_CODE_LEN: usize = 6;
pub const NOTE_MAX_CHARS: usize = 255;

const REF_CODE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Short shareable order reference. Not unique; `id` is the key.
pub fn generate_ref_code() -> String {
    let mut rng = rand::rng();
    REF_CODE_CHARSET
        .choose_multiple(&mut rng, REF_CODE_LEN)
        .map(|&b| char::from(b))
        .collect()
}

/// The parts of an item the merge looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub item_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStep {
    /// Set `target` (already in the order) to `quantity` and delete the cart item `source`.
    Fold {
        target: Uuid,
        source: Uuid,
        quantity: i32,
    },
    /// Attach the cart item to the order as a new line.
    Attach { item_id: Uuid },
}

/// Work out how cart lines join an order, in cart order.
///
/// A cart line whose product is already in the order adds its quantity onto
/// that line. Lines attached earlier in the same pass count as already in the
/// order, so the result never holds two lines for one product.
pub fn plan_merge(order_lines: &[Line], cart: &[Line]) -> AppResult<Vec<MergeStep>> {
    let mut by_product: HashMap<Uuid, (Uuid, i32)> = order_lines
        .iter()
        .map(|line| (line.product_id, (line.item_id, line.quantity)))
        .collect();

    let mut steps = Vec::with_capacity(cart.len());
    for line in cart {
        match by_product.get_mut(&line.product_id) {
            Some((target, quantity)) => {
                *quantity = quantity
                    .checked_add(line.quantity)
                    .ok_or_else(|| AppError::Validation("quantity is out of range".into()))?;
                steps.push(MergeStep::Fold {
                    target: *target,
                    source: line.item_id,
                    quantity: *quantity,
                });
            }
            None => {
                by_product.insert(line.product_id, (line.item_id, line.quantity));
                steps.push(MergeStep::Attach {
                    item_id: line.item_id,
                });
            }
        }
    }
    Ok(steps)
}

pub fn line_total(quantity: i32, unit_price: i64) -> AppResult<i64> {
    unit_price
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| AppError::Validation("line total is out of range".into()))
}

/// Sum of `quantity * discounted_price` over `(quantity, discounted_price)` pairs.
pub fn order_total<I>(lines: I) -> AppResult<i64>
where
    I: IntoIterator<Item = (i32, i64)>,
{
    lines.into_iter().try_fold(0_i64, |acc, (quantity, price)| {
        acc.checked_add(line_total(quantity, price)?)
            .ok_or_else(|| AppError::Validation("order total is out of range".into()))
    })
}

pub fn validate_note(note: Option<&str>) -> AppResult<()> {
    if let Some(note) = note {
        if note.chars().count() > NOTE_MAX_CHARS {
            return Err(AppError::Validation(format!(
                "note must be at most {NOTE_MAX_CHARS} characters"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: Uuid, quantity: i32) -> Line {
        Line {
            item_id: Uuid::new_v4(),
            product_id,
            quantity,
        }
    }

    #[test]
    fn fresh_order_attaches_every_cart_line() {
        let a = line(Uuid::new_v4(), 3);
        let b = line(Uuid::new_v4(), 1);

        let steps = plan_merge(&[], &[a, b]).unwrap();

        assert_eq!(
            steps,
            vec![
                MergeStep::Attach { item_id: a.item_id },
                MergeStep::Attach { item_id: b.item_id },
            ]
        );
    }

    #[test]
    fn same_product_folds_onto_existing_line() {
        let product = Uuid::new_v4();
        let existing = line(product, 3);
        let incoming = line(product, 2);

        let steps = plan_merge(&[existing], &[incoming]).unwrap();

        assert_eq!(
            steps,
            vec![MergeStep::Fold {
                target: existing.item_id,
                source: incoming.item_id,
                quantity: 5,
            }]
        );
    }

    #[test]
    fn repeated_merges_are_additive() {
        let product = Uuid::new_v4();
        let existing = line(product, 1);
        let first = line(product, 2);
        let second = line(product, 2);

        let steps = plan_merge(&[existing], &[first, second]).unwrap();

        assert_eq!(
            steps.last(),
            Some(&MergeStep::Fold {
                target: existing.item_id,
                source: second.item_id,
                quantity: 5,
            })
        );
    }

    #[test]
    fn duplicate_cart_lines_collapse_into_the_first() {
        let product = Uuid::new_v4();
        let first = line(product, 1);
        let second = line(product, 4);
        let other = line(Uuid::new_v4(), 2);

        let steps = plan_merge(&[], &[first, other, second]).unwrap();

        assert_eq!(
            steps,
            vec![
                MergeStep::Attach {
                    item_id: first.item_id
                },
                MergeStep::Attach {
                    item_id: other.item_id
                },
                MergeStep::Fold {
                    target: first.item_id,
                    source: second.item_id,
                    quantity: 5,
                },
            ]
        );
    }

    #[test]
    fn merge_overflow_is_rejected() {
        let product = Uuid::new_v4();
        let result = plan_merge(&[line(product, i32::MAX)], &[line(product, 1)]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn total_uses_quantity_times_price() {
        assert_eq!(order_total([(3, 1_500), (1, 250)]).unwrap(), 4_750);
        assert_eq!(order_total(std::iter::empty()).unwrap(), 0);
    }

    #[test]
    fn ref_code_is_six_alphanumerics() {
        for _ in 0..32 {
            let code = generate_ref_code();
            assert_eq!(code.len(), REF_CODE_LEN);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn long_notes_are_rejected() {
        assert!(validate_note(None).is_ok());
        assert!(validate_note(Some("leave at the door")).is_ok());
        let long = "x".repeat(NOTE_MAX_CHARS + 1);
        assert!(matches!(
            validate_note(Some(&long)),
            Err(AppError::Validation(_))
        ));
    }
}
