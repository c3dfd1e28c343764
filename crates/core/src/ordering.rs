//! Dense ordering of sibling items within a collection.
//!
//! Every ordered collection (e.g. the items of one wishlist) keeps its
//! `sort_order` values dense: for `n` items the values are exactly
//! `0..n`. Moving one item shifts only the band of siblings between its
//! old and new position, so the number of rows written is proportional to
//! the distance moved rather than to the collection size.
//!
//! The functions here compute *plans* (which ids change, and to what);
//! persisting a plan is the repository's job.

use crate::types::DbId;

/// An item that carries a position inside an ordered collection.
pub trait Ordered {
    fn id(&self) -> DbId;
    fn sort_order(&self) -> i32;
    fn set_sort_order(&mut self, sort_order: i32);
}

/// One planned position change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reorder {
    pub id: DbId,
    pub from: i32,
    pub to: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderingError {
    #[error("Index {index} is out of range for a collection of {len} items")]
    InvalidRange { index: i32, len: usize },

    #[error("No item has sort order {0}")]
    MissingItem(i32),
}

/// Reject any index that does not address an existing position.
pub fn check_range(len: usize, old_index: i32, new_index: i32) -> Result<(), OrderingError> {
    for index in [old_index, new_index] {
        if index < 0 || index as usize >= len {
            return Err(OrderingError::InvalidRange { index, len });
        }
    }
    Ok(())
}

/// Plan moving the item at `old_index` to `new_index`.
///
/// Moving towards the front (or staying put) pushes the band
/// `new_index..old_index` back by one; moving towards the end pulls the
/// band `old_index+1..=new_index` forward by one. Identity moves produce an
/// empty plan.
pub fn plan_move<T: Ordered>(
    items: &[T],
    old_index: i32,
    new_index: i32,
) -> Result<Vec<Reorder>, OrderingError> {
    check_range(items.len(), old_index, new_index)?;

    if !items.iter().any(|i| i.sort_order() == old_index) {
        return Err(OrderingError::MissingItem(old_index));
    }
    if old_index == new_index {
        return Ok(Vec::new());
    }

    let moving_up = old_index - new_index > -1;

    let plan = items
        .iter()
        .filter_map(|item| {
            let s = item.sort_order();
            let to = if s == old_index {
                new_index
            } else if moving_up && s >= new_index && s < old_index {
                s + 1
            } else if !moving_up && s > old_index && s <= new_index {
                s - 1
            } else {
                return None;
            };
            Some(Reorder {
                id: item.id(),
                from: s,
                to,
            })
        })
        .collect();

    Ok(plan)
}

/// Apply a plan in memory and return the items in ascending order.
pub fn apply_plan<T: Ordered>(mut items: Vec<T>, plan: &[Reorder]) -> Vec<T> {
    for step in plan {
        if let Some(item) = items.iter_mut().find(|i| i.id() == step.id) {
            item.set_sort_order(step.to);
        }
    }
    sort_by_order(&mut items);
    items
}

/// Move the item at `old_index` to `new_index`, returning the reordered
/// items together with the plan that produced them.
pub fn resequence<T: Ordered>(
    items: Vec<T>,
    old_index: i32,
    new_index: i32,
) -> Result<(Vec<T>, Vec<Reorder>), OrderingError> {
    let plan = plan_move(&items, old_index, new_index)?;
    Ok((apply_plan(items, &plan), plan))
}

/// Sort ascending by `sort_order`, breaking ties by id.
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|i| (i.sort_order(), i.id()));
}

/// True when the `sort_order` values are exactly `0..len`.
pub fn is_dense<T: Ordered>(items: &[T]) -> bool {
    let mut orders: Vec<i32> = items.iter().map(Ordered::sort_order).collect();
    orders.sort_unstable();
    orders.iter().enumerate().all(|(i, &s)| s == i as i32)
}
