use tracing::{debug, trace};

use crate::error::{AprioriError, Result};
use crate::itemset::ItemSet;
use crate::transactions::{FrequencyTable, TransactionStore};

/// Rounds half away from zero (for non-negative input) to `digits` decimals.
pub fn round_to(x: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (x * scale + 0.5).floor() / scale
}

/// `count / total * 100`.
pub fn percentage(count: usize, total: usize, context: &'static str) -> Result<f64> {
    if total == 0 {
        return Err(AprioriError::DivisionByZero { context });
    }
    Ok(count as f64 / total as f64 * 100.0)
}

/// Strict comparison: a set sitting exactly on the threshold is kept.
pub fn is_frequent(count: usize, num_trans: usize, min_support: u32) -> Result<bool> {
    Ok(percentage(count, num_trans, "support")? >= f64::from(min_support))
}

/// Drops every item below `min_support` percent of `num_trans` transactions.
///
/// Survivors come back as size-1 sets carrying their counts, in first-seen
/// order.
pub fn prune_single_items(
    frequencies: &FrequencyTable,
    num_trans: usize,
    min_support: u32,
) -> Result<Vec<ItemSet>> {
    if num_trans == 0 {
        return Err(AprioriError::DivisionByZero {
            context: "single item support",
        });
    }

    let mut survivors = Vec::new();
    for (item, count) in frequencies.iter() {
        if is_frequent(count, num_trans, min_support)? {
            survivors.push(ItemSet::singleton(item, count));
        } else {
            trace!(item, count, "pruned single item");
        }
    }

    debug!(
        kept = survivors.len(),
        pruned = frequencies.len() - survivors.len(),
        "single item stage"
    );
    Ok(survivors)
}

/// Result of counting and filtering one candidate tier.
#[derive(Debug, Default)]
pub struct TierOutcome {
    pub retained: Vec<ItemSet>,
    pub pruned: usize,
    /// Every candidate of a non-empty tier fell below the threshold.
    pub exhausted: bool,
}

/// Counts each candidate of `tier` against `store` and keeps the frequent ones.
///
/// Candidates are visited in generation order; `on_retained` runs for each
/// survivor as soon as it is counted, before the next candidate is looked at.
pub fn prune_tier<F>(
    tier: Vec<ItemSet>,
    store: &TransactionStore,
    min_support: u32,
    mut on_retained: F,
) -> Result<TierOutcome>
where
    F: FnMut(&ItemSet) -> Result<()>,
{
    let total = tier.len();
    let mut outcome = TierOutcome::default();

    for mut candidate in tier {
        let count = store.count_into(&mut candidate);
        if is_frequent(count, store.len(), min_support)? {
            on_retained(&candidate)?;
            outcome.retained.push(candidate);
        } else {
            trace!(set = %candidate, count, "pruned candidate");
            outcome.pruned += 1;
        }
    }

    outcome.exhausted = total > 0 && outcome.retained.is_empty();
    Ok(outcome)
}
