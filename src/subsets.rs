//! Power-set expansion of the frequent single items.
//!
//! Items are folded in left to right. For each new item a batch is built from
//! the singleton followed by every already generated set extended with the
//! item, and each size tier of the batch is spliced in right after the
//! existing tier of the same size. The resulting order is deterministic and is
//! the order in which candidates are counted and rules are written.

use crate::itemset::ItemSet;

/// Generated sets grouped by size; `tiers[k]` holds the sets of size `k + 1`.
pub type Tiers = Vec<Vec<ItemSet>>;

/// Every non-empty subset of `singles`, grouped by ascending size.
///
/// Each entry of `singles` is expected to be a size-1 set, as produced by
/// [`crate::support::prune_single_items`]. Only the first item of an entry is
/// used and empty entries are skipped. Singletons keep the counts they carry
/// in `singles`; larger sets start at zero.
pub fn generate_tiers(singles: &[ItemSet]) -> Tiers {
    let mut tiers: Tiers = Vec::new();

    for single in singles {
        let Some(item) = single.iter().next() else {
            continue;
        };

        let mut batch = Vec::with_capacity(1 + tiers.iter().map(Vec::len).sum::<usize>());
        batch.push(ItemSet::singleton(item, single.count()));
        for set in tiers.iter().flatten() {
            batch.push(set.with_item(item));
        }

        for set in batch {
            let size = set.size();
            while tiers.len() < size {
                tiers.push(Vec::new());
            }
            tiers[size - 1].push(set);
        }
    }

    tiers
}

/// Flat view of [`generate_tiers`]: ascending size, generation order within a
/// size.
pub fn generate_subsets(singles: &[ItemSet]) -> Vec<ItemSet> {
    generate_tiers(singles).into_iter().flatten().collect()
}

/// Subsets of the items of `set`, each a singleton-built set with zero count.
pub(crate) fn subsets_of(set: &ItemSet) -> Vec<ItemSet> {
    let singles: Vec<ItemSet> = set.iter().map(|item| ItemSet::singleton(item, 0)).collect();
    generate_subsets(&singles)
}
