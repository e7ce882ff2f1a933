use bit_set::BitSet;
use std::collections::HashMap;
use std::fmt;
use std::io::BufRead;
use std::iter::FromIterator;
use std::str::FromStr;

use crate::error::{AprioriError, Result};
use crate::itemset::{Item, ItemSet};

/// One input record.
///
/// `items` keeps the order read from input. `mask` holds the dense indices the
/// owning store assigned to those items, so containment is a bit-set subset test.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    items: Vec<Item>,
    mask: BitSet,
}

impl Transaction {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when every index in `mask` is present in this transaction.
    pub fn covers(&self, mask: &BitSet) -> bool {
        mask.is_subset(&self.mask)
    }
}

/// Per-item occurrence counts in first-seen order.
///
/// The position of an item in the table doubles as its dense index in every
/// transaction mask.
#[derive(Clone, Debug, Default)]
pub struct FrequencyTable {
    items: Vec<Item>,
    counts: Vec<usize>,
    index: HashMap<Item, usize>,
}

impl FrequencyTable {
    /// Registers one more transaction containing `item`, returning its index.
    fn observe(&mut self, item: Item) -> usize {
        let items = &mut self.items;
        let counts = &mut self.counts;
        let idx = *self.index.entry(item).or_insert_with(|| {
            items.push(item);
            counts.push(0);
            items.len() - 1
        });
        counts[idx] += 1;
        idx
    }

    pub fn index_of(&self, item: Item) -> Option<usize> {
        self.index.get(&item).copied()
    }

    pub fn count(&self, item: Item) -> usize {
        self.index_of(item).map_or(0, |idx| self.counts[idx])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `(item, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (Item, usize)> + '_ {
        self.items.iter().copied().zip(self.counts.iter().copied())
    }
}

/// All transactions of a run plus the single-item frequency table built while
/// they were loaded.
///
/// Build it from parsed rows with `collect()`, or straight from text with
/// [`TransactionStore::from_reader`] / `str::parse`:
///
/// ```rust
/// use apriori::TransactionStore;
///
/// let store: TransactionStore = vec![vec![1, 2, 3], vec![1, 2], vec![3]]
///     .into_iter()
///     .collect();
///
/// assert_eq!(store.len(), 3);
/// assert_eq!(store.frequencies().count(3), 2);
/// ```
#[derive(Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    frequencies: FrequencyTable,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one transaction. Repeated items count once; an empty row is
    /// ignored.
    pub fn insert<I: IntoIterator<Item = Item>>(&mut self, row: I) {
        let mut items = Vec::new();
        let mut mask = BitSet::new();
        for item in row {
            if items.contains(&item) {
                continue;
            }
            items.push(item);
            mask.insert(self.frequencies.observe(item));
        }

        if !items.is_empty() {
            self.transactions.push(Transaction { items, mask });
        }
    }

    /// Reads one transaction per non-blank line of whitespace separated
    /// integers.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut store = TransactionStore::new();
        for (line_no, line) in reader.lines().enumerate() {
            let row = parse_row(&line?, line_no + 1)?;
            store.insert(row);
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Dense mask for `items`, or `None` when an item never occurs.
    pub fn mask_of(&self, items: &[Item]) -> Option<BitSet> {
        let mut mask = BitSet::with_capacity(self.frequencies.len());
        for &item in items {
            mask.insert(self.frequencies.index_of(item)?);
        }
        Some(mask)
    }

    /// Number of transactions containing every item of `items`.
    pub fn support_count(&self, items: &[Item]) -> usize {
        match self.mask_of(items) {
            Some(mask) => self.transactions.iter().filter(|t| t.covers(&mask)).count(),
            None => 0,
        }
    }

    /// Counts the transactions containing `set` and stores the result on it.
    pub fn count_into(&self, set: &mut ItemSet) -> usize {
        let count = self.support_count(set.items());
        set.set_count(count);
        count
    }

    /// Whether transaction `idx` contains every item of `items`.
    pub fn contains(&self, idx: usize, items: &[Item]) -> bool {
        match (self.transactions.get(idx), self.mask_of(items)) {
            (Some(transaction), Some(mask)) => transaction.covers(&mask),
            _ => false,
        }
    }
}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<Item>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<Item>().map_err(|_| AprioriError::Parse {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}

impl<R: IntoIterator<Item = Item>> FromIterator<R> for TransactionStore {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut store = TransactionStore::new();
        for row in iter {
            store.insert(row);
        }
        store
    }
}

impl FromStr for TransactionStore {
    type Err = AprioriError;

    fn from_str(s: &str) -> Result<Self> {
        TransactionStore::from_reader(s.as_bytes())
    }
}

impl fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\nTransaction Store ({} transactions)\n\n", self.len())?;
        for (item, count) in self.frequencies.iter() {
            write!(f, "Item: {}, Count: {}\n", item, count)?;
        }
        Ok(())
    }
}
