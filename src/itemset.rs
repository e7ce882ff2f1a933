use std::fmt;
use std::iter::FromIterator;

/// Identifier of a single item as it appears in the input.
pub type Item = i64;

/// An ordered run of unique items together with its support count.
///
/// Items keep the order in which they were generated, which is also the order
/// in which they are rendered. The count is the number of transactions that
/// contain every item; it is only meaningful once the tier holding the set has
/// been counted.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ItemSet {
    items: Vec<Item>,
    count: usize,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(item: Item, count: usize) -> Self {
        Self {
            items: vec![item],
            count,
        }
    }

    /// Builds a set from `items`, dropping repeats after their first occurrence.
    pub fn from_items<I: IntoIterator<Item = Item>>(items: I) -> Self {
        items.into_iter().collect()
    }

    /// Returns a copy of `self` with `item` appended and a zero count.
    pub fn with_item(&self, item: Item) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items);
        if !items.contains(&item) {
            items.push(item);
        }
        Self { items, count: 0 }
    }

    pub fn push(&mut self, item: Item) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    pub fn contains(&self, item: Item) -> bool {
        self.items.contains(&item)
    }

    pub fn iter(&self) -> impl Iterator<Item = Item> + '_ {
        self.items.iter().copied()
    }
}

impl FromIterator<Item> for ItemSet {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut set = ItemSet::new();
        for item in iter {
            set.push(item);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Renders as `{a,b,c}`.
impl fmt::Display for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        let mut items = self.items.iter();
        if let Some(first) = items.next() {
            write!(f, "{}", first)?;
            for item in items {
                write!(f, ",{}", item)?;
            }
        }
        write!(f, "}}")
    }
}
