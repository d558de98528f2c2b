use rand::RngCore;
use tracing::debug;

use crate::pool::Pool;
use crate::select::weighted_index;
use crate::source::{Item, LootSource, Weight};

/// A table where each item has its own weight.
///
/// An item is selected with probability `weight / total weight`.
/// Items with a weight of zero or less are never selected, but stay
/// in the table.
///
/// If the table is created with `remove_on_select`, each selection
/// decrements the selected item's weight by one, so a weight can be
/// read as "number of copies left".
///
/// # Examples
///
/// ```
/// use loot_tables::{LootSource, WeightedTable};
///
/// let mut t = WeightedTable::new(true);
/// t.add("gold", 2);
///
/// let mut rng = rand::rng();
/// assert_eq!(Some("gold"), t.select(&mut rng));
/// assert_eq!(Some("gold"), t.select(&mut rng));
/// assert_eq!(None, t.select(&mut rng));
/// assert_eq!(Some(0), t.weight_of(&"gold"));
/// ```
#[derive(Debug, Clone)]
pub struct WeightedTable<T: Item, W: Weight = i32> {
    items: Pool<T, W>,
    remove_on_select: bool,
}

impl<T: Item, W: Weight> WeightedTable<T, W> {
    /// Create an empty table.
    pub fn new(remove_on_select: bool) -> WeightedTable<T, W> {
        WeightedTable {
            items: Pool::new(),
            remove_on_select,
        }
    }

    /// Add an item with the given weight.
    ///
    /// Returns false if the item is already in the table; its
    /// existing weight is not changed.
    pub fn add(&mut self, item: T, weight: W) -> bool {
        self.items.insert(item, weight)
    }

    /// Remove an item. Returns false if the item was not in the table.
    pub fn remove(&mut self, item: &T) -> bool {
        self.items.remove(item).is_some()
    }

    /// Set the weight of an item already in the table.
    /// Returns false if the item is not in the table.
    pub fn modify_weight(&mut self, item: &T, new_weight: W) -> bool {
        match self.items.get_mut(item) {
            Some(w) => {
                *w = new_weight;
                true
            }
            None => false,
        }
    }

    /// The current weight of an item, if it is in the table.
    pub fn weight_of(&self, item: &T) -> Option<W> {
        self.items.get(item).copied()
    }

    /// Is the item in the table? This is true even for items whose
    /// weight has dropped to zero.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Sum of all positive weights.
    pub fn total_weight(&self) -> W {
        self.items
            .values()
            .filter(|w| **w > W::zero())
            .fold(W::zero(), |acc, w| acc.saturating_add(*w))
    }

    /// Number of items in the table, selectable or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Are weights decremented when items are selected?
    pub fn removes_on_select(&self) -> bool {
        self.remove_on_select
    }

    /// Iterate over items and their weights.
    pub fn iter(&self) -> impl Iterator<Item = (&T, W)> {
        self.items.iter().map(|(item, w)| (item, *w))
    }
}

impl<T: Item, W: Weight> Default for WeightedTable<T, W> {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<T: Item, W: Weight> LootSource<T> for WeightedTable<T, W> {
    /// Select an item by weight. With `remove_on_select` the selected
    /// item's weight is decremented by one; the item is never removed.
    fn select(&mut self, rng: &mut dyn RngCore) -> Option<T> {
        let i = weighted_index(self.items.values().copied(), rng)?;

        if self.remove_on_select {
            let w = self.items.value_at_mut(i);
            *w = w.saturating_sub(W::one());
            if *w <= W::zero() {
                debug!("weighted item exhausted");
            }
        }

        Some(self.items.entry_at(i).0.clone())
    }
}
