use rand::{Rng, RngCore};
use tracing::debug;

use crate::pool::Pool;
use crate::source::{Item, LootSource};

/// A table of items that are all equally likely to be selected.
///
/// Duplicates are not allowed. If the table is created with
/// `remove_on_select`, every selected item is taken out of the table,
/// so each item drops at most once.
///
/// # Examples
///
/// ```
/// use loot_tables::{LootSource, UniformTable};
///
/// let mut t = UniformTable::new(true);
/// t.add("potion");
/// t.add("scroll");
///
/// let mut rng = rand::rng();
/// let first = t.select(&mut rng).unwrap();
/// let second = t.select(&mut rng).unwrap();
///
/// assert_ne!(first, second);
/// assert_eq!(None, t.select(&mut rng));
/// ```
#[derive(Debug, Clone)]
pub struct UniformTable<T: Item> {
    items: Pool<T, ()>,
    remove_on_select: bool,
}

impl<T: Item> UniformTable<T> {
    /// Create an empty table.
    pub fn new(remove_on_select: bool) -> UniformTable<T> {
        UniformTable {
            items: Pool::new(),
            remove_on_select,
        }
    }

    /// Add an item. Returns false if the item is already in the table.
    pub fn add(&mut self, item: T) -> bool {
        self.items.insert(item, ())
    }

    /// Remove an item. Returns false if the item was not in the table.
    pub fn remove(&mut self, item: &T) -> bool {
        self.items.remove(item).is_some()
    }

    /// Is the item currently in the table?
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Number of items in the table.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Are items removed when they are selected?
    pub fn removes_on_select(&self) -> bool {
        self.remove_on_select
    }

    /// Iterate over the items in the table.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|(item, _)| item)
    }
}

impl<T: Item> Default for UniformTable<T> {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<T: Item> LootSource<T> for UniformTable<T> {
    /// Select an item uniformly at random. With `remove_on_select`
    /// the item is removed from the table before it is returned.
    fn select(&mut self, rng: &mut dyn RngCore) -> Option<T> {
        let i = match self.items.len() {
            0 => {
                debug!("uniform table is empty");
                return None;
            }
            1 => 0,
            n => rng.random_range(0..n),
        };

        if self.remove_on_select {
            let (item, _) = self.items.remove_at(i);
            if self.items.is_empty() {
                debug!("uniform table exhausted");
            }
            Some(item)
        } else {
            Some(self.items.entry_at(i).0.clone())
        }
    }
}
