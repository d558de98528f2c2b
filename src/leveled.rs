use rand::RngCore;
use std::collections::BTreeMap;
use tracing::debug;

use crate::source::LootSource;

/// A table with a different nested source for each level.
///
/// The table keeps a current level, starting at 0, and selection
/// delegates to whichever source is registered for that level.
/// The current level is not bounded: it can be negative, or point at
/// a level with no source, in which case nothing is selected.
///
/// # Examples
///
/// ```
/// use loot_tables::{LeveledTable, LootSource, UniformTable};
///
/// let mut early = UniformTable::new(false);
/// early.add("rusty dagger");
/// let mut late = UniformTable::new(false);
/// late.add("flaming sword");
///
/// let mut t = LeveledTable::new();
/// t.add_level(0, early);
/// t.add_level(1, late);
///
/// let mut rng = rand::rng();
/// assert_eq!(Some("rusty dagger"), t.select(&mut rng));
///
/// t.advance_level();
/// assert_eq!(Some("flaming sword"), t.select(&mut rng));
///
/// t.set_level(5);
/// assert_eq!(None, t.select(&mut rng));
/// ```
pub struct LeveledTable<T> {
    levels: BTreeMap<i32, Box<dyn LootSource<T>>>,
    current_level: i32,
}

impl<T: 'static> LeveledTable<T> {
    /// Create an empty table at level 0.
    pub fn new() -> LeveledTable<T> {
        LeveledTable {
            levels: BTreeMap::new(),
            current_level: 0,
        }
    }

    /// Register a source for a level. Returns false, leaving the
    /// existing source alone, if the level already has one.
    pub fn add_level<S>(&mut self, level: i32, source: S) -> bool
    where
        S: LootSource<T> + 'static,
    {
        if self.levels.contains_key(&level) {
            return false;
        }

        self.levels.insert(level, Box::new(source));
        true
    }

    /// Remove the source for a level. Returns false if the level has none.
    pub fn remove_level(&mut self, level: i32) -> bool {
        self.levels.remove(&level).is_some()
    }

    /// Replace the source for a level. Returns false if the level has none.
    pub fn replace_source_for_level<S>(&mut self, level: i32, source: S) -> bool
    where
        S: LootSource<T> + 'static,
    {
        match self.levels.get_mut(&level) {
            Some(slot) => {
                *slot = Box::new(source);
                true
            }
            None => false,
        }
    }

    /// The source for a level, if there is one.
    pub fn get_source_for_level(&self, level: i32) -> Option<&dyn LootSource<T>> {
        self.levels.get(&level).map(|s| s.as_ref())
    }

    /// Mutable access to the source for a level, if there is one.
    pub fn get_source_for_level_mut(
        &mut self,
        level: i32,
    ) -> Option<&mut (dyn LootSource<T> + 'static)> {
        match self.levels.get_mut(&level) {
            Some(s) => Some(s.as_mut()),
            None => None,
        }
    }

    /// The source for the current level, if there is one.
    pub fn get_source_for_current_level(&self) -> Option<&dyn LootSource<T>> {
        self.get_source_for_level(self.current_level)
    }

    /// The current level.
    pub fn current_level(&self) -> i32 {
        self.current_level
    }

    /// Is there a source for the current level?
    pub fn has_source_for_current_level(&self) -> bool {
        self.levels.contains_key(&self.current_level)
    }

    /// Move to the next level.
    ///
    /// The level is otherwise unbounded, but this stops at `i32::MAX`
    /// rather than overflowing; advancing from there leaves it as is.
    pub fn advance_level(&mut self) {
        self.current_level = self.current_level.saturating_add(1);
    }

    /// Jump to any level, registered or not.
    pub fn set_level(&mut self, level: i32) {
        self.current_level = level;
    }

    /// Registered levels in ascending order.
    pub fn levels(&self) -> impl Iterator<Item = i32> + '_ {
        self.levels.keys().copied()
    }

    /// Number of registered levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Are there no registered levels?
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl<T: 'static> Default for LeveledTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LootSource<T> for LeveledTable<T> {
    /// Select from the source for the current level, or nothing if
    /// the current level has no source.
    fn select(&mut self, rng: &mut dyn RngCore) -> Option<T> {
        match self.levels.get_mut(&self.current_level) {
            Some(source) => source.select(rng),
            None => {
                debug!(level = self.current_level, "no source for current level");
                None
            }
        }
    }
}
