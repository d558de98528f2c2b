use rand::RngCore;
use tracing::debug;

use crate::pool::Pool;
use crate::select::weighted_index;
use crate::source::{LootSource, Weight};

/// A named tier: a nested source and the weight of picking it.
struct Tier<T, W> {
    source: Box<dyn LootSource<T>>,
    weight: W,
}

/// A table of named tiers, each holding its own nested source.
///
/// Selection first picks a tier by weight, then selects from that
/// tier's source. Tiers can hold any [LootSource], including other
/// tiered or leveled tables.
///
/// Weights belong to the tier name, so two tiers never share a
/// weight even if their sources are identical.
///
/// # Examples
///
/// ```
/// use loot_tables::{LootSource, TieredTable, UniformTable};
///
/// let mut common = UniformTable::new(false);
/// common.add("copper");
/// let mut rare = UniformTable::new(false);
/// rare.add("mithril");
///
/// let mut t = TieredTable::new();
/// t.add_tier("common", common, 9);
/// t.add_tier("rare", rare, 1);
///
/// let mut rng = rand::rng();
/// let drop = t.select(&mut rng).unwrap();
/// assert!(drop == "copper" || drop == "mithril");
/// ```
pub struct TieredTable<T, W: Weight = i32> {
    tiers: Pool<String, Tier<T, W>>,
}

impl<T: 'static, W: Weight> TieredTable<T, W> {
    /// Create an empty table.
    pub fn new() -> TieredTable<T, W> {
        TieredTable { tiers: Pool::new() }
    }

    /// Add a tier. Returns false, leaving the existing tier alone,
    /// if a tier with this name already exists.
    pub fn add_tier<S>(&mut self, name: impl Into<String>, source: S, weight: W) -> bool
    where
        S: LootSource<T> + 'static,
    {
        let tier = Tier {
            source: Box::new(source),
            weight,
        };
        self.tiers.insert(name.into(), tier)
    }

    /// Remove a tier along with its source and weight.
    /// Returns false if there is no such tier.
    pub fn remove_tier(&mut self, name: &str) -> bool {
        self.tiers.remove(name).is_some()
    }

    /// Replace the source for a tier, keeping the tier's weight.
    /// Returns false if there is no such tier.
    pub fn replace_source<S>(&mut self, name: &str, source: S) -> bool
    where
        S: LootSource<T> + 'static,
    {
        match self.tiers.get_mut(name) {
            Some(tier) => {
                tier.source = Box::new(source);
                true
            }
            None => false,
        }
    }

    /// Change the weight of a tier. Returns false if there is no such tier.
    pub fn change_weight(&mut self, name: &str, new_weight: W) -> bool {
        match self.tiers.get_mut(name) {
            Some(tier) => {
                tier.weight = new_weight;
                true
            }
            None => false,
        }
    }

    /// The weight of a tier, if it exists.
    pub fn tier_weight(&self, name: &str) -> Option<W> {
        self.tiers.get(name).map(|tier| tier.weight)
    }

    /// The source for a tier, if it exists.
    pub fn get_source_for_tier(&self, name: &str) -> Option<&dyn LootSource<T>> {
        self.tiers.get(name).map(|tier| tier.source.as_ref())
    }

    /// Mutable access to the source for a tier, if it exists.
    pub fn get_source_for_tier_mut(
        &mut self,
        name: &str,
    ) -> Option<&mut (dyn LootSource<T> + 'static)> {
        match self.tiers.get_mut(name) {
            Some(tier) => Some(tier.source.as_mut()),
            None => None,
        }
    }

    /// Names of all tiers.
    pub fn tier_names(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().map(|(name, _)| name.as_str())
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Does the table have no tiers?
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl<T: 'static, W: Weight> Default for TieredTable<T, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, W: Weight> LootSource<T> for TieredTable<T, W> {
    /// Pick a tier by weight and select from its source. No source is
    /// consulted when no tier can be picked.
    fn select(&mut self, rng: &mut dyn RngCore) -> Option<T> {
        let i = weighted_index(self.tiers.values().map(|tier| tier.weight), rng)?;

        let (name, _) = self.tiers.entry_at(i);
        debug!(tier = %name, "selected tier");

        let loot = self.tiers.value_at_mut(i).source.select(rng);
        if loot.is_none() {
            debug!("selected tier produced nothing");
        }
        loot
    }
}
