#![deny(missing_docs)]

//! Loot tables provide interchangeable ways of picking an item at
//! random from a pool. This includes:
//!
//! * Uniform tables, where every item is equally likely
//! * Weighted tables, where each item has its own weight
//! * Tiered tables, which pick a named tier by weight and then
//!   select from that tier's own table
//! * Leveled tables, which select from a different table depending
//!   on the current level
//!
//! Every table implements [LootSource], and tiered and leveled
//! tables hold other `LootSource`s, so tables nest to any depth.
//! Randomness is always supplied by the caller.
//!
//! ```
//! use loot_tables::{LeveledTable, LootSource, TieredTable, UniformTable, WeightedTable};
//!
//! let mut junk = UniformTable::new(false);
//! junk.add("bent nail");
//! junk.add("broken pot");
//!
//! let mut treasure = WeightedTable::new(true);
//! treasure.add("crown", 1);
//! treasure.add("ring", 3);
//!
//! let mut dungeon = TieredTable::new();
//! dungeon.add_tier("junk", junk, 8);
//! dungeon.add_tier("treasure", treasure, 2);
//!
//! let mut levels = LeveledTable::new();
//! levels.add_level(1, dungeon);
//! levels.advance_level();
//!
//! let mut rng = rand::rng();
//! assert!(levels.select(&mut rng).is_some());
//! ```

mod pool;

/// Provides the weighted random selection shared by weighted and
/// tiered tables.
pub mod select;

/// Provides the [LootSource] trait implemented by every table, and
/// the bounds placed on items and weights.
pub mod source;

/// Provides a table where every item is equally likely.
pub mod uniform;

/// Provides a table where each item has its own weight.
pub mod weighted;

/// Provides a table of named, weighted tiers.
pub mod tiered;

/// Provides a table with a separate source per level.
pub mod leveled;

pub use leveled::LeveledTable;
pub use source::{Item, LootSource, Weight};
pub use tiered::TieredTable;
pub use uniform::UniformTable;
pub use weighted::WeightedTable;
