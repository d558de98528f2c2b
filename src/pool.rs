use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Keyed storage that iterates in a stable order.
///
/// Entries live in a `Vec` so weighted walks see the same sequence
/// every time, and a side index gives constant time lookup by key.
/// Removal swaps the last entry into the hole.
#[derive(Debug, Clone)]
pub(crate) struct Pool<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone, V> Pool<K, V> {
    pub(crate) fn new() -> Self {
        Pool {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Insert a new entry. Returns false, leaving the existing value
    /// untouched, if the key is already present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        true
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let i = self.index.remove(key)?;
        Some(self.detach(i).1)
    }

    /// Remove the entry at a position previously handed out by
    /// iteration order.
    pub(crate) fn remove_at(&mut self, i: usize) -> (K, V) {
        self.index.remove(&self.entries[i].0);
        self.detach(i)
    }

    pub(crate) fn entry_at(&self, i: usize) -> &(K, V) {
        &self.entries[i]
    }

    pub(crate) fn value_at_mut(&mut self, i: usize) -> &mut V {
        &mut self.entries[i].1
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> + Clone {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &V> + Clone {
        self.entries.iter().map(|(_, v)| v)
    }

    // Caller has already dropped `i` from the index.
    fn detach(&mut self, i: usize) -> (K, V) {
        let removed = self.entries.swap_remove(i);
        if let Some((moved, _)) = self.entries.get(i) {
            if let Some(slot) = self.index.get_mut(moved) {
                *slot = i;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that inserting an existing key leaves the old value.
    #[test]
    fn test_insert_no_overwrite() {
        let mut p = Pool::new();

        assert!(p.insert("a", 1));
        assert!(!p.insert("a", 2));
        assert_eq!(Some(&1), p.get("a"));
        assert_eq!(1, p.len());
    }

    /// Tests that removal keeps the index consistent with the entries.
    #[test]
    fn test_remove_reindexes() {
        let mut p = Pool::new();
        p.insert("a".to_string(), 1);
        p.insert("b".to_string(), 2);
        p.insert("c".to_string(), 3);

        assert_eq!(Some(1), p.remove("a"));
        assert_eq!(None, p.remove("a"));

        assert_eq!(Some(&2), p.get("b"));
        assert_eq!(Some(&3), p.get("c"));

        *p.get_mut("c").unwrap() = 30;
        assert_eq!(Some(&30), p.get("c"));

        let (k, v) = p.remove_at(0);
        assert_eq!(("c".to_string(), 30), (k, v));
        assert_eq!(Some(&2), p.get("b"));
        assert!(!p.contains("c"));

        p.remove("b");
        assert!(p.is_empty());
    }

    /// Tests that iteration follows insertion order until something
    /// is removed.
    #[test]
    fn test_iteration_order() {
        let mut p = Pool::new();
        for (k, v) in [(3, 'x'), (1, 'y'), (2, 'z')] {
            p.insert(k, v);
        }

        let keys: Vec<_> = p.iter().map(|(k, _)| *k).collect();
        assert_eq!(vec![3, 1, 2], keys);

        let values: Vec<_> = p.values().copied().collect();
        assert_eq!(vec!['x', 'y', 'z'], values);
    }
}
