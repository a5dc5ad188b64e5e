//! Order-preserving grouping.
//!
//! Groups appear in the order their key is first seen, which keeps every
//! aggregate table deterministic and gives stable sorts a well-defined
//! tie-break.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Accumulates one value per distinct key, remembering first-seen order.
#[derive(Debug, Clone)]
pub struct OrderedGroups<K, V> {
    index: FxHashMap<K, usize>,
    groups: Vec<(K, V)>,
}

impl<K, V> Default for OrderedGroups<K, V> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
            groups: Vec::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V: Default> OrderedGroups<K, V> {
    /// Create an empty grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulator for `key`, created with `V::default()` on first use.
    pub fn entry(&mut self, key: K) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.index.insert(key.clone(), slot);
                self.groups.push((key, V::default()));
                slot
            }
        };
        &mut self.groups[slot].1
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when nothing has been grouped.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Consume into `(key, value)` pairs in first-seen order.
    pub fn into_vec(self) -> Vec<(K, V)> {
        self.groups
    }
}

/// Distinct values in first-seen order.
pub fn distinct<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups: OrderedGroups<&str, ()> = OrderedGroups::new();
    for value in values {
        groups.entry(value);
    }
    groups
        .into_vec()
        .into_iter()
        .map(|(k, _)| k.to_string())
        .collect()
}
