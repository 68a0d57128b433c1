//! Sorted name catalogs, animation cycles and switch pairs

use std::collections::HashMap;

use crate::formats::{AnimatedEntry, SwitchEntry, compare_names, default_switch_pair, name_key};

/// Case-insensitively sorted, duplicate-free list of names.
///
/// Animation cycles are ranges of this list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort_by(|a, b| compare_names(a, b));
        names.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

        let positions = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name_key(name), i))
            .collect();
        Self { names, positions }
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(&name_key(name)).copied()
    }

    /// Every name between the two endpoints inclusive, in catalog order.
    ///
    /// The endpoints may come in either order; `None` if either is missing.
    #[must_use]
    pub fn span(&self, first: &str, last: &str) -> Option<&[String]> {
        let a = self.position(first)?;
        let b = self.position(last)?;
        Some(&self.names[a.min(b)..=a.max(b)])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Name -> the animation cycle it belongs to
#[derive(Debug, Clone, Default)]
pub struct AnimationCycles {
    cycles: Vec<Vec<String>>,
    /// Name key -> index into `cycles`
    lookup: HashMap<String, usize>,
}

impl AnimationCycles {
    /// Expand `entry` against `catalog` and map each member to the cycle.
    ///
    /// A name already mapped is remapped to the newer cycle. Returns whether
    /// both endpoints were found.
    pub fn add(&mut self, catalog: &Catalog, entry: &AnimatedEntry) -> bool {
        let Some(members) = catalog.span(&entry.first_name, &entry.last_name) else {
            return false;
        };

        let index = self.cycles.len();
        for name in members {
            self.lookup.insert(name_key(name), index);
        }
        self.cycles.push(members.to_vec());
        true
    }

    /// The cycle containing `name`, in catalog order
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.lookup
            .get(&name_key(name))
            .map(|&i| self.cycles[i].as_slice())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(&name_key(name))
    }

    /// Number of cycles recorded
    #[must_use]
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Symmetric off/on switch pairing
#[derive(Debug, Clone, Default)]
pub struct SwitchMap {
    pairs: HashMap<String, String>,
}

impl SwitchMap {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a SwitchEntry>) -> Self {
        let mut pairs = HashMap::new();
        for entry in entries {
            pairs.insert(name_key(&entry.off_name), entry.on_name.clone());
            pairs.insert(name_key(&entry.on_name), entry.off_name.clone());
        }
        Self { pairs }
    }

    /// The other half of the pair `name` belongs to
    #[must_use]
    pub fn pair_of(&self, name: &str) -> Option<&str> {
        self.pairs.get(&name_key(name)).map(String::as_str)
    }

    /// Like [`pair_of`](Self::pair_of), falling back to the stock switch table
    #[must_use]
    pub fn pair_or_default(&self, name: &str) -> Option<&str> {
        self.pair_of(name).or_else(|| default_switch_pair(name))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
