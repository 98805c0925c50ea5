use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// Append-only set of identities already reported.
///
/// Serializes as a JSON array in first-seen order. Identities are never
/// removed, so an item reported once stays suppressed for good.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    order: Vec<String>,
    index: HashSet<String>,
}

impl SeenSet {
    pub fn contains(&self, identity: &str) -> bool {
        self.index.contains(identity)
    }

    /// Returns `true` if the identity was not already present.
    pub fn insert(&mut self, identity: impl Into<String>) -> bool {
        let identity = identity.into();
        if self.index.contains(&identity) {
            return false;
        }
        self.index.insert(identity.clone());
        self.order.push(identity);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Keeps the items whose identity is unseen and accepted by `accept`,
    /// recording each kept identity.
    ///
    /// Items rejected by `accept` are not recorded and will be offered
    /// again on the next run. Duplicates within `items` are reported once.
    pub fn take_new<I, T, R>(
        &mut self,
        items: I,
        identity: impl Fn(&T) -> String,
        mut accept: impl FnMut(T) -> Option<R>,
    ) -> Vec<R>
    where
        I: IntoIterator<Item = T>,
    {
        let mut fresh = Vec::new();
        for item in items {
            let id = identity(&item);
            if self.contains(&id) {
                continue;
            }
            if let Some(record) = accept(item) {
                self.insert(id);
                fresh.push(record);
            }
        }
        fresh
    }
}

impl FromIterator<String> for SeenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = SeenSet::default();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl Serialize for SeenSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SeenSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Vec::<String>::deserialize(deserializer)?;
        Ok(ids.into_iter().collect())
    }
}
