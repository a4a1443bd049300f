//! Insertion-ordered, id-keyed collections backing each store.

use std::collections::HashMap;

use crate::record::Model;

/// An in-memory collection of records: a map keyed by id for O(1) identity
/// lookup, with insertion order kept separately so iteration, joins, and
/// encoded output stay stable.
#[derive(Debug, Clone)]
pub struct Collection<M> {
    by_id: HashMap<String, M>,
    order: Vec<String>,
}

impl<M> Default for Collection<M> {
    fn default() -> Self {
        Collection {
            by_id: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<M: Model> Collection<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&M> {
        self.by_id.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut M> {
        self.by_id.get_mut(id)
    }

    /// Insert a record. Returns false without mutating when the id is
    /// already present.
    pub fn insert(&mut self, model: M) -> bool {
        let id = model.id().to_string();
        if self.by_id.contains_key(&id) {
            return false;
        }
        self.order.push(id.clone());
        self.by_id.insert(id, model);
        true
    }

    /// Remove a record by id, preserving the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<M> {
        let model = self.by_id.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(model)
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    /// First record matching a predicate, in insertion order.
    pub fn find<F>(&self, predicate: F) -> Option<&M>
    where
        F: Fn(&M) -> bool,
    {
        self.iter().find(|model| predicate(model))
    }

    /// Replace the whole collection. A duplicate id keeps the first record,
    /// matching first-match identity lookup.
    pub fn replace_all(&mut self, models: Vec<M>) {
        self.by_id.clear();
        self.order.clear();
        for model in models {
            self.insert(model);
        }
    }
}
