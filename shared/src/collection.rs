//! The retained result set of a search and its active filter

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::filtering::{FilterCriteria, FilterEngine};
use crate::models::EnrichedBeach;

/// All enriched records of the last completed search, keyed by place id.
///
/// The full set is kept unchanged for the session so that clearing a filter
/// always restores records, and every filter change is re-evaluated from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BeachCollection {
    all: Vec<EnrichedBeach>,
    criteria: FilterCriteria,
}

impl BeachCollection {
    /// Duplicate place ids keep the first record
    pub fn new(beaches: Vec<EnrichedBeach>) -> Self {
        let mut seen = HashSet::new();
        let all = beaches
            .into_iter()
            .filter(|beach| seen.insert(beach.place_id.clone()))
            .collect();

        Self {
            all,
            criteria: FilterCriteria::default(),
        }
    }

    pub fn all(&self) -> &[EnrichedBeach] {
        &self.all
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn get(&self, place_id: &str) -> Option<&EnrichedBeach> {
        self.all.iter().find(|beach| beach.place_id == place_id)
    }

    /// Replace the active criteria; the full set is untouched
    pub fn apply(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    pub fn clear_all(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    /// Records that pass the active criteria, in retrieval order
    pub fn visible(&self, engine: &FilterEngine) -> Vec<&EnrichedBeach> {
        engine.filter(&self.all, &self.criteria)
    }
}
