use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::SpecialRule;

/// Reveals counted since each special rule last fired, aligned with the rule table.
///
/// Serialized as a `{rule id: count}` object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct SpecialCounters {
    entries: Vec<(String, u32)>,
}

impl SpecialCounters {
    pub fn zeroed(rules: &[SpecialRule]) -> Self {
        Self {
            entries: rules.iter().map(|rule| (rule.id.clone(), 0)).collect(),
        }
    }

    /// Realigns previously stored counts with `rules`: unknown ids are dropped, missing ones start at zero.
    pub fn restore(rules: &[SpecialRule], stored: &SpecialCounters) -> Self {
        Self {
            entries: rules
                .iter()
                .map(|rule| (rule.id.clone(), stored.get(&rule.id).unwrap_or(0)))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|&(_, count)| count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the counter ids are exactly the rule ids, in the same order.
    pub fn matches(&self, rules: &[SpecialRule]) -> bool {
        self.entries.len() == rules.len()
            && self
                .entries
                .iter()
                .zip(rules)
                .all(|((key, _), rule)| *key == rule.id)
    }

    pub(crate) fn clear(&mut self) {
        for (_, count) in &mut self.entries {
            *count = 0;
        }
    }

    pub(crate) fn increment_all(&mut self) {
        for (_, count) in &mut self.entries {
            *count = count.saturating_add(1);
        }
    }

    /// Resets `fired` to zero and increments every other counter.
    pub(crate) fn fire(&mut self, fired: &str) {
        for (key, count) in &mut self.entries {
            if key == fired {
                *count = 0;
            } else {
                *count = count.saturating_add(1);
            }
        }
    }
}

impl From<BTreeMap<String, u32>> for SpecialCounters {
    fn from(map: BTreeMap<String, u32>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}

impl From<SpecialCounters> for BTreeMap<String, u32> {
    fn from(counters: SpecialCounters) -> Self {
        counters.entries.into_iter().collect()
    }
}
