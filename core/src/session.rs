use alloc::string::ToString;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectionOutcome {
    NoChange,
    Selected,
    Deselected,
}

impl SelectionOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Selected | Self::Deselected => true,
        }
    }
}

/// Revealed records, in reveal order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevealHistory(Vec<RevealRecord>);

impl RevealHistory {
    pub fn records(&self) -> &[RevealRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&RevealRecord> {
        self.0.last()
    }

    fn push(&mut self, record: RevealRecord) -> &RevealRecord {
        self.0.push(record);
        &self.0[self.0.len() - 1]
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<RevealRecord> for RevealHistory {
    fn from_iter<I: IntoIterator<Item = RevealRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything a game in progress owns: what was revealed, the special counters and the player's selection.
#[derive(Clone, Debug, PartialEq)]
pub struct GallerySession {
    history: RevealHistory,
    counters: SpecialCounters,
    selection: Selection,
}

impl GallerySession {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            history: RevealHistory::default(),
            counters: SpecialCounters::zeroed(config.rules()),
            selection: Selection::default_for(config),
        }
    }

    /// Rebuilds a session from previously stored parts, repairing whatever no longer fits `config`.
    pub fn restore(
        config: &GalleryConfig,
        history: RevealHistory,
        counters: &SpecialCounters,
        selection: Option<Selection>,
    ) -> Self {
        let counters = SpecialCounters::restore(config.rules(), counters);
        let selection = match selection.map(|stored| stored.sanitize(config)) {
            Some(selection) if !selection.is_empty() => selection,
            Some(_) => {
                log::warn!("stored selection has no catalog image left, using default");
                Selection::default_for(config)
            }
            None => Selection::default_for(config),
        };
        Self {
            history,
            counters,
            selection,
        }
    }

    pub fn history(&self) -> &RevealHistory {
        &self.history
    }

    pub fn counters(&self) -> &SpecialCounters {
        &self.counters
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn visible_count(&self) -> usize {
        self.history.len()
    }

    /// The selection is frozen as soon as anything has been revealed.
    pub fn is_locked(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn reveal<R: RandomSource + ?Sized>(
        &mut self,
        config: &GalleryConfig,
        mask_sets: &MaskSets,
        random: &mut R,
    ) -> Result<&RevealRecord> {
        let Reveal {
            record, counters, ..
        } = decide_reveal(config, &self.counters, &self.selection, mask_sets, random)?;
        self.counters = counters;
        Ok(self.history.push(record))
    }

    /// Clears the history and zeroes the counters, keeping the selection.
    pub fn reset(&mut self) {
        self.history.clear();
        self.counters.clear();
    }

    pub fn toggle_selection(
        &mut self,
        config: &GalleryConfig,
        name: &str,
    ) -> Result<SelectionOutcome> {
        use SelectionOutcome::*;

        if !config.catalog().contains(name) {
            return Err(GalleryError::UnknownImage(name.to_string()));
        }
        if self.is_locked() {
            return Err(GalleryError::SelectionLocked);
        }

        Ok(if self.selection.contains(name) {
            if self.selection.len() > 1 && self.selection.remove(name) {
                Deselected
            } else {
                NoChange
            }
        } else if self.selection.insert(name) {
            Selected
        } else {
            NoChange
        })
    }
}
