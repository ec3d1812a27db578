use alloc::borrow::ToOwned;
use alloc::string::String;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Source of the random draws made by [`decide_reveal`].
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`, `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

impl RandomSource for SmallRng {
    fn next_unit(&mut self) -> f64 {
        self.random()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// One revealed cell, as rendered and persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealRecord {
    #[serde(alias = "isReverse")]
    pub is_special: bool,
    pub mask_class: String,
    pub image_src: String,
}

/// Result of a reveal decision: the new record and the counters to adopt.
#[derive(Clone, Debug, PartialEq)]
pub struct Reveal {
    pub record: RevealRecord,
    pub counters: SpecialCounters,
    /// Id of the special rule that fired, if any.
    pub triggered: Option<String>,
}

/// Decides which image and mask the next reveal shows.
///
/// Special rules are scanned in declaration order; each rule whose counter reached its `min_count` gets one draw
/// and the first draw below its probability wins. Otherwise a selected image is drawn, then a mask from the mask set
/// the catalog assigns to it.
pub fn decide_reveal<R: RandomSource + ?Sized>(
    config: &GalleryConfig,
    counters: &SpecialCounters,
    selection: &Selection,
    mask_sets: &MaskSets,
    random: &mut R,
) -> Result<Reveal> {
    if selection.is_empty() {
        return Err(GalleryError::EmptySelection);
    }

    let mut counters = if counters.matches(config.rules()) {
        counters.clone()
    } else {
        SpecialCounters::restore(config.rules(), counters)
    };

    let triggered = config.rules().iter().find(|rule| {
        let count = counters.get(&rule.id).unwrap_or(0);
        rule.is_eligible(count) && random.next_unit() < rule.probability
    });

    if let Some(rule) = triggered {
        log::debug!("special image triggered: {} ({})", rule.id, rule.image);
        counters.fire(&rule.id);
        return Ok(Reveal {
            record: RevealRecord {
                is_special: true,
                mask_class: FULL_COVER_MASK.to_owned(),
                image_src: config.image_src(&rule.image),
            },
            counters,
            triggered: Some(rule.id.clone()),
        });
    }

    let image = &selection.images()[random.next_index(selection.len())];
    let mask_set = config.catalog().mask_set_of(image);
    let masks = mask_sets.masks_for(mask_set);
    let mask_class = match masks.len() {
        0 => FULL_COVER_MASK,
        len => masks[random.next_index(len)],
    };
    log::debug!("image: {}, mask set: {:?}, mask: {}", image, mask_set, mask_class);

    counters.increment_all();
    Ok(Reveal {
        record: RevealRecord {
            is_special: false,
            mask_class: mask_class.to_owned(),
            image_src: config.image_src(image),
        },
        counters,
        triggered: None,
    })
}
