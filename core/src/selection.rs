use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::GalleryConfig;

/// Images the player chose to draw regular reveals from, in selection order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(Vec<String>);

impl Selection {
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// The first catalog image.
    pub fn default_for(config: &GalleryConfig) -> Self {
        Self::single(config.catalog().first())
    }

    pub fn images(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|image| image == name)
    }

    /// Keeps catalog images only, accepting entries stored as image sources, without duplicates.
    pub fn sanitize(&self, config: &GalleryConfig) -> Self {
        let mut images: Vec<String> = Vec::with_capacity(self.0.len());
        for entry in &self.0 {
            let name = config.image_name(entry);
            if config.catalog().contains(name) && !images.iter().any(|image| image == name) {
                images.push(name.to_owned());
            }
        }
        Self(images)
    }

    pub(crate) fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            false
        } else {
            self.0.push(name.to_owned());
            true
        }
    }

    pub(crate) fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|image| image != name);
        self.0.len() != before
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
