use alloc::borrow::ToOwned;
use alloc::string::{String, ToString};
use hashbrown::HashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::*;

/// Flat string key-value storage, such as the browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Names the storage slot of a persisted value, which is stored as JSON.
pub trait StorageKey: Sized {
    const KEY: &'static str;

    /// Slot used by the plain JavaScript version of the game, read when [`Self::KEY`] is empty.
    const LEGACY_KEY: Option<&'static str> = None;

    /// `None` when both slots are empty or the contents do not parse.
    fn load_from<S: KeyValueStore + ?Sized>(store: &S) -> Option<Self>
    where
        Self: DeserializeOwned,
    {
        let (key, text) = match store.get(Self::KEY) {
            Some(text) => (Self::KEY, text),
            None => {
                let key = Self::LEGACY_KEY?;
                let text = store.get(key)?;
                log::info!("reading {} from legacy slot {}", Self::KEY, key);
                (key, text)
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("discarding malformed {}: {}", key, err);
                None
            }
        }
    }

    fn save_to<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()>
    where
        Self: Serialize,
    {
        let text =
            serde_json::to_string(self).map_err(|err| GalleryError::Storage(err.to_string()))?;
        store.set(Self::KEY, &text)
    }

    /// Empties the legacy slot too, so it cannot resurface on the next load.
    fn remove_from<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<()> {
        if let Some(key) = Self::LEGACY_KEY {
            store.remove(key)?;
        }
        store.remove(Self::KEY)
    }
}

impl StorageKey for RevealHistory {
    const KEY: &'static str = "peekaboo:history";
    const LEGACY_KEY: Option<&'static str> = Some("revealedImages");
}

impl StorageKey for SpecialCounters {
    const KEY: &'static str = "peekaboo:counters";
    const LEGACY_KEY: Option<&'static str> = Some("specialCounters");
}

impl StorageKey for Selection {
    const KEY: &'static str = "peekaboo:selection";
    const LEGACY_KEY: Option<&'static str> = Some("selectedImages");
}

/// In-memory [`KeyValueStore`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Saves and restores a [`GallerySession`], one storage slot per part.
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Each slot falls back to its default on its own when missing or malformed.
    pub fn load(&self, config: &GalleryConfig) -> GallerySession {
        let history = RevealHistory::load_from(&self.store).unwrap_or_default();
        let counters = SpecialCounters::load_from(&self.store).unwrap_or_default();
        let selection = Selection::load_from(&self.store);
        log::debug!(
            "restored {} revealed images, selection: {:?}",
            history.len(),
            selection
        );
        GallerySession::restore(config, history, &counters, selection)
    }

    /// Writes history and counters, to be called after every reveal.
    pub fn save_progress(&mut self, session: &GallerySession) -> Result<()> {
        session.history().save_to(&mut self.store)?;
        session.counters().save_to(&mut self.store)
    }

    pub fn save_selection(&mut self, session: &GallerySession) -> Result<()> {
        session.selection().save_to(&mut self.store)
    }

    /// Forgets history and counters, leaving the stored selection in place.
    pub fn clear_progress(&mut self) -> Result<()> {
        RevealHistory::remove_from(&mut self.store)?;
        SpecialCounters::remove_from(&mut self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::Fixed;
    use rand::prelude::*;
    use rand::rngs::SmallRng;

    fn config() -> GalleryConfig {
        GalleryConfig::from_json(
            r#"{
                "images": {"3syllables": ["cat", "dog"], "4syllables": ["bird"]},
                "specialImages": {
                    "gold": {"image": "golden", "probability": 0.3, "minCount": 2},
                    "silver": {"image": "shiny", "probability": 0.5, "minCount": 1}
                }
            }"#,
        )
        .unwrap()
    }

    fn play(
        config: &GalleryConfig,
        store: &mut SessionStore<MemoryStore>,
        reveals: usize,
    ) -> GallerySession {
        let mut session = store.load(config);
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..reveals {
            session.reveal(config, &MaskSets::builtin(), &mut rng).unwrap();
            store.save_progress(&session).unwrap();
        }
        session
    }

    #[test]
    fn empty_store_loads_defaults() {
        let config = config();
        let store = SessionStore::new(MemoryStore::new());

        assert_eq!(store.load(&config), GallerySession::new(&config));
    }

    #[test]
    fn reload_reconstructs_session_exactly() {
        let config = config();
        let mut store = SessionStore::new(MemoryStore::new());
        let mut session = store.load(&config);
        session.toggle_selection(&config, "bird").unwrap();
        store.save_selection(&session).unwrap();
        drop(session);

        let session = play(&config, &mut store, 25);
        let reloaded = store.load(&config);

        assert_eq!(reloaded, session);
        assert_eq!(reloaded.visible_count(), 25);
        assert!(reloaded.is_locked());
    }

    #[test]
    fn clear_progress_keeps_selection() {
        let config = config();
        let mut store = SessionStore::new(MemoryStore::new());
        let mut session = store.load(&config);
        session.toggle_selection(&config, "dog").unwrap();
        store.save_selection(&session).unwrap();
        play(&config, &mut store, 5);

        store.clear_progress().unwrap();
        let reloaded = store.load(&config);

        assert_eq!(reloaded.visible_count(), 0);
        assert_eq!(reloaded.counters(), &SpecialCounters::zeroed(config.rules()));
        assert_eq!(reloaded.selection().images(), ["cat", "dog"]);
        assert_eq!(store.inner().len(), 1);
    }

    #[test]
    fn malformed_slots_fall_back_independently() {
        let config = config();
        let mut inner = MemoryStore::new();
        inner.set(RevealHistory::KEY, "not json").unwrap();
        inner.set(SpecialCounters::KEY, r#"{"gold": 5, "silver": 2}"#).unwrap();
        inner.set(Selection::KEY, r#"["bird"]"#).unwrap();
        let store = SessionStore::new(inner);

        let session = store.load(&config);

        assert_eq!(session.visible_count(), 0);
        assert_eq!(session.counters().get("gold"), Some(5));
        assert_eq!(session.counters().get("silver"), Some(2));
        assert_eq!(session.selection(), &Selection::single("bird"));
    }

    #[test]
    fn legacy_records_and_selection_are_accepted() {
        let config = config();
        let mut inner = MemoryStore::new();
        inner
            .set(
                "revealedImages",
                r#"[{"isReverse": true, "maskClass": "mask-full", "imageSrc": "golden.png"}]"#,
            )
            .unwrap();
        inner.set("specialCounters", r#"{"gold": 0, "silver": 1}"#).unwrap();
        inner.set("selectedImages", r#"["dog.png", "cat.png"]"#).unwrap();
        let store = SessionStore::new(inner);

        let session = store.load(&config);

        assert_eq!(
            session.history().records(),
            [RevealRecord {
                is_special: true,
                mask_class: FULL_COVER_MASK.to_owned(),
                image_src: "golden.png".to_owned(),
            }]
        );
        assert_eq!(session.counters().get("silver"), Some(1));
        assert_eq!(session.selection().images(), ["dog", "cat"]);
        assert!(session.is_locked());
    }

    #[test]
    fn current_slots_shadow_legacy_ones() {
        let config = config();
        let mut inner = MemoryStore::new();
        inner.set("selectedImages", r#"["dog.png"]"#).unwrap();
        inner.set(Selection::KEY, r#"["bird"]"#).unwrap();
        inner
            .set(
                "revealedImages",
                r#"[{"isReverse": false, "maskClass": "mask-9-1", "imageSrc": "bird.png"}]"#,
            )
            .unwrap();
        let mut store = SessionStore::new(inner);

        assert_eq!(store.load(&config).selection(), &Selection::single("bird"));

        store.clear_progress().unwrap();
        let reloaded = store.load(&config);

        assert_eq!(reloaded.visible_count(), 0);
        assert_eq!(store.inner().get("revealedImages"), None);
        assert_eq!(store.inner().get("selectedImages").as_deref(), Some(r#"["dog.png"]"#));
    }

    #[test]
    fn records_persist_with_camel_case_fields() {
        let config = config();
        let mut store = SessionStore::new(MemoryStore::new());
        let mut session = store.load(&config);
        session
            .reveal(&config, &MaskSets::builtin(), &mut Fixed(0.9))
            .unwrap();
        store.save_progress(&session).unwrap();

        let stored = store.inner().get(RevealHistory::KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&stored).unwrap();

        assert_eq!(
            value,
            serde_json::json!([{
                "isSpecial": false,
                "maskClass": "mask-left-third",
                "imageSrc": "cat.png",
            }])
        );
        assert_eq!(
            store.inner().get(SpecialCounters::KEY).as_deref(),
            Some(r#"{"gold":1,"silver":1}"#)
        );
    }
}
