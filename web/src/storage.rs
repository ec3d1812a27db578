use gloo::storage::{LocalStorage, Storage};
use peekaboo_core::{GalleryError, KeyValueStore, Result};

/// [`KeyValueStore`] backed by the browser's local storage.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("failed to read {}: {:?}", key, err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| GalleryError::Storage(format!("{:?}", err)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| GalleryError::Storage(format!("{:?}", err)))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use peekaboo_core::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn config() -> GalleryConfig {
        GalleryConfig::from_json(
            r#"{
                "images": {"3syllables": ["cat", "dog"]},
                "specialImages": {"gold": {"image": "golden", "probability": 1.0, "minCount": 0}}
            }"#,
        )
        .unwrap()
    }

    #[wasm_bindgen_test]
    fn values_round_trip_through_local_storage() {
        let mut store = BrowserStore;

        store.set("peekaboo:test", "value").unwrap();
        assert_eq!(store.get("peekaboo:test").as_deref(), Some("value"));

        store.remove("peekaboo:test").unwrap();
        assert_eq!(store.get("peekaboo:test"), None);
    }

    #[wasm_bindgen_test]
    fn reset_survives_reload_with_selection_kept() {
        LocalStorage::clear();
        let config = config();
        let mut store = SessionStore::new(BrowserStore);
        let mut session = store.load(&config);
        session.toggle_selection(&config, "dog").unwrap();
        store.save_selection(&session).unwrap();

        let record = session
            .reveal(&config, &MaskSets::builtin(), &mut Zero)
            .unwrap()
            .clone();
        store.save_progress(&session).unwrap();
        assert!(record.is_special);
        assert_eq!(store.load(&config), session);

        session.reset();
        store.clear_progress().unwrap();
        let reloaded = store.load(&config);

        assert_eq!(reloaded.visible_count(), 0);
        assert_eq!(reloaded.selection().images(), ["cat", "dog"]);
        LocalStorage::clear();
    }

    struct Zero;

    impl RandomSource for Zero {
        fn next_unit(&mut self) -> f64 {
            0.0
        }

        fn next_index(&mut self, _len: usize) -> usize {
            0
        }
    }
}
