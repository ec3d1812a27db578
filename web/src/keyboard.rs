use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::Callback;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum KeyIntent {
    Reveal,
    Reset,
}

impl KeyIntent {
    pub(crate) fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | " " => Some(Self::Reveal),
            "Escape" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Listens for shortcuts on the whole document for as long as the returned listener lives.
pub(crate) fn listen(callback: Callback<KeyIntent>) -> EventListener {
    let document = gloo::utils::document();
    EventListener::new_with_options(
        &document,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(intent) = KeyIntent::from_key(&event.key()) {
                log::trace!("key {:?} -> {:?}", event.key(), intent);
                event.prevent_default();
                callback.emit(intent);
            }
        },
    )
}
