use peekaboo_core::GalleryConfig;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attatch the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Exposes the grid width to the stylesheet as CSS variables on the root element.
pub(crate) fn apply_layout(config: &GalleryConfig) {
    let Some(root) = gloo::utils::document()
        .document_element()
        .and_then(|root| root.dyn_into::<HtmlElement>().ok())
    else {
        log::error!("no root element to apply the layout to");
        return;
    };

    let style = root.style();
    for (name, value) in [
        ("--images-per-row", config.images_per_row()),
        ("--images-per-row-mobile", config.images_per_row_mobile()),
    ] {
        log::debug!("{}: {}", name, value);
        if let Err(err) = style.set_property(name, &value.to_string()) {
            log::error!("failed to set {}: {:?}", name, err);
        }
    }
}
