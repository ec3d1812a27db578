use clap::Parser;
use wasm_bindgen::prelude::*;

mod gallery;
mod hint;
mod keyboard;
mod selector;
mod storage;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    gallery: gallery::GalleryProps,
}

#[wasm_bindgen(start)]
pub fn run_app() -> Result<(), JsValue> {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).unwrap_or_else(|err| {
        gloo::console::warn!(format!("ignoring location hash: {}", err));
        Args::parse_from([""])
    });
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level)
            .map_err(|err| JsValue::from_str(&format!("Error initializing logger: {}", err)))?;
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("gallery")
        .ok_or_else(|| JsValue::from_str("Could not find id=\"gallery\" element"))?;

    log::debug!("App started");
    yew::Renderer::<gallery::GalleryView>::with_root_and_props(root, args.gallery).render();
    Ok(())
}
