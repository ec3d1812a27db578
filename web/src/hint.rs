use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct HintProps {
    #[prop_or_default]
    pub open: bool,
    /// `(name, src)` of every catalog image.
    pub images: Vec<(AttrValue, AttrValue)>,
    pub on_close: Callback<()>,
}

/// Overlay listing every image of the catalog, closed by its button or by clicking next to it.
#[function_component(HintOverlay)]
pub(crate) fn hint_overlay(props: &HintProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class={classes!("hint-overlay", props.open.then_some("active"))} onclick={close.clone()}>
            <div class="hint-content" onclick={keep_open}>
                <button class="hint-close" onclick={close}>{"×"}</button>
                <div class="hint-images">
                    {
                        for props.images.iter().map(|(name, src)| html! {
                            <div class="hint-image-item">
                                <img src={src.clone()} alt={name.clone()}/>
                            </div>
                        })
                    }
                </div>
            </div>
        </div>
    }
}
