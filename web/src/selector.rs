use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SelectorEntry {
    pub name: AttrValue,
    pub src: AttrValue,
    pub active: bool,
}

/// Splits the catalog between the two selector columns, the left one taking the extra image.
pub(crate) fn split_halves<T>(items: &[T]) -> (&[T], &[T]) {
    items.split_at(items.len().div_ceil(2))
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct ImageSelectorProps {
    pub side: &'static str,
    pub entries: Vec<SelectorEntry>,
    #[prop_or_default]
    pub locked: bool,
    pub on_toggle: Callback<AttrValue>,
}

#[function_component(ImageSelector)]
pub(crate) fn image_selector(props: &ImageSelectorProps) -> Html {
    let ImageSelectorProps {
        side,
        entries,
        locked,
        on_toggle,
    } = props.clone();

    html! {
        <aside class={classes!("image-selector", side, locked.then_some("locked"))}>
            {
                for entries.into_iter().map(|SelectorEntry { name, src, active }| {
                    let data_image = src.clone();
                    let onclick = {
                        let on_toggle = on_toggle.clone();
                        let name = name.clone();
                        Callback::from(move |_: MouseEvent| on_toggle.emit(name.clone()))
                    };
                    html! {
                        <button
                            class={classes!("image-btn", active.then_some("active"))}
                            data-image={data_image}
                            disabled={locked}
                            {onclick}
                        >
                            <img {src} alt={name}/>
                        </button>
                    }
                })
            }
        </aside>
    }
}
