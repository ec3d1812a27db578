use crate::hint::HintOverlay;
use crate::keyboard::{self, KeyIntent};
use crate::selector::{ImageSelector, SelectorEntry, split_halves};
use crate::storage::BrowserStore;
use crate::utils::*;
use clap::Args;
use gloo::events::EventListener;
use gloo::net::http::Request;
use peekaboo_core as peekaboo;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use yew::prelude::*;

#[derive(Debug)]
pub(crate) enum Msg {
    Loaded(Result<peekaboo::GalleryConfig, String>),
    Reveal,
    Reset,
    ToggleImage(AttrValue),
    ToggleHint,
    CloseHint,
}

impl From<KeyIntent> for Msg {
    fn from(intent: KeyIntent) -> Self {
        match intent {
            KeyIntent::Reveal => Msg::Reveal,
            KeyIntent::Reset => Msg::Reset,
        }
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GalleryProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where to load the gallery configuration from
    #[arg(short, long, default_value = "images.json")]
    config: String,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: usize,
    record: peekaboo::RevealRecord,
}

#[function_component(RevealCell)]
fn reveal_cell(props: &CellProps) -> Html {
    let CellProps { index, record } = props.clone();
    let class = classes!(
        "image-item",
        "visible",
        record.mask_class,
        record.is_special.then_some("special")
    );

    html! {
        <div {class} data-index={index.to_string()}>
            <img src={record.image_src} alt={format!("image {}", index + 1)} class="placeholder"/>
        </div>
    }
}

async fn fetch_config(url: String) -> Result<peekaboo::GalleryConfig, String> {
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|err| format!("{}: {}", url, err))?;
    if !response.ok() {
        return Err(format!("{}: HTTP {}", url, response.status()));
    }
    let text = response
        .text()
        .await
        .map_err(|err| format!("{}: {}", url, err))?;
    peekaboo::GalleryConfig::from_json(&text).map_err(|err| format!("{}: {}", url, err))
}

#[derive(Debug)]
struct Gallery {
    config: peekaboo::GalleryConfig,
    session: peekaboo::GallerySession,
    store: peekaboo::SessionStore<BrowserStore>,
}

impl Gallery {
    fn load(config: peekaboo::GalleryConfig) -> Self {
        let store = peekaboo::SessionStore::new(BrowserStore);
        let session = store.load(&config);
        Self {
            config,
            session,
            store,
        }
    }

    fn reveal(&mut self, rng: &mut SmallRng) -> bool {
        let Self {
            config,
            session,
            store,
        } = self;

        match session.reveal(config, &peekaboo::MaskSets::builtin(), rng) {
            Ok(record) => log::debug!("revealed {} ({})", record.image_src, record.mask_class),
            Err(err) => {
                log::error!("could not reveal: {}", err);
                return false;
            }
        }
        if let Err(err) = store.save_progress(session) {
            log::error!("Could not save progress to local storage: {}", err);
        }
        true
    }

    fn reset(&mut self) -> bool {
        self.session.reset();
        if let Err(err) = self.store.clear_progress() {
            log::error!("Could not clear local storage: {}", err);
        }
        true
    }

    fn toggle_image(&mut self, name: &str) -> bool {
        match self.session.toggle_selection(&self.config, name) {
            Ok(outcome) if outcome.has_update() => {
                log::debug!("selection {:?}: {}", outcome, name);
                if let Err(err) = self.store.save_selection(&self.session) {
                    log::error!("Could not save selection to local storage: {}", err);
                }
                true
            }
            Ok(_) => false,
            Err(peekaboo::GalleryError::SelectionLocked) => {
                log::trace!("selection is locked, ignoring {}", name);
                false
            }
            Err(err) => {
                log::warn!("could not toggle {}: {}", name, err);
                false
            }
        }
    }

    fn selector_entries(&self) -> Vec<SelectorEntry> {
        let selection = self.session.selection();
        self.config
            .catalog()
            .images()
            .iter()
            .map(|name| SelectorEntry {
                name: AttrValue::from(name.clone()),
                src: AttrValue::from(self.config.image_src(name)),
                active: selection.contains(name),
            })
            .collect()
    }
}

enum LoadState {
    Loading,
    Failed(String),
    Ready(Gallery),
}

pub(crate) struct GalleryView {
    state: LoadState,
    rng: SmallRng,
    hint_open: bool,
    _keydown: EventListener,
}

impl GalleryView {
    fn view_ready(&self, ctx: &Context<Self>, gallery: &Gallery) -> Html {
        use Msg::*;

        let link = ctx.link();
        let entries = gallery.selector_entries();
        let (left, right) = split_halves(&entries);
        let locked = gallery.session.is_locked();
        let on_toggle = link.callback(ToggleImage);
        let hint_images = entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.src.clone()))
            .collect::<Vec<_>>();

        html! {
            <div class="peekaboo">
                <nav>
                    <button class="hint-btn" onclick={link.callback(|_: MouseEvent| ToggleHint)}>{"?"}</button>
                    <output class="counter">{gallery.session.visible_count().to_string()}</output>
                    <button class="reveal-btn" onclick={link.callback(|_: MouseEvent| Reveal)}>{"GO"}</button>
                    <button class="reset-btn" onclick={link.callback(|_: MouseEvent| Reset)}>{"↺"}</button>
                </nav>
                <main>
                    <ImageSelector side="left" entries={left.to_vec()} {locked} on_toggle={on_toggle.clone()}/>
                    <section class="image-grid">
                        {
                            for gallery.session.history().records().iter().enumerate().map(|(index, record)| html! {
                                <RevealCell {index} record={record.clone()}/>
                            })
                        }
                    </section>
                    <ImageSelector side="right" entries={right.to_vec()} {locked} {on_toggle}/>
                </main>
                <button class="reveal-btn mobile" onclick={link.callback(|_: MouseEvent| Reveal)}>{"GO"}</button>
                <Modal>
                    <HintOverlay
                        open={self.hint_open}
                        images={hint_images}
                        on_close={link.callback(|()| CloseHint)}
                    />
                </Modal>
            </div>
        }
    }
}

impl Component for GalleryView {
    type Message = Msg;
    type Properties = GalleryProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GalleryProps { seed, config } = ctx.props().clone();
        let seed = seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        ctx.link()
            .send_future(async move { Msg::Loaded(fetch_config(config).await) });

        Self {
            state: LoadState::Loading,
            rng: SmallRng::seed_from_u64(seed),
            hint_open: false,
            _keydown: keyboard::listen(ctx.link().callback(Msg::from)),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Loaded(Ok(config)) => {
                log::info!(
                    "loaded {} images and {} special images",
                    config.catalog().len(),
                    config.rules().len()
                );
                apply_layout(&config);
                self.state = LoadState::Ready(Gallery::load(config));
                true
            }
            Loaded(Err(err)) => {
                log::error!("Could not load the gallery configuration: {}", err);
                gloo::dialogs::alert(&format!(
                    "Could not load the gallery configuration.\n\n{}\n\nMake sure the file exists, is served over HTTP and contains valid JSON.",
                    err
                ));
                self.state = LoadState::Failed(err);
                true
            }
            ToggleHint => {
                self.hint_open = !self.hint_open;
                true
            }
            CloseHint => std::mem::replace(&mut self.hint_open, false),
            msg => {
                let LoadState::Ready(gallery) = &mut self.state else {
                    log::trace!("ignoring {:?} before the gallery is ready", msg);
                    return false;
                };
                match msg {
                    Reveal => gallery.reveal(&mut self.rng),
                    Reset => {
                        log::debug!("reset");
                        gallery.reset()
                    }
                    ToggleImage(name) => gallery.toggle_image(&name),
                    Loaded(_) | ToggleHint | CloseHint => false,
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.state {
            LoadState::Loading => html! {
                <div class="peekaboo loading" aria-busy="true"/>
            },
            LoadState::Failed(err) => html! {
                <div class="peekaboo failed">
                    <p>{"Could not load the gallery configuration."}</p>
                    <pre>{err.clone()}</pre>
                </div>
            },
            LoadState::Ready(gallery) => self.view_ready(ctx, gallery),
        }
    }
}
