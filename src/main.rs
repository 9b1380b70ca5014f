#![warn(clippy::all)]

//! Mercator Map - an interactive world map viewer.
//!
//! Drag or use the arrow keys to move your viewpoint; the view, theme and
//! position readout toggle are kept in localStorage and in the page URL so a
//! view can be reloaded or shared.

mod config;
mod geo;
mod input;
mod state;
mod storage;
mod ui;

use config::{MapConfig, StorageConfig};
use eframe::egui;
use state::{AppState, ThemeKey, ViewStateManager};
use storage::KeyValueStore;
use web_time::Instant;

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Mercator Map",
        native_options,
        Box::new(|cc| Ok(Box::new(MercatorApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(MercatorApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct MercatorApp {
    /// Application state containing the view and transient UI state
    state: AppState,

    /// Keeps storage and the URL in step with the view
    view_manager: ViewStateManager,

    /// Channel for the one-shot world atlas download
    geo_channel: geo::GeoLoadChannel,

    /// Land and country layers, once loaded
    geo_layers: Option<geo::GeoLayerSet>,

    /// Theme the egui visuals were last built for
    applied_theme: Option<ThemeKey>,

    config: MapConfig,
}

impl MercatorApp {
    /// Creates a new MercatorApp instance.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let config = MapConfig::default();

        let url_params = state::url_state::parse_from_url();
        let (view_manager, view) = ViewStateManager::new(
            open_store(),
            StorageConfig::default(),
            config.url_debounce,
            &url_params,
            Instant::now(),
        );

        let geo_channel = geo::GeoLoadChannel::new();
        log::info!("Loading world atlas from {}", config.topology_url);
        geo_channel.load(cc.egui_ctx.clone(), config.topology_url.clone());

        Self {
            state: AppState::new(view),
            view_manager,
            geo_channel,
            geo_layers: None,
            applied_theme: None,
            config,
        }
    }

    /// Picks up the atlas once the download finishes.
    fn poll_geo_load(&mut self) {
        let Some(result) = self.geo_channel.try_recv() else {
            return;
        };
        match result {
            Ok(layers) => self.geo_layers = Some(layers),
            Err(e) => log::error!("Failed to load world atlas: {}", e),
        }
    }

    /// Mirrors the view into storage and, once the debounce settles, the URL.
    fn sync_view_state(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Some(update) = self.view_manager.sync(&self.state.view, now) {
            if let Err(e) = state::url_state::push_to_url(update.position, update.theme) {
                log::warn!("Failed to update URL: {}", e);
            }
        }

        // Wake up again when the pending URL write is due.
        if let Some(remaining) = self.view_manager.pending_url_write(now) {
            ctx.request_repaint_after(remaining);
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        let theme = self.state.view.theme;
        if self.applied_theme != Some(theme) {
            log::debug!("Applying theme {}", theme.key());
            ctx.set_visuals(ui::theme_visuals(theme));
            self.applied_theme = Some(theme);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn open_store() -> Box<dyn KeyValueStore> {
    match storage::LocalStorageStore::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("{}; view settings will not persist", e);
            Box::new(storage::MemoryStore::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_store() -> Box<dyn KeyValueStore> {
    Box::new(storage::MemoryStore::new())
}

impl eframe::App for MercatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_geo_load();
        self.apply_theme(ctx);

        let directions = input::take_arrow_keys(ctx);
        input::apply_directions(&mut self.state, &directions, self.config.key_step);

        let map_rect =
            ui::render_canvas(ctx, &mut self.state, self.geo_layers.as_ref(), &self.config);
        ui::render_menu(ctx, &mut self.state, map_rect, &self.config);

        self.sync_view_state(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.view_manager.cancel_pending();
    }
}
