//! JS-facing exports.
//!
//! # Responsibility
//! - Expose the guestbook and ambient layers to page scripts via
//!   wasm-bindgen.
//!
//! # Invariants
//! - Exported functions never throw; failures are reported in return values.
//! - Envelopes are JSON strings with the field names of `crate::api`.

use crate::api::{self, GuestbookView};
use crate::console;
use crate::dom::AmbientLayer;
use crate::local_storage::LocalStorage;
use crate::style::reveal_styles;
use folio_core::{
    init_site_config, site_config, Clock, GuestbookStore, Reveal as RevealAnimation, RevealKind,
    SiteConfig,
};
use log::{warn, LevelFilter};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// Wall clock backed by `Date.now()`.
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}

/// Routes `log` output to the browser console.
///
/// Accepts `trace|debug|info|warn|error`; returns an empty string on
/// success and an error message otherwise.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) -> String {
    let filter = match level.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        other => {
            return format!("unsupported log level `{other}`; expected trace|debug|info|warn|error")
        }
    };
    console::init(filter);
    String::new()
}

/// Installs page configuration from JSON; empty input keeps defaults.
///
/// Returns an empty string on success and an error message otherwise.
#[wasm_bindgen(js_name = configure)]
pub fn configure(config_json: &str) -> String {
    let parsed = if config_json.trim().is_empty() {
        Ok(SiteConfig::default())
    } else {
        SiteConfig::from_json_str(config_json)
    };
    match parsed.and_then(init_site_config) {
        Ok(_) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Adds the configured theme class to `<html>`.
///
/// Returns `false` when there is no document to update.
#[wasm_bindgen(js_name = applyTheme)]
pub fn apply_theme() -> bool {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        warn!("event=theme_apply module=web status=degraded reason=no_document");
        return false;
    };
    match site_config().theme.root_class() {
        Some(class) => root.class_list().add_1(class).is_ok(),
        None => true,
    }
}

#[wasm_bindgen(js_name = canSubmit)]
pub fn can_submit(author: &str, body: &str) -> bool {
    api::can_submit(author, body)
}

#[wasm_bindgen(js_name = bodyCounter)]
pub fn body_counter(body: &str) -> String {
    api::message_counter(body)
}

/// Guestbook bound to `window.localStorage`.
#[wasm_bindgen]
pub struct Guestbook {
    view: GuestbookView<LocalStorage, BrowserClock>,
}

#[wasm_bindgen]
impl Guestbook {
    /// Opens the configured slot and loads persisted messages.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Guestbook {
        let key = site_config().guestbook.storage_key;
        let store = GuestbookStore::with_key(LocalStorage::open(), BrowserClock, key);
        Guestbook {
            view: GuestbookView::open(store),
        }
    }

    /// Re-reads storage; returns a JSON `GuestbookSnapshot`.
    pub fn load(&mut self) -> String {
        api::to_json(&self.view.reload())
    }

    /// JSON `GuestbookSnapshot`.
    pub fn messages(&self) -> String {
        api::to_json(&self.view.snapshot())
    }

    /// JSON `ActionResponse`.
    pub fn submit(&mut self, author: &str, body: &str) -> String {
        api::to_json(&self.view.submit(author, body))
    }

    /// JSON `ActionResponse`.
    pub fn clear(&mut self) -> String {
        api::to_json(&self.view.clear())
    }

    #[wasm_bindgen(js_name = formatRelativeTime)]
    pub fn format_relative_time(&self, timestamp: f64) -> String {
        self.view.format_relative_time(timestamp as i64)
    }
}

impl Default for Guestbook {
    fn default() -> Self {
        Self::new()
    }
}

/// Particle field and orbs rendered into a container element.
#[wasm_bindgen]
pub struct ParticleLayer {
    layer: Option<AmbientLayer>,
}

#[wasm_bindgen]
impl ParticleLayer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ParticleLayer {
        ParticleLayer { layer: None }
    }

    /// Spawns nodes into `container` and starts animating.
    ///
    /// A second mount replaces the first. Returns `false` when the page
    /// lacks a window or document.
    pub fn mount(&mut self, container: HtmlElement) -> bool {
        self.unmount();
        self.layer = AmbientLayer::start(container, &site_config());
        self.layer.is_some()
    }

    /// Stops animating and removes every node; safe to call repeatedly.
    pub fn unmount(&mut self) {
        if let Some(mut layer) = self.layer.take() {
            layer.stop();
        }
    }

    #[wasm_bindgen(getter, js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.layer.as_ref().is_some_and(AmbientLayer::is_running)
    }
}

impl Default for ParticleLayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Entrance animation bound to one element.
///
/// `kind` is `section`, `form` or `new_message`; anything else falls back
/// to `section`.
#[wasm_bindgen]
pub struct Reveal {
    element: HtmlElement,
    animation: RevealAnimation,
}

#[wasm_bindgen]
impl Reveal {
    /// Starts the animation and writes its hidden first frame to `element`.
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str, element: HtmlElement) -> Reveal {
        let kind = RevealKind::from_name(kind).unwrap_or_else(|| {
            warn!("event=reveal_start module=web status=fallback kind={kind}");
            RevealKind::Section
        });
        let reveal = Reveal {
            element,
            animation: RevealAnimation::start(kind),
        };
        reveal.render();
        reveal
    }

    /// Advances by `dt_secs` and restyles the element.
    ///
    /// Returns `false` once the element has settled.
    pub fn tick(&mut self, dt_secs: f64) -> bool {
        self.animation.tick(dt_secs);
        self.render();
        !self.animation.is_finished()
    }

    /// Snaps the element to its settled state.
    pub fn finish(&mut self) {
        self.animation.finish();
        self.render();
    }

    fn render(&self) {
        let style = self.element.style();
        for (name, value) in reveal_styles(&self.animation.frame()) {
            let _ = style.set_property(name, &value);
        }
    }
}
