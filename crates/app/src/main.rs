use std::sync::Arc;

use backend::{ApiConfig, Backend};
use dioxus::LaunchBuilder;
use dioxus::logger::tracing::Level;
use services::{AppServices, Clock, SessionStore};
use tracing::info;
use ui::{App, UiApp, build_app_context};

#[cfg(target_arch = "wasm32")]
mod cookie_store {
    use services::SessionStore;
    use taskboard_core::model::{
        SessionPersistence, clear_persistence_cookie, clear_session_cookie, persistence_cookie,
        persistence_from_cookies, session_cookie, token_from_cookies,
    };
    use tracing::warn;
    use wasm_bindgen::JsCast;
    use web_sys::HtmlDocument;

    /// Keeps the bearer token in the `token` cookie and its flow next to it.
    pub struct CookieSessionStore {
        secure: bool,
    }

    impl CookieSessionStore {
        pub fn new(secure: bool) -> Self {
            Self { secure }
        }

        fn write(&self, cookie: &str) {
            let Some(document) = html_document() else {
                warn!("no document; session cookie not written");
                return;
            };
            if let Err(err) = document.set_cookie(cookie) {
                warn!(?err, "failed to write session cookie");
            }
        }
    }

    fn html_document() -> Option<HtmlDocument> {
        web_sys::window()?
            .document()?
            .dyn_into::<HtmlDocument>()
            .ok()
    }

    impl SessionStore for CookieSessionStore {
        fn load(&self) -> Option<(String, SessionPersistence)> {
            let cookies = html_document()?.cookie().ok()?;
            let token = token_from_cookies(&cookies)?;
            Some((token, persistence_from_cookies(&cookies)))
        }

        fn save(&self, token: &str, persistence: SessionPersistence) {
            self.write(&session_cookie(token, persistence, self.secure));
            self.write(&persistence_cookie(persistence, self.secure));
        }

        fn clear(&self) {
            self.write(&clear_session_cookie());
            self.write(&clear_persistence_cookie());
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn session_store(config: &ApiConfig) -> Arc<dyn SessionStore> {
    Arc::new(cookie_store::CookieSessionStore::new(config.secure_cookie))
}

// Native builds have no cookie jar; the session lasts as long as the process.
#[cfg(not(target_arch = "wasm32"))]
fn session_store(_config: &ApiConfig) -> Arc<dyn SessionStore> {
    Arc::new(services::MemorySessionStore::new())
}

fn main() {
    dioxus::logger::init(Level::INFO).ok();

    let config = ApiConfig::from_env();
    info!(api = %config.base_url, "starting taskboard");

    let backend = Backend::http(&config);
    let services = AppServices::new(&backend, Clock::default_clock(), session_store(&config));
    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    LaunchBuilder::new().with_context(context).launch(App);
}
