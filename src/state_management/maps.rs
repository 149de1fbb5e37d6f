use dioxus::prelude::*;

use futures_util::future::{FutureExt, LocalBoxFuture};

use crate::{config::MapsConfig, utils::log_error, utils::CheapClone};

const GOOGLE_MAPS_JS_URL: &str = "https://maps.googleapis.com/maps/api/js";

/// Whether the maps provider finished initializing, and whether it failed to.
///
/// `load_error` wins over `is_loaded` when deciding if address search is
/// available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapsReadiness {
    pub is_loaded: bool,
    pub load_error: bool,
}
impl MapsReadiness {
    pub fn loading() -> Self {
        Self::default()
    }
    pub fn loaded() -> Self {
        Self {
            is_loaded: true,
            load_error: false,
        }
    }
    pub fn failed() -> Self {
        Self {
            is_loaded: false,
            load_error: true,
        }
    }
    pub fn is_unavailable(self) -> bool {
        self.load_error
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MapsError {
    #[error("No maps API key configured")]
    MissingApiKey,
    #[error("Invalid maps API key")]
    InvalidApiKey,
    #[error("The maps script failed to load")]
    ScriptFailed,
    #[error("Maps bridge error: {0}")]
    Bridge(String),
}

/// Loads the external maps capability once for the whole session
pub trait MapsLoader {
    fn load(&self) -> LocalBoxFuture<'static, Result<(), MapsError>>;
}

/// Injects the Google Maps JavaScript API (places library) into the page
#[derive(Debug, Clone)]
pub struct GoogleMapsLoader {
    config: MapsConfig,
}
impl GoogleMapsLoader {
    pub fn new(config: MapsConfig) -> Self {
        Self { config }
    }

    fn script_url(&self) -> Result<String, MapsError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(MapsError::MissingApiKey)?;
        let is_url_safe =
            |s: &str| s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !is_url_safe(api_key) {
            return Err(MapsError::InvalidApiKey);
        }

        let mut url = format!("{GOOGLE_MAPS_JS_URL}?key={api_key}&libraries=places");
        if let Some(language) = self.config.language.as_deref().filter(|&l| is_url_safe(l)) {
            url.push_str(&format!("&language={language}"));
        }
        if let Some(region) = self.config.region.as_deref().filter(|&r| is_url_safe(r)) {
            url.push_str(&format!("&region={region}"));
        }
        Ok(url)
    }
}

impl MapsLoader for GoogleMapsLoader {
    fn load(&self) -> LocalBoxFuture<'static, Result<(), MapsError>> {
        let url = self.script_url();
        async move { inject_script(url?).await }.boxed_local()
    }
}

async fn inject_script(url: String) -> Result<(), MapsError> {
    let src = serde_json::to_string(&url).map_err(|e| MapsError::Bridge(e.to_string()))?;
    let mut eval = document::eval(&format!(
        r#"
        if (window.google && window.google.maps && window.google.maps.places) {{
            dioxus.send(true);
        }} else {{
            const script = document.createElement("script");
            script.src = {src};
            script.async = true;
            script.onload = () => dioxus.send(true);
            script.onerror = () => dioxus.send(false);
            document.head.appendChild(script);
        }}
    "#
    ));
    match eval.recv::<bool>().await {
        Ok(true) => Ok(()),
        Ok(false) => Err(MapsError::ScriptFailed),
        Err(e) => Err(MapsError::Bridge(e.to_string())),
    }
}

/// Starts loading the maps provider and shares its readiness with every
/// component below through the context.
pub(super) fn use_maps_service(loader: CheapClone<dyn MapsLoader>) -> Signal<MapsReadiness> {
    let mut readiness = use_context_provider(|| Signal::new(MapsReadiness::loading()));
    use_future(move || {
        let loader = loader.clone();
        async move {
            log::info!("maps_service - start");
            match loader.load().await {
                Ok(()) => {
                    log::info!("maps_service - maps loaded");
                    readiness.set(MapsReadiness::loaded());
                }
                Err(e) => {
                    log_error(e);
                    readiness.set(MapsReadiness::failed());
                }
            }
        }
    });
    readiness
}

/// Read the shared maps readiness.
///
/// Without a maps service above in the tree, the readiness stays at loading forever.
pub fn use_maps_readiness() -> ReadOnlySignal<MapsReadiness> {
    let fallback = use_signal(MapsReadiness::loading);
    let readiness = try_use_context::<Signal<MapsReadiness>>();
    use_hook(|| {
        if readiness.is_none() {
            log::warn!("No maps service in context, address search stays disabled");
        }
    });
    readiness.map_or_else(|| fallback.into(), ReadOnlySignal::from)
}
