mod maps;

use dioxus::prelude::*;

use crate::{
    autocomplete::{AutocompleteService, GooglePlacesFactory},
    config::MapsConfig,
    utils::CheapClone,
};

pub use maps::{use_maps_readiness, GoogleMapsLoader, MapsLoader, MapsReadiness};

pub fn use_init_services(config: MapsConfig) {
    log::debug!("init_services - start");
    let loader = use_hook(|| {
        CheapClone::new(GoogleMapsLoader::new(config.clone())) as CheapClone<dyn MapsLoader>
    });
    let _ = maps::use_maps_service(loader);
    use_context_provider(|| {
        CheapClone::new(GooglePlacesFactory::new(config.autocomplete.clone())) as AutocompleteService
    });
    log::debug!("init_services - finished");
}

pub mod prelude {
    pub use super::{use_maps_readiness, MapsReadiness};
}
