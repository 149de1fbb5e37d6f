use crate::autocomplete::AutocompleteOptions;

const ENV_API_KEY: &str = "ADDRESS_FIELD_MAPS_API_KEY";
const ENV_LANGUAGE: &str = "ADDRESS_FIELD_MAPS_LANGUAGE";
const ENV_REGION: &str = "ADDRESS_FIELD_MAPS_REGION";
const ENV_COUNTRIES: &str = "ADDRESS_FIELD_MAPS_COUNTRIES";

/// Settings for the maps provider and the autocomplete widgets it creates
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapsConfig {
    pub api_key: Option<String>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub autocomplete: AutocompleteOptions,
}

impl MapsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Blank values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let mut autocomplete = AutocompleteOptions::default();
        if let Some(countries) = get(ENV_COUNTRIES) {
            autocomplete.country_restrictions = countries
                .split(',')
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect();
        }

        let config = Self {
            api_key: get(ENV_API_KEY),
            language: get(ENV_LANGUAGE),
            region: get(ENV_REGION),
            autocomplete,
        };
        log::debug!(
            "MapsConfig loaded: api_key set={}, language={:?}, region={:?}, countries={:?}",
            config.api_key.is_some(),
            config.language,
            config.region,
            config.autocomplete.country_restrictions
        );
        config
    }
}
