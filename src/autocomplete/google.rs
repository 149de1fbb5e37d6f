use dioxus::prelude::*;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde::Deserialize;

use super::{
    AutocompleteError, AutocompleteFactory, AutocompleteHandle, AutocompleteOptions, InputTarget,
    ListenerSet, Place,
};

/// Registry of live widgets on the JavaScript side, keyed by input id
const JS_REGISTRY: &str = "window.__addressFieldAutocompletes";

/// Messages sent back by the bridge script
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum BridgeMessage {
    Bound,
    Unavailable,
    Error { message: String },
    Place(Place),
}

/// Creates Google Places autocomplete widgets on the page through `document::eval`.
///
/// Must be called from within a Dioxus scope: the task receiving the
/// selections is spawned in the calling scope and dies with it.
#[derive(Debug, Clone, Default)]
pub struct GooglePlacesFactory {
    options: AutocompleteOptions,
}
impl GooglePlacesFactory {
    pub fn new(options: AutocompleteOptions) -> Self {
        Self { options }
    }

    fn js_options(&self) -> serde_json::Value {
        let mut options = serde_json::json!({
            "types": self.options.types,
            "fields": self.options.fields,
        });
        if !self.options.country_restrictions.is_empty() {
            options["componentRestrictions"] =
                serde_json::json!({ "country": self.options.country_restrictions });
        }
        options
    }
}

impl AutocompleteFactory for GooglePlacesFactory {
    fn create(
        &self,
        target: &InputTarget,
    ) -> Result<Option<Rc<dyn AutocompleteHandle>>, AutocompleteError> {
        if target.id().is_empty() {
            return Err(AutocompleteError::InvalidTarget(target.0.clone()));
        }
        let id = serde_json::to_string(target.id())
            .map_err(|e| AutocompleteError::Provider(e.to_string()))?;
        let options = serde_json::to_string(&self.js_options())
            .map_err(|e| AutocompleteError::Provider(e.to_string()))?;

        let mut eval = document::eval(&format!(
            r#"
            try {{
                const input = document.getElementById({id});
                const places = window.google && window.google.maps && window.google.maps.places;
                if (!input || !places) {{
                    dioxus.send({{ kind: "unavailable" }});
                }} else {{
                    {JS_REGISTRY} = {JS_REGISTRY} || {{}};
                    const instance = new places.Autocomplete(input, {options});
                    {JS_REGISTRY}[{id}] = instance;
                    instance.addListener("place_changed", () => {{
                        const place = instance.getPlace() || {{}};
                        dioxus.send({{ kind: "place", formatted_address: place.formatted_address ?? null }});
                    }});
                    dioxus.send({{ kind: "bound" }});
                }}
            }} catch (e) {{
                dioxus.send({{ kind: "error", message: String(e) }});
            }}
        "#
        ));

        let handle = Rc::new(GooglePlacesHandle {
            target: target.clone(),
            listeners: ListenerSet::default(),
            place: RefCell::new(Place::default()),
            task: Cell::new(None),
        });
        let weak_handle: Weak<GooglePlacesHandle> = Rc::downgrade(&handle);
        let target = target.clone();
        let task = spawn(async move {
            loop {
                match eval.recv::<BridgeMessage>().await {
                    Ok(BridgeMessage::Bound) => {
                        log::debug!("GooglePlacesHandle {target} - widget created");
                    }
                    Ok(BridgeMessage::Unavailable) => {
                        log::warn!(
                            "GooglePlacesHandle {target} - input or places library missing, no suggestions"
                        );
                        break;
                    }
                    Ok(BridgeMessage::Error { message }) => {
                        log::error!("Error initializing autocomplete: {message}");
                        break;
                    }
                    Ok(BridgeMessage::Place(place)) => {
                        let Some(handle) = weak_handle.upgrade() else {
                            break;
                        };
                        handle.dispatch(place);
                    }
                    Err(e) => {
                        log::debug!("GooglePlacesHandle {target} - bridge closed: {e}");
                        break;
                    }
                }
            }
        });
        handle.task.set(Some(task));

        Ok(Some(handle as Rc<dyn AutocompleteHandle>))
    }
}

pub struct GooglePlacesHandle {
    target: InputTarget,
    listeners: ListenerSet,
    place: RefCell<Place>,
    task: Cell<Option<Task>>,
}
impl GooglePlacesHandle {
    fn dispatch(&self, place: Place) {
        *self.place.borrow_mut() = place;
        self.listeners.notify();
    }
}

impl AutocompleteHandle for GooglePlacesHandle {
    fn on_place_selected(&self, listener: Box<dyn FnMut()>) {
        self.listeners.add(listener);
    }

    fn selected_place(&self) -> Place {
        self.place.borrow().clone()
    }

    fn release_all_listeners(&self) {
        log::debug!("GooglePlacesHandle {} - releasing listeners", self.target);
        self.listeners.clear();
        if let Some(task) = self.task.take() {
            task.cancel();
        }
        let Ok(id) = serde_json::to_string(self.target.id()) else {
            return;
        };
        document::eval(&format!(
            r#"
            const registry = {JS_REGISTRY} || {{}};
            const instance = registry[{id}];
            if (instance && window.google && window.google.maps) {{
                window.google.maps.event.clearInstanceListeners(instance);
            }}
            delete registry[{id}];
        "#
        ));
    }
}
