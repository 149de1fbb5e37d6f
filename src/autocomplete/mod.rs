use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Deserialize;

use crate::utils::{CCStr, CheapClone};

mod binding;
mod google;

pub use binding::AutocompleteBinding;
pub use google::GooglePlacesFactory;

#[derive(Debug, thiserror::Error)]
pub enum AutocompleteError {
    #[error("Cannot bind autocomplete to input \"{0}\"")]
    InvalidTarget(CCStr),
    #[error("Autocomplete provider error: {0}")]
    Provider(String),
}

/// Identity of the `<input>` element an autocomplete widget is bound to.
///
/// The rendered input carries [InputTarget::id] as its DOM `id`, which is
/// how providers living on the JavaScript side locate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTarget(CCStr);
impl InputTarget {
    pub fn generate() -> Self {
        Self(CCStr::from(format!("address-field-{}", uuid::Uuid::new_v4())))
    }
    pub fn id(&self) -> &str {
        &self.0
    }
}
impl core::fmt::Display for InputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
impl From<&str> for InputTarget {
    fn from(value: &str) -> Self {
        Self(CCStr::from(value))
    }
}

/// The place currently selected in an autocomplete widget
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub formatted_address: Option<String>,
}
impl Place {
    #[cfg(test)]
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            formatted_address: Some(address.into()),
        }
    }
    /// The formatted address, if the place carries a non-empty one
    pub fn address(&self) -> Option<&str> {
        self.formatted_address
            .as_deref()
            .filter(|address| !address.is_empty())
    }
}

/// A provider autocomplete widget bound to exactly one input element
pub trait AutocompleteHandle {
    /// Register a listener called each time the user picks a suggestion
    fn on_place_selected(&self, listener: Box<dyn FnMut()>);
    fn selected_place(&self) -> Place;
    fn release_all_listeners(&self);
}

/// Creates [AutocompleteHandle]s.
///
/// `Ok(None)` means the provider cannot create a widget right now; the field
/// then behaves as a plain text input.
pub trait AutocompleteFactory {
    fn create(
        &self,
        target: &InputTarget,
    ) -> Result<Option<Rc<dyn AutocompleteHandle>>, AutocompleteError>;
}

/// Factory shared through the Dioxus context
pub type AutocompleteService = CheapClone<dyn AutocompleteFactory>;

/// Options passed to the provider when creating a widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteOptions {
    pub types: Vec<String>,
    pub fields: Vec<String>,
    pub country_restrictions: Vec<String>,
}
impl Default for AutocompleteOptions {
    fn default() -> Self {
        Self {
            types: vec!["address".to_owned()],
            fields: vec!["formatted_address".to_owned()],
            country_restrictions: vec![],
        }
    }
}

/// Listener list for [AutocompleteHandle] implementations.
///
/// Listeners may clear the set while being notified; listeners registered
/// before a clear are then dropped instead of being restored.
#[derive(Default)]
pub struct ListenerSet {
    listeners: RefCell<Vec<Box<dyn FnMut()>>>,
    generation: Cell<u64>,
}
impl ListenerSet {
    pub fn add(&self, listener: Box<dyn FnMut()>) {
        self.listeners.borrow_mut().push(listener);
    }

    pub fn clear(&self) {
        self.generation.set(self.generation.get() + 1);
        self.listeners.borrow_mut().clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn notify(&self) {
        let generation = self.generation.get();
        let mut notified = self.listeners.take();
        for listener in notified.iter_mut() {
            listener();
        }
        if self.generation.get() == generation {
            let mut listeners = self.listeners.borrow_mut();
            // Keep listeners added during notification after the original ones
            notified.append(&mut listeners);
            *listeners = notified;
        }
    }
}
