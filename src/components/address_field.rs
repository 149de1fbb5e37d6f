use crate::prelude::*;

use std::cell::RefCell;

use crate::{
    autocomplete::{AutocompleteBinding, AutocompleteService, InputTarget},
    components::{
        form_error::FormError,
        svg::{DrawSvg, MapPin, SvgSize::Size5},
    },
    utils::CheapClone,
};

pub const LOADING_PLACEHOLDER: &str = "Loading address search...";
pub const READY_PLACEHOLDER: &str = "Start typing an address...";
pub const UNAVAILABLE_MESSAGE: &str = "Address search is currently unavailable";

/// What the field looks like for a given readiness and validation error
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPresentation {
    pub disabled: bool,
    pub placeholder: &'static str,
    pub error_styling: bool,
    /// Validation error first, then the unavailability notice
    pub messages: Vec<CCStr>,
}
impl FieldPresentation {
    pub fn new(readiness: MapsReadiness, error: Option<&str>) -> Self {
        let error = error.filter(|e| !e.is_empty());
        let mut messages = Vec::with_capacity(2);
        if let Some(error) = error {
            messages.push(CCStr::from(error));
        }
        if readiness.is_unavailable() {
            messages.push(CCStr::from(UNAVAILABLE_MESSAGE));
        }
        Self {
            disabled: !readiness.is_loaded,
            placeholder: if readiness.is_loaded {
                READY_PLACEHOLDER
            } else {
                LOADING_PLACEHOLDER
            },
            error_styling: error.is_some(),
            messages,
        }
    }
}

/// Text input for an address, with place suggestions from the maps provider.
///
/// The value is owned by the caller: every keystroke is reported through
/// `onchange`, and so is the formatted address of a selected suggestion,
/// replacing what was typed.
#[component]
pub fn AddressField(
    label: String,
    name: String,
    value: String,
    onchange: EventHandler<String>,
    #[props(default = false)] required: bool,
    error: Option<String>,
) -> Element {
    let readiness = use_maps_readiness();
    let factory = try_use_context::<AutocompleteService>();
    let target = use_hook(InputTarget::generate);
    let binding = use_hook(|| CheapClone::new(RefCell::new(AutocompleteBinding::default())));
    let mut attached = use_signal(|| false);

    log::debug!("AddressField {target} Rendered");

    use_hook(|| {
        if factory.is_none() {
            log::warn!("No autocomplete service in context, AddressField is a plain text input");
        }
    });

    let effect_binding = binding.clone();
    let effect_target = target.clone();
    use_effect(move || {
        let readiness = readiness();
        let target = attached().then_some(&effect_target);
        let Some(factory) = factory.as_ref() else {
            return;
        };
        effect_binding
            .borrow_mut()
            .sync(readiness, target, &**factory, move |address| {
                onchange.call(address)
            });
    });

    let drop_target = target.clone();
    use_drop(move || {
        let mut binding = binding.borrow_mut();
        log::debug!("AddressField {drop_target} Dropped ({:?})", binding.state());
        binding.teardown();
    });

    let FieldPresentation {
        disabled,
        placeholder,
        error_styling,
        messages,
    } = FieldPresentation::new(readiness(), error.as_deref());

    rsx! {
        fieldset { class: "fieldset w-full",
            label {
                class: "fieldset-legend flex items-center gap-2",
                r#for: "{target}",
                DrawSvg::<MapPin> { size: Size5 }
                "{label}"
            }
            div { class: "relative",
                div { class: "absolute left-3 top-1/2 -translate-y-1/2 z-10 pointer-events-none text-base-content/40",
                    DrawSvg::<MapPin> { size: Size5 }
                }
                input {
                    id: "{target}",
                    r#type: "text",
                    class: "input w-full pl-10",
                    class: if error_styling { "input-error" },
                    name: "{name}",
                    value: "{value}",
                    required,
                    disabled,
                    placeholder,
                    autocomplete: "off",
                    oninput: move |evt| onchange.call(evt.value()),
                    onmounted: move |_| attached.set(true),
                }
            }
            for (i , message) in messages.into_iter().enumerate() {
                FormError { key: "{i}", message }
            }
        }
    }
}
