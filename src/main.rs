#![windows_subsystem = "windows"]
mod autocomplete;
mod components;
mod config;
mod state_management;
mod utils;

mod prelude {
    pub use super::state_management::prelude::*;
    pub use super::utils::CCStr;
    pub use dioxus::prelude::*;
}

use prelude::*;

use components::address_field::AddressField;
use config::MapsConfig;

static TITLE: &'static str = "Address Field";

#[allow(non_snake_case)]
fn App() -> Element {
    log::debug!("App reload");

    let config = use_hook(MapsConfig::from_env);
    crate::state_management::use_init_services(config);

    use_drop(|| log::debug!("App Dropped"));

    rsx! {
        document::Title { "{TITLE}" }
        div { id: "app", class: "text-base p-8 max-w-xl", ShippingForm {} }
    }
}

/// Small form hosting an [AddressField]
#[component]
fn ShippingForm() -> Element {
    let mut address = use_signal(String::new);
    let mut touched = use_signal(|| false);

    let address_error = use_memo(move || {
        (touched() && address.read().trim().is_empty()).then(|| "Address is required".to_owned())
    });

    rsx! {
        div { class: "card border border-base-content/5 shadow-md",
            div { class: "card-body",
                h2 { class: "card-title", "Shipping" }
                AddressField {
                    label: String::from("Delivery address"),
                    name: String::from("delivery_address"),
                    value: address(),
                    onchange: move |new_address: String| {
                        log::debug!("ShippingForm - address changed to {new_address:?}");
                        touched.set(true);
                        address.set(new_address);
                    },
                    required: true,
                    error: address_error(),
                }
                div { class: "text-sm text-base-content/60",
                    if address.read().is_empty() {
                        "No address yet"
                    } else {
                        "Current: {address}"
                    }
                }
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    log::info!("starting app");

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, WindowBuilder};
        LaunchBuilder::desktop()
            .with_cfg(
                Config::new().with_menu(None).with_window(
                    WindowBuilder::new()
                        .with_title(TITLE)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(800, 600))
                        .with_resizable(true),
                ),
            )
            .launch(App)
    }
    #[cfg(not(feature = "desktop"))]
    dioxus::launch(App)
}
