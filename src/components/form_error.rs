use crate::prelude::*;

use crate::components::svg::{AlertCircle, DrawSvg, SvgSize::Size4};

/// Displays a single form message under an input
#[component]
pub fn FormError(message: CCStr) -> Element {
    rsx! {
        div { class: "fieldset-label text-error flex items-center gap-1",
            DrawSvg::<AlertCircle> { size: Size4 }
            span { "{message}" }
        }
    }
}
