use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(unused)]
pub enum SvgSize {
    Full,
    Custom(&'static str),
    Size3,
    Size4,
    #[default]
    Size5,
    Size6,
}
impl SvgSize {
    fn class(self) -> &'static str {
        match self {
            Self::Full => "size-full",
            Self::Custom(s) => s,
            Self::Size3 => "size-3",
            Self::Size4 => "size-4",
            Self::Size5 => "size-5",
            Self::Size6 => "size-6",
        }
    }
}

pub trait DrawableSvg: 'static {
    fn path() -> &'static str;

    fn view_box() -> &'static str {
        "0 0 24 24"
    }
}

pub struct MapPin;
impl DrawableSvg for MapPin {
    fn path() -> &'static str {
        "M12 2C8.13 2 5 5.13 5 9c0 5.25 7 13 7 13s7-7.75 7-13c0-3.87-3.13-7-7-7zm0 9.5c-1.38 0-2.5-1.12-2.5-2.5s1.12-2.5 2.5-2.5 2.5 1.12 2.5 2.5-1.12 2.5-2.5 2.5z"
    }
}

pub struct AlertCircle;
impl DrawableSvg for AlertCircle {
    fn path() -> &'static str {
        "M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm1 15h-2v-2h2v2zm0-4h-2V7h2v6z"
    }
}

#[doc = "Properties for the [`DrawSvg`] component."]
#[allow(missing_docs)]
#[derive(Props, Clone, PartialEq)]
#[allow(non_camel_case_types)]
pub struct DrawSvgProps {
    pub base_class: Option<&'static str>,
    pub size: Option<SvgSize>,
}

/// # Props
/// *For details, see the [props struct definition](DrawSvgProps).*
/// - [`base_class`](DrawSvgProps::base_class) : `Option<&'static str>`
/// - [`size`](DrawSvgProps::size) : `Option<SvgSize>`
#[allow(non_snake_case)]
pub fn DrawSvg<S: DrawableSvg>(DrawSvgProps { base_class, size }: DrawSvgProps) -> Element {
    let base_class = base_class.unwrap_or("fill-current");
    let size_class = size.unwrap_or_default().class();
    rsx! {
        svg {
            xmlns: "http://www.w3.org/2000/svg",
            view_box: S::view_box(),
            class: "{base_class} {size_class}",
            path { d: S::path() }
        }
    }
}
