pub mod address_field;
pub mod form_error;
pub mod svg;
