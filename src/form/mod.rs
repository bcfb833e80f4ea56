pub mod error;
pub mod form_model;
pub mod validation;
