//! Contact form engine: phone formatting, field validation and a
//! retrying submission state machine behind a view trait.

pub mod cli;
pub mod form;
pub mod phone;
pub mod report;
pub mod scenario;
pub mod submit;
pub mod trace;
