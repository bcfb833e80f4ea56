pub mod controller;
pub mod outcome;
pub mod responder;
pub mod view;
