mod coach_handler;

pub use coach_handler::*;
