mod coach_dto;

pub use coach_dto::*;
