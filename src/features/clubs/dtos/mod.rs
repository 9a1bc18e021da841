mod club_dto;

pub use club_dto::*;
