pub mod auth;
pub mod clubs;
pub mod coaches;
pub mod notifications;
pub mod provinces;
