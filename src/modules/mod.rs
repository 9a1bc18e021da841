//! Modules layer - Infrastructure components behind the features
//!
//! Contains the stores and the live connection registry the features are built on.

pub mod club_store;
pub mod directory;
pub mod notifications;
pub mod sequence;
