//! Club registration and lookup.
//!
//! | Method | Path                                     |
//! |--------|------------------------------------------|
//! | POST   | `/api/clubs`                             |
//! | GET    | `/api/clubs/mine`                        |
//! | GET    | `/api/clubs/code/{club_code}`            |
//! | GET    | `/api/clubs/region/{country}/{province}` |
//! | GET    | `/api/clubs/{club_id}`                   |
//!
//! Every route requires a coach identity.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{ClubService, CodeAllocator};
