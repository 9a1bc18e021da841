//! Coach records.
//!
//! | Method | Path                      | Identity |
//! |--------|---------------------------|----------|
//! | POST   | `/api/coaches`            | none     |
//! | GET    | `/api/coaches`            | required |
//! | GET    | `/api/coaches/{coach_id}` | required |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CoachService;
