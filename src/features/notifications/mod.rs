//! Live notification stream.
//!
//! | Method | Path                        |
//! |--------|-----------------------------|
//! | GET    | `/api/notifications/stream` |

pub mod handlers;
pub mod routes;
