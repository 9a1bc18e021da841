//! Provincial bodies and the approval workflow between national coaches and
//! the coaches they ask to join.
//!
//! | Method | Path                                         | Caller           |
//! |--------|----------------------------------------------|------------------|
//! | POST   | `/api/provinces/requests/{coach_id}`         | national coach   |
//! | POST   | `/api/provinces/{body_id}/decision?accept=`  | requested coach  |
//! | PUT    | `/api/provinces/officers`                    | national coach   |
//! | GET    | `/api/provinces/mine`                        | national coach   |
//! | GET    | `/api/provinces/requests`                    | any coach        |
//! | GET    | `/api/provinces/region/{country}/{province}` | any coach        |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ApprovalService;
