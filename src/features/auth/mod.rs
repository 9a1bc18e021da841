pub mod model;

pub use model::AuthenticatedCoach;
