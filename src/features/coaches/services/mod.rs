mod coach_service;

pub use coach_service::CoachService;
