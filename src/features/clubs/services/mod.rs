mod club_service;
mod code_allocator;

pub use club_service::ClubService;
pub use code_allocator::{ClubCode, CodeAllocator};
