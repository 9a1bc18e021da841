mod provincial_body;

pub use provincial_body::*;
