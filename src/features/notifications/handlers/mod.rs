mod stream_handler;

pub use stream_handler::*;
