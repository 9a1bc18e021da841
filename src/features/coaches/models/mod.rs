mod coach;

pub use coach::*;
