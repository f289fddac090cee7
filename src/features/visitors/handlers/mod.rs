mod visitor_handler;

pub use visitor_handler::*;
