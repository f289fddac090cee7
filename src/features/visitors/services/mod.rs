mod active_visitors;
mod visitor_service;

pub use active_visitors::ActiveVisitors;
pub use visitor_service::VisitorService;
