mod location;

pub use location::LocationInfo;
