mod visitor;

pub use visitor::{CountryCount, NewVisitor, Visitor};
