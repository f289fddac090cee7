//! Marketing site: landing page with visitor tracking, a contact form and
//! the batch tools that copy the legacy SQLite data into the primary store.

pub mod core;
pub mod features;
pub mod shared;
